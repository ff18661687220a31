use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogSettingsDto {
    pub comments_allowed: bool,
    pub teasers_enabled: bool,
}
