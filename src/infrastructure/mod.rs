pub mod database;
pub mod identity;
pub mod links;
pub mod locale;
pub mod memory;
pub mod repositories;
pub mod settings;
pub mod time;
pub mod util;
