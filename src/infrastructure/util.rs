use crate::application::ports::util::SlugGenerator;
use slug::slugify;

/// Lower-case, dash-separated ASCII slugs.
#[derive(Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        slugify(input)
    }
}
