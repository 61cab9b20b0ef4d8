use crate::domain::content::SlugGenerator;
use slug::slugify;

/// ASCII slugs for the Latin part of a title. Ge'ez script is dropped by
/// `slugify`; callers fall back to a generated slug when nothing is left.
#[derive(Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        slugify(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_are_lowercase_and_hyphenated() {
        let slug = DefaultSlugGenerator.slugify("Faith, Hope & Love!");
        assert_eq!(slug, "faith-hope-love");
    }

    #[test]
    fn slugify_is_idempotent() {
        let once = DefaultSlugGenerator.slugify("  The Psalms of  Ethiopia ");
        assert_eq!(DefaultSlugGenerator.slugify(&once), once);
    }
}
