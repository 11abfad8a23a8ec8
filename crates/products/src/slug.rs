//! URL slugs for product detail pages.

/// Lowercase `name`, collapse every run of characters outside `[a-z0-9]` into
/// a single `-`, and trim dashes from both ends.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_separators_and_trims() {
        assert_eq!(slugify("Steel Water Bottle"), "steel-water-bottle");
        assert_eq!(slugify("  --Hello,   World!!  "), "hello-world");
        assert_eq!(slugify("4K TV (55\")"), "4k-tv-55");
    }

    #[test]
    fn non_ascii_letters_are_separators() {
        assert_eq!(slugify("Café Crème"), "caf-cr-me");
        assert_eq!(slugify("日本"), "");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: slugs only contain `[a-z0-9-]`, never start/end with or double a dash.
            #[test]
            fn slug_shape(name in ".{0,64}") {
                let slug = slugify(&name);
                prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
                prop_assert!(!slug.starts_with('-'));
                prop_assert!(!slug.ends_with('-'));
                prop_assert!(!slug.contains("--"));
            }

            /// Property: slugify is idempotent.
            #[test]
            fn slug_is_idempotent(name in ".{0,64}") {
                let once = slugify(&name);
                prop_assert_eq!(slugify(&once), once.clone());
            }
        }
    }
}
