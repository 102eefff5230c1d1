//! URL slug and route helpers shared by the variant resolver and the
//! comparison set.

/// Generate a URL-safe slug: lowercase, whitespace replaced by `-`, anything
/// outside `[a-z0-9-]` removed, and runs of `-` collapsed.
///
/// `"Galaxy S24 Ultra 12GB 256GB"` → `"galaxy-s24-ultra-12gb-256gb"`.
#[must_use]
pub fn slugify(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                Some(c)
            } else if c.is_whitespace() {
                Some('-')
            } else {
                None
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Client-side route for a product detail page.
#[must_use]
pub fn detail_route(slug: &str) -> String {
    format!("/products/detail/{slug}")
}

/// Strip all whitespace, as used for image directory names
/// (`"Galaxy S24"` → `"GalaxyS24"`).
#[must_use]
pub fn compact(input: &str) -> String {
    input.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_simple_name() {
        assert_eq!(slugify("Product X 128GB"), "product-x-128gb");
    }

    #[test]
    fn slugify_strips_punctuation() {
        assert_eq!(slugify("Redmi Note 13 (8GB/256GB)"), "redmi-note-13-8gb256gb");
    }

    #[test]
    fn slugify_collapses_repeated_whitespace() {
        assert_eq!(slugify("  iPhone   15  Pro  "), "iphone-15-pro");
    }

    #[test]
    fn slugify_drops_non_ascii() {
        // Accented letters are removed, not transliterated.
        assert_eq!(slugify("Điện thoại A"), "in-thoi-a");
    }

    #[test]
    fn slugify_keeps_existing_hyphens() {
        assert_eq!(slugify("Z-Fold 5"), "z-fold-5");
    }

    #[test]
    fn slugify_empty_input() {
        assert_eq!(slugify("  !! "), "");
    }

    #[test]
    fn detail_route_prefixes_path() {
        assert_eq!(detail_route("iphone-15-128gb"), "/products/detail/iphone-15-128gb");
    }

    #[test]
    fn compact_removes_all_whitespace() {
        assert_eq!(compact("iPhone 15 Pro Max"), "iPhone15ProMax");
    }
}
