/// Derive a URL slug from a display name.
///
/// Lowercases, then collapses every run of characters outside `[a-z0-9]`
/// into a single `-`, with no leading or trailing hyphen. Idempotent.
///
/// ```
/// assert_eq!(youpp_core::slugify("  My Creative Studio! "), "my-creative-studio");
/// ```
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut gap = false;

    for ch in input.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if gap && !slug.is_empty() {
                slug.push('-');
            }
            gap = false;
            slug.push(ch);
        } else {
            gap = true;
        }
    }

    slug
}
