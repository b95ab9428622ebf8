//! `Link` header handling for paginated listings.

/// URL of the `rel="next"` entry in a GitHub `Link` header.
///
/// ```text
/// <https://api.github.com/user/1/repos?page=2>; rel="next", <…?page=5>; rel="last"
/// ```
pub fn next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        if !parts.any(|p| p.trim() == r#"rel="next""#) {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}
