/// Inline HTML tags and autolinks: `<span>`, `</b>`, `<!-- x -->`,
/// `<https://example.com>`.
pub struct HtmlTag;

impl HtmlTag {
    pub const OPEN: u8 = b'<';
    pub const CLOSE: u8 = b'>';

    /// Whether the byte after `<` can start a tag name, closing tag,
    /// comment or autolink. `<5ms` and `< 3` are comparisons, not tags.
    pub fn starts_tag(b: u8) -> bool {
        b.is_ascii_alphabetic() || b == b'/' || b == b'!'
    }
}
