/// Blockquote prefix knowledge.
///
/// Fences and math delimiters are recognized after any `>` prefixes, so a
/// code block inside a quote is protected the same way as a top-level one.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Byte offset of the first character after all blockquote prefixes and
    /// the indentation around them.
    ///
    /// Handles `> text`, `>> nested`, `> > spaced nested`, and tabs or
    /// spaces before or between prefixes.
    pub fn prefix_len(s: &str) -> usize {
        let b = s.as_bytes();
        let mut i = 0usize;

        loop {
            while i < b.len() && matches!(b[i], b' ' | b'\t') {
                i += 1;
            }
            if i < b.len() && b[i] == (Self::PREFIX as u8) {
                i += 1;
            } else {
                break;
            }
        }
        i
    }

    /// The line content after prefixes and indentation.
    pub fn content(s: &str) -> &str {
        &s[Self::prefix_len(s)..]
    }
}
