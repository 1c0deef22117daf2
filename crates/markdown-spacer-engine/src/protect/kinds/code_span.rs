/// Code span inline type with owned delimiter constant.
///
/// A code span opens with a run of backticks and closes with a run of the
/// same length on the same line. Nothing inside is rewritten.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';
}
