use super::BlockQuote;

/// What a line starting with `$$` does to the math-block state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathLine {
    /// `$$` opens or closes a display block.
    Toggle,
    /// `$$ ... $$` opens and closes on the same line.
    SelfContained,
}

pub struct MathBlock;

impl MathBlock {
    pub const DELIM: &'static str = "$$";
    pub const INLINE: u8 = b'$';

    pub fn line(line: &str) -> Option<MathLine> {
        let content = BlockQuote::content(line);
        let rest = content.strip_prefix(Self::DELIM)?;
        if rest.contains(Self::DELIM) {
            Some(MathLine::SelfContained)
        } else {
            Some(MathLine::Toggle)
        }
    }

    /// Whether `line` ends an open display block.
    pub fn closes(line: &str) -> bool {
        BlockQuote::content(line).starts_with(Self::DELIM)
    }
}
