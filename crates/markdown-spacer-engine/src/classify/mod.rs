//! # Character Classification
//!
//! Assigns every character of a line to a [`CharClass`]. The spacing rules only
//! ever look at classes, never at raw characters.
//!
//! Classification is context-free except for joining punctuation: a `-`, `.`,
//! `:`, `/`, `_` or `'` sitting between two ASCII alphanumerics (`UTF-8`,
//! `1.2`, `12:30`) is a [`CharClass::Joiner`]; the same character anywhere
//! else is ordinary punctuation. The look-around is exactly one character on
//! each side.
//!
//! Unknown code points degrade to [`CharClass::Other`], which no rule reacts to.

mod ranges;

pub use ranges::{is_cjk, is_latin_letter};

/// The spacing class of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// Han ideographs, kana and hangul.
    Cjk,
    /// ASCII and Latin-script letters.
    Latin,
    /// ASCII digits.
    Digit,
    /// Opening brackets and quotes, ASCII and full-width.
    PunctOpen,
    /// Closing brackets, quotes and sentence marks, ASCII and full-width.
    PunctClose,
    /// Operators and other ASCII symbols.
    Symbol,
    /// Space or tab.
    Whitespace,
    /// Characters that open protected regions: backtick, tilde, dollar.
    Marker,
    /// Punctuation that glues two alphanumerics into one word.
    Joiner,
    /// Anything else. Inert.
    Other,
}

impl CharClass {
    /// Latin letters and digits, the side of a CJK boundary that gets a space.
    pub fn is_alnum(self) -> bool {
        matches!(self, CharClass::Latin | CharClass::Digit)
    }

    /// Letters, digits and CJK: anything that can be an operand or follow
    /// sentence punctuation.
    pub fn is_text(self) -> bool {
        self == CharClass::Cjk || self.is_alnum()
    }
}

/// Classifies a character with no context.
///
/// Joining punctuation is reported as its plain punctuation class here; use
/// [`classify`] when neighbours are available.
pub fn class_of(c: char) -> CharClass {
    match c {
        ' ' | '\t' => CharClass::Whitespace,
        '0'..='9' => CharClass::Digit,
        '`' | '~' | '$' => CharClass::Marker,
        '(' | '[' | '{' | '“' | '‘' | '《' | '〈' | '「' | '『' | '【' | '（' | '［' | '｛' => {
            CharClass::PunctOpen
        }
        ',' | '.' | ';' | ':' | '!' | '?' | ')' | ']' | '}' => CharClass::PunctClose,
        '”' | '’' | '》' | '〉' | '」' | '』' | '】' | '）' | '］' | '｝' | '，' | '。' | '、' | '；'
        | '：' | '！' | '？' => CharClass::PunctClose,
        c if c.is_ascii_punctuation() => CharClass::Symbol,
        c if is_latin_letter(c) => CharClass::Latin,
        c if is_cjk(c) => CharClass::Cjk,
        _ => CharClass::Other,
    }
}

/// Classifies the character starting at byte `index` of `text`.
///
/// Returns [`CharClass::Other`] when `index` is out of range or not on a
/// character boundary.
pub fn classify(text: &str, index: usize) -> CharClass {
    if !text.is_char_boundary(index) {
        return CharClass::Other;
    }
    let Some(c) = text[index..].chars().next() else {
        return CharClass::Other;
    };

    if is_joiner_candidate(c) {
        let before = text[..index].chars().next_back();
        let after = text[index + c.len_utf8()..].chars().next();
        if let (Some(b), Some(a)) = (before, after)
            && b.is_ascii_alphanumeric()
            && a.is_ascii_alphanumeric()
        {
            return CharClass::Joiner;
        }
    }

    class_of(c)
}

fn is_joiner_candidate(c: char) -> bool {
    matches!(c, '-' | '.' | ':' | '/' | '_' | '\'')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case('中', CharClass::Cjk)]
    #[case('か', CharClass::Cjk)]
    #[case('カ', CharClass::Cjk)]
    #[case('한', CharClass::Cjk)]
    #[case('a', CharClass::Latin)]
    #[case('é', CharClass::Latin)]
    #[case('7', CharClass::Digit)]
    #[case(' ', CharClass::Whitespace)]
    #[case('\t', CharClass::Whitespace)]
    #[case('`', CharClass::Marker)]
    #[case('$', CharClass::Marker)]
    #[case('（', CharClass::PunctOpen)]
    #[case('“', CharClass::PunctOpen)]
    #[case('。', CharClass::PunctClose)]
    #[case('，', CharClass::PunctClose)]
    #[case('+', CharClass::Symbol)]
    #[case('\u{3000}', CharClass::Other)]
    #[case('😀', CharClass::Other)]
    fn context_free_classes(#[case] c: char, #[case] expected: CharClass) {
        assert_eq!(class_of(c), expected);
    }

    #[rstest]
    #[case("UTF-8", 3, CharClass::Joiner)]
    #[case("1.2", 1, CharClass::Joiner)]
    #[case("12:30", 2, CharClass::Joiner)]
    #[case("a - b", 2, CharClass::Symbol)]
    #[case("end.", 3, CharClass::PunctClose)]
    #[case("中-文", 3, CharClass::Symbol)]
    fn joiners_need_alnum_on_both_sides(
        #[case] text: &str,
        #[case] index: usize,
        #[case] expected: CharClass,
    ) {
        assert_eq!(classify(text, index), expected);
    }

    #[test]
    fn out_of_range_index_is_other() {
        assert_eq!(classify("abc", 3), CharClass::Other);
        assert_eq!(classify("abc", 99), CharClass::Other);
    }

    #[test]
    fn non_boundary_index_is_other() {
        // '中' is three bytes wide
        assert_eq!(classify("中文", 1), CharClass::Other);
        assert_eq!(classify("中文", 3), CharClass::Cjk);
    }
}
