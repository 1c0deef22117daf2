/// Check if a single character is CJK
#[inline]
pub fn is_cjk(c: char) -> bool {
    let code = c as u32;
    (0x4E00..=0x9FFF).contains(&code) || // CJK Unified Ideographs
    (0x3400..=0x4DBF).contains(&code) || // CJK Extension A
    (0x20000..=0x2A6DF).contains(&code) || // CJK Extension B
    (0xF900..=0xFAFF).contains(&code) || // CJK Compatibility Ideographs
    (0x3040..=0x309F).contains(&code) || // Hiragana
    (0x30A0..=0x30FF).contains(&code) || // Katakana
    (0x31F0..=0x31FF).contains(&code) || // Katakana Phonetic Extensions
    (0xAC00..=0xD7AF).contains(&code) || // Hangul Syllables
    (0x1100..=0x11FF).contains(&code) || // Hangul Jamo
    (0x3130..=0x318F).contains(&code) // Hangul Compatibility Jamo
}

/// Check if a single character is a Latin-script letter
#[inline]
pub fn is_latin_letter(c: char) -> bool {
    let code = c as u32;
    c.is_ascii_alphabetic() ||
    ((0x00C0..=0x024F).contains(&code) && c != '×' && c != '÷') // Latin-1 letters, Extended-A/B
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ideographs_and_syllabaries_are_cjk() {
        assert!(is_cjk('汉'));
        assert!(is_cjk('ひ'));
        assert!(is_cjk('ア'));
        assert!(is_cjk('글'));
        assert!(!is_cjk('a'));
        assert!(!is_cjk('，'));
    }

    #[test]
    fn multiplication_sign_is_not_latin() {
        assert!(is_latin_letter('ß'));
        assert!(!is_latin_letter('×'));
        assert!(!is_latin_letter('÷'));
    }
}
