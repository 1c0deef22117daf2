use super::span::ProtectedSpan;

/// A byte cursor over one line for delimiter scanning.
///
/// All delimiters are ASCII, so stepping byte-wise through multi-byte
/// characters is harmless: continuation bytes never match a delimiter and
/// every recorded position sits on a delimiter, hence on a char boundary.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The line being scanned.
    pub s: &'a str,
    /// Current index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn at(s: &'a str, i: usize) -> Self {
        Self { s, i }
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Peeks `n` bytes ahead without advancing.
    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.s.as_bytes().get(self.i + n).copied()
    }

    /// The byte just before the cursor.
    pub fn prev(&self) -> Option<u8> {
        self.i.checked_sub(1).and_then(|p| self.s.as_bytes().get(p).copied())
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes().get(self.i..).is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.s.as_bytes().get(self.i).copied()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes, stopping at the end.
    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.s.len());
    }

    /// Length of the run of `b` starting at the cursor.
    pub fn run_len(&self, b: u8) -> usize {
        self.s.as_bytes()[self.i.min(self.s.len())..]
            .iter()
            .take_while(|&&x| x == b)
            .count()
    }

    /// If the cursor is inside one of `blocked`, jumps to its end and
    /// returns true.
    pub fn skip_blocked(&mut self, blocked: &[ProtectedSpan]) -> bool {
        match blocked.iter().find(|sp| sp.contains(self.i)) {
            Some(sp) => {
                self.i = sp.end;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protect::ProtectedKind;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("hello");
        assert_eq!(cur.i, 0);
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some(b'h'));
        assert_eq!(cur.bump(), Some(b'h'));
        assert_eq!(cur.prev(), Some(b'h'));
        assert_eq!(cur.peek_at(1), Some(b'l'));
    }

    #[test]
    fn cursor_starts_with() {
        let cur = Cursor::new("](target)");
        assert!(cur.starts_with(b"]("));
        assert!(!cur.starts_with(b")"));
    }

    #[test]
    fn empty_string_input() {
        let cur = Cursor::new("");
        assert!(cur.eof());
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.prev(), None);
        assert_eq!(cur.run_len(b'`'), 0);
    }

    #[test]
    fn bump_n_stops_at_end() {
        let mut cur = Cursor::new("hi");
        cur.bump_n(10);
        assert!(cur.eof());
        assert_eq!(cur.i, 2);
        assert!(!cur.starts_with(b"x"));
    }

    #[test]
    fn run_len_counts_repeated_bytes() {
        let cur = Cursor::at("a```b", 1);
        assert_eq!(cur.run_len(b'`'), 3);
    }

    #[test]
    fn skip_blocked_jumps_past_span() {
        let blocked = [ProtectedSpan::new(ProtectedKind::InlineCode, 2, 6)];
        let mut cur = Cursor::at("ab`cd`ef", 3);
        assert!(cur.skip_blocked(&blocked));
        assert_eq!(cur.i, 6);
        assert!(!cur.skip_blocked(&blocked));
    }
}
