//! Pairing of Chinese double quotes for the bold-quote option.

pub const OPEN: char = '“';
pub const CLOSE: char = '”';
pub const EMPHASIS: &str = "**";

/// A matched `“…”` pair, as byte offsets of the two quote characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotePair {
    pub open: usize,
    pub close: usize,
}

/// Pairs `“` with the next `”` in `text`.
///
/// A pair needs at least one character between the quotes. Quotes that nest
/// (`“a“b”c”`) are skipped as a whole, and a quote without a partner is left
/// alone.
pub fn pair_quotes(text: &str) -> Vec<QuotePair> {
    let quotes: Vec<(usize, char)> = text
        .char_indices()
        .filter(|&(_, c)| c == OPEN || c == CLOSE)
        .collect();

    let mut pairs = Vec::new();
    let mut k = 0;
    while k < quotes.len() {
        let (open, c) = quotes[k];
        if c != OPEN {
            k += 1;
            continue;
        }
        match quotes.get(k + 1) {
            Some(&(close, CLOSE)) => {
                if close > open + OPEN.len_utf8() {
                    pairs.push(QuotePair { open, close });
                }
                k += 2;
            }
            Some(_) => k = skip_nested(&quotes, k),
            None => break,
        }
    }
    pairs
}

/// Index just past the balanced group opened at `quotes[k]`, or the end
/// when it never balances.
fn skip_nested(quotes: &[(usize, char)], k: usize) -> usize {
    let mut depth = 0usize;
    for (j, &(_, c)) in quotes.iter().enumerate().skip(k) {
        if c == OPEN {
            depth += 1;
        } else {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return j + 1;
            }
        }
    }
    quotes.len()
}
