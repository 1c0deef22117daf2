//! Exception tokens: substrings the rule engine treats as one indivisible
//! unit (versions, dates, units, times, paths, operators, hyphenated words,
//! URLs).

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use crate::classify::{CharClass, class_of};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    Url,
    Date,
    Version,
    Unit,
    Time,
    Path,
    Hyphenated,
    Operator,
}

impl TokenKind {
    /// Spaces inside these tokens are an error in the source
    /// (`v 1.2.3`, `10 MB`, `2025 年 7 月 24 日`, `src / main. rs`,
    /// `UTF - 8`) and are dropped.
    fn drops_inner_space(self) -> bool {
        matches!(
            self,
            TokenKind::Version
                | TokenKind::Unit
                | TokenKind::Date
                | TokenKind::Path
                | TokenKind::Hyphenated
        )
    }
}

/// An exception token found in a text segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionToken<'a> {
    pub kind: TokenKind,
    /// Byte offset of the match in the scanned text.
    pub start: usize,
    pub end: usize,
    /// The token as it is emitted.
    pub text: Cow<'a, str>,
}

impl ExceptionToken<'_> {
    /// Class presented to the left neighbour.
    pub fn lead(&self) -> CharClass {
        match self.kind {
            TokenKind::Date => CharClass::Digit,
            TokenKind::Operator => CharClass::Symbol,
            _ => self.text.chars().next().map_or(CharClass::Other, class_of),
        }
    }

    /// Class presented to the right neighbour.
    pub fn trail(&self) -> CharClass {
        match self.kind {
            TokenKind::Date => CharClass::Digit,
            TokenKind::Operator => CharClass::Symbol,
            _ => self.text.chars().next_back().map_or(CharClass::Other, class_of),
        }
    }
}

const UNITS: &str = r"TB|GB|MB|KB|kB|Gbps|Mbps|Kbps|GHz|MHz|kHz|Hz|ms|μs|us|ns|min|px|℃|°C|%|s";

/// File extensions that make a single dotted name a path. Where one is a
/// prefix of another the longer comes first.
const EXTENSIONS: [&str; 25] = [
    "markdown", "md", "json", "jsx", "js", "tsx", "ts", "yaml", "yml", "toml", "html", "css",
    "cpp", "hpp", "py", "rs", "txt", "exe", "java", "lock", "cfg", "ini", "xml", "csv", "sql",
];

const PATH_SEGMENT: &str = r"[A-Za-z0-9_][A-Za-z0-9_\-]*(?:\.[A-Za-z0-9_\-]+)*";

fn patterns() -> &'static [(TokenKind, Regex)] {
    static PATTERNS: OnceLock<Vec<(TokenKind, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let sources = [
            (TokenKind::Url, r"https?://[!-~]+".to_string()),
            (
                TokenKind::Date,
                concat!(
                    r"\d{4}[ \t]*年[ \t]*\d{1,2}[ \t]*月[ \t]*\d{1,2}[ \t]*[日号]",
                    r"|\d{1,2}[ \t]*月[ \t]*\d{1,2}[ \t]*[日号]",
                    r"|\d{4}-\d{1,2}-\d{1,2}",
                )
                .to_string(),
            ),
            (
                TokenKind::Version,
                r"(?:v[ \t]*)?\d+(?:\.\d+){1,3}(?:-[A-Za-z0-9]+)?".to_string(),
            ),
            (
                TokenKind::Unit,
                format!(r"\d+(?:\.\d+)?[ \t]*(?:{UNITS})(?:[ \t]*\+)?"),
            ),
            (TokenKind::Time, r"\d{1,2}:\d{2}(?::\d{2})?".to_string()),
            (
                TokenKind::Path,
                format!(
                    r"{seg}(?:(?:/|[ \t]+/[ \t]+){seg})*(?:[ \t]*\.[ \t]*(?:{ext}))?",
                    seg = PATH_SEGMENT,
                    ext = EXTENSIONS.join("|"),
                ),
            ),
            (
                TokenKind::Hyphenated,
                r"[A-Za-z0-9]+(?:-[A-Za-z0-9]+)+".to_string(),
            ),
            // Upper-case abbreviations with a spaced hyphen: `UTF - 8`.
            (
                TokenKind::Hyphenated,
                r"[A-Z][A-Z0-9]+(?:(?:-|[ \t]+-[ \t]+)[A-Z0-9]+)+".to_string(),
            ),
            (TokenKind::Operator, r">=|<=|!=|>|<".to_string()),
        ];
        sources
            .into_iter()
            .map(|(kind, src)| {
                (
                    kind,
                    Regex::new(&src).expect("exception token pattern is valid"),
                )
            })
            .collect()
    })
}

/// Finds exception tokens in `text`, greedy-longest and non-overlapping.
///
/// Every pattern contributes candidates; candidates are taken in order of
/// start position, longer first, and any candidate overlapping one already
/// taken is dropped. A version number is therefore never read as
/// digit + punctuation + digit.
pub fn find_tokens(text: &str) -> Vec<ExceptionToken<'_>> {
    let mut candidates: Vec<(usize, usize, TokenKind)> = Vec::new();

    for (kind, re) in patterns() {
        for m in re.find_iter(text) {
            let (start, end) = match kind {
                TokenKind::Url => (m.start(), trim_url_punctuation(text, m.start(), m.end())),
                TokenKind::Unit => (m.start(), trim_unit_plus(text, m.start(), m.end())),
                TokenKind::Path => (extend_leading_slash(text, m.start()), m.end()),
                _ => (m.start(), m.end()),
            };
            if end > start
                && has_clean_edges(text, start, end, *kind)
                && accepts(*kind, &text[start..end])
            {
                candidates.push((start, end, *kind));
            }
        }
    }

    candidates.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| (b.1 - b.0).cmp(&(a.1 - a.0)))
            .then_with(|| a.2.cmp(&b.2))
    });

    let mut tokens: Vec<ExceptionToken<'_>> = Vec::new();
    let mut taken_until = 0usize;
    for (start, end, kind) in candidates {
        if start < taken_until {
            continue;
        }
        let raw = &text[start..end];
        let text = if kind.drops_inner_space() {
            compact(raw)
        } else {
            Cow::Borrowed(raw)
        };
        tokens.push(ExceptionToken {
            kind,
            start,
            end,
            text,
        });
        taken_until = end;
    }
    tokens
}

fn compact(raw: &str) -> Cow<'_, str> {
    if raw.contains([' ', '\t']) {
        Cow::Owned(raw.chars().filter(|c| !matches!(c, ' ' | '\t')).collect())
    } else {
        Cow::Borrowed(raw)
    }
}

/// A `+` belongs to the unit only when nothing more is being added:
/// `4GB+内存` keeps it, `4GB+8GB` is a sum.
fn trim_unit_plus(text: &str, start: usize, end: usize) -> usize {
    let Some(body) = text[start..end].strip_suffix('+') else {
        return end;
    };
    let next = text[end..].trim_start_matches([' ', '\t']).chars().next();
    match next.map(class_of) {
        None | Some(CharClass::Cjk | CharClass::PunctClose) => end,
        Some(_) => start + body.trim_end_matches([' ', '\t']).len(),
    }
}

/// Pulls a leading `/` into the path unless it is glued to text on its left:
/// `/usr/bin` is absolute, `文本/src/lib` is a slash between two words.
fn extend_leading_slash(text: &str, start: usize) -> usize {
    let Some(head) = text[..start].strip_suffix('/') else {
        return start;
    };
    match head.chars().next_back() {
        Some(c) if class_of(c).is_text() => start,
        _ => head.len(),
    }
}

fn accepts(kind: TokenKind, raw: &str) -> bool {
    match kind {
        TokenKind::Path => is_path(&compact(raw)),
        _ => true,
    }
}

/// A run of path segments is only a path when it looks like one: rooted,
/// at least two separators, or a known file extension.
fn is_path(path: &str) -> bool {
    if !path.bytes().any(|b| b.is_ascii_alphabetic()) {
        return false;
    }
    let file = path.rsplit('/').next().unwrap_or(path);
    let has_extension = file
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && EXTENSIONS.contains(&ext));
    path.starts_with('/') || path.matches('/').count() >= 2 || has_extension
}

/// Remove trailing punctuation that's typically not part of URLs
fn trim_url_punctuation(text: &str, start: usize, mut end: usize) -> usize {
    while let Some(last_char) = text[start..end].chars().last() {
        if matches!(
            last_char,
            '.' | ',' | ':' | ';' | '!' | '?' | ')' | ']' | '}' | '"' | '\''
        ) {
            end -= last_char.len_utf8();
        } else {
            break;
        }
    }
    end
}

/// Numeric tokens must not be glued to more ASCII letters or digits:
/// `A10MB` and `5 minutes` are not units, `x1.2` is not a version.
fn has_clean_edges(text: &str, start: usize, end: usize, kind: TokenKind) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    let glued = |c: Option<char>| c.is_some_and(|c| c.is_ascii_alphanumeric());

    match kind {
        TokenKind::Url | TokenKind::Operator => true,
        TokenKind::Hyphenated => !glued(before) && !glued(after),
        TokenKind::Date => !before.is_some_and(|c| c.is_ascii_digit()),
        TokenKind::Version | TokenKind::Unit | TokenKind::Time | TokenKind::Path => {
            !glued(before) && !glued(after)
        }
    }
}
