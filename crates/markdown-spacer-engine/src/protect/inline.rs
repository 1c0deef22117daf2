//! Same-line protected spans: inline code, link targets, inline math and
//! HTML tags.
//!
//! Kinds are scanned one pass at a time in priority order. A later pass never
//! opens inside a span found by an earlier one and steps over such spans while
//! looking for its closer, so a backtick inside `$...$` belongs to the code
//! span when the code span is well formed. A lower-priority span may enclose a
//! higher one whole (a link target containing inline code); the enclosing span
//! then stands for both.

use super::{
    cursor::Cursor,
    kinds::{CodeSpan, HtmlTag, LinkTarget, MathBlock},
    span::{ProtectedKind, ProtectedSpan},
};

type Opener = fn(&Cursor<'_>, &[ProtectedSpan]) -> Option<ProtectedSpan>;

const PASSES: [Opener; 4] = [
    try_code_span,
    try_link_target,
    try_inline_math,
    try_html_tag,
];

const ESCAPE: u8 = b'\\';

/// Finds every protected span in a line that is not inside a block region.
///
/// Spans are returned sorted and non-overlapping. Unclosed constructs
/// produce no span: inline regions never continue onto the next line.
pub fn scan_inline(line: &str) -> Vec<ProtectedSpan> {
    let mut spans: Vec<ProtectedSpan> = Vec::new();

    for try_open in PASSES {
        let mut found = Vec::new();
        let mut cur = Cursor::new(line);
        while !cur.eof() {
            if cur.skip_blocked(&spans) {
                continue;
            }
            if cur.peek() == Some(ESCAPE) {
                cur.bump_n(2);
                continue;
            }
            if let Some(sp) = try_open(&cur, &spans) {
                cur.i = sp.end;
                found.push(sp);
                continue;
            }
            cur.bump();
        }
        spans.retain(|old| !found.iter().any(|new| new.encloses(*old)));
        spans.extend(found);
    }

    spans.sort_by_key(|sp| sp.start);
    spans
}

/// A backtick run closed by a run of exactly the same length.
fn try_code_span(cur: &Cursor<'_>, _blocked: &[ProtectedSpan]) -> Option<ProtectedSpan> {
    if cur.peek() != Some(CodeSpan::TICK) || cur.prev() == Some(CodeSpan::TICK) {
        return None;
    }

    let start = cur.i;
    let n = cur.run_len(CodeSpan::TICK);
    let mut scan = Cursor::at(cur.s, start + n);
    while !scan.eof() {
        if scan.peek() == Some(CodeSpan::TICK) {
            let m = scan.run_len(CodeSpan::TICK);
            if m == n {
                return Some(ProtectedSpan::new(
                    ProtectedKind::InlineCode,
                    start,
                    scan.i + m,
                ));
            }
            scan.bump_n(m);
        } else {
            scan.bump();
        }
    }
    None
}

/// The `(...)` after `]`, with nested parentheses balanced.
fn try_link_target(cur: &Cursor<'_>, blocked: &[ProtectedSpan]) -> Option<ProtectedSpan> {
    if !cur.starts_with(&[LinkTarget::TEXT_CLOSE, LinkTarget::OPEN]) {
        return None;
    }
    if !cur.s.as_bytes()[..cur.i].contains(&LinkTarget::TEXT_OPEN) {
        return None;
    }

    let start = cur.i + 1;
    let mut scan = Cursor::at(cur.s, start + 1);
    let mut depth = 1usize;
    while !scan.eof() {
        if scan.skip_blocked(blocked) {
            continue;
        }
        match scan.bump()? {
            ESCAPE => scan.bump_n(1),
            LinkTarget::OPEN => depth += 1,
            LinkTarget::CLOSE => {
                depth -= 1;
                if depth == 0 {
                    return Some(ProtectedSpan::new(
                        ProtectedKind::LinkTarget,
                        start,
                        scan.i,
                    ));
                }
            }
            _ => {}
        }
    }
    None
}

/// `$$...$$` or `$...$` on one line.
///
/// A single-dollar span needs a non-space right after the opener, a non-space
/// right before the closer and no digit after the closer, so `$5 and $10`
/// stays prose.
fn try_inline_math(cur: &Cursor<'_>, blocked: &[ProtectedSpan]) -> Option<ProtectedSpan> {
    if cur.peek() != Some(MathBlock::INLINE) || cur.prev() == Some(MathBlock::INLINE) {
        return None;
    }
    let start = cur.i;

    if cur.starts_with(MathBlock::DELIM.as_bytes()) {
        let mut scan = Cursor::at(cur.s, start + MathBlock::DELIM.len());
        while !scan.eof() {
            if scan.skip_blocked(blocked) {
                continue;
            }
            if scan.starts_with(MathBlock::DELIM.as_bytes()) {
                let end = scan.i + MathBlock::DELIM.len();
                return Some(ProtectedSpan::new(ProtectedKind::InlineMath, start, end));
            }
            if scan.bump() == Some(ESCAPE) {
                scan.bump_n(1);
            }
        }
        return None;
    }

    match cur.peek_at(1) {
        Some(b) if !b.is_ascii_whitespace() => {}
        _ => return None,
    }

    let mut scan = Cursor::at(cur.s, start + 1);
    while !scan.eof() {
        if scan.skip_blocked(blocked) {
            continue;
        }
        match scan.peek()? {
            ESCAPE => scan.bump_n(2),
            MathBlock::INLINE => {
                let before_ok = scan.prev().is_some_and(|b| !b.is_ascii_whitespace());
                let after_ok = scan.peek_at(1).is_none_or(|b| !b.is_ascii_digit());
                if before_ok && after_ok {
                    return Some(ProtectedSpan::new(
                        ProtectedKind::InlineMath,
                        start,
                        scan.i + 1,
                    ));
                }
                scan.bump();
            }
            _ => {
                scan.bump();
            }
        }
    }
    None
}

/// `<tag ...>` with no `<` before the closing `>`.
fn try_html_tag(cur: &Cursor<'_>, blocked: &[ProtectedSpan]) -> Option<ProtectedSpan> {
    if cur.peek() != Some(HtmlTag::OPEN) || !cur.peek_at(1).is_some_and(HtmlTag::starts_tag) {
        return None;
    }
    let start = cur.i;
    let mut scan = Cursor::at(cur.s, start + 1);
    while let Some(b) = scan.peek() {
        if blocked.iter().any(|sp| sp.contains(scan.i)) {
            return None;
        }
        match b {
            HtmlTag::CLOSE => {
                return Some(ProtectedSpan::new(ProtectedKind::HtmlTag, start, scan.i + 1));
            }
            HtmlTag::OPEN => return None,
            _ => scan.bump_n(1),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds_and_text(line: &str) -> Vec<(ProtectedKind, &str)> {
        scan_inline(line)
            .into_iter()
            .map(|sp| (sp.kind, &line[sp.start..sp.end]))
            .collect()
    }

    #[test]
    fn plain_text_has_no_spans() {
        assert!(scan_inline("中文English混排").is_empty());
    }

    #[test]
    fn code_span() {
        assert_eq!(
            kinds_and_text("运行`cargo test`命令"),
            vec![(ProtectedKind::InlineCode, "`cargo test`")]
        );
    }

    #[test]
    fn code_span_needs_equal_run() {
        assert_eq!(
            kinds_and_text("a ``x ` y`` b"),
            vec![(ProtectedKind::InlineCode, "``x ` y``")]
        );
        assert!(scan_inline("``unclosed` text").is_empty());
    }

    #[test]
    fn escaped_backtick_is_not_an_opener() {
        assert!(scan_inline(r"a \`b` c").is_empty());
    }

    #[test]
    fn link_target_only_covers_parens() {
        assert_eq!(
            kinds_and_text("[中文English](http://example.com/a_(b))后"),
            vec![(ProtectedKind::LinkTarget, "(http://example.com/a_(b))")]
        );
    }

    #[test]
    fn image_target() {
        assert_eq!(
            kinds_and_text("![图片](img/图1.png)"),
            vec![(ProtectedKind::LinkTarget, "(img/图1.png)")]
        );
    }

    #[test]
    fn parens_without_brackets_are_prose() {
        assert!(scan_inline("(test)world").is_empty());
    }

    #[test]
    fn inline_math() {
        assert_eq!(
            kinds_and_text("公式$E=mc^2$成立"),
            vec![(ProtectedKind::InlineMath, "$E=mc^2$")]
        );
        assert_eq!(
            kinds_and_text("块$$x+y$$尾"),
            vec![(ProtectedKind::InlineMath, "$$x+y$$")]
        );
    }

    #[test]
    fn prices_are_not_math() {
        assert!(scan_inline("costs $5 and $10 now").is_empty());
    }

    #[test]
    fn html_tags() {
        assert_eq!(
            kinds_and_text("<span>中文English</span>"),
            vec![
                (ProtectedKind::HtmlTag, "<span>"),
                (ProtectedKind::HtmlTag, "</span>"),
            ]
        );
        assert!(scan_inline("<5ms and a < b").is_empty());
    }

    #[test]
    fn code_wins_over_math() {
        assert_eq!(
            kinds_and_text("$a `b$` c"),
            vec![(ProtectedKind::InlineCode, "`b$`")]
        );
    }

    #[test]
    fn link_target_absorbs_inner_code() {
        assert_eq!(
            kinds_and_text("[x](`a)`)"),
            vec![(ProtectedKind::LinkTarget, "(`a)`)")]
        );
    }
}
