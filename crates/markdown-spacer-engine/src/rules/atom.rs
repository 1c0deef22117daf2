use std::borrow::Cow;

use crate::classify::{CharClass, class_of, classify};
use crate::protect::{ProtectedKind, ProtectedSpan};

use super::quotes::{self, QuotePair};
use super::tokens::{TokenKind, find_tokens};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomKind {
    Char,
    Token(TokenKind),
    Protected(ProtectedKind),
    EmphasisOpen,
    EmphasisClose,
}

/// The smallest unit the rule engine places gaps between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom<'a> {
    pub kind: AtomKind,
    pub text: Cow<'a, str>,
    /// Class seen by the gap on the left.
    pub lead: CharClass,
    /// Class seen by the gap on the right.
    pub trail: CharClass,
    /// A binary operator with an operand on each side.
    pub infix: bool,
}

impl<'a> Atom<'a> {
    fn char_at(line: &'a str, at: usize, c: char) -> Self {
        let class = classify(line, at);
        Self {
            kind: AtomKind::Char,
            text: Cow::Borrowed(&line[at..at + c.len_utf8()]),
            lead: class,
            trail: class,
            infix: false,
        }
    }

    fn protected(line: &'a str, span: ProtectedSpan) -> Self {
        Self {
            kind: AtomKind::Protected(span.kind),
            text: Cow::Borrowed(&line[span.start..span.end]),
            lead: CharClass::Other,
            trail: CharClass::Other,
            infix: false,
        }
    }

    fn emphasis(kind: AtomKind) -> Self {
        let class = match kind {
            AtomKind::EmphasisOpen => CharClass::PunctOpen,
            _ => CharClass::PunctClose,
        };
        Self {
            kind,
            text: Cow::Borrowed(quotes::EMPHASIS),
            lead: class,
            trail: class,
            infix: false,
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(self.kind, AtomKind::Protected(_))
    }

    pub fn is_token(&self) -> bool {
        matches!(self.kind, AtomKind::Token(_))
    }
}

/// A line split into indentation, atoms with the whitespace between them, and
/// trailing whitespace. `gaps[i]` sits between `atoms[i]` and `atoms[i + 1]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout<'a> {
    pub indent: &'a str,
    pub atoms: Vec<Atom<'a>>,
    pub gaps: Vec<&'a str>,
    pub trailing: &'a str,
}

struct Builder<'a> {
    line: &'a str,
    layout: Layout<'a>,
    ws_start: Option<usize>,
}

impl<'a> Builder<'a> {
    fn push(&mut self, atom: Atom<'a>, at: usize) {
        let ws = match self.ws_start.take() {
            Some(start) => &self.line[start..at],
            None => "",
        };
        if self.layout.atoms.is_empty() {
            self.layout.indent = ws;
        } else {
            self.layout.gaps.push(ws);
        }
        self.layout.atoms.push(atom);
    }

    fn whitespace(&mut self, at: usize) {
        self.ws_start.get_or_insert(at);
    }

    fn finish(mut self) -> Layout<'a> {
        let rest = self.ws_start.map_or("", |start| &self.line[start..]);
        if self.layout.atoms.is_empty() {
            self.layout.indent = rest;
        } else {
            self.layout.trailing = rest;
        }
        self.layout
    }
}

/// Splits a line into atoms.
///
/// Protected spans become single opaque atoms. Between them, exception
/// tokens are found per segment, and with `bold_quotes` paired Chinese
/// quotes become emphasis delimiters.
pub fn atomize<'a>(line: &'a str, protected: &[ProtectedSpan], bold_quotes: bool) -> Layout<'a> {
    let mut b = Builder {
        line,
        layout: Layout::default(),
        ws_start: None,
    };

    let mut pos = 0;
    for span in protected {
        if span.start < pos || span.end > line.len() {
            continue;
        }
        segment(&mut b, pos, span.start, bold_quotes);
        b.push(Atom::protected(line, *span), span.start);
        pos = span.end;
    }
    segment(&mut b, pos, line.len(), bold_quotes);

    let mut layout = b.finish();
    mark_infix(&mut layout.atoms);
    layout
}

/// Flags operators that sit between two operands, ignoring any whitespace
/// around them.
///
/// `+` and `=` take any letters, digits or CJK; `*` needs a digit on one
/// side. `-` needs CJK on both sides (`张三-李四`, but not `温度-5℃`) and
/// `/` on at least one; between ASCII words both join (`e-mail`,
/// `and/or`). A comparison token may also open a line before a number:
/// `>=100GB`.
fn mark_infix(atoms: &mut [Atom<'_>]) {
    for i in 0..atoms.len() {
        let prev = i.checked_sub(1).map(|j| atoms[j].trail);
        let next = atoms.get(i + 1).map(|a| a.lead);
        let infix = is_infix(&atoms[i], prev, next);
        atoms[i].infix = infix;
    }
}

fn is_infix(atom: &Atom<'_>, prev: Option<CharClass>, next: Option<CharClass>) -> bool {
    use CharClass::{Cjk, Digit};

    match atom.kind {
        AtomKind::Token(TokenKind::Operator) => match (prev, next) {
            (Some(p), Some(n)) => p.is_text() && n.is_text(),
            (None, Some(n)) => n == Digit,
            _ => false,
        },
        AtomKind::Char if atom.lead == CharClass::Symbol => {
            let (Some(p), Some(n)) = (prev, next) else {
                return false;
            };
            if !p.is_text() || !n.is_text() {
                return false;
            }
            match atom.text.as_ref() {
                "+" | "=" => true,
                "*" => p == Digit || n == Digit,
                "-" => p == Cjk && n == Cjk,
                "/" => p == Cjk || n == Cjk,
                _ => false,
            }
        }
        _ => false,
    }
}

fn segment(b: &mut Builder<'_>, from: usize, to: usize, bold_quotes: bool) {
    let line = b.line;
    let text = &line[from..to];
    let tokens = find_tokens(text);
    let pairs: Vec<QuotePair> = if bold_quotes {
        quotes::pair_quotes(text)
    } else {
        Vec::new()
    };

    let mut next_token = tokens.into_iter().peekable();
    let mut iter = text.char_indices().peekable();
    while let Some(&(rel, c)) = iter.peek() {
        let at = from + rel;

        if let Some(tok) = next_token.next_if(|t| t.start == rel) {
            let (lead, trail) = (tok.lead(), tok.trail());
            let atom = Atom {
                kind: AtomKind::Token(tok.kind),
                text: tok.text,
                lead,
                trail,
                infix: false,
            };
            b.push(atom, at);
            while iter.next_if(|&(i, _)| i < tok.end).is_some() {}
            continue;
        }

        iter.next();
        if class_of(c) == CharClass::Whitespace {
            b.whitespace(at);
        } else if pairs.iter().any(|p| p.open == rel) {
            b.push(Atom::emphasis(AtomKind::EmphasisOpen), at);
        } else if pairs.iter().any(|p| p.close == rel) {
            b.push(Atom::emphasis(AtomKind::EmphasisClose), at);
        } else {
            b.push(Atom::char_at(line, at, c), at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn texts<'a>(layout: &'a Layout<'_>) -> Vec<&'a str> {
        layout.atoms.iter().map(|a| a.text.as_ref()).collect()
    }

    #[test]
    fn chars_and_gaps() {
        let layout = atomize("  a  b ", &[], false);
        assert_eq!(layout.indent, "  ");
        assert_eq!(texts(&layout), vec!["a", "b"]);
        assert_eq!(layout.gaps, vec!["  "]);
        assert_eq!(layout.trailing, " ");
    }

    #[test]
    fn blank_line_is_all_indent() {
        let layout = atomize(" \t ", &[], false);
        assert!(layout.atoms.is_empty());
        assert_eq!(layout.indent, " \t ");
    }

    #[test]
    fn token_is_one_atom() {
        let layout = atomize("版本v 1.2.3发布", &[], false);
        assert_eq!(texts(&layout), vec!["版", "本", "v1.2.3", "发", "布"]);
        assert_eq!(layout.atoms[2].kind, AtomKind::Token(TokenKind::Version));
        assert_eq!(layout.gaps, vec![""; 4]);
    }

    #[test]
    fn protected_span_is_one_atom() {
        let line = "用`a  b`做";
        let span = ProtectedSpan::new(ProtectedKind::InlineCode, 3, 9);
        let layout = atomize(line, &[span], false);
        assert_eq!(texts(&layout), vec!["用", "`a  b`", "做"]);
        assert!(layout.atoms[1].is_protected());
    }

    #[test]
    fn tokens_do_not_cross_protected_spans() {
        let line = "1.`x`2";
        let span = ProtectedSpan::new(ProtectedKind::InlineCode, 2, 5);
        let layout = atomize(line, &[span], false);
        assert_eq!(texts(&layout), vec!["1", ".", "`x`", "2"]);
    }

    fn infix(line: &str) -> Vec<String> {
        atomize(line, &[], false)
            .atoms
            .iter()
            .filter(|a| a.infix)
            .map(|a| a.text.to_string())
            .collect()
    }

    #[rstest]
    #[case("A+B", vec!["+"])]
    #[case("1+1=2", vec!["+", "="])]
    #[case("a + b", vec!["+"])]
    #[case("10*5", vec!["*"])]
    #[case("a*b", vec![])]
    #[case("张三-李四", vec!["-"])]
    #[case("ls -la", vec![])]
    #[case("-1", vec![])]
    #[case("文本/JSON", vec!["/"])]
    #[case("C++", vec![])]
    #[case(">=100GB", vec![">="])]
    #[case(">提示", vec![])]
    #[case("x <5ms", vec!["<"])]
    fn operators_between_operands(#[case] line: &str, #[case] expected: Vec<&str>) {
        let expected: Vec<String> = expected.into_iter().map(String::from).collect();
        assert_eq!(infix(line), expected);
    }

    #[test]
    fn quotes_become_emphasis_only_when_enabled() {
        let layout = atomize("“好”", &[], true);
        assert_eq!(layout.atoms[0].kind, AtomKind::EmphasisOpen);
        assert_eq!(layout.atoms[2].kind, AtomKind::EmphasisClose);

        let layout = atomize("“好”", &[], false);
        assert_eq!(texts(&layout), vec!["“", "好", "”"]);
    }
}
