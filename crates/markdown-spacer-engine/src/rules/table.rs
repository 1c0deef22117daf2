use crate::classify::CharClass;

use super::atom::{Atom, AtomKind};

/// What to do with the whitespace between two atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Keep,
    InsertSpace,
    Collapse,
}

impl Action {
    pub fn apply<'a>(self, whitespace: &'a str) -> &'a str {
        match self {
            Action::Keep => whitespace,
            Action::InsertSpace if whitespace.is_empty() => " ",
            Action::InsertSpace => whitespace,
            Action::Collapse => " ",
        }
    }
}

/// Two neighbouring atoms and the whitespace between them.
#[derive(Debug, Clone, Copy)]
pub struct Gap<'g, 'a> {
    pub left: &'g Atom<'a>,
    pub right: &'g Atom<'a>,
    pub whitespace: &'a str,
}

impl Gap<'_, '_> {
    fn is_empty(&self) -> bool {
        self.whitespace.is_empty()
    }
}

pub struct SpacingRule {
    pub name: &'static str,
    pub applies: fn(&Gap<'_, '_>) -> bool,
    pub action: Action,
}

/// Evaluated in order; the first rule that applies decides.
pub static RULES: [SpacingRule; 9] = [
    SpacingRule {
        name: "protected-span",
        applies: |g| g.left.is_protected() || g.right.is_protected(),
        action: Action::Keep,
    },
    SpacingRule {
        name: "cjk-alnum",
        applies: |g| {
            g.is_empty()
                && ((g.left.trail == CharClass::Cjk && g.right.lead.is_alnum())
                    || (g.left.trail.is_alnum() && g.right.lead == CharClass::Cjk))
        },
        action: Action::InsertSpace,
    },
    SpacingRule {
        name: "quote-emphasis",
        applies: |g| {
            g.is_empty()
                && ((g.right.kind == AtomKind::EmphasisOpen && g.left.trail.is_text())
                    || (g.left.kind == AtomKind::EmphasisClose && g.right.lead.is_text()))
        },
        action: Action::InsertSpace,
    },
    SpacingRule {
        name: "operator-spacing",
        applies: |g| {
            g.is_empty()
                && ((g.left.infix && g.right.lead.is_text())
                    || (g.right.infix && g.left.trail.is_text()))
        },
        action: Action::InsertSpace,
    },
    SpacingRule {
        name: "exception-token",
        applies: |g| g.is_empty() && (g.left.is_token() || g.right.is_token()),
        action: Action::Keep,
    },
    SpacingRule {
        name: "punct-after",
        applies: |g| {
            g.is_empty()
                && g.left.kind == AtomKind::Char
                && matches!(g.left.text.as_ref(), "," | "." | "!" | "?" | ";" | ":")
                && g.left.trail == CharClass::PunctClose
                && starts_word(g.right)
        },
        action: Action::InsertSpace,
    },
    SpacingRule {
        name: "close-paren",
        applies: |g| {
            g.is_empty()
                && g.left.kind == AtomKind::Char
                && g.left.text == ")"
                && starts_word(g.right)
        },
        action: Action::InsertSpace,
    },
    SpacingRule {
        name: "collapse-whitespace",
        applies: |g| {
            g.whitespace.chars().nth(1).is_some()
                && g.left.trail != CharClass::Other
                && g.right.lead != CharClass::Other
        },
        action: Action::Collapse,
    },
    SpacingRule {
        name: "preserve",
        applies: |_| true,
        action: Action::Keep,
    },
];

/// Sentence punctuation is followed by a space before letters and CJK, not
/// before digits (`1,000`, `3.14`).
fn starts_word(atom: &Atom<'_>) -> bool {
    matches!(atom.lead, CharClass::Latin | CharClass::Cjk)
}

/// The rule that decides `gap`.
pub fn decide(gap: &Gap<'_, '_>) -> &'static SpacingRule {
    RULES
        .iter()
        .find(|rule| (rule.applies)(gap))
        .unwrap_or(&RULES[RULES.len() - 1])
}
