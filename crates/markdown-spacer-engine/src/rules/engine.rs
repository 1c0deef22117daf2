use log::trace;

use crate::protect::ProtectedSpan;

use super::atom::atomize;
use super::table::{Action, Gap, decide};

/// Options that change what the rules produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Rewrite paired `“…”` as `**…**`.
    pub bold_chinese_quotes: bool,
}

/// One line of text with its same-line protected spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    pub text: &'a str,
    pub protected: Vec<ProtectedSpan>,
}

impl<'a> ClassifiedLine<'a> {
    pub fn new(text: &'a str, protected: Vec<ProtectedSpan>) -> Self {
        Self { text, protected }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SpacingEngine {
    options: FormatOptions,
}

impl SpacingEngine {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> FormatOptions {
        self.options
    }

    /// Applies the rule table to every gap of `line`.
    ///
    /// Protected spans come out byte-identical, as do leading indentation
    /// and trailing whitespace.
    pub fn apply_rules(&self, line: &ClassifiedLine<'_>) -> String {
        let layout = atomize(line.text, &line.protected, self.options.bold_chinese_quotes);

        let mut out = String::with_capacity(line.text.len() + 8);
        out.push_str(layout.indent);

        let mut atoms = layout.atoms.iter();
        let Some(first) = atoms.next() else {
            return out;
        };
        out.push_str(&first.text);

        let mut left = first;
        for (right, whitespace) in atoms.zip(layout.gaps.iter().copied()) {
            let gap = Gap {
                left,
                right,
                whitespace,
            };
            let rule = decide(&gap);
            if rule.action != Action::Keep {
                trace!("{}: {:?}|{:?}", rule.name, left.text, right.text);
            }
            out.push_str(rule.action.apply(whitespace));
            out.push_str(&right.text);
            left = right;
        }

        out.push_str(layout.trailing);
        out
    }
}
