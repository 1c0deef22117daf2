use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
    /// Last line of a document with no terminator.
    None,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::None => "",
        }
    }
}

/// One output line. Writing `text` then `ending` for every line in order
/// reproduces the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedLine {
    pub text: String,
    pub ending: LineEnding,
}

impl FormattedLine {
    pub fn new(text: impl Into<String>, ending: LineEnding) -> Self {
        Self {
            text: text.into(),
            ending,
        }
    }

    /// Output size in bytes, terminator included.
    pub fn len(&self) -> usize {
        self.text.len() + self.ending.as_str().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for FormattedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)?;
        f.write_str(self.ending.as_str())
    }
}

/// Splits a terminated line into its content and ending.
pub(crate) fn split_ending(line: &str) -> (&str, LineEnding) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, LineEnding::CrLf)
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, LineEnding::Lf)
    } else {
        (line, LineEnding::None)
    }
}
