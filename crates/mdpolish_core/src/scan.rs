//! Line scanning primitives shared by every rule.
//!
//! All rules see the document as a sequence of lines. Fenced code state is
//! tracked by a single [`FenceTracker`] so that every category agrees on which
//! lines are code.

use std::borrow::Cow;

/// The token that opened a fenced code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceToken {
    /// ```` ``` ````
    Backtick,
    /// `~~~`
    Tilde,
}

impl FenceToken {
    /// Detects a fence token at the start of a line (leading whitespace ignored).
    pub fn detect(line: &str) -> Option<Self> {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") {
            Some(Self::Backtick)
        } else if trimmed.starts_with("~~~") {
            Some(Self::Tilde)
        } else {
            None
        }
    }

    /// Returns the fence character.
    pub fn as_char(self) -> char {
        match self {
            Self::Backtick => '`',
            Self::Tilde => '~',
        }
    }
}

/// Classification of a line relative to fenced code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceLine {
    /// Regular Markdown line.
    Outside,
    /// Opening fence delimiter.
    Open,
    /// Line inside a fenced block.
    Inside,
    /// Closing fence delimiter.
    Close,
}

impl FenceLine {
    /// Returns true for delimiters and fenced content.
    pub fn is_code(self) -> bool {
        !matches!(self, Self::Outside)
    }
}

/// Toggle parser for fenced code blocks.
///
/// A fence only closes on the same token that opened it, so a `~~~` line
/// inside a backtick block is content.
#[derive(Debug, Clone, Copy, Default)]
pub struct FenceTracker {
    open: Option<FenceToken>,
}

impl FenceTracker {
    /// Creates a tracker positioned outside any fence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies the next line and advances the state.
    pub fn classify(&mut self, line: &str) -> FenceLine {
        match (self.open, FenceToken::detect(line)) {
            (None, Some(token)) => {
                self.open = Some(token);
                FenceLine::Open
            }
            (None, None) => FenceLine::Outside,
            (Some(open), Some(token)) if open == token => {
                self.open = None;
                FenceLine::Close
            }
            (Some(_), _) => FenceLine::Inside,
        }
    }

    /// Returns true while inside a fenced block.
    pub fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Returns the token of the currently open fence.
    pub fn token(&self) -> Option<FenceToken> {
        self.open
    }
}

/// A line annotated with its 1-based number and fence state.
#[derive(Debug, Clone, Copy)]
pub struct ScannedLine<'a> {
    /// 1-based line number.
    pub number: usize,
    /// Line text without the line terminator.
    pub text: &'a str,
    /// Fence classification.
    pub fence: FenceLine,
}

impl ScannedLine<'_> {
    /// Returns true for fence delimiters and fenced content.
    pub fn is_code(&self) -> bool {
        self.fence.is_code()
    }

    /// Returns true if the line holds only whitespace.
    pub fn is_blank(&self) -> bool {
        is_blank(self.text)
    }

    /// Parses the line as an ATX heading when it is outside fenced code.
    pub fn heading(&self) -> Option<Heading<'_>> {
        if self.is_code() {
            None
        } else {
            parse_heading(self.text)
        }
    }
}

/// Scans content into numbered lines with fence state.
///
/// Line numbering matches [`count_lines`]: a trailing newline does not start
/// an extra line.
pub fn scan(content: &str) -> Vec<ScannedLine<'_>> {
    let mut tracker = FenceTracker::new();
    content
        .lines()
        .enumerate()
        .map(|(idx, text)| ScannedLine {
            number: idx + 1,
            text,
            fence: tracker.classify(text),
        })
        .collect()
}

/// Returns the number of lines in `content`.
pub fn count_lines(content: &str) -> usize {
    content.lines().count()
}

/// Returns true if the line holds only whitespace.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Converts `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_line_endings(content: &str) -> Cow<'_, str> {
    if content.contains('\r') {
        Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(content)
    }
}

/// Splits `\n`-separated content into lines plus a trailing-newline flag.
pub(crate) fn split_lines(content: &str) -> (Vec<&str>, bool) {
    if content.is_empty() {
        return (Vec::new(), false);
    }
    let mut lines: Vec<&str> = content.split('\n').collect();
    let trailing_newline = content.ends_with('\n');
    if trailing_newline {
        lines.pop();
    }
    (lines, trailing_newline)
}

/// Joins lines produced by a fix rule back into content.
pub(crate) fn join_lines<S: AsRef<str>>(lines: &[S], trailing_newline: bool) -> String {
    let mut out = String::new();
    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        out.push_str(line.as_ref());
    }
    if trailing_newline && !lines.is_empty() {
        out.push('\n');
    }
    out
}

/// An ATX heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading<'a> {
    /// Number of `#` markers (1-6).
    pub level: usize,
    /// Heading text without markers or closing hashes.
    pub text: &'a str,
}

/// Parses an ATX heading (`# Title`). Requires whitespace after the markers.
pub fn parse_heading(line: &str) -> Option<Heading<'_>> {
    let level = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
        return None;
    }
    let text = rest.trim();
    let without_closing = text.trim_end_matches('#');
    let text = if without_closing.is_empty() || without_closing.ends_with([' ', '\t']) {
        without_closing.trim_end()
    } else {
        text
    };
    Some(Heading { level, text })
}

/// Returns true for thematic breaks such as `***`, `- - -` or `___`.
pub(crate) fn is_thematic_break(line: &str) -> bool {
    let compact: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3
        && ['*', '-', '_']
            .iter()
            .any(|marker| compact.iter().all(|c| c == marker))
}
