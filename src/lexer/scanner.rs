use super::classifier::classify;
use super::token::{SourceLocation, Token};

/// Line comment marker
pub const COMMENT_MARKER: &str = "//";

/// The words found on one line of source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLine {
    /// Line number (0-indexed)
    pub row: usize,
    /// Raw words in source order
    pub words: Vec<String>,
}

/// Line-oriented scanner for one source file
///
/// A scanner is a scanning session. Quote and escape state carries over from
/// one line to the next within a session, so an unterminated string swallows
/// whitespace on the following lines too. Each file must get its own session:
/// state never leaks between two `Scanner` values.
#[derive(Debug, Clone)]
pub struct Scanner {
    /// File name attached to every token
    file: String,
    /// Inside an open double-quoted region
    quoted: bool,
    /// Previous character was a backslash
    escaped: bool,
    /// Row the next scanned line gets
    row: usize,
}

impl Scanner {
    /// Starts a new scanning session for `file`
    pub fn new(file: impl Into<String>) -> Self {
        Scanner {
            file: file.into(),
            quoted: false,
            escaped: false,
            row: 0,
        }
    }

    /// True while a double-quoted region is open
    pub fn is_quoted(&self) -> bool {
        self.quoted
    }

    /// Scans the next line of the file
    ///
    /// The line is cut at the first [`COMMENT_MARKER`] before quotes are
    /// considered, so a marker inside a string literal still ends the line.
    pub fn scan_line(&mut self, line: &str) -> ScannedLine {
        let row = self.row;
        self.row += 1;

        let text = match line.find(COMMENT_MARKER) {
            Some(end) => &line[..end],
            None => line,
        };

        let mut words = Vec::new();
        let mut start: Option<usize> = None;

        for (i, c) in text.char_indices() {
            if self.is_separator(c) {
                if let Some(s) = start.take() {
                    words.push(text[s..i].to_string());
                }
            } else if start.is_none() {
                start = Some(i);
            }
        }

        if let Some(s) = start {
            words.push(text[s..].to_string());
        }

        ScannedLine { row, words }
    }

    /// Scans a whole source text into classified tokens
    pub fn scan_tokens(&mut self, source: &str) -> Vec<Token> {
        let mut tokens = Vec::new();

        for line in source.lines() {
            let scanned = self.scan_line(line);
            for raw in &scanned.words {
                tokens.push(Token::new(
                    SourceLocation::new(self.file.as_str(), scanned.row),
                    classify(raw),
                ));
            }
        }

        tokens
    }

    /// Feeds one character through the quote/escape state machine and reports
    /// whether it separates words.
    fn is_separator(&mut self, c: char) -> bool {
        if c == '"' && !self.escaped {
            self.quoted = !self.quoted;
        }

        self.escaped = c == '\\';

        !self.quoted && c.is_whitespace()
    }
}
