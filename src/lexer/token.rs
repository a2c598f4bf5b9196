use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a token came from: the file it was read from and its line
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Path of the source file (or a tag such as `<string>`)
    file: String,
    /// Line number where the token appears (0-indexed)
    row: usize,
}

impl SourceLocation {
    /// Creates a new location
    pub fn new(file: impl Into<String>, row: usize) -> Self {
        SourceLocation {
            file: file.into(),
            row,
        }
    }

    /// The source file
    pub fn file(&self) -> &str {
        &self.file
    }

    /// The 0-indexed line
    pub fn row(&self) -> usize {
        self.row
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.row)
    }
}

/// A classified word of source text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Word {
    /// Integer literal
    IntLiteral(i64),
    /// String literal, delimiters stripped, escapes left as written
    StringLiteral(String),
    /// Anything else: a builtin, control keyword or macro name
    Identifier(String),
}

impl Word {
    /// Text of an identifier, `None` for literals
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Word::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// True if this is the identifier `name`
    pub fn is_identifier(&self, name: &str) -> bool {
        self.as_identifier() == Some(name)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Word::IntLiteral(value) => write!(f, "{}", value),
            Word::StringLiteral(text) => write!(f, "\"{}\"", text),
            Word::Identifier(name) => write!(f, "{}", name),
        }
    }
}

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Where the token was read
    pub location: SourceLocation,
    /// The classified word
    pub word: Word,
}

impl Token {
    /// Creates a new token
    pub fn new(location: SourceLocation, word: Word) -> Self {
        Token { location, word }
    }
}
