//! Error types for the stackc front end

use crate::lexer::SourceLocation;
use thiserror::Error;

/// Front end errors
///
/// Every error raised while building a program is fatal to that pass. Errors
/// that originate from a token carry the token's [`SourceLocation`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Syntax errors
    /// Block structure does not balance
    ///
    /// **Triggered by:** `end` with no open block, `end` closing a `while` that
    /// never reached `do`, or blocks still open at end of input
    /// **Example:** `if 1 end end`
    #[error("{location}: {message}")]
    UnbalancedBlock {
        /// Location of the offending construct
        location: SourceLocation,
        /// Error description
        message: String,
    },

    /// `else` that does not close an `if`
    ///
    /// **Example:** `while 1 else end`
    #[error("{location}: `else` can only be used inside `if` blocks")]
    ElseWithoutIf {
        /// Location of the `else`
        location: SourceLocation,
    },

    /// `do` that does not follow a `while`
    ///
    /// **Example:** `if 1 do end`
    #[error("{location}: `do` can only follow a `while` condition")]
    DoWithoutWhile {
        /// Location of the `do`
        location: SourceLocation,
    },

    /// `macro` not followed by a bare identifier
    ///
    /// **Example:** `macro 42 dup end`
    #[error("{location}: expected macro name to be a word but found {found}")]
    MalformedMacro {
        /// Location of the token that should have been the name
        location: SourceLocation,
        /// What was found instead
        found: String,
    },

    /// Macro body never reached its terminating `end`
    #[error("{location}: macro definition `{name}` incomplete")]
    IncompleteMacro {
        /// Location of the macro name
        location: SourceLocation,
        /// Macro name
        name: String,
    },

    /// Macro invoked, directly or indirectly, from its own body
    ///
    /// **Example:** `macro loop loop end loop`
    #[error("{location}: macro `{name}` expands into itself")]
    RecursiveMacro {
        /// Location of the recursive invocation
        location: SourceLocation,
        /// Macro name
        name: String,
    },

    /// Too many macro expansions in a single pass
    ///
    /// **Triggered by:** a configured expansion limit being crossed
    #[error("{location}: macro expansion limit of {limit} exceeded while expanding `{name}`")]
    MacroExpansionLimit {
        /// Location of the invocation that crossed the limit
        location: SourceLocation,
        /// Macro being expanded
        name: String,
        /// Configured limit
        limit: usize,
    },

    // Name errors
    /// Identifier that is neither a builtin nor a macro
    #[error("{location}: undefined word `{word}`")]
    UndefinedWord {
        /// Location of the identifier
        location: SourceLocation,
        /// The identifier text
        word: String,
    },

    /// Second definition of an existing macro
    #[error("{location}: redefinition of macro `{name}`")]
    MacroRedefinition {
        /// Location of the second definition's name
        location: SourceLocation,
        /// Macro name
        name: String,
    },

    /// Macro name that collides with a builtin word or control keyword
    #[error("{location}: redefinition of builtin word `{name}`")]
    ReservedMacroName {
        /// Location of the macro name
        location: SourceLocation,
        /// The reserved name
        name: String,
    },

    // I/O errors
    /// Source file could not be read
    #[error("cannot read {path}: {message}")]
    Io {
        /// Path that was being read
        path: String,
        /// Underlying I/O error message
        message: String,
    },

    /// Generated IR failed verification
    #[error("Internal compiler error: {0}")]
    Internal(String),
}

/// Error category, following the taxonomy the front end reports to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Block structure or macro syntax
    Syntax,
    /// Name resolution or macro naming
    Name,
    /// Reading the source
    Io,
    /// Front end defect
    Internal,
}

/// A `(file, row, message)` triple for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Source file
    pub file: String,
    /// 0-indexed row
    pub row: usize,
    /// Human-readable message without the location prefix
    pub message: String,
}

impl Error {
    /// Create an internal error with a message
    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }

    /// Create an unbalanced block error
    pub fn unbalanced(location: &SourceLocation, msg: impl Into<String>) -> Self {
        Error::UnbalancedBlock {
            location: location.clone(),
            message: msg.into(),
        }
    }

    /// Classify the error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::UnbalancedBlock { .. }
            | Error::ElseWithoutIf { .. }
            | Error::DoWithoutWhile { .. }
            | Error::MalformedMacro { .. }
            | Error::IncompleteMacro { .. }
            | Error::RecursiveMacro { .. }
            | Error::MacroExpansionLimit { .. } => ErrorCategory::Syntax,

            Error::UndefinedWord { .. }
            | Error::MacroRedefinition { .. }
            | Error::ReservedMacroName { .. } => ErrorCategory::Name,

            Error::Io { .. } => ErrorCategory::Io,
            Error::Internal(_) => ErrorCategory::Internal,
        }
    }

    /// Source location of the offending token, if the error has one
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Error::UnbalancedBlock { location, .. }
            | Error::ElseWithoutIf { location }
            | Error::DoWithoutWhile { location }
            | Error::MalformedMacro { location, .. }
            | Error::IncompleteMacro { location, .. }
            | Error::RecursiveMacro { location, .. }
            | Error::MacroExpansionLimit { location, .. }
            | Error::UndefinedWord { location, .. }
            | Error::MacroRedefinition { location, .. }
            | Error::ReservedMacroName { location, .. } => Some(location),
            Error::Io { .. } | Error::Internal(_) => None,
        }
    }

    /// Render the error as a `(file, row, message)` diagnostic
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        let location = self.location()?;
        let rendered = self.to_string();
        let prefix = format!("{}: ", location);
        let message = rendered
            .strip_prefix(prefix.as_str())
            .unwrap_or(rendered.as_str())
            .to_string();

        Some(Diagnostic {
            file: location.file().to_string(),
            row: location.row(),
            message,
        })
    }
}

/// Result type for stackc operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category() {
        let loc = SourceLocation::new("a.forth", 3);
        assert_eq!(
            Error::unbalanced(&loc, "x").category(),
            ErrorCategory::Syntax
        );
        assert_eq!(
            Error::UndefinedWord {
                location: loc,
                word: "bogus".to_string()
            }
            .category(),
            ErrorCategory::Name
        );
        assert_eq!(
            Error::Io {
                path: "a.forth".to_string(),
                message: "not found".to_string()
            }
            .category(),
            ErrorCategory::Io
        );
    }

    #[test]
    fn test_diagnostic_strips_location() {
        let err = Error::UndefinedWord {
            location: SourceLocation::new("prog.forth", 7),
            word: "bogus".to_string(),
        };
        assert_eq!(err.to_string(), "prog.forth:7: undefined word `bogus`");

        let diag = err.diagnostic().unwrap();
        assert_eq!(diag.file, "prog.forth");
        assert_eq!(diag.row, 7);
        assert_eq!(diag.message, "undefined word `bogus`");
    }

    #[test]
    fn test_io_has_no_location() {
        let err = Error::Io {
            path: "missing.forth".to_string(),
            message: "No such file or directory".to_string(),
        };
        assert!(err.location().is_none());
        assert!(err.diagnostic().is_none());
    }
}
