//! Macro definitions collected during IR generation

use crate::compiler::ir::Opcode;
use crate::error::{Error, Result};
use crate::lexer::{Token, Word};
use std::collections::HashMap;

/// Named, unexpanded token sequences
///
/// Keyed by identifier text. Bodies are stored exactly as scanned and are
/// only interpreted when an invocation is expanded.
#[derive(Debug, Clone, Default)]
pub struct MacroTable {
    macros: HashMap<String, Vec<Token>>,
}

impl MacroTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a macro named by `name_token`
    ///
    /// Builtin words, control keywords and names already in the table are
    /// rejected with a name error at the name's location.
    pub fn define(&mut self, name_token: &Token, body: Vec<Token>) -> Result<()> {
        let name = self.check_name(name_token)?.to_string();

        tracing::trace!(
            "{}: defined macro `{}` with {} tokens",
            name_token.location,
            name,
            body.len()
        );
        self.macros.insert(name, body);
        Ok(())
    }

    /// Checks that `name_token` may name a new macro and returns the name
    pub fn check_name<'t>(&self, name_token: &'t Token) -> Result<&'t str> {
        let name = match &name_token.word {
            Word::Identifier(name) => name,
            other => {
                return Err(Error::MalformedMacro {
                    location: name_token.location.clone(),
                    found: other.to_string(),
                })
            }
        };

        if Opcode::from_word(name).is_some() {
            return Err(Error::ReservedMacroName {
                location: name_token.location.clone(),
                name: name.clone(),
            });
        }

        if self.macros.contains_key(name) {
            return Err(Error::MacroRedefinition {
                location: name_token.location.clone(),
                name: name.clone(),
            });
        }

        Ok(name.as_str())
    }

    /// Body of the macro `word` names, if it is a defined identifier
    pub fn get(&self, word: &Word) -> Option<&[Token]> {
        word.as_identifier()
            .and_then(|name| self.macros.get(name))
            .map(Vec::as_slice)
    }

    /// True if `word` invokes a defined macro
    pub fn contains(&self, word: &Word) -> bool {
        self.get(word).is_some()
    }

    /// Number of macros
    pub fn len(&self) -> usize {
        self.macros.len()
    }

    /// True if no macros are defined
    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::lexer::SourceLocation;

    fn ident(name: &str, row: usize) -> Token {
        Token::new(
            SourceLocation::new("m.forth", row),
            Word::Identifier(name.to_string()),
        )
    }

    #[test]
    fn test_define_and_lookup() {
        let mut table = MacroTable::new();
        table
            .define(&ident("double", 1), vec![ident("dup", 1), ident("+", 1)])
            .unwrap();

        let body = table.get(&Word::Identifier("double".to_string())).unwrap();
        assert_eq!(body.len(), 2);
        assert!(table.contains(&Word::Identifier("double".to_string())));
        assert!(!table.contains(&Word::StringLiteral("double".to_string())));
        assert!(!table.contains(&Word::Identifier("triple".to_string())));
    }

    #[test]
    fn test_redefinition_rejected() {
        let mut table = MacroTable::new();
        table.define(&ident("twice", 1), Vec::new()).unwrap();

        let err = table.define(&ident("twice", 4), Vec::new()).unwrap_err();
        assert!(matches!(err, Error::MacroRedefinition { .. }));
        assert_eq!(err.category(), ErrorCategory::Name);
        assert_eq!(err.location().unwrap().row(), 4);
    }

    #[test]
    fn test_reserved_names_rejected() {
        let mut table = MacroTable::new();
        for name in ["dup", "if", "end", "macro", "+"] {
            let err = table.define(&ident(name, 2), Vec::new()).unwrap_err();
            assert!(matches!(err, Error::ReservedMacroName { .. }), "{}", name);
        }
        assert!(table.is_empty());
    }
}
