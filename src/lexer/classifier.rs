use super::token::Word;

/// Classifies one raw word
///
/// Decimal integers (optional sign, `i64` range) become [`Word::IntLiteral`].
/// A word longer than one character that starts and ends with `"` becomes a
/// [`Word::StringLiteral`] with the two quotes stripped; escape sequences are
/// kept verbatim. Everything else is an [`Word::Identifier`].
pub fn classify(raw: &str) -> Word {
    if let Ok(value) = raw.parse::<i64>() {
        return Word::IntLiteral(value);
    }

    if raw.len() > 1 && raw.starts_with('"') && raw.ends_with('"') {
        return Word::StringLiteral(raw[1..raw.len() - 1].to_string());
    }

    Word::Identifier(raw.to_string())
}
