use lazy_static::lazy_static;
use regex::Regex;

use crate::ParseError;

/// Splits an instruction into words
///
/// A word is a run of characters that are neither spaces nor quotes, or a double quoted
/// span; adjacent pieces without whitespace in between stay in the same word. A word that
/// is entirely wrapped in double quotes is returned without them. There is no escaping: a
/// quote that never closes is dropped.
pub fn tokenize(input: &str) -> Result<Vec<String>, ParseError> {
    lazy_static! {
        static ref RE_TOKEN: Regex = Regex::new(r#"(?:[^\s"]+|"[^"]*")+"#).unwrap();
    }
    let tokens: Vec<String> = RE_TOKEN
        .find_iter(input)
        .map(|m| unquote(m.as_str()).to_string())
        .collect();
    if tokens.is_empty() {
        Err(ParseError::EmptyInstruction)
    } else {
        Ok(tokens)
    }
}

fn unquote(token: &str) -> &str {
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        &token[1..token.len() - 1]
    } else {
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string() {
        assert_eq!(tokenize(""), Err(ParseError::EmptyInstruction));
        assert_eq!(tokenize(" \t\n "), Err(ParseError::EmptyInstruction));
    }

    #[test]
    fn quoted_spans_keep_spaces() {
        let tokens = tokenize(r#"add -desc "Team   lunch" -cost 12.5"#).unwrap();
        assert_eq!(tokens, vec!["add", "-desc", "Team   lunch", "-cost", "12.5"]);
    }

    #[test]
    fn quotes_inside_words_are_literal() {
        let tokens = tokenize(r#"add -desc ab"c d"e"#).unwrap();
        assert_eq!(tokens, vec!["add", "-desc", r#"ab"c d"e"#]);
    }

    #[test]
    fn empty_quotes() {
        let tokens = tokenize(r#"daylog -text """#).unwrap();
        assert_eq!(tokens, vec!["daylog", "-text", ""]);
    }

    #[test]
    fn unclosed_quote_is_dropped() {
        let tokens = tokenize(r#"add "oops"#).unwrap();
        assert_eq!(tokens, vec!["add", "oops"]);
    }
}
