// ABOUTME: Parser for the `-KEY value -KEY2 "quoted value"` environment input.
// ABOUTME: Quoted tokens are always values, even when they start with a hyphen.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

#[derive(Debug, PartialEq, Eq)]
struct Token {
    text: String,
    quoted: bool,
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let mut text = String::new();
        let quoted = c == '"';
        if quoted {
            chars.next();
            let mut closed = false;
            while let Some(c) = chars.next() {
                match c {
                    '\\' if chars.peek() == Some(&'"') => {
                        chars.next();
                        text.push('"');
                    }
                    '"' => {
                        closed = true;
                        break;
                    }
                    _ => text.push(c),
                }
            }
            if !closed {
                return Err(Error::InvalidEnvironmentVariables(
                    "unterminated quoted value".to_string(),
                ));
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                text.push(c);
                chars.next();
            }
        }

        tokens.push(Token { text, quoted });
    }

    Ok(tokens)
}

/// Parse `-KEY value` pairs. A key followed directly by another key gets an empty value.
///
/// # Errors
///
/// Fails on an unterminated quote or a value with no key before it.
pub fn parse_env_pairs(input: &str) -> Result<BTreeMap<String, String>> {
    let mut pairs = BTreeMap::new();
    let mut tokens = tokenize(input)?.into_iter().peekable();

    while let Some(token) = tokens.next() {
        let key = match token.text.strip_prefix('-') {
            Some(key) if !token.quoted && !key.is_empty() => key.to_string(),
            _ => {
                return Err(Error::InvalidEnvironmentVariables(format!(
                    "expected -KEY before '{}'",
                    token.text
                )));
            }
        };

        let value = match tokens.peek() {
            Some(next) if next.quoted || !next.text.starts_with('-') => {
                tokens.next().map(|t| t.text).unwrap_or_default()
            }
            _ => String::new(),
        };

        pairs.insert(key, value);
    }

    Ok(pairs)
}
