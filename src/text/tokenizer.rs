//! Word tokenizer
//!
//! Splits text into lowercase ASCII alphanumeric runs. Every other character,
//! including non-ASCII letters and digits, separates tokens and is dropped.

use std::str::Chars;

/// Streaming tokenizer over a borrowed string
///
/// Yields one token per maximal run of ASCII alphanumeric characters, in
/// order. Single pass: once exhausted it stays exhausted.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    chars: Chars<'a>,
}

impl<'a> Tokens<'a> {
    /// Creates a tokenizer over `text`
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
        }
    }
}

impl Iterator for Tokens<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut token = String::new();

        for c in self.chars.by_ref() {
            if c.is_ascii_alphanumeric() {
                token.push(c.to_ascii_lowercase());
            } else if !token.is_empty() {
                return Some(token);
            }
        }

        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }
}

/// Tokenizes `text` into lowercase ASCII alphanumeric words
///
/// # Examples
///
/// ```
/// use trawl::text::tokenize;
///
/// assert_eq!(tokenize("Hello, World! 123"), vec!["hello", "world", "123"]);
/// assert!(tokenize("").is_empty());
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    Tokens::new(text).collect()
}
