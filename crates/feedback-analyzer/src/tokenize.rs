// Whitespace tokenizer shared by the three capabilities.

/// Characters that close a clause when they end a raw token.
const CLAUSE_END: [char; 6] = ['.', ',', '!', '?', ':', ';'];
/// Typographic single quotes, read as `'` so `don’t` is the same word as `don't`.
const CURLY_APOSTROPHES: [char; 2] = ['\u{2018}', '\u{2019}'];

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    /// Lowercased token with surrounding punctuation removed; may be empty.
    pub(crate) word: String,
    /// True when a clause boundary follows this token.
    pub(crate) ends_clause: bool,
}

pub(crate) fn tokens(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .map(|raw| {
            let raw = raw.replace(CURLY_APOSTROPHES, "'");
            let tail = raw.trim_end_matches(|c: char| matches!(c, ')' | ']' | '"' | '\''));
            Token {
                word: raw
                    .trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase(),
                ends_clause: tail.ends_with(CLAUSE_END),
            }
        })
        .collect()
}
