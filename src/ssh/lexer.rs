// ABOUTME: Line-oriented lexer turning SSH config text into a pull-based token stream
// ABOUTME: Pairs every directive keyword with its value token and reports malformed lines as error tokens

use super::token::{Position, Token, TokenKind};

/// Cursor over SSH config source text.
///
/// Each call to [`Lexer::next_token`] yields exactly one token. A directive
/// line produces two tokens: the keyword, then its value (held in `pending`
/// until the next call). After an error token the stream is exhausted and
/// only `Eof` follows.
pub struct Lexer<'src> {
    source: &'src str,
    pos: usize,
    pending: Option<Token>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            pending: None,
        }
    }

    pub fn next_token(&mut self) -> Token {
        if let Some(token) = self.pending.take() {
            return token;
        }

        let source = self.source;
        while self.pos < source.len() {
            let line_start = self.pos;
            let rest = &source[line_start..];
            let line = match rest.find('\n') {
                Some(end) => {
                    self.pos = line_start + end + 1;
                    &rest[..end]
                }
                None => {
                    self.pos = source.len();
                    rest
                }
            };
            let line = line.strip_suffix('\r').unwrap_or(line);

            let content = line.trim_start();
            if content.is_empty() || content.starts_with('#') {
                continue;
            }

            let keyword_pos = line_start + (line.len() - content.len());
            return self.lex_directive(content, keyword_pos);
        }

        Token::eof(source.len())
    }

    /// Lex one non-blank, non-comment line starting at its keyword.
    fn lex_directive(&mut self, content: &'src str, keyword_pos: Position) -> Token {
        let keyword_len = content
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(content.len());
        let keyword = &content[..keyword_len];
        if keyword.is_empty() {
            return self.fail("expected directive keyword", keyword_pos);
        }

        // Separator is whitespace with at most one '='
        let after = content[keyword_len..].trim_start();
        let after = after.strip_prefix('=').unwrap_or(after).trim_start();
        let value = after.trim_end();
        let value_pos = keyword_pos + (content.len() - after.len());

        let kind = TokenKind::from_keyword(keyword);
        let keyword_token = Token::new(kind, keyword, keyword_pos);

        let value_token = match kind {
            TokenKind::Ignored => Token::new(TokenKind::Ignored, value, value_pos),
            _ => {
                if let Some(quote) = unbalanced_quote(value) {
                    self.fail("unterminated quoted string", value_pos + quote)
                } else if kind == TokenKind::Host {
                    Token::new(TokenKind::HostPatterns, value, value_pos)
                } else if kind.expects_value() && value.is_empty() {
                    self.fail(format!("missing value for {kind}"), value_pos)
                } else {
                    Token::new(TokenKind::Value, value, value_pos)
                }
            }
        };
        self.pending = Some(value_token);

        keyword_token
    }

    /// Build an error token and stop scanning.
    fn fail(&mut self, message: impl Into<String>, position: Position) -> Token {
        self.pos = self.source.len();
        Token::error(message, position)
    }
}

/// Offset of the opening quote if `value` has an odd number of double quotes.
fn unbalanced_quote(value: &str) -> Option<usize> {
    let mut open = None;
    for (index, c) in value.char_indices() {
        if c == '"' {
            open = match open {
                Some(_) => None,
                None => Some(index),
            };
        }
    }
    open
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields tokens up to, but not including, `Eof`.
    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}
