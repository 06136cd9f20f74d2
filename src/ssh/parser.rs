// ABOUTME: Token-stream parser assembling SSH config Host blocks into ordered host records
// ABOUTME: Enforces the Host-first grammar, value pairing, and numeric Port conversion

use super::lexer::Lexer;
use super::token::{Position, Token, TokenKind};
use serde::{Deserialize, Serialize};
use std::num::ParseIntError;
use thiserror::Error;
use tracing::trace;

pub const DEFAULT_PORT: u16 = 22;

/// One `Host` block and the directives that followed it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct HostRecord {
    pub patterns: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub host_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub proxy_command: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub host_key_algorithms: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub identity_file: String,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl HostRecord {
    pub fn new(patterns: Vec<String>) -> Self {
        Self {
            patterns,
            host_name: String::new(),
            user: String::new(),
            port: DEFAULT_PORT,
            proxy_command: String::new(),
            host_key_algorithms: String::new(),
            identity_file: String::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{keyword} directive before Host block at pos {position}")]
    DirectiveBeforeHost { keyword: String, position: Position },

    #[error("{message}")]
    UnexpectedToken { message: String, position: Position },

    #[error("Host directive requires at least one pattern at pos {position}")]
    EmptyHost { position: Position },

    #[error("{message} at pos {position}")]
    Lex { message: String, position: Position },

    #[error("invalid Port value '{value}'")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl ParseError {
    fn lex(token: Token) -> Self {
        ParseError::Lex {
            message: token.payload,
            position: token.position,
        }
    }
}

/// Parse SSH config text into host records in declaration order.
pub fn parse(input: &str) -> Result<Vec<HostRecord>, ParseError> {
    Parser::new(Lexer::new(input)).parse()
}

/// Pulls tokens from a [`Lexer`] and assembles [`HostRecord`]s.
///
/// `current` is `None` until the first `Host` token; every other directive
/// seen before then is a grammar error.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Option<HostRecord>,
    records: Vec<HostRecord>,
}

impl<'src> Parser<'src> {
    pub fn new(lexer: Lexer<'src>) -> Self {
        Self {
            lexer,
            current: None,
            records: Vec::new(),
        }
    }

    pub fn parse(mut self) -> Result<Vec<HostRecord>, ParseError> {
        loop {
            let token = self.lexer.next_token();

            match token.kind {
                TokenKind::Eof => {
                    self.close_record();
                    return Ok(self.records);
                }
                TokenKind::Error => return Err(ParseError::lex(token)),
                TokenKind::Host => {
                    self.close_record();
                    self.current = Some(HostRecord::new(Vec::new()));
                }
                TokenKind::HostPatterns => {
                    let record = open_record(&mut self.current, &token)?;
                    let patterns: Vec<String> =
                        token.payload.split_whitespace().map(str::to_string).collect();
                    if patterns.is_empty() {
                        return Err(ParseError::EmptyHost {
                            position: token.position,
                        });
                    }
                    record.patterns = patterns;
                }
                TokenKind::Ignored => {
                    open_record(&mut self.current, &token)?;
                    trace!(payload = %token.payload, position = token.position, "skipping unsupported directive");
                }
                TokenKind::HostName => {
                    let (record, value) = self.directive(&token)?;
                    record.host_name = value;
                }
                TokenKind::User => {
                    let (record, value) = self.directive(&token)?;
                    record.user = value;
                }
                TokenKind::Port => {
                    let (record, value) = self.directive(&token)?;
                    record.port = value
                        .parse()
                        .map_err(|source| ParseError::InvalidPort { value, source })?;
                }
                TokenKind::ProxyCommand => {
                    let (record, value) = self.directive(&token)?;
                    record.proxy_command = value;
                }
                TokenKind::HostKeyAlgorithms => {
                    let (record, value) = self.directive(&token)?;
                    record.host_key_algorithms = value;
                }
                TokenKind::IdentityFile => {
                    let (record, value) = self.directive(&token)?;
                    record.identity_file = value;
                }
                // A Value token is only valid right after its keyword
                TokenKind::Value => {
                    open_record(&mut self.current, &token)?;
                    return Err(ParseError::UnexpectedToken {
                        message: token.payload,
                        position: token.position,
                    });
                }
            }
        }
    }

    /// Open record plus the value token that must follow `keyword`.
    fn directive(&mut self, keyword: &Token) -> Result<(&mut HostRecord, String), ParseError> {
        let record = open_record(&mut self.current, keyword)?;
        let value = expect_value(&mut self.lexer)?;
        Ok((record, value))
    }

    fn close_record(&mut self) {
        if let Some(record) = self.current.take() {
            trace!(patterns = ?record.patterns, "closing Host block");
            self.records.push(record);
        }
    }
}

/// The record being built, or a grammar error if no Host block is open yet.
fn open_record<'a>(
    current: &'a mut Option<HostRecord>,
    token: &Token,
) -> Result<&'a mut HostRecord, ParseError> {
    current.as_mut().ok_or_else(|| ParseError::DirectiveBeforeHost {
        keyword: token.payload.clone(),
        position: token.position,
    })
}

/// Fetch the value token that must follow a directive keyword.
fn expect_value(lexer: &mut Lexer<'_>) -> Result<String, ParseError> {
    let next = lexer.next_token();
    match next.kind {
        TokenKind::Value => Ok(next.payload),
        TokenKind::Error => Err(ParseError::lex(next)),
        _ => Err(ParseError::UnexpectedToken {
            message: next.payload,
            position: next.position,
        }),
    }
}
