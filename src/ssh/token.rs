// ABOUTME: Token types produced by the SSH config lexer
// ABOUTME: Closed set of directive keywords, value payloads, and stream sentinels

use std::fmt;

/// Byte offset into the source text.
pub type Position = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Host,
    /// Value of a `Host` line; the only multi-valued directive.
    HostPatterns,
    HostName,
    User,
    Port,
    ProxyCommand,
    HostKeyAlgorithms,
    IdentityFile,
    Value,
    /// Unsupported directive or its value.
    Ignored,
    Error,
    Eof,
}

impl TokenKind {
    /// Match a directive keyword case-insensitively.
    /// Anything outside the supported set is `Ignored`.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_ascii_lowercase().as_str() {
            "host" => TokenKind::Host,
            "hostname" => TokenKind::HostName,
            "user" => TokenKind::User,
            "port" => TokenKind::Port,
            "proxycommand" => TokenKind::ProxyCommand,
            "hostkeyalgorithms" => TokenKind::HostKeyAlgorithms,
            "identityfile" => TokenKind::IdentityFile,
            _ => TokenKind::Ignored,
        }
    }

    /// Keyword kinds whose value arrives as a separate `Value` token.
    pub fn expects_value(self) -> bool {
        matches!(
            self,
            TokenKind::HostName
                | TokenKind::User
                | TokenKind::Port
                | TokenKind::ProxyCommand
                | TokenKind::HostKeyAlgorithms
                | TokenKind::IdentityFile
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Host => "Host",
            TokenKind::HostPatterns => "host patterns",
            TokenKind::HostName => "HostName",
            TokenKind::User => "User",
            TokenKind::Port => "Port",
            TokenKind::ProxyCommand => "ProxyCommand",
            TokenKind::HostKeyAlgorithms => "HostKeyAlgorithms",
            TokenKind::IdentityFile => "IdentityFile",
            TokenKind::Value => "value",
            TokenKind::Ignored => "ignored directive",
            TokenKind::Error => "error",
            TokenKind::Eof => "end of input",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Keyword text, raw value text, or a diagnostic for `Error` tokens.
    pub payload: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, payload: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            payload: payload.into(),
            position,
        }
    }

    pub fn eof(position: Position) -> Self {
        Self::new(TokenKind::Eof, "", position)
    }

    pub fn error(message: impl Into<String>, position: Position) -> Self {
        Self::new(TokenKind::Error, message, position)
    }
}
