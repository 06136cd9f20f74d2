// ABOUTME: SSH client config parsing module: lexer, parser, and file loader
// ABOUTME: Turns OpenSSH config text into ordered HostRecord values without resolving host matches

pub mod lexer;
pub mod loader;
pub mod parser;
pub mod token;

pub use lexer::Lexer;
pub use loader::{config_files, default_config_files, load_hosts, parse_file};
pub use parser::{HostRecord, ParseError, parse};
pub use token::{Token, TokenKind};
