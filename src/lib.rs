// ABOUTME: Library root for parsing OpenSSH client config files into structured host records
// ABOUTME: Exposes the lexer/parser core, the file loader, and the command-line tool's config and output

pub mod config;
pub mod output;
pub mod ssh;

pub use ssh::{HostRecord, ParseError, load_hosts, parse};
