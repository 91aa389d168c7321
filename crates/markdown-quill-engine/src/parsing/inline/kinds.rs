//! Inline-specific types that own their syntax delimiters.
//!
//! All delimiter constants live here, not scattered in parser code.
//! The parser calls these constants; it never hardcodes `**` or `` ` ``.

/// Code span inline type with owned delimiter constant.
///
/// Code spans are "raw zones" - no other inline parsing occurs inside them.
pub struct Code;

impl Code {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';
}

/// Bold (strong emphasis) delimited by double asterisks.
pub struct Bold;

impl Bold {
    pub const DELIM: &'static [u8; 2] = b"**";
}

/// Italic (emphasis) delimited by single asterisks.
pub struct Italic;

impl Italic {
    pub const STAR: u8 = b'*';
}

/// An inline link `[text](url)`.
pub struct Link;

impl Link {
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';
    pub const URL_OPEN: u8 = b'(';
    pub const URL_CLOSE: u8 = b')';
}
