/// A cursor for byte-by-byte inline parsing with position tracking.
///
/// Operates over one block's marker-stripped source text. Positions are
/// local byte indices into `s`; the renderer owns the mapping to character
/// offsets in the stripped output.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being parsed.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `s`.
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i..].starts_with(pat)
    }

    /// Advances past one UTF-8 character, returning the byte index it started at.
    pub fn bump(&mut self) -> Option<usize> {
        if self.eof() {
            return None;
        }
        let at = self.i;
        let mut next = at + 1;
        while next < self.s.len() && !self.s.is_char_boundary(next) {
            next += 1;
        }
        self.i = next;
        Some(at)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Finds the next occurrence of `pat` at or after the current position.
    ///
    /// Returns the byte index relative to the start of `s`, not the cursor.
    pub fn find(&self, pat: &[u8]) -> Option<usize> {
        let hay = &self.s.as_bytes()[self.i..];
        if pat.is_empty() {
            return Some(self.i);
        }
        hay.windows(pat.len())
            .position(|w| w == pat)
            .map(|p| self.i + p)
    }

    /// Finds the next occurrence of a single byte at or after the current position.
    pub fn find_byte(&self, b: u8) -> Option<usize> {
        self.s.as_bytes()[self.i..]
            .iter()
            .position(|&x| x == b)
            .map(|p| self.i + p)
    }

    /// Jumps the cursor to an absolute byte index.
    pub fn jump(&mut self, to: usize) {
        self.i = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("hello");
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some(b'h'));
        assert_eq!(cur.bump(), Some(0));
        assert_eq!(cur.i, 1);
    }

    #[test]
    fn cursor_starts_with() {
        let cur = Cursor::new("**bold**");
        assert!(cur.starts_with(b"**"));
        assert!(!cur.starts_with(b"__"));
    }

    #[test]
    fn empty_string_input() {
        let cur = Cursor::new("");
        assert!(cur.eof());
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.find_byte(b'x'), None);
    }

    #[test]
    fn bump_steps_over_multibyte_chars() {
        let mut cur = Cursor::new("é!");
        assert_eq!(cur.bump(), Some(0));
        // 'é' is two bytes; the cursor must land on a char boundary
        assert_eq!(cur.i, 2);
        assert_eq!(cur.peek(), Some(b'!'));
    }

    #[test]
    fn find_locates_pattern_after_position() {
        let mut cur = Cursor::new("a**b**");
        assert_eq!(cur.find(b"**"), Some(1));
        cur.bump_n(3);
        assert_eq!(cur.find(b"**"), Some(4));
    }

    #[test]
    fn find_misses_pattern_before_position() {
        let mut cur = Cursor::new("**a");
        cur.bump_n(2);
        assert_eq!(cur.find(b"**"), None);
    }

    #[test]
    fn find_byte_at_current_position() {
        let cur = Cursor::new("`code`");
        assert_eq!(cur.find_byte(b'`'), Some(0));
    }

    #[test]
    fn jump_moves_to_absolute_index() {
        let mut cur = Cursor::new("hello");
        cur.jump(4);
        assert_eq!(cur.peek(), Some(b'o'));
    }
}
