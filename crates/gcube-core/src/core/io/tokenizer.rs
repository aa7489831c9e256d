use std::io::{self, BufRead};

/// A cursor over a text stream supporting both token-based and line-based reads.
///
/// The reader mirrors formatted stream extraction: [`next_token`](Self::next_token) skips any
/// whitespace, including line breaks, and leaves the cursor right after the token, while
/// [`read_line`](Self::read_line) returns whatever is left of the current line (or the next
/// full line when the current one is exhausted). [`skip_line`](Self::skip_line) discards the
/// rest of the current line.
pub struct TokenReader<R> {
    reader: R,
    /// Raw bytes of the current line, reused between reads.
    bytes: Vec<u8>,
    /// The current line including its terminator. Invalid UTF-8 is replaced with U+FFFD.
    line: String,
    /// Byte offset of the first unconsumed character of `line`.
    cursor: usize,
    /// 1-based number of the current line; 0 before anything was read.
    line_number: usize,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            bytes: Vec::new(),
            line: String::new(),
            cursor: 0,
            line_number: 0,
        }
    }

    /// Number of the line the cursor is on, counting from 1.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn has_pending_line(&self) -> bool {
        self.cursor < self.line.len()
    }

    fn fill_line(&mut self) -> io::Result<bool> {
        self.bytes.clear();
        self.cursor = 0;
        if self.reader.read_until(b'\n', &mut self.bytes)? == 0 {
            self.line.clear();
            return Ok(false);
        }
        self.line = String::from_utf8_lossy(&self.bytes).into_owned();
        self.line_number += 1;
        Ok(true)
    }

    /// Returns the next whitespace-delimited token, reading further lines as needed.
    ///
    /// # Return
    ///
    /// `Ok(None)` once the stream is exhausted.
    pub fn next_token(&mut self) -> io::Result<Option<&str>> {
        loop {
            let span = {
                let rest = &self.line[self.cursor..];
                rest.find(|c: char| !c.is_whitespace()).map(|offset| {
                    let start = self.cursor + offset;
                    let len = self.line[start..]
                        .find(char::is_whitespace)
                        .unwrap_or(self.line.len() - start);
                    (start, start + len)
                })
            };

            if let Some((start, end)) = span {
                self.cursor = end;
                return Ok(Some(&self.line[start..end]));
            }

            if !self.fill_line()? {
                return Ok(None);
            }
        }
    }

    /// Returns the rest of the current line, or the next line if the current one is used up,
    /// without its line terminator.
    ///
    /// # Return
    ///
    /// `Ok(None)` once the stream is exhausted.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        if !self.has_pending_line() && !self.fill_line()? {
            return Ok(None);
        }
        let rest = &self.line[self.cursor..];
        let content = rest
            .strip_suffix('\n')
            .map(|s| s.strip_suffix('\r').unwrap_or(s))
            .unwrap_or(rest)
            .to_string();
        self.cursor = self.line.len();
        Ok(Some(content))
    }

    /// Discards the rest of the current line.
    pub fn skip_line(&mut self) -> io::Result<()> {
        self.read_line().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(text: &str) -> TokenReader<Cursor<&[u8]>> {
        TokenReader::new(Cursor::new(text.as_bytes()))
    }

    fn tokens<R: BufRead>(r: &mut TokenReader<R>) -> Vec<String> {
        let mut out = Vec::new();
        while let Some(token) = r.next_token().unwrap() {
            out.push(token.to_string());
        }
        out
    }

    #[test]
    fn tokens_span_line_boundaries() {
        let mut r = reader("  1.0 2.0\n\n   3.0\t4.0\r\n5.0");
        assert_eq!(tokens(&mut r), vec!["1.0", "2.0", "3.0", "4.0", "5.0"]);
        assert!(r.next_token().unwrap().is_none());
    }

    #[test]
    fn read_line_returns_full_lines_without_terminators() {
        let mut r = reader("title line \nsecond\r\nthird");
        assert_eq!(r.read_line().unwrap().as_deref(), Some("title line "));
        assert_eq!(r.read_line().unwrap().as_deref(), Some("second"));
        assert_eq!(r.read_line().unwrap().as_deref(), Some("third"));
        assert_eq!(r.read_line().unwrap(), None);
    }

    #[test]
    fn read_line_after_token_returns_rest_of_line() {
        let mut r = reader("   -2   0.0 0.0 0.0   1\nnext line\n");
        assert_eq!(r.next_token().unwrap(), Some("-2"));
        assert_eq!(r.read_line().unwrap().as_deref(), Some("   0.0 0.0 0.0   1"));
        assert_eq!(r.read_line().unwrap().as_deref(), Some("next line"));
    }

    #[test]
    fn skip_line_after_last_token_consumes_only_the_terminator() {
        let mut r = reader("1 2 3\n4 5\n");
        for _ in 0..3 {
            r.next_token().unwrap();
        }
        r.skip_line().unwrap();
        assert_eq!(r.read_line().unwrap().as_deref(), Some("4 5"));
    }

    #[test]
    fn skip_line_mid_line_discards_remaining_tokens() {
        let mut r = reader("1 2 3\n4 5\n");
        r.next_token().unwrap();
        r.skip_line().unwrap();
        assert_eq!(tokens(&mut r), vec!["4", "5"]);
    }

    #[test]
    fn line_number_tracks_lines_read() {
        let mut r = reader("a\nb c\n\nd\n");
        assert_eq!(r.line_number(), 0);
        r.read_line().unwrap();
        assert_eq!(r.line_number(), 1);
        r.next_token().unwrap();
        r.next_token().unwrap();
        assert_eq!(r.line_number(), 2);
        assert_eq!(r.next_token().unwrap(), Some("d"));
        assert_eq!(r.line_number(), 4);
    }

    #[test]
    fn invalid_utf8_is_replaced_instead_of_failing() {
        let mut r = TokenReader::new(Cursor::new(&b"density \xC5ngstr\xF6m\n1 2\n"[..]));
        assert_eq!(
            r.read_line().unwrap().as_deref(),
            Some("density \u{FFFD}ngstr\u{FFFD}m")
        );
        assert_eq!(tokens(&mut r), vec!["1", "2"]);
    }

    #[test]
    fn empty_stream_yields_nothing() {
        let mut r = reader("");
        assert!(r.next_token().unwrap().is_none());
        assert!(r.read_line().unwrap().is_none());
        assert!(r.skip_line().is_ok());
    }
}
