//! The shared input cursor.

use crate::error::{Result, RuntimeError};
use std::collections::VecDeque;
use std::io::{self, BufRead};

/// Exclusive reader over the program's input stream.
///
/// Tokens are separated by Unicode whitespace. After a token, the rest of
/// its line is dropped when it holds nothing but whitespace; otherwise it is
/// left for the next read, so a line read straight after an integer read
/// returns the rest of that line.
pub struct InputCursor {
    reader: Box<dyn BufRead + Send>,
    /// Bytes pulled from `reader` for lookahead but not yet consumed.
    pending: VecDeque<u8>,
}

impl InputCursor {
    pub fn new(reader: impl BufRead + Send + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            pending: VecDeque::new(),
        }
    }

    /// Cursor over the process's standard input.
    pub fn stdin() -> Self {
        Self::new(io::BufReader::new(io::stdin()))
    }

    /// Read up to and excluding the next line terminator.
    ///
    /// Both `\n` and `\r\n` terminate a line. A final line with no
    /// terminator is returned as-is. Invalid UTF-8 is replaced with
    /// U+FFFD rather than reported.
    pub fn read_line(&mut self) -> Result<String> {
        let mut buf = Vec::new();
        match self.pending.iter().position(|&b| b == b'\n') {
            Some(end) => buf.extend(self.pending.drain(..=end)),
            None => {
                buf.extend(self.pending.drain(..));
                self.reader.read_until(b'\n', &mut buf)?;
            }
        }
        if buf.is_empty() {
            return Err(RuntimeError::EndOfInput);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Skip whitespace and read the next whitespace-delimited token.
    ///
    /// Invalid UTF-8 inside a token is kept in the token and replaced with
    /// U+FFFD.
    pub fn read_token(&mut self) -> Result<String> {
        loop {
            match self.char_at(0)? {
                None => return Err(RuntimeError::EndOfInput),
                Some((Some(c), width)) if c.is_whitespace() => {
                    self.pending.drain(..width);
                }
                Some(_) => break,
            }
        }

        let mut token = Vec::new();
        while let Some((c, width)) = self.char_at(0)? {
            if c.is_some_and(char::is_whitespace) {
                break;
            }
            token.extend(self.pending.drain(..width));
        }

        self.drop_blank_line_tail()?;
        Ok(String::from_utf8_lossy(&token).into_owned())
    }

    /// Consume the rest of the current line if it is only whitespace.
    fn drop_blank_line_tail(&mut self) -> io::Result<()> {
        let mut at = 0;
        loop {
            match self.char_at(at)? {
                None => break,
                Some((Some('\n'), width)) => {
                    at += width;
                    break;
                }
                Some((Some(c), width)) if c.is_whitespace() => at += width,
                Some(_) => return Ok(()),
            }
        }
        self.pending.drain(..at);
        Ok(())
    }

    /// Decode the character starting `at` bytes into the lookahead.
    ///
    /// Returns `None` at end of input. A byte that does not start a valid
    /// UTF-8 sequence decodes as `(None, 1)`.
    fn char_at(&mut self, at: usize) -> io::Result<Option<(Option<char>, usize)>> {
        if self.fill(at + 1)? <= at {
            return Ok(None);
        }
        let width = utf8_width(self.pending[at]);
        let available = self.fill(at + width)? - at;
        if available < width {
            return Ok(Some((None, 1)));
        }

        let mut bytes = [0u8; 4];
        for (slot, byte) in bytes.iter_mut().zip(self.pending.range(at..at + width)) {
            *slot = *byte;
        }
        Ok(Some(match std::str::from_utf8(&bytes[..width]) {
            Ok(s) => (s.chars().next(), width),
            Err(_) => (None, 1),
        }))
    }

    /// Pull bytes into the lookahead until it holds `want` or input ends.
    fn fill(&mut self, want: usize) -> io::Result<usize> {
        while self.pending.len() < want {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                break;
            }
            let take = (want - self.pending.len()).min(available.len());
            self.pending.extend(&available[..take]);
            self.reader.consume(take);
        }
        Ok(self.pending.len())
    }
}

fn utf8_width(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

impl std::fmt::Debug for InputCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputCursor")
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn cursor(input: &str) -> InputCursor {
        bytes_cursor(input.as_bytes())
    }

    fn bytes_cursor(input: &[u8]) -> InputCursor {
        InputCursor::new(Cursor::new(input.to_vec()))
    }

    #[test]
    fn test_read_lines() {
        let mut input = cursor("first\r\nsecond\n\nlast");
        assert_eq!(input.read_line().unwrap(), "first");
        assert_eq!(input.read_line().unwrap(), "second");
        assert_eq!(input.read_line().unwrap(), "");
        assert_eq!(input.read_line().unwrap(), "last");
        assert!(matches!(input.read_line(), Err(RuntimeError::EndOfInput)));
    }

    #[test]
    fn test_read_line_empty_input() {
        assert!(matches!(cursor("").read_line(), Err(RuntimeError::EndOfInput)));
    }

    #[test]
    fn test_read_tokens() {
        let mut input = cursor("  12 -3\n\n\t 45\n");
        assert_eq!(input.read_token().unwrap(), "12");
        assert_eq!(input.read_token().unwrap(), "-3");
        assert_eq!(input.read_token().unwrap(), "45");
        assert!(matches!(input.read_token(), Err(RuntimeError::EndOfInput)));
    }

    #[test]
    fn test_token_at_end_without_newline() {
        let mut input = cursor("99");
        assert_eq!(input.read_token().unwrap(), "99");
        assert!(matches!(input.read_token(), Err(RuntimeError::EndOfInput)));
    }

    #[test]
    fn test_token_spans_buffer_refills() {
        let reader = io::BufReader::with_capacity(2, Cursor::new(b"   123456 7".to_vec()));
        let mut input = InputCursor::new(reader);
        assert_eq!(input.read_token().unwrap(), "123456");
        assert_eq!(input.read_token().unwrap(), "7");
    }

    #[test]
    fn test_line_after_last_token_is_end_of_input() {
        let mut input = cursor("7\n");
        assert_eq!(input.read_token().unwrap(), "7");
        assert!(matches!(input.read_line(), Err(RuntimeError::EndOfInput)));

        let mut input = cursor("7  \r\n");
        assert_eq!(input.read_token().unwrap(), "7");
        assert!(matches!(input.read_line(), Err(RuntimeError::EndOfInput)));
    }

    #[test]
    fn test_blank_tail_of_token_line_is_dropped() {
        let mut input = cursor("5 \t\nnext\n");
        assert_eq!(input.read_token().unwrap(), "5");
        assert_eq!(input.read_line().unwrap(), "next");
    }

    #[test]
    fn test_blank_tail_drops_only_one_line() {
        let mut input = cursor("5\n\nafter\n");
        assert_eq!(input.read_token().unwrap(), "5");
        assert_eq!(input.read_line().unwrap(), "");
        assert_eq!(input.read_line().unwrap(), "after");
    }

    #[test]
    fn test_line_after_token_returns_rest_of_line() {
        let mut input = cursor("5 rest\nnext\n");
        assert_eq!(input.read_token().unwrap(), "5");
        assert_eq!(input.read_line().unwrap(), " rest");
        assert_eq!(input.read_line().unwrap(), "next");
    }

    #[test]
    fn test_tokens_split_on_unicode_whitespace() {
        let mut input = cursor("12\u{00A0}34\u{2003}56\u{3000}\n");
        assert_eq!(input.read_token().unwrap(), "12");
        assert_eq!(input.read_token().unwrap(), "34");
        assert_eq!(input.read_token().unwrap(), "56");
        assert!(matches!(input.read_token(), Err(RuntimeError::EndOfInput)));
    }

    #[test]
    fn test_multibyte_whitespace_across_refills() {
        let bytes = "1\u{2003}2".as_bytes().to_vec();
        let reader = io::BufReader::with_capacity(1, Cursor::new(bytes));
        let mut input = InputCursor::new(reader);
        assert_eq!(input.read_token().unwrap(), "1");
        assert_eq!(input.read_token().unwrap(), "2");
    }

    #[test]
    fn test_non_ascii_token() {
        let mut input = cursor("  привет мир");
        assert_eq!(input.read_token().unwrap(), "привет");
        assert_eq!(input.read_line().unwrap(), " мир");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut input = bytes_cursor(b"ab\xFFcd\n4\xC3 5");
        assert_eq!(input.read_line().unwrap(), "ab\u{FFFD}cd");
        assert_eq!(input.read_token().unwrap(), "4\u{FFFD}");
        assert_eq!(input.read_token().unwrap(), "5");
    }
}
