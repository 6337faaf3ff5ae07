use memchr::{memchr2, memchr3};

use super::{Scanner, Token, TokenKind};
use crate::classify::is_ws;
use crate::error::WalkError;
use crate::event::SliceFlags;
use crate::input::Source;

impl<S: Source> Scanner<'_, S> {
    /// `//` comment running to the line break (the break itself is left for
    /// the whitespace loop so line accounting stays in one place). The
    /// payload keeps leading whitespace and trims trailing whitespace.
    pub(super) fn scan_line_comment(&mut self) -> Result<Token, WalkError> {
        self.advance(b'/')?;
        self.advance(b'/')?;
        let flags = self.consume_rest_of_line()?;
        let bytes = self.src.pinned();
        let mut end = bytes.len();
        while end > 2 && matches!(bytes[end - 1], b' ' | b'\t') {
            end -= 1;
        }
        Ok(self.token(TokenKind::Comment, flags, (2, end)))
    }

    /// `/* … */` comment, non-nested. Unterminated is an error except in
    /// Lax mode, where it swallows the remaining input. The payload is
    /// trimmed on both ends.
    pub(super) fn scan_block_comment(&mut self) -> Result<Token, WalkError> {
        self.advance(b'/')?;
        self.advance(b'*')?;
        let mut flags = SliceFlags::NONE;
        loop {
            if self.src.visible().is_empty() {
                if self.src.peek()?.is_none() {
                    if self.opts.recover {
                        let len = self.token_len();
                        let pay = trim_span(self.src.pinned(), 2, len);
                        return Ok(self.token(TokenKind::Comment, flags, pay));
                    }
                    return Err(self.err_eof());
                }
                continue;
            }
            // Skip in bulk up to the next byte that needs individual care:
            // a possible terminator or a line break.
            let skip = {
                let vis = self.src.visible();
                match memchr3(b'*', b'\n', b'\r', vis) {
                    Some(0) => None,
                    Some(i) => Some((i, span_has_non_ascii(&vis[..i]))),
                    None => Some((vis.len(), span_has_non_ascii(vis))),
                }
            };
            if let Some((n, non_ascii)) = skip {
                if non_ascii {
                    flags |= SliceFlags::HAS_NON_ASCII;
                }
                self.advance_span(n)?;
                self.check_token_limit()?;
                continue;
            }
            let b = self.src.visible()[0];
            if b == b'*' && self.src.peek_at(1)? == Some(b'/') {
                self.advance(b'*')?;
                self.advance(b'/')?;
                let len = self.token_len();
                let pay = trim_span(self.src.pinned(), 2, len - 2);
                return Ok(self.token(TokenKind::Comment, flags, pay));
            }
            self.advance(b)?;
            self.check_token_limit()?;
        }
    }

    /// `#` directive spanning to end of line, recognised at line start
    /// only. The payload drops the marker and is trimmed on both ends.
    pub(super) fn scan_directive(&mut self) -> Result<Token, WalkError> {
        self.advance(b'#')?;
        let flags = self.consume_rest_of_line()?;
        let len = self.token_len();
        let pay = trim_span(self.src.pinned(), 1, len);
        Ok(self.token(TokenKind::Directive, flags, pay))
    }

    fn consume_rest_of_line(&mut self) -> Result<SliceFlags, WalkError> {
        let mut flags = SliceFlags::NONE;
        loop {
            if self.src.visible().is_empty() {
                if self.src.peek()?.is_none() {
                    break;
                }
                continue;
            }
            let (n, non_ascii, done) = {
                let vis = self.src.visible();
                match memchr2(b'\n', b'\r', vis) {
                    Some(i) => (i, span_has_non_ascii(&vis[..i]), true),
                    None => (vis.len(), span_has_non_ascii(vis), false),
                }
            };
            if non_ascii {
                flags |= SliceFlags::HAS_NON_ASCII;
            }
            if n > 0 {
                self.advance_span(n)?;
                self.check_token_limit()?;
            }
            if done {
                break;
            }
        }
        Ok(flags)
    }
}

fn span_has_non_ascii(bytes: &[u8]) -> bool {
    bytes.iter().any(|&b| b >= 0x80)
}

fn trim_span(bytes: &[u8], mut start: usize, mut end: usize) -> (usize, usize) {
    while start < end && is_ws(bytes[start]) {
        start += 1;
    }
    while end > start && is_ws(bytes[end - 1]) {
        end -= 1;
    }
    (start, end)
}
