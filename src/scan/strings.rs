use super::{Scanner, Token, TokenKind};
use crate::error::{ErrorCode, WalkError};
use crate::event::SliceFlags;
use crate::input::Source;

impl<S: Source> Scanner<'_, S> {
    /// Scan a quoted string. The payload is the interior without the
    /// delimiters, escapes left unexpanded. In Lax mode an unterminated
    /// string consumes the remaining input and is still delivered.
    pub(super) fn scan_string(&mut self, quote: u8) -> Result<Token, WalkError> {
        self.advance(quote)?;
        let mut flags = SliceFlags::NONE;
        loop {
            let Some(b) = self.src.peek()? else {
                if self.opts.recover {
                    let len = self.token_len();
                    return Ok(self.token(TokenKind::Str, flags, (1, len)));
                }
                return Err(self.err_eof());
            };
            if b == quote {
                self.advance(b)?;
                self.check_token_limit()?;
                let len = self.token_len();
                return Ok(self.token(TokenKind::Str, flags, (1, len - 1)));
            }
            if b == b'\\' {
                flags |= SliceFlags::HAS_ESCAPES;
                self.scan_escape(&mut flags)?;
            } else if b < 0x20 {
                if !self.opts.recover {
                    return Err(self.err_here(ErrorCode::InvalidCharacter));
                }
                self.advance(b)?;
            } else {
                if b >= 0x80 {
                    flags |= SliceFlags::HAS_NON_ASCII;
                }
                self.advance(b)?;
            }
            self.check_string_limits()?;
        }
    }

    /// Validate one escape sequence, positioned at the backslash. In Lax
    /// mode malformed escapes are retained byte-for-byte instead of
    /// failing.
    fn scan_escape(&mut self, flags: &mut SliceFlags) -> Result<(), WalkError> {
        let escape_offset = self.src.offset();
        self.advance(b'\\')?;
        let Some(e) = self.src.peek()? else {
            if self.opts.recover {
                return Ok(());
            }
            return Err(self.err_eof());
        };
        match e {
            b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => self.advance(e),
            b'u' => {
                self.advance(e)?;
                for _ in 0..4 {
                    match self.src.peek()? {
                        Some(h) if h.is_ascii_hexdigit() => self.advance(h)?,
                        Some(_) => {
                            if self.opts.recover {
                                return Ok(());
                            }
                            return Err(
                                self.err_at_offset(ErrorCode::InvalidUnicodeEscape, escape_offset)
                            );
                        }
                        None => {
                            if self.opts.recover {
                                return Ok(());
                            }
                            return Err(self.err_eof());
                        }
                    }
                }
                Ok(())
            }
            _ => {
                if self.opts.recover {
                    if e >= 0x80 {
                        *flags |= SliceFlags::HAS_NON_ASCII;
                    }
                    return self.advance(e);
                }
                Err(self.err_at_offset(ErrorCode::InvalidEscapeSequence, escape_offset))
            }
        }
    }

    fn check_string_limits(&mut self) -> Result<(), WalkError> {
        self.check_token_limit()?;
        if let Some(max) = self.opts.max_string_bytes {
            // Interior length: the opening quote is part of the token.
            if self.token_len() - 1 > max {
                return Err(self.err_at_token(ErrorCode::MaxStringBytesExceeded));
            }
        }
        Ok(())
    }
}
