use super::{Scanner, Token, TokenKind};
use crate::classify::is_token_terminator;
use crate::error::{ErrorCode, WalkError};
use crate::event::SliceFlags;
use crate::input::Source;

impl<S: Source> Scanner<'_, S> {
    /// Scan a numeric token starting at `first` (a sign or digit). The
    /// payload is the exact input spelling; no normalisation happens here.
    pub(super) fn scan_number(&mut self, first: u8) -> Result<Token, WalkError> {
        let mut b = first;
        if b == b'+' {
            if !self.opts.leading_plus {
                return Err(self.err_at_token(self.gated()));
            }
            self.advance(b)?;
            b = match self.src.peek()? {
                Some(x) => x,
                None => return Err(self.err_eof()),
            };
        } else if b == b'-' {
            self.advance(b)?;
            b = match self.src.peek()? {
                Some(x) => x,
                None => return Err(self.err_eof()),
            };
        }

        if b == b'I' {
            if !self.opts.nan_infinity {
                return Err(self.err_at_token(self.gated()));
            }
            self.expect_infinity()?;
            return Ok(self.number_token(SliceFlags::NONE));
        }

        let flags = match b {
            b'0' => {
                self.advance(b)?;
                match self.src.peek()? {
                    Some(p @ (b'x' | b'X')) => self.base_digits(p, SliceFlags::NUMBER_HEX)?,
                    Some(p @ (b'b' | b'B')) => self.base_digits(p, SliceFlags::NUMBER_BINARY)?,
                    Some(p @ (b'o' | b'O')) => self.base_digits(p, SliceFlags::NUMBER_OCTAL)?,
                    Some(d) if d.is_ascii_digit() => {
                        return Err(self.err_at_token(ErrorCode::InvalidNumber));
                    }
                    _ => {
                        self.fraction_and_exponent()?;
                        SliceFlags::NONE
                    }
                }
            }
            b'1'..=b'9' => {
                self.advance(b)?;
                self.digit_run(|d| d.is_ascii_digit(), 1)?;
                self.fraction_and_exponent()?;
                SliceFlags::NONE
            }
            _ => return Err(self.err_at_token(ErrorCode::InvalidNumber)),
        };

        self.require_number_terminated()?;
        Ok(self.number_token(flags))
    }

    fn number_token(&self, flags: SliceFlags) -> Token {
        self.token(TokenKind::Number, flags, (0, self.token_len()))
    }

    fn base_digits(&mut self, prefix: u8, flag: SliceFlags) -> Result<SliceFlags, WalkError> {
        if !self.opts.number_bases {
            return Err(self.err_at_token(self.gated()));
        }
        self.advance(prefix)?;
        let digits = match prefix | 0x20 {
            b'x' => self.digit_run(|d| d.is_ascii_hexdigit(), 0)?,
            b'b' => self.digit_run(|d| d == b'0' || d == b'1', 0)?,
            _ => self.digit_run(|d| (b'0'..=b'7').contains(&d), 0)?,
        };
        if digits == 0 {
            return Err(self.err_at_token(ErrorCode::InvalidNumber));
        }
        Ok(flag)
    }

    fn fraction_and_exponent(&mut self) -> Result<(), WalkError> {
        if self.src.peek()? == Some(b'.') {
            self.advance(b'.')?;
            if self.digit_run(|d| d.is_ascii_digit(), 0)? == 0 {
                return Err(self.err_at_token(ErrorCode::InvalidNumber));
            }
        }
        if let Some(e @ (b'e' | b'E')) = self.src.peek()? {
            self.advance(e)?;
            if let Some(s @ (b'+' | b'-')) = self.src.peek()? {
                self.advance(s)?;
            }
            if self.digit_run(|d| d.is_ascii_digit(), 0)? == 0 {
                return Err(self.err_at_token(ErrorCode::InvalidNumber));
            }
        }
        Ok(())
    }

    /// Consume a run of digits matching `pred`, honouring `_` separators
    /// when enabled. `seed` counts digits already consumed by the caller so
    /// a separator directly after them is legal. Returns the total count.
    fn digit_run(
        &mut self,
        pred: impl Fn(u8) -> bool,
        seed: usize,
    ) -> Result<usize, WalkError> {
        let mut count = seed;
        loop {
            match self.src.peek()? {
                Some(d) if pred(d) => {
                    self.advance(d)?;
                    self.check_token_limit()?;
                    count += 1;
                }
                Some(b'_') => {
                    if !self.opts.digit_separators {
                        return Err(self.err_here(self.gated()));
                    }
                    if count == 0 {
                        return Err(self.err_at_token(ErrorCode::InvalidNumber));
                    }
                    self.advance(b'_')?;
                    // A separator must sit between two digits.
                    match self.src.peek()? {
                        Some(d) if pred(d) => {}
                        _ => return Err(self.err_at_token(ErrorCode::InvalidNumber)),
                    }
                }
                _ => break,
            }
        }
        Ok(count - seed)
    }

    fn expect_infinity(&mut self) -> Result<(), WalkError> {
        for &expected in b"Infinity" {
            match self.src.peek()? {
                Some(x) if x == expected => self.advance(x)?,
                Some(_) => return Err(self.err_at_token(ErrorCode::InvalidLiteral)),
                None => return Err(self.err_eof()),
            }
        }
        match self.src.peek()? {
            None => Ok(()),
            Some(b) if is_token_terminator(b) => Ok(()),
            Some(_) => Err(self.err_at_token(ErrorCode::InvalidLiteral)),
        }
    }

    fn require_number_terminated(&mut self) -> Result<(), WalkError> {
        match self.src.peek()? {
            None => Ok(()),
            Some(b) if is_token_terminator(b) => Ok(()),
            Some(_) => Err(self.err_at_token(ErrorCode::InvalidNumber)),
        }
    }
}
