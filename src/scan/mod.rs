//! Single-pass, forward-only byte recogniser.
//!
//! The scanner turns raw bytes into [`Token`]s. It never decodes escapes,
//! never converts numbers, and never looks further ahead than a couple of
//! bytes. Payload bytes stay pinned in the input source until the next
//! token is requested, which is what lets the walker hand out zero-copy
//! slices.

mod number;
mod strings;
mod trivia;

use crate::classify::{is_ident_continue, is_ident_start, is_ws};
use crate::error::{ErrorCode, WalkError};
use crate::event::SliceFlags;
use crate::input::Source;
use crate::options::Resolved;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    Colon,
    Comma,
    Str,
    Number,
    True,
    False,
    Null,
    Identifier,
    Comment,
    Directive,
    End,
}

/// One recognised token. `pay` is the payload range relative to the pinned
/// token bytes (string interiors exclude quotes, comment payloads exclude
/// markers, structural tokens are empty).
#[derive(Debug, Clone, Copy)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub offset: usize,
    pub flags: SliceFlags,
    pay: (usize, usize),
}

pub(crate) struct Scanner<'o, S> {
    src: S,
    opts: &'o Resolved,
    line: u32,
    /// Absolute offset of the first byte of the current line.
    line_start: usize,
    at_line_start: bool,
    prev_cr: bool,
    token_offset: usize,
    token_line: u32,
    token_col: u32,
}

impl<'o, S: Source> Scanner<'o, S> {
    pub(crate) fn new(src: S, opts: &'o Resolved) -> Self {
        Self {
            src,
            opts,
            line: 1,
            line_start: 0,
            at_line_start: true,
            prev_cr: false,
            token_offset: 0,
            token_line: 1,
            token_col: 1,
        }
    }

    /// Consume a byte-order-mark at offset 0, if present. Not reported.
    pub(crate) fn skip_bom(&mut self) -> Result<(), WalkError> {
        if self.src.offset() == 0
            && self.src.peek()? == Some(0xEF)
            && self.src.peek_at(1)? == Some(0xBB)
            && self.src.peek_at(2)? == Some(0xBF)
        {
            for _ in 0..3 {
                self.src.bump();
            }
            self.line_start = self.src.offset();
        }
        Ok(())
    }

    pub(crate) fn next_token(&mut self) -> Result<Token, WalkError> {
        self.src.unpin();
        let b = loop {
            match self.src.peek()? {
                None => {
                    self.begin_token();
                    return Ok(self.token(TokenKind::End, SliceFlags::NONE, (0, 0)));
                }
                Some(b) if is_ws(b) => self.advance(b)?,
                Some(b) => break b,
            }
        };
        let at_line_start = self.at_line_start;
        self.begin_token();
        match b {
            b'{' => self.single(b, TokenKind::BeginObject),
            b'}' => self.single(b, TokenKind::EndObject),
            b'[' => self.single(b, TokenKind::BeginArray),
            b']' => self.single(b, TokenKind::EndArray),
            b':' => self.single(b, TokenKind::Colon),
            b',' => self.single(b, TokenKind::Comma),
            b'"' => self.scan_string(b'"'),
            b'\'' => {
                if !self.opts.single_quotes {
                    return Err(self.err_at_token(self.gated()));
                }
                self.scan_string(b'\'')
            }
            b'/' => match self.src.peek_at(1)? {
                Some(b'/') => {
                    if !self.opts.comments {
                        return Err(self.err_at_token(self.gated()));
                    }
                    self.scan_line_comment()
                }
                Some(b'*') => {
                    if !self.opts.comments {
                        return Err(self.err_at_token(self.gated()));
                    }
                    self.scan_block_comment()
                }
                _ => Err(self.err_at_token(ErrorCode::InvalidCharacter)),
            },
            b'#' => {
                if !at_line_start {
                    return Err(self.err_at_token(ErrorCode::InvalidCharacter));
                }
                if !self.opts.directives {
                    return Err(self.err_at_token(self.gated()));
                }
                self.scan_directive()
            }
            b'-' | b'+' | b'0'..=b'9' => self.scan_number(b),
            b if is_ident_start(b) => self.scan_word(),
            _ => Err(self.err_here(ErrorCode::InvalidCharacter)),
        }
    }

    /// Token recogniser for the region after the root value: whitespace and
    /// enabled trivia are still consumed, but any other byte is trailing
    /// garbage no matter what it would have lexed as.
    pub(crate) fn next_trailing(&mut self) -> Result<Token, WalkError> {
        self.src.unpin();
        let b = loop {
            match self.src.peek()? {
                None => {
                    self.begin_token();
                    return Ok(self.token(TokenKind::End, SliceFlags::NONE, (0, 0)));
                }
                Some(b) if is_ws(b) => self.advance(b)?,
                Some(b) => break b,
            }
        };
        let at_line_start = self.at_line_start;
        self.begin_token();
        match b {
            b'/' if self.opts.comments => match self.src.peek_at(1)? {
                Some(b'/') => self.scan_line_comment(),
                Some(b'*') => self.scan_block_comment(),
                _ => Err(self.err_at_token(ErrorCode::TrailingGarbage)),
            },
            b'#' if at_line_start && self.opts.directives => self.scan_directive(),
            _ => Err(self.err_at_token(ErrorCode::TrailingGarbage)),
        }
    }

    /// Payload bytes of the most recently returned token. Valid until the
    /// next `next_token` call.
    pub(crate) fn payload(&self, token: &Token) -> &[u8] {
        &self.src.pinned()[token.pay.0..token.pay.1]
    }

    // ---- token scanning ----------------------------------------------

    fn single(&mut self, b: u8, kind: TokenKind) -> Result<Token, WalkError> {
        self.advance(b)?;
        Ok(self.token(kind, SliceFlags::NONE, (0, 0)))
    }

    /// Scan a bare ASCII word and classify it: keyword literal, non-finite
    /// number, typed literal, then identifier.
    fn scan_word(&mut self) -> Result<Token, WalkError> {
        loop {
            match self.src.peek()? {
                Some(b) if is_ident_continue(b) => {
                    self.advance(b)?;
                    self.check_token_limit()?;
                }
                _ => break,
            }
        }
        let len = self.token_len();
        let kind = match self.src.pinned() {
            b"true" => Some(TokenKind::True),
            b"false" => Some(TokenKind::False),
            b"null" => Some(TokenKind::Null),
            _ => None,
        };
        if let Some(kind) = kind {
            return Ok(self.token(kind, SliceFlags::NONE, (0, 0)));
        }
        if matches!(self.src.pinned(), b"NaN" | b"Infinity") {
            if !self.opts.nan_infinity {
                return Err(self.err_at_token(self.gated()));
            }
            return Ok(self.token(TokenKind::Number, SliceFlags::NONE, (0, len)));
        }
        if is_typed_literal(self.src.pinned()) {
            if self.opts.strict {
                return Err(self.err_at_token(ErrorCode::NotAllowedInJsonMode));
            }
            return Ok(self.token(TokenKind::Number, SliceFlags::NUMBER_TYPED, (0, len)));
        }
        if self.opts.idents {
            return Ok(self.token(
                TokenKind::Identifier,
                SliceFlags::IDENTIFIER_STYLE,
                (0, len),
            ));
        }
        // A word that is no identifier: a broken keyword if it starts like
        // one, otherwise identifier syntax that this mode does not have.
        match self.src.pinned().first() {
            Some(b't' | b'f' | b'n') => Err(self.err_at_token(ErrorCode::InvalidLiteral)),
            _ => Err(self.err_at_token(self.gated())),
        }
    }

    // ---- byte stepping -----------------------------------------------

    /// Consume one byte, maintaining the document limit and line
    /// bookkeeping. `b` must be the byte `peek` just returned.
    fn advance(&mut self, b: u8) -> Result<(), WalkError> {
        self.src.bump();
        if let Some(limit) = self.opts.max_document_bytes {
            if self.src.offset() > limit {
                return Err(self.err_at_offset(ErrorCode::MaxDocumentBytesExceeded, limit));
            }
        }
        match b {
            b'\r' => {
                self.line += 1;
                self.line_start = self.src.offset();
                self.at_line_start = true;
                self.prev_cr = true;
            }
            b'\n' => {
                // The LF of a CRLF pair was already counted at the CR.
                if !self.prev_cr {
                    self.line += 1;
                }
                self.line_start = self.src.offset();
                self.at_line_start = true;
                self.prev_cr = false;
            }
            _ => {
                self.at_line_start = false;
                self.prev_cr = false;
            }
        }
        Ok(())
    }

    /// Consume `n` visible bytes that are known to contain no line breaks.
    fn advance_span(&mut self, n: usize) -> Result<(), WalkError> {
        self.src.bump_many(n);
        if let Some(limit) = self.opts.max_document_bytes {
            if self.src.offset() > limit {
                return Err(self.err_at_offset(ErrorCode::MaxDocumentBytesExceeded, limit));
            }
        }
        self.at_line_start = false;
        self.prev_cr = false;
        Ok(())
    }

    fn begin_token(&mut self) {
        self.src.pin();
        self.token_offset = self.src.offset();
        self.token_line = self.line;
        self.token_col = self.col_at(self.token_offset);
    }

    fn token(&self, kind: TokenKind, flags: SliceFlags, pay: (usize, usize)) -> Token {
        Token {
            kind,
            offset: self.token_offset,
            flags,
            pay,
        }
    }

    fn token_len(&self) -> usize {
        self.src.offset() - self.token_offset
    }

    fn check_token_limit(&mut self) -> Result<(), WalkError> {
        if self.token_len() > self.opts.max_token_bytes {
            return Err(self.err_at_token(ErrorCode::MaxTokenBytesExceeded));
        }
        Ok(())
    }

    // ---- diagnostics -------------------------------------------------

    /// The code for syntax behind a feature gate: strict JSON reports the
    /// mode violation, the other modes the disabled feature.
    fn gated(&self) -> ErrorCode {
        if self.opts.strict {
            ErrorCode::NotAllowedInJsonMode
        } else {
            ErrorCode::FeatureDisabled
        }
    }

    fn col_at(&self, offset: usize) -> u32 {
        (offset.saturating_sub(self.line_start) + 1) as u32
    }

    fn decorate(&self, mut err: WalkError, line: u32, column: u32) -> WalkError {
        if self.opts.line_column {
            err = err.with_position(line, column);
        }
        if self.opts.preview {
            err = err.with_preview(self.src.pinned());
        }
        err
    }

    pub(crate) fn err_here(&self, code: ErrorCode) -> WalkError {
        let offset = self.src.offset();
        self.decorate(WalkError::new(code, offset), self.line, self.col_at(offset))
    }

    /// Error anchored at the first byte of the current token.
    pub(crate) fn err_at_token(&self, code: ErrorCode) -> WalkError {
        self.decorate(
            WalkError::new(code, self.token_offset),
            self.token_line,
            self.token_col,
        )
    }

    fn err_at_offset(&self, code: ErrorCode, offset: usize) -> WalkError {
        self.decorate(WalkError::new(code, offset), self.line, self.col_at(offset))
    }

    pub(crate) fn err_eof(&self) -> WalkError {
        self.err_here(ErrorCode::UnexpectedEndOfInput)
    }
}

fn is_typed_literal(word: &[u8]) -> bool {
    word.len() >= 2 && word[0].is_ascii_uppercase() && word[1..].iter().all(u8::is_ascii_digit)
}
