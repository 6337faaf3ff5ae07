//! The grammar driver: pulls tokens, maintains the container stack, pairs
//! names with values, and feeds the visitor.
//!
//! The driver is a flat state machine over an explicit frame stack rather
//! than recursive descent, so `max_depth` bounds memory and never the call
//! stack.

use std::io::Read;

use crate::error::{ErrorCode, WalkError};
use crate::event::{Event, EventKind, Slice};
use crate::input::{SpanSource, Source, StreamSource};
use crate::options::Resolved;
use crate::scan::{Scanner, Token, TokenKind};
use crate::visitor::{Flow, Sink, Visitor};

/// Per-engine knobs. None of these may influence the event sequence.
pub(crate) struct EngineConfig {
    pub stream_buffer: usize,
    pub prealloc_stack: bool,
}

pub(crate) fn walk_span(
    data: &[u8],
    opts: &Resolved,
    cfg: &EngineConfig,
    visitor: &mut dyn Visitor,
) -> Result<(), WalkError> {
    run(Scanner::new(SpanSource::new(data), opts), opts, cfg, visitor)
}

pub(crate) fn walk_stream(
    reader: &mut dyn Read,
    opts: &Resolved,
    cfg: &EngineConfig,
    visitor: &mut dyn Visitor,
) -> Result<(), WalkError> {
    let src = StreamSource::new(reader, cfg.stream_buffer);
    run(Scanner::new(src, opts), opts, cfg, visitor)
}

fn run<S: Source>(
    scanner: Scanner<'_, S>,
    opts: &Resolved,
    cfg: &EngineConfig,
    visitor: &mut dyn Visitor,
) -> Result<(), WalkError> {
    let stack_capacity = if cfg.prealloc_stack {
        opts.max_depth.min(1024)
    } else {
        0
    };
    let mut walker = Walker {
        scanner,
        sink: Sink::new(visitor),
        opts,
        frames: Vec::with_capacity(stack_capacity),
        state: State::Root,
    };
    match walker.drive() {
        Ok(()) => Ok(()),
        Err(err) => {
            walker.sink.error(&err);
            Err(err)
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Container {
    Object,
    Array,
}

struct Frame {
    kind: Container,
    has_value: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum State {
    /// Expecting the root value.
    Root,
    /// After `{` or a `,` in an object: a name, or `}` when the frame is
    /// still empty or trailing commas are on.
    ObjectKey,
    /// After a name: `:`.
    ObjectColon,
    /// After `:`: a value.
    ObjectValue,
    /// After an object value: `,` or `}`.
    ObjectNext,
    /// After `[` or a `,` in an array: a value, or `]` when the frame is
    /// still empty or trailing commas are on.
    ArrayValue,
    /// After an array value: `,` or `]`.
    ArrayNext,
    /// Root value complete; only trivia may follow.
    Trailing,
}

struct Walker<'o, 'v, S> {
    scanner: Scanner<'o, S>,
    sink: Sink<'v>,
    opts: &'o Resolved,
    frames: Vec<Frame>,
    state: State,
}

impl<S: Source> Walker<'_, '_, S> {
    fn drive(&mut self) -> Result<(), WalkError> {
        self.scanner.skip_bom()?;
        loop {
            let token = if self.state == State::Trailing {
                self.scanner.next_trailing()?
            } else {
                self.scanner.next_token()?
            };
            match token.kind {
                TokenKind::Comment => self.emit_payload(EventKind::Comment, &token)?,
                TokenKind::Directive => self.emit_payload(EventKind::Directive, &token)?,
                TokenKind::End => return self.finish(&token),
                _ => self.step(token)?,
            }
        }
    }

    fn step(&mut self, token: Token) -> Result<(), WalkError> {
        match self.state {
            State::Root | State::ObjectValue | State::ArrayValue => self.value_token(token),
            State::ObjectKey => self.key_token(token),
            State::ObjectColon => match token.kind {
                TokenKind::Colon => {
                    self.state = State::ObjectValue;
                    Ok(())
                }
                _ => Err(self.scanner.err_at_token(ErrorCode::UnexpectedToken)),
            },
            State::ObjectNext => match token.kind {
                TokenKind::Comma => {
                    self.state = State::ObjectKey;
                    Ok(())
                }
                TokenKind::EndObject => self.close(Container::Object, &token),
                _ => Err(self.scanner.err_at_token(ErrorCode::UnexpectedToken)),
            },
            State::ArrayNext => match token.kind {
                TokenKind::Comma => {
                    self.state = State::ArrayValue;
                    Ok(())
                }
                TokenKind::EndArray => self.close(Container::Array, &token),
                _ => Err(self.scanner.err_at_token(ErrorCode::UnexpectedToken)),
            },
            State::Trailing => Err(self.scanner.err_at_token(ErrorCode::TrailingGarbage)),
        }
    }

    fn value_token(&mut self, token: Token) -> Result<(), WalkError> {
        match token.kind {
            TokenKind::BeginObject => self.open(Container::Object, &token),
            TokenKind::BeginArray => self.open(Container::Array, &token),
            TokenKind::Str => {
                self.emit_payload(EventKind::String, &token)?;
                self.value_done();
                Ok(())
            }
            TokenKind::Number => {
                self.emit_payload(EventKind::Number, &token)?;
                self.value_done();
                Ok(())
            }
            TokenKind::True => {
                self.emit_empty(EventKind::True, &token)?;
                self.value_done();
                Ok(())
            }
            TokenKind::False => {
                self.emit_empty(EventKind::False, &token)?;
                self.value_done();
                Ok(())
            }
            TokenKind::Null => {
                self.emit_empty(EventKind::Null, &token)?;
                self.value_done();
                Ok(())
            }
            TokenKind::Identifier => {
                if !self.opts.identifier_values {
                    return Err(self.scanner.err_at_token(ErrorCode::UnexpectedToken));
                }
                self.emit_payload(EventKind::Identifier, &token)?;
                self.value_done();
                Ok(())
            }
            TokenKind::EndArray => {
                if self.state == State::ArrayValue && self.close_allowed() {
                    self.close(Container::Array, &token)
                } else {
                    Err(self.scanner.err_at_token(ErrorCode::UnexpectedToken))
                }
            }
            _ => Err(self.scanner.err_at_token(ErrorCode::UnexpectedToken)),
        }
    }

    fn key_token(&mut self, token: Token) -> Result<(), WalkError> {
        match token.kind {
            TokenKind::EndObject => {
                if self.close_allowed() {
                    self.close(Container::Object, &token)
                } else {
                    Err(self.scanner.err_at_token(ErrorCode::UnexpectedToken))
                }
            }
            TokenKind::Str => {
                self.check_name_len(&token)?;
                self.emit_payload(EventKind::Name, &token)?;
                self.state = State::ObjectColon;
                Ok(())
            }
            TokenKind::Identifier => {
                if !self.opts.unquoted_names {
                    return Err(self.scanner.err_at_token(ErrorCode::FeatureDisabled));
                }
                self.check_name_len(&token)?;
                self.emit_payload(EventKind::Name, &token)?;
                self.state = State::ObjectColon;
                Ok(())
            }
            _ => Err(self.scanner.err_at_token(ErrorCode::UnexpectedToken)),
        }
    }

    fn open(&mut self, kind: Container, token: &Token) -> Result<(), WalkError> {
        if self.frames.len() >= self.opts.max_depth {
            return Err(self.scanner.err_at_token(ErrorCode::MaxDepthExceeded));
        }
        self.frames.push(Frame {
            kind,
            has_value: false,
        });
        match kind {
            Container::Object => {
                self.emit_empty(EventKind::BeginObject, token)?;
                self.state = State::ObjectKey;
            }
            Container::Array => {
                self.emit_empty(EventKind::BeginArray, token)?;
                self.state = State::ArrayValue;
            }
        }
        Ok(())
    }

    fn close(&mut self, kind: Container, token: &Token) -> Result<(), WalkError> {
        let frame = self.frames.pop();
        debug_assert!(matches!(frame, Some(ref f) if f.kind == kind));
        match kind {
            Container::Object => self.emit_empty(EventKind::EndObject, token)?,
            Container::Array => self.emit_empty(EventKind::EndArray, token)?,
        }
        self.value_done();
        Ok(())
    }

    /// A closer right here is legal for an empty container always, and for
    /// a populated one only after a tolerated trailing comma.
    fn close_allowed(&self) -> bool {
        match self.frames.last() {
            Some(frame) => !frame.has_value || self.opts.trailing_commas,
            None => false,
        }
    }

    fn value_done(&mut self) {
        match self.frames.last_mut() {
            None => self.state = State::Trailing,
            Some(frame) => {
                frame.has_value = true;
                self.state = match frame.kind {
                    Container::Object => State::ObjectNext,
                    Container::Array => State::ArrayNext,
                };
            }
        }
    }

    fn check_name_len(&self, token: &Token) -> Result<(), WalkError> {
        if let Some(max) = self.opts.max_property_name_bytes {
            if self.scanner.payload(token).len() > max {
                return Err(
                    self.scanner
                        .err_at_token(ErrorCode::MaxPropertyNameBytesExceeded),
                );
            }
        }
        Ok(())
    }

    /// End of input. Either the document is complete, or Lax graceful close
    /// synthesises the missing closers, or the input ended too early.
    fn finish(&mut self, token: &Token) -> Result<(), WalkError> {
        if self.state == State::Trailing {
            return self.complete(token);
        }
        if self.opts.graceful_close && !self.frames.is_empty() && self.between_members() {
            while let Some(frame) = self.frames.pop() {
                match frame.kind {
                    Container::Object => self.emit_empty(EventKind::EndObject, token)?,
                    Container::Array => self.emit_empty(EventKind::EndArray, token)?,
                }
            }
            return self.complete(token);
        }
        Err(self.scanner.err_eof())
    }

    /// Graceful close never fires between a name and its value; that would
    /// break name/value pairing for every consumer downstream.
    fn between_members(&self) -> bool {
        matches!(
            self.state,
            State::ObjectKey | State::ObjectNext | State::ArrayValue | State::ArrayNext
        )
    }

    fn complete(&mut self, token: &Token) -> Result<(), WalkError> {
        self.emit_empty(EventKind::EndDocument, token)?;
        self.sink.complete();
        Ok(())
    }

    fn emit_payload(&mut self, kind: EventKind, token: &Token) -> Result<(), WalkError> {
        let event = Event {
            kind,
            slice: Slice::new(self.scanner.payload(token), token.flags),
            offset: token.offset,
        };
        match self.sink.event(event) {
            Flow::Continue => Ok(()),
            Flow::Stop => Err(self.scanner.err_at_token(ErrorCode::VisitorAbort)),
        }
    }

    fn emit_empty(&mut self, kind: EventKind, token: &Token) -> Result<(), WalkError> {
        let event = Event {
            kind,
            slice: Slice::empty(),
            offset: token.offset,
        };
        match self.sink.event(event) {
            Flow::Continue => Ok(()),
            Flow::Stop => Err(self.scanner.err_at_token(ErrorCode::VisitorAbort)),
        }
    }
}
