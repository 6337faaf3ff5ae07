use crate::error::WalkError;
use crate::event::Event;

/// Continuation decision returned from [`Visitor::on_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep walking.
    Continue,
    /// Stop the walk; the engine reports
    /// [`VisitorAbort`](crate::ErrorCode::VisitorAbort) at the current
    /// token's offset.
    Stop,
}

/// The consumer side of a walk.
///
/// Events arrive synchronously, in document order, on the caller's thread.
/// Slices inside an event are valid only until `on_event` returns; copy what
/// you need to keep. For every walk either `on_error` fires at most once or
/// `on_complete` fires exactly once, never both.
pub trait Visitor {
    fn on_event(&mut self, event: Event<'_>) -> Flow;

    fn on_error(&mut self, error: &WalkError) {
        let _ = error;
    }

    fn on_complete(&mut self) {}
}

/// Wraps the caller's visitor and enforces the hook cardinalities no matter
/// how the walk terminates.
pub(crate) struct Sink<'v> {
    visitor: &'v mut dyn Visitor,
    finished: bool,
}

impl<'v> Sink<'v> {
    pub(crate) fn new(visitor: &'v mut dyn Visitor) -> Self {
        Self {
            visitor,
            finished: false,
        }
    }

    pub(crate) fn event(&mut self, event: Event<'_>) -> Flow {
        if self.finished {
            return Flow::Continue;
        }
        self.visitor.on_event(event)
    }

    pub(crate) fn error(&mut self, error: &WalkError) {
        if !self.finished {
            self.finished = true;
            self.visitor.on_error(error);
        }
    }

    pub(crate) fn complete(&mut self) {
        if !self.finished {
            self.finished = true;
            self.visitor.on_complete();
        }
    }
}
