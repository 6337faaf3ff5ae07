use super::Source;
use crate::error::WalkError;

/// Source over a borrowed, fully materialised byte span. Every slice handed
/// to the visitor is a direct view into the caller's buffer.
pub(crate) struct SpanSource<'a> {
    data: &'a [u8],
    pos: usize,
    pin: usize,
}

impl<'a> SpanSource<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0, pin: 0 }
    }
}

impl Source for SpanSource<'_> {
    #[inline]
    fn peek(&mut self) -> Result<Option<u8>, WalkError> {
        Ok(self.data.get(self.pos).copied())
    }

    #[inline]
    fn peek_at(&mut self, n: usize) -> Result<Option<u8>, WalkError> {
        Ok(self.data.get(self.pos + n).copied())
    }

    #[inline]
    fn bump(&mut self) {
        debug_assert!(self.pos < self.data.len());
        self.pos += 1;
    }

    #[inline]
    fn bump_many(&mut self, n: usize) {
        debug_assert!(self.pos + n <= self.data.len());
        self.pos += n;
    }

    #[inline]
    fn visible(&self) -> &[u8] {
        &self.data[self.pos..]
    }

    #[inline]
    fn offset(&self) -> usize {
        self.pos
    }

    #[inline]
    fn pin(&mut self) {
        self.pin = self.pos;
    }

    #[inline]
    fn unpin(&mut self) {
        self.pin = self.pos;
    }

    #[inline]
    fn pinned(&self) -> &[u8] {
        &self.data[self.pin..self.pos]
    }
}
