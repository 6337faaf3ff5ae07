use std::io::{ErrorKind, Read};

use super::Source;
use crate::error::{ErrorCode, WalkError};

/// Source over an arbitrary `io::Read` with a compacting buffer.
///
/// Consumed bytes before the pinned token start are discarded on refill by
/// moving the live region to the buffer origin; a token that straddles a
/// refill boundary is therefore reassembled in place and stays contiguous.
/// The buffer grows only when a single pinned token outsizes it, bounded in
/// practice by `max_token_bytes` (the scanner stops longer tokens first).
pub(crate) struct StreamSource<'r> {
    reader: &'r mut dyn Read,
    buf: Vec<u8>,
    /// Absolute offset of `buf[0]`.
    head: usize,
    pos: usize,
    len: usize,
    pin: Option<usize>,
    eof: bool,
}

impl<'r> StreamSource<'r> {
    pub(crate) fn new(reader: &'r mut dyn Read, capacity: usize) -> Self {
        Self {
            reader,
            buf: vec![0; capacity.max(16)],
            head: 0,
            pos: 0,
            len: 0,
            pin: None,
            eof: false,
        }
    }

    fn ensure(&mut self, n: usize) -> Result<(), WalkError> {
        while self.pos + n >= self.len && !self.eof {
            self.refill()?;
        }
        Ok(())
    }

    fn refill(&mut self) -> Result<(), WalkError> {
        let keep = self.pin.unwrap_or(self.pos);
        if keep > 0 {
            self.buf.copy_within(keep..self.len, 0);
            self.len -= keep;
            self.pos -= keep;
            self.head += keep;
            if let Some(p) = self.pin.as_mut() {
                *p = 0;
            }
            log::debug!("stream buffer compacted, discarded {keep} bytes");
        }
        if self.len == self.buf.len() {
            let add = self.buf.len().max(64);
            self.buf
                .try_reserve(add)
                .map_err(|_| WalkError::new(ErrorCode::OutOfMemory, self.head + self.pos))?;
            let new_len = self.buf.len() + add;
            self.buf.resize(new_len, 0);
            log::debug!("stream buffer grown to {new_len} bytes");
        }
        match self.reader.read(&mut self.buf[self.len..]) {
            Ok(0) => self.eof = true,
            Ok(n) => self.len += n,
            // Interrupted reads are retried by the ensure() loop.
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(_) => return Err(WalkError::new(ErrorCode::IoError, self.head + self.pos)),
        }
        Ok(())
    }
}

impl Source for StreamSource<'_> {
    fn peek(&mut self) -> Result<Option<u8>, WalkError> {
        self.ensure(0)?;
        Ok(if self.pos < self.len {
            Some(self.buf[self.pos])
        } else {
            None
        })
    }

    fn peek_at(&mut self, n: usize) -> Result<Option<u8>, WalkError> {
        self.ensure(n)?;
        Ok(if self.pos + n < self.len {
            Some(self.buf[self.pos + n])
        } else {
            None
        })
    }

    #[inline]
    fn bump(&mut self) {
        debug_assert!(self.pos < self.len);
        self.pos += 1;
    }

    #[inline]
    fn bump_many(&mut self, n: usize) {
        debug_assert!(self.pos + n <= self.len);
        self.pos += n;
    }

    #[inline]
    fn visible(&self) -> &[u8] {
        &self.buf[self.pos..self.len]
    }

    #[inline]
    fn offset(&self) -> usize {
        self.head + self.pos
    }

    #[inline]
    fn pin(&mut self) {
        self.pin = Some(self.pos);
    }

    #[inline]
    fn unpin(&mut self) {
        self.pin = None;
    }

    #[inline]
    fn pinned(&self) -> &[u8] {
        &self.buf[self.pin.unwrap_or(self.pos)..self.pos]
    }
}

/// `Read` adapter over an iterator of byte chunks, used by
/// [`walk_chunks`](crate::walk_chunks).
pub(crate) struct ChunkReader<'a, I>
where
    I: Iterator<Item = &'a [u8]>,
{
    chunks: I,
    current: &'a [u8],
}

impl<'a, I> ChunkReader<'a, I>
where
    I: Iterator<Item = &'a [u8]>,
{
    pub(crate) fn new(chunks: I) -> Self {
        Self {
            chunks,
            current: &[],
        }
    }
}

impl<'a, I> Read for ChunkReader<'a, I>
where
    I: Iterator<Item = &'a [u8]>,
{
    fn read(&mut self, out: &mut [u8]) -> std::io::Result<usize> {
        while self.current.is_empty() {
            match self.chunks.next() {
                Some(chunk) => self.current = chunk,
                None => return Ok(0),
            }
        }
        let n = out.len().min(self.current.len());
        out[..n].copy_from_slice(&self.current[..n]);
        self.current = &self.current[n..];
        Ok(n)
    }
}
