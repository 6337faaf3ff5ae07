//! Single-pass streaming event parser for AJIS, a JSON-superset text
//! format.
//!
//! A *walk* consumes UTF-8 bytes and pushes a flat sequence of lexical
//! events ([`Event`]) into a caller-supplied [`Visitor`]: container
//! boundaries, names, scalar values, and (when enabled) comments and
//! directives. Payloads arrive as zero-copy [`Slice`]s valid for the
//! duration of the callback; the engine never decodes escapes, never
//! converts numbers, and never builds a tree.
//!
//! The same engine covers three profiles via [`Options`]: a strict JSON
//! validator, the AJIS default, and a lax recovery parser. For inputs valid
//! in all of them, the event sequence is identical across modes, across
//! span and reader inputs, and across buffer sizes.

mod classify;
pub mod engines;
pub mod error;
mod event;
mod input;
pub mod options;
mod scan;
mod visitor;
mod walk;

pub use engines::{Capabilities, Engine, EnginePreference};
pub use error::{ErrorCode, WalkError};
pub use event::{Event, EventKind, Slice, SliceFlags};
pub use options::{Mode, Options};
pub use visitor::{Flow, Visitor};

use std::io::Read;

use input::ChunkReader;

// ============================================================================
// Span walks
// ============================================================================

/// Walk a string slice, delivering events to `visitor`.
///
/// The error, if any, is both returned and reported through
/// [`Visitor::on_error`]; on success [`Visitor::on_complete`] has fired
/// exactly once.
///
/// # Examples
///
/// ```
/// use ajis::{walk_str, Event, EventKind, Flow, Options, Visitor};
///
/// struct Names(Vec<String>);
///
/// impl Visitor for Names {
///     fn on_event(&mut self, event: Event<'_>) -> Flow {
///         if event.kind == EventKind::Name {
///             self.0
///                 .push(String::from_utf8_lossy(event.slice.bytes()).into_owned());
///         }
///         Flow::Continue
///     }
/// }
///
/// let mut names = Names(Vec::new());
/// walk_str("{id: 1, tags: [2, 3]}", &Options::ajis(), &mut names)?;
/// assert_eq!(names.0, ["id", "tags"]);
/// # Ok::<(), ajis::WalkError>(())
/// ```
pub fn walk_str<V: Visitor>(
    input: &str,
    opts: &Options,
    visitor: &mut V,
) -> Result<(), WalkError> {
    walk_slice(input.as_bytes(), opts, visitor)
}

/// Walk a byte slice. The bytes are assumed to be UTF-8; the engine never
/// decodes them, so invalid sequences flow through into the slices.
pub fn walk_slice<V: Visitor>(
    input: &[u8],
    opts: &Options,
    visitor: &mut V,
) -> Result<(), WalkError> {
    walk_slice_with(input, opts, EnginePreference::Balanced, visitor)
}

/// Walk a byte slice with an explicit engine preference.
pub fn walk_slice_with<V: Visitor>(
    input: &[u8],
    opts: &Options,
    preference: EnginePreference,
    visitor: &mut V,
) -> Result<(), WalkError> {
    engines::select(Some(input.len()), opts, preference).run_slice(input, opts, visitor)
}

// ============================================================================
// Streaming walks
// ============================================================================

/// Walk bytes from a reader through a bounded compacting buffer.
///
/// Events, errors and offsets are byte-for-byte identical to the span
/// variants for the same input, whatever the reader's chunking.
pub fn walk_reader<R: Read, V: Visitor>(
    reader: R,
    opts: &Options,
    visitor: &mut V,
) -> Result<(), WalkError> {
    walk_reader_with(reader, opts, EnginePreference::Balanced, visitor)
}

/// Walk a reader with an explicit engine preference.
pub fn walk_reader_with<R: Read, V: Visitor>(
    reader: R,
    opts: &Options,
    preference: EnginePreference,
    visitor: &mut V,
) -> Result<(), WalkError> {
    let mut reader = reader;
    engines::select(None, opts, preference).run_reader(&mut reader, opts, visitor)
}

/// Walk a sequence of byte chunks as one document.
///
/// # Examples
///
/// ```
/// use ajis::{walk_chunks, Event, EventKind, Flow, Options, Visitor};
///
/// struct Count(usize);
///
/// impl Visitor for Count {
///     fn on_event(&mut self, event: Event<'_>) -> Flow {
///         if event.kind == EventKind::Number {
///             self.0 += 1;
///         }
///         Flow::Continue
///     }
/// }
///
/// let mut count = Count(0);
/// let chunks: Vec<&[u8]> = vec![b"[1, ", b"2", b", 3]"];
/// walk_chunks(chunks, &Options::ajis(), &mut count)?;
/// assert_eq!(count.0, 3);
/// # Ok::<(), ajis::WalkError>(())
/// ```
pub fn walk_chunks<'a, I, V>(chunks: I, opts: &Options, visitor: &mut V) -> Result<(), WalkError>
where
    I: IntoIterator<Item = &'a [u8]>,
    V: Visitor,
{
    walk_reader(ChunkReader::new(chunks.into_iter()), opts, visitor)
}

#[cfg(test)]
mod tests;
