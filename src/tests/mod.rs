use super::*;

// Shared test helpers

/// An event captured with owned bytes, since slices do not outlive the
/// callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Recorded {
    pub kind: EventKind,
    pub bytes: Vec<u8>,
    pub flags: SliceFlags,
    pub offset: usize,
}

#[derive(Debug, Default)]
pub(crate) struct Recording {
    pub events: Vec<Recorded>,
    pub error: Option<WalkError>,
    pub completions: usize,
}

impl Recording {
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.iter().map(|e| e.kind).collect()
    }

    /// (kind, payload-as-text) pairs, the workhorse of sequence asserts.
    pub fn shape(&self) -> Vec<(EventKind, String)> {
        self.events
            .iter()
            .map(|e| (e.kind, String::from_utf8_lossy(&e.bytes).into_owned()))
            .collect()
    }
}

impl Visitor for Recording {
    fn on_event(&mut self, event: Event<'_>) -> Flow {
        self.events.push(Recorded {
            kind: event.kind,
            bytes: event.slice.bytes().to_vec(),
            flags: event.slice.flags(),
            offset: event.offset,
        });
        Flow::Continue
    }

    fn on_error(&mut self, error: &WalkError) {
        self.error = Some(error.clone());
    }

    fn on_complete(&mut self) {
        self.completions += 1;
    }
}

pub(crate) fn record(input: &str, opts: &Options) -> Recording {
    let mut rec = Recording::default();
    let result = walk_str(input, opts, &mut rec);
    // The returned result must mirror the hook outcome.
    match &result {
        Ok(()) => {
            assert_eq!(rec.completions, 1, "success without completion hook");
            assert!(rec.error.is_none());
        }
        Err(err) => {
            assert_eq!(rec.error.as_ref(), Some(err), "hook saw a different error");
            assert_eq!(rec.completions, 0, "failure must not complete");
        }
    }
    rec
}

pub(crate) fn expect_error(input: &str, opts: &Options, code: ErrorCode, offset: usize) {
    let rec = record(input, opts);
    let err = rec
        .error
        .clone()
        .unwrap_or_else(|| panic!("expected {code:?} for {input:?}, walk succeeded"));
    assert_eq!((err.code, err.offset), (code, offset), "input: {input:?}");
    assert!(
        !rec.kinds().contains(&EventKind::EndDocument),
        "failed walk emitted EndDocument"
    );
}

/// Deterministic pseudo-random chunk sizes (LCG constants from Numerical
/// Recipes), for stream parity fuzzing.
pub(crate) fn lcg_sizes(seed: u64, len: usize) -> Vec<usize> {
    let mut x = seed;
    let mut out = Vec::new();
    let mut total = 0usize;
    while total < len {
        x = x.wrapping_mul(1664525).wrapping_add(1013904223);
        let mut n = (((x >> 24) as usize) % 16) + 1;
        if total + n > len {
            n = len - total;
        }
        out.push(n);
        total += n;
    }
    out
}

pub(crate) fn chunk_bytes<'a>(data: &'a [u8], sizes: &[usize]) -> Vec<&'a [u8]> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    for &n in sizes {
        let end = (pos + n).min(data.len());
        if pos < end {
            out.push(&data[pos..end]);
        }
        pos = end;
    }
    if pos < data.len() {
        out.push(&data[pos..]);
    }
    out
}

mod errors;
mod limits;
mod modes;
