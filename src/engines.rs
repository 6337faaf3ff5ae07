//! Engine registry and selector.
//!
//! Engines are described by a capability record plus configuration handed
//! to the shared walker; there is no dispatch through trait objects or
//! subclassing. Selection is a pure function of the request, and adding an
//! engine never changes selection for requests the default engine serves.
//! Whatever engine runs, the observable event sequence is identical.

use std::io::Read;
use std::ops::BitOr;

use crate::error::WalkError;
use crate::options::Options;
use crate::visitor::Visitor;
use crate::walk::{EngineConfig, walk_span, walk_stream};

/// Capability bitmask declared by an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capabilities(u8);

impl Capabilities {
    pub const NONE: Capabilities = Capabilities(0);
    /// Handles incremental reader input.
    pub const STREAMING: Capabilities = Capabilities(1 << 0);
    /// Handles fully materialised spans.
    pub const RANDOM_ACCESS: Capabilities = Capabilities(1 << 1);
    /// Keeps buffers minimal at the cost of more refills.
    pub const LOW_MEMORY: Capabilities = Capabilities(1 << 2);
    /// Sized for throughput.
    pub const HIGH_THROUGHPUT: Capabilities = Capabilities(1 << 3);

    #[inline]
    pub const fn contains(self, other: Capabilities) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    const fn union(self, other: Capabilities) -> Capabilities {
        Capabilities(self.0 | other.0)
    }
}

impl BitOr for Capabilities {
    type Output = Capabilities;
    fn bitor(self, rhs: Capabilities) -> Capabilities {
        self.union(rhs)
    }
}

/// Caller-side hint for [`select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnginePreference {
    #[default]
    Balanced,
    LowMemory,
    Speed,
}

/// One registered engine implementation.
#[derive(Debug)]
pub struct Engine {
    id: u16,
    name: &'static str,
    capabilities: Capabilities,
    stream_buffer: usize,
    prealloc_stack: bool,
}

impl Engine {
    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub(crate) fn run_slice(
        &self,
        data: &[u8],
        opts: &Options,
        visitor: &mut dyn Visitor,
    ) -> Result<(), WalkError> {
        walk_span(data, &opts.resolve(), &self.config(), visitor)
    }

    pub(crate) fn run_reader(
        &self,
        reader: &mut dyn Read,
        opts: &Options,
        visitor: &mut dyn Visitor,
    ) -> Result<(), WalkError> {
        walk_stream(reader, &opts.resolve(), &self.config(), visitor)
    }

    fn config(&self) -> EngineConfig {
        EngineConfig {
            stream_buffer: self.stream_buffer,
            prealloc_stack: self.prealloc_stack,
        }
    }
}

static REGISTRY: [Engine; 2] = [
    Engine {
        id: 1,
        name: "balanced",
        capabilities: Capabilities::STREAMING
            .union(Capabilities::RANDOM_ACCESS)
            .union(Capabilities::HIGH_THROUGHPUT),
        stream_buffer: 8 * 1024,
        prealloc_stack: true,
    },
    Engine {
        id: 2,
        name: "compact",
        capabilities: Capabilities::STREAMING.union(Capabilities::LOW_MEMORY),
        stream_buffer: 256,
        prealloc_stack: false,
    },
];

/// All registered engines, in selection order.
pub fn registry() -> &'static [Engine] {
    &REGISTRY
}

/// Pick the first engine whose capabilities cover the preference. The
/// input size and options are part of the selection contract; the current
/// engines do not specialise on them.
pub fn select(
    input_len: Option<usize>,
    opts: &Options,
    preference: EnginePreference,
) -> &'static Engine {
    let _ = (input_len, opts);
    let required = match preference {
        EnginePreference::Balanced => Capabilities::NONE,
        EnginePreference::LowMemory => Capabilities::LOW_MEMORY,
        EnginePreference::Speed => Capabilities::HIGH_THROUGHPUT,
    };
    let engine = REGISTRY
        .iter()
        .find(|e| e.capabilities.contains(required))
        .unwrap_or(&REGISTRY[0]);
    log::debug!("selected engine {} for {:?}", engine.name, preference);
    engine
}
