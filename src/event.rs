use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::Utf8Error;

/// Lexical event kinds delivered to a [`Visitor`](crate::Visitor).
///
/// The set is closed. `EndDocument` is emitted exactly once per successful
/// walk and never on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    /// An object member name. The slice is the name without quotes.
    Name,
    /// A string value. The slice is the interior bytes, escapes unexpanded.
    String,
    /// A numeric value. The slice is the exact input spelling.
    Number,
    True,
    False,
    Null,
    /// A bare word value (Lax mode only).
    Identifier,
    Comment,
    Directive,
    EndDocument,
}

/// Classification flags attached to a [`Slice`].
///
/// Flags describe the raw source bytes, never decoded scalars:
/// `HAS_NON_ASCII` means a byte >= 0x80 was observed, `HAS_ESCAPES` means a
/// backslash introducer was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SliceFlags(u8);

impl SliceFlags {
    pub const NONE: SliceFlags = SliceFlags(0);
    /// The raw bytes contain at least one `\` escape introducer.
    pub const HAS_ESCAPES: SliceFlags = SliceFlags(1 << 0);
    /// At least one byte >= 0x80 appears.
    pub const HAS_NON_ASCII: SliceFlags = SliceFlags(1 << 1);
    /// The token was an unquoted identifier.
    pub const IDENTIFIER_STYLE: SliceFlags = SliceFlags(1 << 2);
    /// Number spelled with a `0x`/`0X` prefix.
    pub const NUMBER_HEX: SliceFlags = SliceFlags(1 << 3);
    /// Number spelled with a `0b`/`0B` prefix.
    pub const NUMBER_BINARY: SliceFlags = SliceFlags(1 << 4);
    /// Number spelled with a `0o`/`0O` prefix.
    pub const NUMBER_OCTAL: SliceFlags = SliceFlags(1 << 5);
    /// Typed literal: one uppercase letter followed by decimal digits.
    pub const NUMBER_TYPED: SliceFlags = SliceFlags(1 << 6);

    #[inline]
    pub const fn contains(self, other: SliceFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for SliceFlags {
    type Output = SliceFlags;
    #[inline]
    fn bitor(self, rhs: SliceFlags) -> SliceFlags {
        SliceFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for SliceFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: SliceFlags) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for SliceFlags {
    type Output = SliceFlags;
    #[inline]
    fn bitand(self, rhs: SliceFlags) -> SliceFlags {
        SliceFlags(self.0 & rhs.0)
    }
}

/// A UTF-8 byte view valid only for the duration of the visitor call that
/// received it. The borrow checker enforces the lifetime; no bytes are
/// copied unless the input source had to assemble a token across a refill
/// boundary, in which case the view points into a per-walk scratch region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice<'a> {
    bytes: &'a [u8],
    flags: SliceFlags,
}

impl<'a> Slice<'a> {
    pub(crate) fn new(bytes: &'a [u8], flags: SliceFlags) -> Self {
        Self { bytes, flags }
    }

    pub(crate) fn empty() -> Self {
        Self {
            bytes: &[],
            flags: SliceFlags::NONE,
        }
    }

    #[inline]
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    #[inline]
    pub fn flags(&self) -> SliceFlags {
        self.flags
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// View the slice as text. The walk never validates UTF-8 itself, so
    /// byte inputs that are not UTF-8 surface here.
    pub fn to_str(&self) -> Result<&'a str, Utf8Error> {
        std::str::from_utf8(self.bytes)
    }
}

/// One lexical event: kind, payload view, and the byte offset of the first
/// byte of the originating token. Offsets are stable across span and stream
/// sources and across buffer sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event<'a> {
    pub kind: EventKind,
    pub slice: Slice<'a>,
    pub offset: usize,
}
