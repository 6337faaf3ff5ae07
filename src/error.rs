use thiserror::Error;

/// Stable diagnostic codes produced by a walk.
///
/// The set is closed: every failure a walk can report maps onto exactly one
/// of these codes, and the (code, offset) pair is identical across input
/// sources and buffer sizes for the same input and options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorCode {
    /// The underlying input read failed.
    #[error("input read failed")]
    IoError,
    /// An internal buffer could not be grown.
    #[error("out of memory")]
    OutOfMemory,
    /// Input ended inside a token or before the document completed.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A well-formed token appeared in a state that does not accept it.
    #[error("unexpected token")]
    UnexpectedToken,
    /// A byte that cannot start or continue any token here.
    #[error("invalid character")]
    InvalidCharacter,
    /// A string escape other than the permitted set.
    #[error("invalid escape sequence")]
    InvalidEscapeSequence,
    /// A `\uXXXX` escape with a non-hex digit or truncated digits.
    #[error("invalid unicode escape")]
    InvalidUnicodeEscape,
    /// A numeric token that does not match the number grammar.
    #[error("invalid number")]
    InvalidNumber,
    /// A word that is not exactly `true`, `false` or `null` (nor any other
    /// recognised spelling).
    #[error("invalid literal")]
    InvalidLiteral,
    /// Non-whitespace input after the root value.
    #[error("trailing garbage after root value")]
    TrailingGarbage,
    /// Container nesting exceeded `max_depth`.
    #[error("maximum nesting depth exceeded")]
    MaxDepthExceeded,
    /// A single token exceeded `max_token_bytes`.
    #[error("maximum token size exceeded")]
    MaxTokenBytesExceeded,
    /// Consumed input exceeded `max_document_bytes`.
    #[error("maximum document size exceeded")]
    MaxDocumentBytesExceeded,
    /// A string body exceeded `max_string_bytes`.
    #[error("maximum string size exceeded")]
    MaxStringBytesExceeded,
    /// A property name exceeded `max_property_name_bytes`.
    #[error("maximum property name size exceeded")]
    MaxPropertyNameBytesExceeded,
    /// AJIS-only syntax encountered under `Mode::Json`.
    #[error("syntax not allowed in strict JSON mode")]
    NotAllowedInJsonMode,
    /// Syntax whose feature flag is disabled in the active options.
    #[error("feature disabled by options")]
    FeatureDisabled,
    /// The visitor asked to stop.
    #[error("aborted by visitor")]
    VisitorAbort,
}

/// A structured walk failure: stable code plus the byte offset it refers to.
///
/// `line`/`column` are filled only when `Options::capture_line_column` is
/// set, `preview` only under `Options::include_preview_in_errors`. Both are
/// advisory and never influence `code` or `offset`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code} at byte {offset}")]
pub struct WalkError {
    pub code: ErrorCode,
    pub offset: usize,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub preview: Option<String>,
}

impl WalkError {
    pub(crate) fn new(code: ErrorCode, offset: usize) -> Self {
        Self {
            code,
            offset,
            line: None,
            column: None,
            preview: None,
        }
    }

    pub(crate) fn with_position(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    pub(crate) fn with_preview(mut self, bytes: &[u8]) -> Self {
        const PREVIEW_CAP: usize = 32;
        let tail = &bytes[bytes.len().saturating_sub(PREVIEW_CAP)..];
        self.preview = Some(String::from_utf8_lossy(tail).into_owned());
        self
    }
}
