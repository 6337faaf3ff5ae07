/// Base syntax profile for a walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Strict JSON validator: every AJIS extension is rejected with
    /// `NotAllowedInJsonMode`, regardless of the individual `allow_*` flags.
    Json,
    /// AJIS defaults: comments, directives, trailing commas, unquoted
    /// property names and number bases on; the rest opt-in.
    Ajis,
    /// AJIS plus best-effort recovery inside the scanner: unterminated
    /// strings and block comments run to end of input, invalid escapes are
    /// retained verbatim, and bare identifiers are legal values.
    Lax,
}

/// Immutable walk configuration, supplied once at walk entry.
///
/// `mode` selects the profile; the `allow_*` flags refine it. Under
/// [`Mode::Json`] the flags are forced off by the resolver.
#[derive(Clone, Debug)]
pub struct Options {
    pub mode: Mode,
    /// Recognise `//` and `/* */` comments and emit them as events.
    pub allow_comments: bool,
    /// Recognise `#` directives at line start and emit them as events.
    pub allow_directives: bool,
    /// Tolerate a `,` before a closing `}` or `]`.
    pub allow_trailing_commas: bool,
    /// Accept `'…'` as a string delimiter.
    pub allow_single_quotes: bool,
    /// Permit identifiers as property names.
    pub allow_unquoted_property_names: bool,
    /// Permit `0x`/`0b`/`0o` numeric prefixes.
    pub allow_number_bases: bool,
    /// Permit `_` between two digits.
    pub allow_digit_separators: bool,
    /// Permit a leading `+` on numbers.
    pub allow_leading_plus_on_numbers: bool,
    /// Permit `NaN`, `Infinity` and `-Infinity`.
    pub allow_nan_and_infinity: bool,
    /// Reject containers nested deeper than this.
    pub max_depth: usize,
    /// Reject any single token longer than this many bytes.
    pub max_token_bytes: usize,
    /// Reject once this many input bytes have been consumed.
    pub max_document_bytes: Option<usize>,
    /// Reject string bodies longer than this many bytes.
    pub max_string_bytes: Option<usize>,
    /// Reject property names longer than this many bytes.
    pub max_property_name_bytes: Option<usize>,
    /// Attach 1-based line and UTF-8 byte column to errors. `\r\n` counts as
    /// one break. Never changes code or offset.
    pub capture_line_column: bool,
    /// Attach a bounded snippet of the bytes preceding the failure.
    pub include_preview_in_errors: bool,
    /// Lax mode only: at end of input inside open containers, emit synthetic
    /// closing events instead of `UnexpectedEndOfInput`. Recovery happens
    /// only between members, never between a name and its value.
    pub lax_graceful_close: bool,
}

impl Options {
    /// Strict JSON validation profile.
    pub fn json() -> Self {
        Self {
            allow_comments: false,
            allow_directives: false,
            allow_trailing_commas: false,
            allow_single_quotes: false,
            allow_unquoted_property_names: false,
            allow_number_bases: false,
            allow_digit_separators: false,
            allow_leading_plus_on_numbers: false,
            allow_nan_and_infinity: false,
            ..Self::limits_base(Mode::Json)
        }
    }

    /// AJIS profile with its documented defaults.
    pub fn ajis() -> Self {
        Self::limits_base(Mode::Ajis)
    }

    /// Lax recovery profile (AJIS defaults plus scanner recovery).
    pub fn lax() -> Self {
        Self::limits_base(Mode::Lax)
    }

    fn limits_base(mode: Mode) -> Self {
        Self {
            mode,
            allow_comments: true,
            allow_directives: true,
            allow_trailing_commas: true,
            allow_single_quotes: false,
            allow_unquoted_property_names: true,
            allow_number_bases: true,
            allow_digit_separators: false,
            allow_leading_plus_on_numbers: false,
            allow_nan_and_infinity: false,
            max_depth: 128,
            max_token_bytes: 1 << 20,
            max_document_bytes: None,
            max_string_bytes: None,
            max_property_name_bytes: None,
            capture_line_column: false,
            include_preview_in_errors: false,
            lax_graceful_close: false,
        }
    }

    pub(crate) fn resolve(&self) -> Resolved {
        let strict = self.mode == Mode::Json;
        let lax = self.mode == Mode::Lax;
        let on = |flag: bool| flag && !strict;
        let unquoted_names = on(self.allow_unquoted_property_names);
        let identifier_values = lax;
        Resolved {
            strict,
            comments: on(self.allow_comments),
            directives: on(self.allow_directives),
            trailing_commas: on(self.allow_trailing_commas),
            single_quotes: on(self.allow_single_quotes),
            unquoted_names,
            number_bases: on(self.allow_number_bases),
            digit_separators: on(self.allow_digit_separators),
            leading_plus: on(self.allow_leading_plus_on_numbers),
            nan_infinity: on(self.allow_nan_and_infinity),
            identifier_values,
            idents: unquoted_names || identifier_values,
            recover: lax,
            graceful_close: lax && self.lax_graceful_close,
            max_depth: self.max_depth,
            max_token_bytes: self.max_token_bytes,
            max_document_bytes: self.max_document_bytes,
            max_string_bytes: self.max_string_bytes,
            max_property_name_bytes: self.max_property_name_bytes,
            line_column: self.capture_line_column,
            preview: self.include_preview_in_errors,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::ajis()
    }
}

/// The fixed behavior vector one walk runs with. Collapsing happens once at
/// walk entry; the engine never consults `Options` again.
#[derive(Clone, Debug)]
pub(crate) struct Resolved {
    pub strict: bool,
    pub comments: bool,
    pub directives: bool,
    pub trailing_commas: bool,
    pub single_quotes: bool,
    pub unquoted_names: bool,
    pub number_bases: bool,
    pub digit_separators: bool,
    pub leading_plus: bool,
    pub nan_infinity: bool,
    /// Identifiers are legal standalone values (Lax only).
    pub identifier_values: bool,
    /// Identifier tokens exist at all in this configuration.
    pub idents: bool,
    /// Scanner-level recovery (Lax only).
    pub recover: bool,
    pub graceful_close: bool,
    pub max_depth: usize,
    pub max_token_bytes: usize,
    pub max_document_bytes: Option<usize>,
    pub max_string_bytes: Option<usize>,
    pub max_property_name_bytes: Option<usize>,
    pub line_column: bool,
    pub preview: bool,
}
