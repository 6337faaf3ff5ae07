use super::*;

fn opts() -> Options {
    Options::ajis()
}

#[test]
fn trailing_garbage_in_every_mode() {
    for opts in [Options::json(), Options::ajis(), Options::lax()] {
        expect_error("1 x", &opts, ErrorCode::TrailingGarbage, 2);
    }
}

#[test]
fn trailing_garbage_offset_is_first_non_whitespace() {
    expect_error("{}   []", &opts(), ErrorCode::TrailingGarbage, 5);
    expect_error("null\n\"q", &opts(), ErrorCode::TrailingGarbage, 5);
}

#[test]
fn trailing_trivia_is_skipped() {
    let rec = record("1 // done\n/* end */\n#last\n", &opts());
    assert_eq!(
        rec.kinds(),
        [
            EventKind::Number,
            EventKind::Comment,
            EventKind::Comment,
            EventKind::Directive,
            EventKind::EndDocument
        ]
    );
}

#[test]
fn unexpected_end_of_input() {
    expect_error("", &opts(), ErrorCode::UnexpectedEndOfInput, 0);
    expect_error("   ", &opts(), ErrorCode::UnexpectedEndOfInput, 3);
    expect_error("{", &opts(), ErrorCode::UnexpectedEndOfInput, 1);
    expect_error("[1,2", &opts(), ErrorCode::UnexpectedEndOfInput, 4);
    expect_error(r#"{"a":"#, &opts(), ErrorCode::UnexpectedEndOfInput, 5);
    expect_error(r#""abc"#, &opts(), ErrorCode::UnexpectedEndOfInput, 4);
    expect_error("-", &opts(), ErrorCode::UnexpectedEndOfInput, 1);
}

#[test]
fn unexpected_token_in_structure() {
    expect_error(r#"{"a"}"#, &opts(), ErrorCode::UnexpectedToken, 4);
    expect_error(r#"{"a":}"#, &opts(), ErrorCode::UnexpectedToken, 5);
    expect_error("[1 2]", &opts(), ErrorCode::UnexpectedToken, 3);
    expect_error("[,1]", &opts(), ErrorCode::UnexpectedToken, 1);
    expect_error(":", &opts(), ErrorCode::UnexpectedToken, 0);
    expect_error("}", &opts(), ErrorCode::UnexpectedToken, 0);
}

#[test]
fn invalid_character() {
    expect_error("@", &opts(), ErrorCode::InvalidCharacter, 0);
    expect_error("[1, @]", &opts(), ErrorCode::InvalidCharacter, 4);
    // `#` not at line start is no directive.
    expect_error("[1, #d\n]", &opts(), ErrorCode::InvalidCharacter, 4);
    // A lone slash opens no comment.
    expect_error("/ 1", &opts(), ErrorCode::InvalidCharacter, 0);
}

#[test]
fn broken_keywords() {
    // Strict JSON has no identifiers to fall back to.
    expect_error("tru", &Options::json(), ErrorCode::InvalidLiteral, 0);
    expect_error("[nul]", &Options::json(), ErrorCode::InvalidLiteral, 1);
    // AJIS lexes the word as an identifier, which is no value.
    expect_error("tru", &opts(), ErrorCode::UnexpectedToken, 0);
}

#[test]
fn error_cardinality() {
    let mut rec = Recording::default();
    let err = walk_str("[1, ?", &opts(), &mut rec).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidCharacter);
    assert_eq!(rec.completions, 0);
    // Events before the failure stay delivered, nothing after.
    assert_eq!(
        rec.kinds(),
        [EventKind::BeginArray, EventKind::Number]
    );
}

#[test]
fn line_column_capture() {
    let mut opts = opts();
    opts.capture_line_column = true;
    let rec = record("[\n  1,\n  ?\n]", &opts);
    let err = rec.error.unwrap();
    assert_eq!(err.code, ErrorCode::InvalidCharacter);
    assert_eq!(err.offset, 9);
    assert_eq!(err.line, Some(3));
    assert_eq!(err.column, Some(3));
}

#[test]
fn crlf_counts_as_one_break() {
    let mut opts = opts();
    opts.capture_line_column = true;
    let rec = record("[1,\r\n?]", &opts);
    let err = rec.error.unwrap();
    assert_eq!(err.line, Some(2));
    assert_eq!(err.column, Some(1));
}

#[test]
fn diagnostics_do_not_change_code_or_offset() {
    let plain = record("[1, ?", &opts()).error.unwrap();
    let mut decorated_opts = opts();
    decorated_opts.capture_line_column = true;
    decorated_opts.include_preview_in_errors = true;
    let decorated = record("[1, ?", &decorated_opts).error.unwrap();
    assert_eq!(plain.code, decorated.code);
    assert_eq!(plain.offset, decorated.offset);
    assert!(plain.line.is_none() && plain.preview.is_none());
    assert!(decorated.line.is_some());
}

#[test]
fn error_display_names_code_and_offset() {
    let err = record("[1, ?", &opts()).error.unwrap();
    let text = err.to_string();
    assert!(text.contains("invalid character"), "{text}");
    assert!(text.contains("4"), "{text}");
}
