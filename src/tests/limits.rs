use super::*;

#[test]
fn depth_limit_points_at_the_excess_opener() {
    let mut opts = Options::ajis();
    opts.max_depth = 3;
    expect_error("[[[[", &opts, ErrorCode::MaxDepthExceeded, 3);
    // Exactly at the limit is fine.
    let rec = record("[[[1]]]", &opts);
    assert!(rec.error.is_none());
}

#[test]
fn depth_limit_counts_mixed_containers() {
    let mut opts = Options::ajis();
    opts.max_depth = 2;
    expect_error(r#"{"a":[{"b":1}]}"#, &opts, ErrorCode::MaxDepthExceeded, 6);
}

#[test]
fn token_limit() {
    let mut opts = Options::ajis();
    opts.max_token_bytes = 8;
    let long = format!("\"{}\"", "x".repeat(32));
    expect_error(&long, &opts, ErrorCode::MaxTokenBytesExceeded, 0);
    expect_error(
        "[1, 123456789012345]",
        &opts,
        ErrorCode::MaxTokenBytesExceeded,
        4,
    );
    // At the limit is fine.
    let ok = format!("\"{}\"", "x".repeat(6));
    let rec = record(&ok, &opts);
    assert!(rec.error.is_none());
}

#[test]
fn document_limit() {
    let mut opts = Options::ajis();
    opts.max_document_bytes = Some(4);
    expect_error("[1, 2, 3]", &opts, ErrorCode::MaxDocumentBytesExceeded, 4);
    let rec = record("[1]", &opts);
    assert!(rec.error.is_none());
}

#[test]
fn string_limit() {
    let mut opts = Options::ajis();
    opts.max_string_bytes = Some(4);
    expect_error("\"hello\"", &opts, ErrorCode::MaxStringBytesExceeded, 0);
    let rec = record("\"hell\"", &opts);
    assert!(rec.error.is_none());
}

#[test]
fn property_name_limit_covers_both_spellings() {
    let mut opts = Options::ajis();
    opts.max_property_name_bytes = Some(3);
    expect_error(
        r#"{"toolong": 1}"#,
        &opts,
        ErrorCode::MaxPropertyNameBytesExceeded,
        1,
    );
    expect_error(
        "{toolong: 1}",
        &opts,
        ErrorCode::MaxPropertyNameBytesExceeded,
        1,
    );
    let rec = record(r#"{"abc": 1}"#, &opts);
    assert!(rec.error.is_none());
}

#[test]
fn string_values_are_not_property_names() {
    let mut opts = Options::ajis();
    opts.max_property_name_bytes = Some(3);
    let rec = record(r#"{"k": "toolong"}"#, &opts);
    assert!(rec.error.is_none());
}
