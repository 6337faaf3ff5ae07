use super::*;
use EventKind::{
    BeginArray, BeginObject, Comment, EndArray, EndDocument, EndObject, Identifier, Name, Number,
};

const AJIS_SAMPLE: &str = "{id: 0xFF, /* note */ tags: [1,2,]}";

#[test]
fn ajis_extensions_sample() {
    let rec = record(AJIS_SAMPLE, &Options::ajis());
    assert_eq!(
        rec.shape(),
        [
            (BeginObject, String::new()),
            (Name, "id".into()),
            (Number, "0xFF".into()),
            (Comment, "note".into()),
            (Name, "tags".into()),
            (BeginArray, String::new()),
            (Number, "1".into()),
            (Number, "2".into()),
            (EndArray, String::new()),
            (EndObject, String::new()),
            (EndDocument, String::new()),
        ]
    );
    assert!(rec.events[1].flags.contains(SliceFlags::IDENTIFIER_STYLE));
    assert!(rec.events[2].flags.contains(SliceFlags::NUMBER_HEX));
    assert!(rec.events[4].flags.contains(SliceFlags::IDENTIFIER_STYLE));
    assert_eq!(rec.events[1].offset, 1);
}

#[test]
fn ajis_sample_rejected_in_json_mode() {
    expect_error(
        AJIS_SAMPLE,
        &Options::json(),
        ErrorCode::NotAllowedInJsonMode,
        1,
    );
}

#[test]
fn json_mode_forces_flags_off() {
    // Turning flags on by hand must not survive the resolver.
    let mut opts = Options::json();
    opts.allow_comments = true;
    opts.allow_unquoted_property_names = true;
    expect_error("[1, // c\n2]", &opts, ErrorCode::NotAllowedInJsonMode, 4);
}

#[test]
fn mode_equivalence_for_json_valid_inputs() {
    let inputs = [
        r#"{"a":1,"b":[true,false,null],"c":"x"}"#,
        "[[1,2],{},[{\"k\":-1.5e3}]]",
        "\"plain\"",
    ];
    for input in inputs {
        let json = record(input, &Options::json()).shape();
        let ajis = record(input, &Options::ajis()).shape();
        let lax = record(input, &Options::lax()).shape();
        assert_eq!(json, ajis, "json/ajis diverged on {input}");
        assert_eq!(json, lax, "json/lax diverged on {input}");
    }
}

#[test]
fn feature_disabled_vs_json_mode_codes() {
    // Same construct, different mode, different code; offset unchanged.
    let mut no_comments = Options::ajis();
    no_comments.allow_comments = false;
    expect_error("[1 /*c*/]", &no_comments, ErrorCode::FeatureDisabled, 3);
    expect_error("[1 /*c*/]", &Options::json(), ErrorCode::NotAllowedInJsonMode, 3);

    let mut no_directives = Options::ajis();
    no_directives.allow_directives = false;
    expect_error("#d\n1", &no_directives, ErrorCode::FeatureDisabled, 0);
    expect_error("#d\n1", &Options::json(), ErrorCode::NotAllowedInJsonMode, 0);

    expect_error("'x'", &Options::ajis(), ErrorCode::FeatureDisabled, 0);
    expect_error("'x'", &Options::json(), ErrorCode::NotAllowedInJsonMode, 0);

    let mut no_bases = Options::ajis();
    no_bases.allow_number_bases = false;
    expect_error("0x10", &no_bases, ErrorCode::FeatureDisabled, 0);
    expect_error("0x10", &Options::json(), ErrorCode::NotAllowedInJsonMode, 0);

    expect_error("+1", &Options::ajis(), ErrorCode::FeatureDisabled, 0);
    expect_error("+1", &Options::json(), ErrorCode::NotAllowedInJsonMode, 0);

    expect_error("NaN", &Options::ajis(), ErrorCode::FeatureDisabled, 0);
    expect_error("NaN", &Options::json(), ErrorCode::NotAllowedInJsonMode, 0);

    expect_error("1_0", &Options::ajis(), ErrorCode::FeatureDisabled, 1);
    expect_error("1_0", &Options::json(), ErrorCode::NotAllowedInJsonMode, 1);
}

#[test]
fn unquoted_names_gate() {
    let mut opts = Options::ajis();
    opts.allow_unquoted_property_names = false;
    expect_error("{a: 1}", &opts, ErrorCode::FeatureDisabled, 1);
    expect_error("{a: 1}", &Options::json(), ErrorCode::NotAllowedInJsonMode, 1);
}

#[test]
fn trailing_comma_gate() {
    let mut opts = Options::ajis();
    opts.allow_trailing_commas = false;
    expect_error("[1,]", &opts, ErrorCode::UnexpectedToken, 3);
    expect_error("{\"a\":1,}", &opts, ErrorCode::UnexpectedToken, 7);
    let rec = record("[1,]", &Options::ajis());
    assert_eq!(rec.kinds(), [BeginArray, Number, EndArray, EndDocument]);
}

#[test]
fn identifier_values_only_in_lax() {
    expect_error("[ok]", &Options::ajis(), ErrorCode::UnexpectedToken, 1);
    let rec = record("[ok, $ref2]", &Options::lax());
    assert_eq!(
        rec.shape(),
        [
            (BeginArray, String::new()),
            (Identifier, "ok".into()),
            (Identifier, "$ref2".into()),
            (EndArray, String::new()),
            (EndDocument, String::new()),
        ]
    );
    assert!(rec.events[1].flags.contains(SliceFlags::IDENTIFIER_STYLE));
}

#[test]
fn lax_recovers_unterminated_string() {
    let rec = record("\"abc", &Options::lax());
    assert_eq!(rec.shape()[0], (EventKind::String, "abc".into()));
    assert_eq!(rec.kinds().last(), Some(&EndDocument));
}

#[test]
fn lax_retains_invalid_escapes() {
    let rec = record(r#""a\qb""#, &Options::lax());
    assert_eq!(rec.shape()[0], (EventKind::String, r"a\qb".into()));
    assert!(rec.events[0].flags.contains(SliceFlags::HAS_ESCAPES));
}

#[test]
fn lax_recovers_unterminated_block_comment() {
    let rec = record("1 /* never closed", &Options::lax());
    assert_eq!(
        rec.shape(),
        [
            (Number, "1".into()),
            (Comment, "never closed".into()),
            (EndDocument, String::new()),
        ]
    );
}

#[test]
fn graceful_close_is_opt_in() {
    let input = "{a: 1, b: [1, 2";
    expect_error(input, &Options::lax(), ErrorCode::UnexpectedEndOfInput, 15);

    let mut opts = Options::lax();
    opts.lax_graceful_close = true;
    let rec = record(input, &opts);
    assert_eq!(
        rec.kinds(),
        [
            BeginObject,
            Name,
            Number,
            Name,
            BeginArray,
            Number,
            Number,
            EndArray,
            EndObject,
            EndDocument,
        ]
    );
    // Synthetic closers sit at the end of input.
    assert_eq!(rec.events[7].offset, 15);
    assert_eq!(rec.events[8].offset, 15);
}

#[test]
fn graceful_close_never_splits_a_pair() {
    let mut opts = Options::lax();
    opts.lax_graceful_close = true;
    expect_error("{a:", &opts, ErrorCode::UnexpectedEndOfInput, 3);
    expect_error("{a", &opts, ErrorCode::UnexpectedEndOfInput, 2);
}

#[test]
fn graceful_close_ignored_outside_lax() {
    let mut opts = Options::ajis();
    opts.lax_graceful_close = true;
    expect_error("[1", &opts, ErrorCode::UnexpectedEndOfInput, 2);
}
