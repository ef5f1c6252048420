use crate::{utf8, ErrorKind};

#[test]
fn truncated_array_is_unexpected_end() {
    let err = utf8::from_slice::<Vec<i64>>(b"[1,").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedEnd);
    assert_eq!(err.offset, 3);
}

#[test]
fn doubled_separator_is_unexpected_token() {
    let err = utf8::from_slice::<Vec<i64>>(b"[1,,2]").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedToken(','));
    assert_eq!(err.offset, 3);
}

#[test]
fn trailing_separator_is_unexpected_token() {
    let err = utf8::from_slice::<Vec<i64>>(b"[1,2,]").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedToken(']'));
    assert_eq!(err.offset, 5);
}

#[test]
fn leading_separator_is_unexpected_token() {
    let err = utf8::from_slice::<Vec<i64>>(b"[,1]").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedToken(','));
    assert_eq!(err.offset, 1);
}

#[test]
fn missing_separator_is_unexpected_token() {
    let err = utf8::from_slice::<Vec<i64>>(b"[1 2]").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedToken('2'));
}

#[test]
fn malformed_literals() {
    let err = utf8::from_slice::<bool>(b"trux").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidLiteral);
    assert_eq!(err.offset, 3);

    let err = utf8::from_slice::<Option<i32>>(b"nul!").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidLiteral);

    let err = utf8::from_slice::<bool>(b"tru").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedEnd);
}

#[test]
fn numeric_overflow_names_the_requested_type() {
    let err = utf8::from_slice::<u8>(b"256").unwrap_err();
    assert_eq!(err.kind, ErrorKind::OutOfRange("u8"));

    let err = utf8::from_slice::<u64>(b"-1").unwrap_err();
    assert_eq!(err.kind, ErrorKind::OutOfRange("u64"));

    let err = utf8::from_slice::<i32>(b"2147483648").unwrap_err();
    assert_eq!(err.kind, ErrorKind::OutOfRange("i32"));
}

#[test]
fn sequences_reject_null() {
    let err = utf8::from_slice::<Vec<i64>>(b"null").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedToken('n'));
}

#[test]
fn ill_formed_utf8_in_string_payload() {
    let err = utf8::from_slice::<String>(b"\"a\xFF\"").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidText);
}

#[test]
fn errors_render_with_offsets() {
    let err = utf8::from_slice::<Vec<i64>>(b"[1,,2]").unwrap_err();
    assert_eq!(err.to_string(), "unexpected token ',' at offset 3");
}
