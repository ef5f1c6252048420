use crate::fmt::Standard;
use crate::hints::{presize, Dir};
use crate::{utf16, utf8};

// These suites use element widths no other test serializes, so the sticky
// slots under observation belong to them alone.

#[test]
fn serialize_hint_tracks_the_final_position() {
    let v: Vec<i16> = (0..40).collect();
    let first = utf8::to_bytes(&v).unwrap();
    // The next session of the same triple starts at the previous final
    // position.
    assert_eq!(presize::<(Vec<i16>, u8, Standard)>(Dir::Write), first.len());

    let second = utf8::to_bytes(&v).unwrap();
    assert_eq!(first, second);
    assert_eq!(presize::<(Vec<i16>, u8, Standard)>(Dir::Write), first.len());
}

#[test]
fn deserialize_hint_tracks_the_view_length() {
    let json = "[9,8,7]";
    let _: Vec<i8> = utf8::from_str(json).unwrap();
    assert_eq!(presize::<(Vec<i8>, u8, Standard)>(Dir::Read), json.len());
}

#[test]
fn hints_are_kept_per_encoding() {
    let v: Vec<u16> = vec![1000, 2000, 3000];
    let units = utf16::to_units(&v).unwrap();
    assert_eq!(presize::<(Vec<u16>, u16, Standard)>(Dir::Write), units.len());
    // The UTF-8 slot for the same value type is untouched by that session.
    assert_eq!(
        presize::<(Vec<u16>, u8, Standard)>(Dir::Write),
        crate::hints::DEFAULT_HINT
    );
}
