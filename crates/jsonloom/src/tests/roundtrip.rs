use crate::{utf16, utf8};

#[test]
fn integer_boundaries() {
    for &v in &[i64::MIN, -1, 0, 1, i64::MAX] {
        let bytes = utf8::to_bytes(&v).unwrap();
        assert_eq!(utf8::from_slice::<i64>(&bytes).unwrap(), v);
        let units = utf16::to_units(&v).unwrap();
        assert_eq!(utf16::from_units::<i64>(&units).unwrap(), v);
    }
    let bytes = utf8::to_bytes(&u64::MAX).unwrap();
    assert_eq!(bytes, b"18446744073709551615");
    assert_eq!(utf8::from_slice::<u64>(&bytes).unwrap(), u64::MAX);
}

#[test]
fn float_boundaries() {
    for &v in &[
        0.0f64,
        -0.0,
        1.5,
        -1.0e300,
        f64::MIN_POSITIVE,
        f64::MAX,
    ] {
        let bytes = utf8::to_bytes(&v).unwrap();
        let back = utf8::from_slice::<f64>(&bytes).unwrap();
        assert_eq!(back.to_bits(), v.to_bits(), "payload {bytes:?}");
        let units = utf16::to_units(&v).unwrap();
        assert_eq!(utf16::from_units::<f64>(&units).unwrap().to_bits(), v.to_bits());
    }
}

#[test]
fn non_finite_floats_take_the_quoted_form() {
    assert_eq!(utf8::to_bytes(&f64::NAN).unwrap(), b"\"NaN\"");
    assert!(utf8::from_slice::<f64>(b"\"NaN\"").unwrap().is_nan());
    assert_eq!(
        utf8::from_slice::<f64>(b"\"Infinity\"").unwrap(),
        f64::INFINITY
    );
    assert_eq!(
        utf8::from_slice::<f64>(b"\"-Infinity\"").unwrap(),
        f64::NEG_INFINITY
    );
    let units = utf16::to_units(&f32::NEG_INFINITY).unwrap();
    assert_eq!(utf16::from_units::<f32>(&units).unwrap(), f32::NEG_INFINITY);
}

#[test]
fn strings_with_every_short_escape() {
    let tricky = "\" \\ / \u{8} \u{c} \n \r \t \u{0} ß 😀".to_string();
    let bytes = utf8::to_bytes(&tricky).unwrap();
    assert_eq!(utf8::from_slice::<String>(&bytes).unwrap(), tricky);
    let units = utf16::to_units(&tricky).unwrap();
    assert_eq!(utf16::from_units::<String>(&units).unwrap(), tricky);
}

#[test]
fn empty_string() {
    assert_eq!(utf8::to_string(&String::new()).unwrap(), "\"\"");
    assert_eq!(utf8::from_str::<String>("\"\"").unwrap(), "");
}

#[test]
fn escaped_surrogate_pairs_decode_on_both_encodings() {
    let json = "\"\\ud83d\\ude00\"";
    assert_eq!(utf8::from_str::<String>(json).unwrap(), "😀");
    let units: Vec<u16> = json.encode_utf16().collect();
    assert_eq!(utf16::from_units::<String>(&units).unwrap(), "😀");
}

#[test]
fn empty_sequence_is_two_symbols_and_allocation_free() {
    let bytes = utf8::to_bytes(&Vec::<i32>::new()).unwrap();
    assert_eq!(bytes, vec![0x5B, 0x5D]);
    let back: Vec<i32> = utf8::from_slice(&bytes).unwrap();
    assert!(back.is_empty());
    assert_eq!(back.capacity(), 0);
}

#[test]
fn utf16_sequence_wire_shape() {
    let units = utf16::to_units(&vec![1i32, 2, 3]).unwrap();
    assert_eq!(units, "[1,2,3]".encode_utf16().collect::<Vec<u16>>());
    let back: Vec<i32> = utf16::from_units(&units).unwrap();
    assert_eq!(back, vec![1, 2, 3]);
}

#[test]
fn nullable_element_roundtrip() {
    let single: Vec<Option<i32>> = vec![None];
    let bytes = utf8::to_bytes(&single).unwrap();
    assert_eq!(bytes, b"[null]");
    assert_eq!(utf8::from_slice::<Vec<Option<i32>>>(&bytes).unwrap(), single);

    let mixed: Vec<Option<i32>> = vec![Some(4), None, Some(-7)];
    let bytes = utf8::to_bytes(&mixed).unwrap();
    assert_eq!(bytes, b"[4,null,-7]");
    assert_eq!(utf8::from_slice::<Vec<Option<i32>>>(&bytes).unwrap(), mixed);
}

#[test]
fn nullable_scalar_roundtrip() {
    for v in [None, Some(19u32)] {
        let bytes = utf8::to_bytes(&v).unwrap();
        assert_eq!(utf8::from_slice::<Option<u32>>(&bytes).unwrap(), v);
    }
}

#[test]
fn nested_sequences_preserve_shape() {
    let grid: Vec<Vec<u32>> = vec![vec![], vec![1], vec![2, 3]];
    let json = utf8::to_string(&grid).unwrap();
    assert_eq!(json, "[[],[1],[2,3]]");
    assert_eq!(utf8::from_str::<Vec<Vec<u32>>>(&json).unwrap(), grid);
}

#[test]
fn whitespace_between_tokens_is_tolerated() {
    let back: Vec<Option<i64>> = utf8::from_str(" [ 1 ,\tnull , -3 ] ").unwrap();
    assert_eq!(back, vec![Some(1), None, Some(-3)]);
}

crate::json_object! {
    pub struct Inventory {
        pub id: u64,
        pub label: String,
        pub tags: Vec<String>,
        pub note: Option<String>,
    }
}

#[test]
fn aggregates_roundtrip_on_both_encodings() {
    let item = Inventory {
        id: 31,
        label: "crate of ünits".into(),
        tags: vec!["new".into(), "fragile".into()],
        note: None,
    };
    let json = utf8::to_string(&item).unwrap();
    assert_eq!(
        json,
        r#"{"id":31,"label":"crate of ünits","tags":["new","fragile"]}"#
    );
    assert_eq!(utf8::from_str::<Inventory>(&json).unwrap(), item);

    let units = utf16::to_units(&item).unwrap();
    assert_eq!(utf16::from_units::<Inventory>(&units).unwrap(), item);
}

#[test]
fn unknown_members_are_skipped() {
    let json = r#"{"label":"x","debug":{"a":[1,2,{"b":null}]},"id":9}"#;
    let item: Inventory = utf8::from_str(json).unwrap();
    assert_eq!(item.id, 9);
    assert_eq!(item.label, "x");
    assert!(item.tags.is_empty());
    assert_eq!(item.note, None);
}
