#![no_main]

use libfuzzer_sys::fuzz_target;

jsonloom::json_object! {
    pub struct Record {
        pub id: u64,
        pub label: String,
        pub tags: Vec<String>,
        pub weight: Option<f64>,
    }
}

// Arbitrary bytes must never panic the deserializer, only return typed
// errors. Run a few differently-shaped targets over the same input.
fuzz_target!(|data: &[u8]| {
    let _ = jsonloom::utf8::from_slice::<Vec<Record>>(data);
    let _ = jsonloom::utf8::from_slice::<Vec<Option<String>>>(data);
    let _ = jsonloom::utf8::from_slice::<Vec<f64>>(data);
    let _ = jsonloom::utf8::from_slice::<Vec<Vec<bool>>>(data);

    // Whatever parses must re-serialize.
    if let Ok(records) = jsonloom::utf8::from_slice::<Vec<Record>>(data) {
        jsonloom::utf8::to_bytes(&records).unwrap();
    }
});
