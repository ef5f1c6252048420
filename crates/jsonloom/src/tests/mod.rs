mod errors;
mod roundtrip;
mod sticky;
