//! Decode arbitrary bytes as a Priority, and as a length-delimited Usage
//! followed by a Priority.

#![no_main]

use gateway_proto::{Message, Priority, Usage};
use libfuzzer_sys::fuzz_target;

fn check_round_trip(priority: Priority) {
    let mut out = Vec::new();
    priority.encode(&mut out);
    assert_eq!(out.len(), priority.encoded_len());
    assert_eq!(Priority::decode(&mut &out[..]).unwrap(), priority);
}

fuzz_target!(|data: &[u8]| {
    if let Ok(priority) = Priority::decode(&mut &data[..]) {
        check_round_trip(priority);
    }

    let mut cursor = data;
    if Usage::decode_length_delimited(&mut cursor).is_err() {
        return;
    }
    if let Ok(priority) = Priority::decode(&mut cursor) {
        check_round_trip(priority);
    }
});
