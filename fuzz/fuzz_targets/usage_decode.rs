//! Decode arbitrary bytes as a Usage.
//!
//! Decoding must never panic, and anything that decodes must re-encode to a
//! buffer that decodes back to the same record.

#![no_main]

use gateway_proto::{Message, Usage};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(usage) = Usage::decode(data) else {
        return;
    };

    let encoded = usage.encode_to_vec();
    assert_eq!(encoded.len(), usage.encoded_len());

    let again = Usage::decode(&encoded).unwrap();
    assert_eq!(again, usage);
    assert_eq!(again.encode_to_vec(), encoded);
});
