//! Wire-level behaviour of the Usage codec against hand-built byte vectors.

use gateway_proto::{
    DecodeConfig, Message, ProtocolError, Usage, config::FRAME_MAX_MESSAGE_LEN,
    varint::write_varint,
};
use hex_literal::hex;

#[test]
fn round_trip_all_fields() {
    let usage = Usage::builder().prompt_tokens(12).completion_tokens(30).total_tokens(42).build();
    let decoded = Usage::decode(&usage.encode_to_vec()).unwrap();
    assert_eq!(decoded, usage);
    assert_eq!(decoded.is_consistent(), Some(true));
}

#[test]
fn only_completion_tokens_set() {
    let usage = Usage::builder().completion_tokens(5).build();
    let bytes = usage.encode_to_vec();
    assert_eq!(bytes, hex!("1005"));

    let decoded = Usage::decode(&bytes).unwrap();
    assert_eq!(decoded.prompt_tokens_opt(), None);
    assert_eq!(decoded.completion_tokens_opt(), Some(5));
    assert_eq!(decoded.total_tokens_opt(), None);
}

#[test]
fn unknown_field_passes_through_in_order() {
    // completion_tokens = 5, then field 9 varint 42
    let input = hex!("1005482a");
    let usage = Usage::decode(&input).unwrap();

    assert_eq!(usage.completion_tokens(), 5);
    assert_eq!(usage.unknown_fields().as_bytes(), hex!("482a"));
    assert_eq!(usage.encode_to_vec(), input);
}

#[test]
fn unknown_fields_of_every_wire_type_are_retained() {
    let unknown = hex!(
        "482a"            // field 9, varint 42
        "5101020304050607 08" // field 10, fixed64
        "5a03616263"      // field 11, length-delimited "abc"
        "65deadbeef"      // field 12, fixed32
    );
    let mut input = hex!("0801").to_vec();
    input.extend_from_slice(&unknown);

    let usage = Usage::decode(&input).unwrap();
    assert_eq!(usage.prompt_tokens(), 1);
    assert_eq!(usage.unknown_fields().as_bytes(), unknown);
    assert_eq!(usage.encoded_len(), input.len());
    assert_eq!(usage.encode_to_vec(), input);
}

#[test]
fn known_fields_are_emitted_before_unknown_ones() {
    // Unknown field first on the wire; re-encoding moves it after the known fields.
    let usage = Usage::decode(&hex!("482a1005")).unwrap();
    assert_eq!(usage.encode_to_vec(), hex!("1005482a"));
}

#[test]
fn repeated_field_last_wins() {
    let usage = Usage::decode(&hex!("08030807")).unwrap();
    assert_eq!(usage.prompt_tokens(), 7);
    assert!(usage.unknown_fields().is_empty());
}

#[test]
fn negative_prompt_tokens_round_trip() {
    let usage = Usage::builder().prompt_tokens(-1).build();
    let decoded = Usage::decode(&usage.encode_to_vec()).unwrap();
    assert_eq!(decoded.prompt_tokens_opt(), Some(-1));

    let extremes = Usage::builder().prompt_tokens(i32::MIN).total_tokens(i32::MAX).build();
    assert_eq!(Usage::decode(&extremes.encode_to_vec()).unwrap(), extremes);
}

#[test]
fn tag_without_value_is_truncated() {
    assert_eq!(Usage::decode(&hex!("08")), Err(ProtocolError::Truncated));
}

#[test]
fn dangling_continuation_bit_is_truncated() {
    assert_eq!(Usage::decode(&hex!("08ff")), Err(ProtocolError::Truncated));
    assert_eq!(Usage::decode(&hex!("80")), Err(ProtocolError::Truncated));
}

#[test]
fn truncated_fixed_width_unknown_field() {
    assert_eq!(Usage::decode(&hex!("650102")), Err(ProtocolError::Truncated));
}

#[test]
fn length_overrun_is_reported() {
    assert_eq!(
        Usage::decode(&hex!("5a0561")),
        Err(ProtocolError::LengthOverrun { declared: 5, remaining: 1 })
    );
}

#[test]
fn group_wire_types_are_rejected() {
    // field 9 with wire type 3 (start group) and 4 (end group)
    assert_eq!(Usage::decode(&hex!("4b")), Err(ProtocolError::InvalidWireType(3)));
    assert_eq!(Usage::decode(&hex!("4c")), Err(ProtocolError::InvalidWireType(4)));
    assert_eq!(Usage::decode(&hex!("0f")), Err(ProtocolError::InvalidWireType(7)));
}

#[test]
fn proto2_group_is_not_carried_as_unknown() {
    // field 9 group containing field 10 = 1
    assert_eq!(Usage::decode(&hex!("4b50014c")), Err(ProtocolError::InvalidWireType(3)));
}

#[test]
fn failure_after_valid_fields_returns_no_record() {
    assert_eq!(Usage::decode(&hex!("0803100418")), Err(ProtocolError::Truncated));
}

#[test]
fn oversized_input_is_rejected_up_front() {
    let config = DecodeConfig::default().with_max_message_len(4);
    assert_eq!(
        Usage::decode_with(&hex!("0803100418 07"), &config),
        Err(ProtocolError::MessageTooLarge { size: 6, max: 4 })
    );
    assert!(Usage::decode_with(&hex!("08031004"), &config).is_ok());
}

#[test]
fn large_message_decodes_without_a_configured_limit() {
    // prompt_tokens = 5, then field 9 carrying 17 MiB of opaque bytes
    let body_len = 17 * 1024 * 1024;
    let mut input = hex!("08054a").to_vec();
    write_varint(&mut input, body_len as u64);
    input.resize(input.len() + body_len, 0xab);
    assert!(input.len() > FRAME_MAX_MESSAGE_LEN);

    let usage = Usage::decode(&input).unwrap();
    assert_eq!(usage.prompt_tokens(), 5);
    assert_eq!(usage.unknown_fields().len(), input.len() - 2);
    assert_eq!(usage.encode_to_vec(), input);

    let capped = DecodeConfig::default().with_max_message_len(FRAME_MAX_MESSAGE_LEN);
    assert_eq!(
        Usage::decode_with(&input, &capped),
        Err(ProtocolError::MessageTooLarge { size: input.len() as u64, max: FRAME_MAX_MESSAGE_LEN })
    );
}

#[test]
fn field_number_zero_is_kept_as_unknown() {
    let usage = Usage::decode(&hex!("0005")).unwrap();
    assert_eq!(usage.unknown_fields().as_bytes(), hex!("0005"));
}
