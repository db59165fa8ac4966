use proptest::prelude::*;
use slabkit_core::ShareError;
use slabkit_designer::share::{decode_token, encode_token, encode_token_as, ShareVersion};

#[test]
fn test_unicode_payload_round_trip() {
    let json = r#"{"project":{"name":"Küche","date":"2026-03-01","notes":"Naht ↔ 1⅛\" — ok 🙂"}}"#;
    let token = encode_token(json).unwrap();
    let payload = decode_token(&token).unwrap();
    assert_eq!(payload.version, ShareVersion::V2);
    assert_eq!(payload.json, json);
}

#[test]
fn test_padded_body_is_accepted() {
    let token = encode_token_as(ShareVersion::V1, "{\"pieces\":[]}").unwrap();
    let padded = format!("{token}==");
    assert_eq!(decode_token(&padded).unwrap().json, "{\"pieces\":[]}");
}

#[test]
fn test_prefix_errors() {
    assert_eq!(decode_token(""), Err(ShareError::MissingPrefix));
    assert_eq!(decode_token("x2=abc"), Err(ShareError::MissingPrefix));
    assert!(matches!(
        decode_token("v3=abc"),
        Err(ShareError::UnknownVersion { .. })
    ));
}

proptest! {
    #[test]
    fn prop_decode_returns_encoded_text(text in "\\PC{0,200}") {
        let json = serde_json::json!({ "notes": text }).to_string();
        let token = encode_token(&json).unwrap();
        prop_assert_eq!(decode_token(&token).unwrap().json, json);
    }
}
