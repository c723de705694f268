use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tenki_bot::api::signature::{compute_signature, verify};

const SECRET: &str = "8c570fa6dd201bb328f1c1eac23a96d8";

#[test]
fn test_verify_accepts_correct_signature() {
    let bodies: [&[u8]; 4] = [
        b"",
        br#"{"destination":"U1","events":[]}"#,
        "今日の天気は？".as_bytes(),
        &[0x00, 0xff, 0x10, 0x80],
    ];

    for body in bodies {
        let sig = compute_signature(body, SECRET);
        assert!(verify(body, &sig, SECRET), "body {body:?} should verify");
    }
}

#[test]
fn test_verify_rejects_every_single_bit_flip() {
    let body = br#"{"events":[{"type":"message"}]}"#;
    let raw = BASE64.decode(compute_signature(body, SECRET)).unwrap();

    for byte in 0..raw.len() {
        for bit in 0..8 {
            let mut mutated = raw.clone();
            mutated[byte] ^= 1 << bit;
            let sig = BASE64.encode(&mutated);
            assert!(
                !verify(body, &sig, SECRET),
                "flip of byte {byte} bit {bit} should be rejected"
            );
        }
    }
}

#[test]
fn test_verify_rejects_wrong_secret_and_tampered_body() {
    let body = b"hello";
    let sig = compute_signature(body, SECRET);

    assert!(!verify(body, &sig, "another_secret"));
    assert!(!verify(b"hellO", &sig, SECRET));
}

#[test]
fn test_verify_returns_false_on_malformed_header() {
    let body = b"hello";

    assert!(!verify(body, "", SECRET));
    assert!(!verify(body, "   ", SECRET));
    assert!(!verify(body, "not base64 at all!!", SECRET));
    // Valid base64, wrong length for a SHA-256 MAC.
    assert!(!verify(body, "aGVsbG8=", SECRET));
}

#[test]
fn test_verify_rejects_whitespace_padded_signature() {
    let body = b"hello";
    let sig = compute_signature(body, SECRET);

    assert!(!verify(body, &format!(" {sig}"), SECRET));
    assert!(!verify(body, &format!("{sig}\n"), SECRET));
}

#[test]
fn test_compute_signature_matches_known_value() {
    // HMAC-SHA256("key", "The quick brown fox jumps over the lazy dog")
    let sig = compute_signature(b"The quick brown fox jumps over the lazy dog", "key");
    assert_eq!(sig, "97yD9DBThCSxMpjmqm+xQ+9NWaFJRhdZl0edvC0aPNg=");
}
