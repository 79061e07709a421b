#![no_main]
use libfuzzer_sys::fuzz_target;
use sepiabmp::*;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 20),
        ..Default::default()
    };
    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let Ok(decoded) = DecodeRequest::new(data).with_limits(&limits).decode() else {
        return;
    };

    let reencoded = encode_bmp(&decoded).expect("decoded bitmap failed to encode");
    let Ok(decoded2) = decode_bmp(&reencoded) else {
        panic!("re-encoded data failed to decode");
    };
    assert_eq!(decoded, decoded2, "roundtrip pixel mismatch");

    // Sepia never changes dimensions
    let toned = apply_sepia(&decoded, data.len() as u8).expect("sepia on non-empty bitmap");
    assert_eq!(toned.width(), decoded.width());
    assert_eq!(toned.height(), decoded.height());
});
