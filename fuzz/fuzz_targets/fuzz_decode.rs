#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic, whatever the input
    let _ = sepiabmp::ImageInfo::from_bytes(data);
    let limits = sepiabmp::Limits {
        max_pixels: Some(1 << 24),
        ..Default::default()
    };
    let _ = sepiabmp::DecodeRequest::new(data).with_limits(&limits).decode();
});
