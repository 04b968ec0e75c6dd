//! Fuzz target for detector keypoint JSON parsing.
//!
//! Run with:
//!   cargo +nightly fuzz run keypoints_json_parse

#![no_main]

use framecheck::framing::classify;
use framecheck::pose::io_json::from_json_slice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    // Anything that parses must also classify without panicking.
    if let Ok(output) = from_json_slice(data) {
        let _ = classify(output.primary());
    }
});
