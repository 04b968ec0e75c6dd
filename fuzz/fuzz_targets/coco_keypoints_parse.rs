//! Fuzz target for COCO-style pixel keypoint parsing.
//!
//! Run with:
//!   cargo +nightly fuzz run coco_keypoints_parse

#![no_main]

use framecheck::framing::classify;
use framecheck::pose::io_coco_json::from_coco_slice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(output) = from_coco_slice(data, Some((640, 480))) {
        let _ = classify(output.primary());
    }
});
