//! Fuzz target for pixel triplet normalization with arbitrary image sizes.
//!
//! Run with:
//!   cargo +nightly fuzz run coco_triplets

#![no_main]

use framecheck::pose::io_coco_json::fuzz_triplets_to_set;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let (dims, rest) = data.split_at(8);
    let width = u32::from_le_bytes([dims[0], dims[1], dims[2], dims[3]]);
    let height = u32::from_le_bytes([dims[4], dims[5], dims[6], dims[7]]);

    let values: Vec<f64> = rest
        .chunks_exact(8)
        .map(|chunk| {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(chunk);
            f64::from_le_bytes(raw)
        })
        .collect();

    let _ = fuzz_triplets_to_set(&values, width, height);
});
