//! Fuzz target for RLE decoding.
//!
//! The first two bytes pick the raster size; the rest are read as run
//! lengths. Successful decodes must re-encode to a sequence that decodes
//! to the same mask.

#![no_main]

use annokit::geometry::rle::{decode, encode};
use annokit::geometry::Rle;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let [w, h, runs @ ..] = data else {
        return;
    };
    let (width, height) = (usize::from(*w), usize::from(*h));
    let rle = Rle::new(runs.iter().map(|&r| u64::from(r)).collect());

    if let Ok(mask) = decode(&rle, width, height) {
        let again = decode(&encode(&mask), width, height).expect("re-encoded runs must decode");
        assert_eq!(mask, again);
    }
});
