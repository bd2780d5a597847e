//! Fuzz target for Bézier point-type tag strings.

#![no_main]

use annokit::geometry::CurvePointType;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(tags) = CurvePointType::parse_tags(data) {
        assert_eq!(CurvePointType::format_tags(&tags), data);
    }
});
