//! Fuzz target for building kernel geometry from parsed label documents.
//!
//! Runs parsing, validation and strict construction on arbitrary input.

#![no_main]

use annokit::label::io_json::fuzz_load_document;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let _ = fuzz_load_document(data);
});
