#![no_main]

use cadastre_viewer::io::parse_feature_collection;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(features) = parse_feature_collection(text) {
            for feature in &features {
                let _ = feature.extent();
                let _ = feature.label();
            }
        }
    }
});
