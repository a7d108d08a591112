#![no_main]

use libfuzzer_sys::fuzz_target;
use renumber_core::filename::{apply_offset, normalize, parse, serialize, strip_flags};
use renumber_core::ordering::compare_names;
use std::cmp::Ordering;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let name: String = input.chars().take(64).collect();

    let Ok(parsed) = parse(&name) else {
        assert_eq!(normalize(&name, 4), name);
        return;
    };

    // Serializing drops padding but keeps everything else
    let reparsed = parse(&serialize(&parsed)).expect("serialized name parses");
    assert_eq!(reparsed.key(), parsed.key());

    let padded = normalize(&name, 8);
    assert_eq!(normalize(&padded, 8), padded);
    assert_eq!(parse(&padded).expect("padded name parses").key(), parsed.key());

    if let Ok(shifted) = apply_offset(&name, 1) {
        assert_eq!(compare_names(&name, &shifted), Ordering::Less);
    }

    if let Some(bare) = strip_flags(&name) {
        assert_eq!(parse(&bare).expect("stripped name parses").flag_count, 0);
    }
});
