#![no_main]

use libfuzzer_sys::fuzz_target;

use mhscheck_core::registry::AlgorithmRegistry;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Parsing arbitrary input must never panic; a parsed registry must
    // survive every filtering combination.
    if let Ok(registry) = AlgorithmRegistry::from_str(text) {
        for include_slow in [false, true] {
            for counts in [&[1usize][..], &[2, 4][..], &[][..]] {
                let selected = registry.filtered(include_slow, counts);
                assert!(selected.len() <= registry.len());
            }
        }
    }
});
