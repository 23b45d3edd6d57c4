#![no_main]

use libfuzzer_sys::fuzz_target;

use mhscheck_core::invocation::InvocationKey;
use mhscheck_core::error::HarnessError;
use mhscheck_runtime::invoker::parse_response;

fuzz_target!(|data: &[u8]| {
    let Ok(payload) = std::str::from_utf8(data) else {
        return;
    };

    let key = InvocationKey::new("fuzz", 1);
    match parse_response(&key, payload) {
        Ok(set) => {
            // Normalization is idempotent under re-serialization.
            let json = format!(
                "{{\"transversals\": {}}}",
                serde_json::to_string(&set).unwrap()
            );
            let reparsed = parse_response(&key, &json).unwrap();
            assert_eq!(set, reparsed);
        }
        Err(HarnessError::MalformedResponse { payload: raw, .. }) => {
            // The fatal error must carry the payload verbatim.
            assert_eq!(raw, payload);
        }
        Err(_) => unreachable!("parse_response only fails as MalformedResponse"),
    }
});
