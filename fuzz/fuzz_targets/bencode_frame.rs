#![no_main]

use libfuzzer_sys::fuzz_target;
use rns_admin::codec;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = codec::decode(data) {
        // A value that decoded must re-encode to something `decode`
        // accepts again, and fixed-size handle hex never panics on
        // arbitrary bytes pulled out of a decoded dict.
        if let Ok(reencoded) = codec::encode_to_vec(&value) {
            let _ = codec::decode(&reencoded);
        }
        if let Some(txid) = value.get("txid").and_then(codec::Value::as_str) {
            let _ = rns_admin::crypto::decode_handle(txid);
        }
    }
});
