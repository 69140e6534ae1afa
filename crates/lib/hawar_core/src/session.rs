//! Per-request session identifiers.
//!
//! A fresh id is generated for every outbound webhook call, so the receiving
//! workflow cannot correlate messages of one conversation by it.

use chrono::Utc;
use rand::Rng;

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate `session_<epoch-ms>_<9 base-36 chars>`.
pub fn generate_session_id() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!("session_{}_{}", Utc::now().timestamp_millis(), suffix)
}
