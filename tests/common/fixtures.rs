//! Wire-format fixtures matching what the ingestion service returns

use serde_json::{Value, json};

/// Progress endpoint body
pub fn status_json(total: u64, successes: u64, fails: u64, skips: u64, finished: bool) -> Value {
    json!({
        "fatal_server_error": false,
        "input_csv_error": false,
        "total": total,
        "successes": successes,
        "skips": skips,
        "fails": fails,
        "finished": finished,
    })
}

/// Progress body with one of the error flags raised
pub fn flagged_status_json(fatal: bool, input_csv: bool) -> Value {
    json!({
        "fatal_server_error": fatal,
        "input_csv_error": input_csv,
        "total": 5,
        "successes": 1,
        "skips": 0,
        "fails": 0,
        "finished": false,
    })
}

/// Positional result row: name, error, GUID, four unused columns, URL
pub fn result_row(name: &str, error: Option<&str>, url: Option<&str>) -> Value {
    json!([name, error, format!("guid-{}", name), null, null, null, null, url])
}

pub const ACCOUNT_UUID: &str = "2f1a1b6e-52c4-4fd1-9a43-0c55b1d2e7aa";
pub const API_KEY: &str = "0123456789abcdef0123456789abcdef";
