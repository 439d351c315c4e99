//! Turns a snapshot into the text shown under the form.

use crate::consts::LOADING_TEXT;
use crate::state::Snapshot;

/// Loading text while busy (web shell only), else the pretty-printed result,
/// else nothing.
pub fn render(snapshot: &Snapshot) -> String {
    if snapshot.shell.has_busy_flag() && snapshot.is_busy() {
        return LOADING_TEXT.to_string();
    }
    match &snapshot.result {
        Some(result) => pretty(&result.display_value()),
        None => String::new(),
    }
}

/// JSON with 2-space indentation.
pub fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
