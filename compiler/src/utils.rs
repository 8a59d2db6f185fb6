/// Quotes a name for use in diagnostics, e.g. `Point` becomes `"Point"`.
pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}
