//! Fixture documents for scan tests.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fs;
use std::path::Path;

/// Embed a JSON payload the way bootstrap pages do: escaped inside `enqueue("...")`.
pub fn bootstrap_page(payload_json: &str) -> String {
    let escaped = payload_json.replace('\\', "\\\\").replace('"', "\\\"");
    format!(
        "<!doctype html><script>window.feature_gates_ready=1;</script>\
         <script>self.__boot.enqueue(\"{escaped}\");</script>"
    )
}

/// A HAR capture whose second response carries `body` base64-encoded.
pub fn har_capture(body: &str) -> String {
    serde_json::json!({
        "log": {
            "version": "1.2",
            "entries": [
                {
                    "request": { "url": "https://example.com/", "headers": [] },
                    "response": { "status": 200, "headers": [], "content": { "text": "<html></html>" } }
                },
                {
                    "request": { "url": "https://example.com/app", "headers": [] },
                    "response": {
                        "status": 200,
                        "headers": [],
                        "content": { "text": STANDARD.encode(body), "encoding": "base64" }
                    }
                }
            ]
        }
    })
    .to_string()
}

pub fn write(dir: &Path, name: &str, contents: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}
