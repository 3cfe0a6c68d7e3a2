//! Shared test constants

use std::time::Duration;

pub const TEST_USER_AGENT: &str = "extreg-tests";
pub const SHORT_TIMEOUT: Duration = Duration::from_millis(250);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const MAX_REDIRECTS: u32 = 5;

pub const VALID_SHA256: &str = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08";

/// Minimal valid registry document with the given extension ids
pub fn registry_json(ids: &[&str]) -> String {
    let extensions: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "id": id,
                "displayName": id,
                "description": format!("{} extension", id),
                "versions": [{
                    "version": "1.0.0",
                    "artifacts": {
                        "windows/amd64": {
                            "url": format!("https://github.com/{}/releases/download/v1.0.0/windows-amd64.zip", id),
                            "checksum": { "algorithm": "sha256", "value": VALID_SHA256 }
                        }
                    }
                }]
            })
        })
        .collect();
    serde_json::json!({ "extensions": extensions }).to_string()
}
