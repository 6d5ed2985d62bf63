//! Persisted settings keys.
//!
//! The settings file is a flat JSON object.  These are the keys the extension
//! reads and writes; any other keys found in the file are preserved untouched
//! by the read-merge-write cycle.

/// File name of the settings store inside the per-user configuration directory.
pub const CONFIG_FILE_NAME: &str = "writerai.json";

/// Display name of the selected backend preset.
pub const KEY_MODEL: &str = "model";
/// Protocol kind of the selected preset (`"chat"`, `"completion"`).
pub const KEY_API_TYPE: &str = "api_type";
/// Endpoint URL of the selected preset.
pub const KEY_ENDPOINT: &str = "endpoint";
/// API key, stored in clear text.
pub const KEY_API_KEY: &str = "api_key";
/// Boolean-like flag enabling verbose diagnostics.
pub const KEY_DEBUG_LOGGING: &str = "debug_logging";

/// Strings accepted as `true` for boolean-like settings, compared case-insensitively.
const TRUTHY_VALUES: &[&str] = &["true", "1", "t", "y", "yes"];

/// Returns `true` if `raw` is one of the accepted truthy spellings.
///
/// Anything else, including the empty string, is `false`.
pub fn is_truthy_flag(raw: &str) -> bool {
    let normalized = raw.trim().to_lowercase();
    TRUTHY_VALUES.contains(&normalized.as_str())
}
