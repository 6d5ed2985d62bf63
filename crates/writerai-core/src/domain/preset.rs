//! AI backend preset catalog.
//!
//! A preset bundles the protocol kind and endpoint URL of one AI backend under
//! a display name.  The catalog is ordered: the first entry is the default
//! whenever a stored model name does not match anything.
//!
//! # Resolution rule
//!
//! [`PresetCatalog::resolve_index`] lower-cases the stored name, scans the
//! catalog in declaration order, and returns the first entry whose display
//! name matches case-insensitively.  A miss (including an empty name) yields
//! index `0`.  This is the only backend-selection rule in the extension.

use serde::Serialize;
use thiserror::Error;

/// Chat-completions endpoint shared by the Gemini presets.
pub const GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions";

/// Chat-completions endpoint of the DashScope compatible mode.
pub const QWEN_ENDPOINT: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1/chat/completions";

/// Wire protocol spoken by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKind {
    /// Message-list chat completions.
    Chat,
    /// Single-prompt text completions.
    Completion,
}

impl ApiKind {
    /// The string stored under the `api_type` settings key.
    pub fn as_str(self) -> &'static str {
        match self {
            ApiKind::Chat => "chat",
            ApiKind::Completion => "completion",
        }
    }
}

impl std::fmt::Display for ApiKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable AI backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendPreset {
    /// Name shown in the settings list and stored under `model`.
    pub display_name: String,
    /// Protocol kind stored under `api_type`.
    pub api_kind: ApiKind,
    /// Endpoint URL stored under `endpoint`.
    pub endpoint_url: String,
}

impl BackendPreset {
    pub fn new(display_name: &str, api_kind: ApiKind, endpoint_url: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            api_kind,
            endpoint_url: endpoint_url.to_string(),
        }
    }
}

/// Errors that can occur when building a catalog.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// A catalog needs at least one entry to serve as the default.
    #[error("preset catalog must contain at least one entry")]
    Empty,
}

/// Ordered, non-empty list of backend presets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetCatalog {
    presets: Vec<BackendPreset>,
}

impl PresetCatalog {
    /// Builds a catalog from an ordered list of presets.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Empty`] if `presets` is empty.
    pub fn new(presets: Vec<BackendPreset>) -> Result<Self, CatalogError> {
        if presets.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { presets })
    }

    /// The catalog shipped with the extension.
    pub fn builtin() -> Self {
        Self {
            presets: vec![
                BackendPreset::new("Gemini 3 Pro", ApiKind::Chat, GEMINI_ENDPOINT),
                BackendPreset::new("Gemini 3 Flash", ApiKind::Chat, GEMINI_ENDPOINT),
                BackendPreset::new("QWen", ApiKind::Chat, QWEN_ENDPOINT),
            ],
        }
    }

    /// Maps a stored model name to a catalog index.
    ///
    /// Total: never fails, falls back to `0` on a miss.
    pub fn resolve_index(&self, stored_model_name: &str) -> usize {
        let wanted = stored_model_name.to_lowercase();
        self.presets
            .iter()
            .position(|preset| preset.display_name.to_lowercase() == wanted)
            .unwrap_or(0)
    }

    /// Returns the preset at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.  Indices come from
    /// [`resolve_index`](Self::resolve_index) or from a list selection bounded
    /// by [`len`](Self::len), so an out-of-range value is a schema/catalog
    /// mismatch bug rather than a user error.
    pub fn describe_preset(&self, index: usize) -> &BackendPreset {
        assert!(
            index < self.presets.len(),
            "preset index {index} out of range for catalog of {}",
            self.presets.len()
        );
        &self.presets[index]
    }

    /// Display names in catalog order, used as list options.
    pub fn display_names(&self) -> Vec<String> {
        self.presets.iter().map(|p| p.display_name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Always `false`; a catalog cannot be constructed empty.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BackendPreset> {
        self.presets.iter()
    }
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
