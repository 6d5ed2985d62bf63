//! Settings workflow: choose a backend preset and enter an API key.
//!
//! The dialog's list is seeded from the stored `model` through
//! [`PresetCatalog::resolve_index`], so it always opens with exactly one entry
//! selected.  On confirm the chosen preset is expanded into its three stored
//! keys and the API key is stored as typed, even when empty.

use serde_json::Value;
use writerai_core::domain::settings::{KEY_API_KEY, KEY_API_TYPE, KEY_ENDPOINT, KEY_MODEL};
use writerai_core::{DialogSchema, PresetCatalog, ResultMapping, SchemaError};

use super::collaborators::{read_string, Diagnostics, SettingsStore};

/// Window title of the settings dialog.
pub const SETTINGS_TITLE: &str = "WriterAI Settings";
/// Field id of the preset list.
pub const FIELD_MODEL: &str = "model";
/// Field id of the API key entry.
pub const FIELD_API_KEY: &str = "api_key";

/// Builds the settings dialog seeded from the current store contents.
///
/// # Errors
///
/// Returns [`SchemaError`] only if the catalog and the resolved index
/// disagree, which indicates a catalog bug.
pub fn settings_schema(
    store: &dyn SettingsStore,
    catalog: &PresetCatalog,
) -> Result<DialogSchema, SchemaError> {
    let stored_model = read_string(store, KEY_MODEL, "");
    let api_key = read_string(store, KEY_API_KEY, "");
    DialogSchema::builder(SETTINGS_TITLE)
        .select_field(
            FIELD_MODEL,
            "Model:",
            catalog.display_names(),
            Some(catalog.resolve_index(&stored_model)),
        )
        .masked_field(FIELD_API_KEY, "API key:", &api_key)
        .build()
}

/// Persists a confirmed settings dialog.
///
/// Each key is written independently: a failed write is recorded and the
/// remaining keys are still attempted.  Returns the keys whose write failed.
pub fn apply_settings(
    store: &dyn SettingsStore,
    catalog: &PresetCatalog,
    result: &ResultMapping,
    diag: &Diagnostics<'_>,
) -> Vec<&'static str> {
    let mut writes: Vec<(&'static str, Value)> = Vec::with_capacity(4);

    match result.selection(FIELD_MODEL) {
        Some(index) => {
            let preset = catalog.describe_preset(index);
            diag.debug(&format!("selected preset {}", preset.display_name));
            writes.push((KEY_MODEL, Value::from(preset.display_name.as_str())));
            writes.push((KEY_API_TYPE, Value::from(preset.api_kind.as_str())));
            writes.push((KEY_ENDPOINT, Value::from(preset.endpoint_url.as_str())));
        }
        None => diag.warn("settings confirmed without a preset selection; keeping stored preset"),
    }
    let api_key = result.text(FIELD_API_KEY).unwrap_or_default();
    writes.push((KEY_API_KEY, Value::from(api_key)));

    let mut failed = Vec::new();
    for (key, value) in writes {
        if let Err(e) = store.write(key, value) {
            diag.error(&format!("failed to save setting {key}: {e}"));
            failed.push(key);
        }
    }
    failed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::collaborators::{
        ConfigWriteError, MockDiagnosticSink, MockSettingsStore, Severity,
    };
    use mockall::predicate::eq;
    use writerai_core::{DialogSession, FieldValue};

    fn quiet_sink() -> MockDiagnosticSink {
        let mut sink = MockDiagnosticSink::new();
        sink.expect_record().return_const(());
        sink
    }

    fn confirmed(schema: DialogSchema, edit: impl FnOnce(&mut DialogSession)) -> ResultMapping {
        let mut session = DialogSession::new(schema);
        session.activate().unwrap();
        edit(&mut session);
        session.confirm().unwrap();
        session.result().unwrap()
    }

    #[test]
    fn test_settings_schema_seeds_from_store() {
        // Arrange
        let mut store = MockSettingsStore::new();
        store
            .expect_read()
            .with(eq(KEY_MODEL), mockall::predicate::always())
            .return_const(Value::from("qwen"));
        store
            .expect_read()
            .with(eq(KEY_API_KEY), mockall::predicate::always())
            .return_const(Value::from("sk-old"));

        // Act
        let schema = settings_schema(&store, &PresetCatalog::builtin()).unwrap();

        // Assert
        assert_eq!(schema.title(), SETTINGS_TITLE);
        assert_eq!(
            schema.field(FIELD_MODEL).unwrap().initial,
            FieldValue::Selection(Some(2))
        );
        assert_eq!(
            schema.field(FIELD_API_KEY).unwrap().initial,
            FieldValue::Text("sk-old".to_string())
        );
    }

    #[test]
    fn test_apply_settings_writes_four_keys() {
        // Arrange
        let catalog = PresetCatalog::builtin();
        let mut store = MockSettingsStore::new();
        store.expect_read().returning(|_, default| default);
        let schema = settings_schema(&store, &catalog).unwrap();
        let result = confirmed(schema, |s| {
            s.select(FIELD_MODEL, Some(1)).unwrap();
            s.set_text(FIELD_API_KEY, "sk-test").unwrap();
        });
        let preset = catalog.describe_preset(1).clone();
        store
            .expect_write()
            .with(eq(KEY_MODEL), eq(Value::from(preset.display_name.as_str())))
            .times(1)
            .returning(|_, _| Ok(()));
        store
            .expect_write()
            .with(eq(KEY_API_TYPE), eq(Value::from("chat")))
            .times(1)
            .returning(|_, _| Ok(()));
        store
            .expect_write()
            .with(eq(KEY_ENDPOINT), eq(Value::from(preset.endpoint_url.as_str())))
            .times(1)
            .returning(|_, _| Ok(()));
        store
            .expect_write()
            .with(eq(KEY_API_KEY), eq(Value::from("sk-test")))
            .times(1)
            .returning(|_, _| Ok(()));
        let sink = quiet_sink();

        // Act
        let failed = apply_settings(&store, &catalog, &result, &Diagnostics::new(&sink, false));

        // Assert
        assert!(failed.is_empty());
    }

    #[test]
    fn test_apply_settings_continues_after_failed_write() {
        // Arrange
        let catalog = PresetCatalog::builtin();
        let mut store = MockSettingsStore::new();
        store.expect_read().returning(|_, default| default);
        let schema = settings_schema(&store, &catalog).unwrap();
        let result = confirmed(schema, |_| {});
        store
            .expect_write()
            .with(eq(KEY_API_TYPE), mockall::predicate::always())
            .times(1)
            .returning(|_, _| {
                Err(ConfigWriteError::Write {
                    path: "writerai.json".to_string(),
                    source: std::io::Error::other("disk full"),
                })
            });
        store.expect_write().times(3).returning(|_, _| Ok(()));
        let mut sink = MockDiagnosticSink::new();
        sink.expect_record()
            .withf(|severity, message, _| {
                *severity == Severity::Error && message.contains(KEY_API_TYPE)
            })
            .times(1)
            .return_const(());
        sink.expect_record().return_const(());

        // Act
        let failed = apply_settings(&store, &catalog, &result, &Diagnostics::new(&sink, false));

        // Assert
        assert_eq!(failed, vec![KEY_API_TYPE]);
    }

    #[test]
    fn test_empty_api_key_is_still_persisted() {
        let catalog = PresetCatalog::builtin();
        let mut store = MockSettingsStore::new();
        store.expect_read().returning(|_, default| default);
        let schema = settings_schema(&store, &catalog).unwrap();
        let result = confirmed(schema, |_| {});
        store
            .expect_write()
            .with(eq(KEY_API_KEY), eq(Value::from("")))
            .times(1)
            .returning(|_, _| Ok(()));
        store.expect_write().times(3).returning(|_, _| Ok(()));
        let sink = quiet_sink();

        let failed = apply_settings(&store, &catalog, &result, &Diagnostics::new(&sink, false));

        assert!(failed.is_empty());
    }

    #[test]
    fn test_missing_selection_only_writes_api_key() {
        // Arrange
        let catalog = PresetCatalog::builtin();
        let mut store = MockSettingsStore::new();
        store.expect_read().returning(|_, default| default);
        let schema = settings_schema(&store, &catalog).unwrap();
        let result = confirmed(schema, |s| {
            s.select(FIELD_MODEL, None).unwrap();
            s.set_text(FIELD_API_KEY, "sk-only").unwrap();
        });
        store
            .expect_write()
            .with(eq(KEY_API_KEY), eq(Value::from("sk-only")))
            .times(1)
            .returning(|_, _| Ok(()));
        let mut sink = MockDiagnosticSink::new();
        sink.expect_record()
            .withf(|severity, _, _| *severity == Severity::Warning)
            .times(1)
            .return_const(());

        // Act
        let failed = apply_settings(&store, &catalog, &result, &Diagnostics::new(&sink, false));

        // Assert
        assert!(failed.is_empty());
    }
}
