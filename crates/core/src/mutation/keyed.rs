//! Keyed-map editing for the per-model technical and dimensional data
//! tables, plus the model list they hang off.
//!
//! Both tables are maps keyed model name → synthetic row key → row. Row
//! keys are minted by [`KeyGen`] and stay stable for the whole edit
//! session. Removing a model cascades into both tables in the same
//! document transition; no intermediate state ever has a removed model
//! with surviving table entries.

use serde_json::Value;

use super::engine;
use super::path::PathError;
use crate::document::defaults;

const MODELS: &str = "technicalSpecifications.models";
const TECHNICAL: &str = "technicalSpecifications.technicalData";
const DIMENSIONAL: &str = "technicalSpecifications.dimensionalData";

/// Which of the two per-model tables an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecTable {
    Technical,
    Dimensional,
}

impl SpecTable {
    fn path(self) -> &'static str {
        match self {
            SpecTable::Technical => TECHNICAL,
            SpecTable::Dimensional => DIMENSIONAL,
        }
    }
}

/// Synthetic row-key generator: timestamp-seeded, counter-suffixed.
///
/// Keys are unique within a session by construction; the counter makes
/// rapid successive adds collision-free where a bare timestamp would not
/// be. Seedable so tests get deterministic keys.
#[derive(Debug, Clone)]
pub struct KeyGen {
    base_millis: i64,
    counter: u64,
}

impl KeyGen {
    pub fn new() -> Self {
        Self::with_seed(chrono::Utc::now().timestamp_millis())
    }

    pub fn with_seed(base_millis: i64) -> Self {
        Self {
            base_millis,
            counter: 0,
        }
    }

    /// Next unique row key.
    pub fn next_key(&mut self) -> String {
        self.counter += 1;
        format!("{}-{}", self.base_millis, self.counter)
    }

    /// Numeric id for accessory rows.
    pub fn next_id(&mut self) -> i64 {
        self.counter += 1;
        self.base_millis + self.counter as i64
    }
}

impl Default for KeyGen {
    fn default() -> Self {
        Self::new()
    }
}

/// Append an empty model name to the models list.
pub fn add_model(doc: &Value) -> Result<Value, PathError> {
    engine::append_item(doc, MODELS, Value::String(String::new()))
}

/// Rename the model at `index`. Existing table entries stay keyed under
/// the old name; operators remove and re-add a model to re-key its data.
pub fn update_model(doc: &Value, index: usize, name: &str) -> Result<Value, PathError> {
    engine::update_string_item(doc, MODELS, index, name)
}

/// Remove the model at `index` and cascade-delete its entries in both
/// data tables. Out-of-bounds indices are no-ops.
pub fn remove_model(doc: &Value, index: usize) -> Result<Value, PathError> {
    let models = engine::get(doc, MODELS)?
        .as_array()
        .ok_or_else(|| PathError::NotAnArray(MODELS.to_string()))?;
    let Some(name) = models.get(index).and_then(Value::as_str).map(str::to_string) else {
        return Ok(doc.clone());
    };

    let mut next = engine::remove_item(doc, MODELS, index)?;
    for table in [TECHNICAL, DIMENSIONAL] {
        let entries = engine::get(&next, table)?;
        if entries.as_object().is_some_and(|m| m.contains_key(&name)) {
            let mut trimmed = entries.as_object().cloned().unwrap_or_default();
            trimmed.remove(&name);
            next = engine::set(&next, table, Value::Object(trimmed))?;
        }
    }
    Ok(next)
}

/// Insert a fresh empty row under `table[model][key]`, creating the
/// per-model map on first use.
pub fn add_field(doc: &Value, table: SpecTable, model: &str, key: &str) -> Result<Value, PathError> {
    with_model_map(doc, table, model, |rows| {
        rows.insert(key.to_string(), defaults::spec_row());
    })
}

/// Full replace of one row's three leaf values. The caller re-sends the
/// unchanged siblings alongside the edited one.
pub fn update_field(
    doc: &Value,
    table: SpecTable,
    model: &str,
    key: &str,
    name: &str,
    metric: &str,
    imperial: &str,
) -> Result<Value, PathError> {
    with_model_map(doc, table, model, |rows| {
        rows.insert(
            key.to_string(),
            serde_json::json!({ "name": name, "metric": metric, "imperial": imperial }),
        );
    })
}

/// Delete exactly one row; sibling rows and other models are untouched.
pub fn remove_field(doc: &Value, table: SpecTable, model: &str, key: &str) -> Result<Value, PathError> {
    with_model_map(doc, table, model, |rows| {
        rows.remove(key);
    })
}

fn with_model_map(
    doc: &Value,
    table: SpecTable,
    model: &str,
    f: impl FnOnce(&mut serde_json::Map<String, Value>),
) -> Result<Value, PathError> {
    let path = table.path();
    let mut tables = engine::get(doc, path)?
        .as_object()
        .cloned()
        .unwrap_or_default();
    let mut rows = tables
        .get(model)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    f(&mut rows);
    tables.insert(model.to_string(), Value::Object(rows));
    engine::set(doc, path, Value::Object(tables))
}
