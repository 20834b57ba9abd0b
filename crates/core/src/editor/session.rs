//! Edit-session lifecycle for a single product working copy.
//!
//! The session exclusively owns the document for the duration of an edit.
//! Each typed method calls through the generic engine with a fixed path
//! and default-record literal, so call sites keep field-level meaning
//! while the engine stays generic. On submit, [`EditorSession::into_document`]
//! validates the copy and transfers ownership of the payload to the caller.

use std::collections::HashSet;

use serde_json::Value;

use crate::document::defaults;
use crate::document::model::UploadedFileDescriptor;
use crate::document::validate::{validate_product, DocumentValidationError};
use crate::mutation::keyed::{self, KeyGen, SpecTable};
use crate::mutation::path::PathError;
use crate::mutation::engine;

use super::sections::Section;

#[derive(Debug, Clone)]
pub struct EditorSession {
    doc: Value,
    keys: KeyGen,
    expanded: HashSet<Section>,
}

impl EditorSession {
    /// Fresh session over the default document literal.
    pub fn new_product() -> Self {
        Self::with_keygen(defaults::new_product(), KeyGen::new())
    }

    /// Session over an existing document (edit flow); the working copy is
    /// the caller's cached list row, not a re-fetch.
    pub fn from_document(doc: Value) -> Self {
        Self::with_keygen(doc, KeyGen::new())
    }

    /// Deterministic key generation for tests.
    pub fn with_keygen(doc: Value, keys: KeyGen) -> Self {
        let mut expanded = HashSet::new();
        expanded.insert(Section::Basic);
        Self { doc, keys, expanded }
    }

    pub fn document(&self) -> &Value {
        &self.doc
    }

    /// Whether this session edits an already-persisted document.
    pub fn is_existing(&self) -> bool {
        self.doc.get("_id").is_some()
    }

    pub fn get(&self, path: &str) -> Result<&Value, PathError> {
        engine::get(&self.doc, path)
    }

    /// Replace a scalar leaf (slug, product.name, media.video.title, …).
    pub fn set_field(&mut self, path: &str, value: Value) -> Result<(), PathError> {
        self.doc = engine::set(&self.doc, path, value)?;
        Ok(())
    }

    pub fn set_text(&mut self, path: &str, value: &str) -> Result<(), PathError> {
        self.set_field(path, Value::String(value.to_string()))
    }

    // -- array-of-records sections ------------------------------------------

    pub fn add_quick_spec(&mut self) -> Result<(), PathError> {
        self.append("product.quickSpecs", defaults::quick_spec())
    }

    pub fn add_document_link(&mut self) -> Result<(), PathError> {
        self.append("product.documents", defaults::document_link())
    }

    pub fn add_stat(&mut self) -> Result<(), PathError> {
        self.append("product.stats", defaults::stat())
    }

    pub fn add_main_feature(&mut self) -> Result<(), PathError> {
        self.append("features.mainFeatures", defaults::main_feature())
    }

    pub fn add_detailed_feature(&mut self) -> Result<(), PathError> {
        self.append("features.detailedFeatures", defaults::detailed_feature())
    }

    pub fn add_media_image(&mut self) -> Result<(), PathError> {
        self.append("media.images", defaults::media_image())
    }

    pub fn add_accessory(&mut self) -> Result<(), PathError> {
        let id = self.keys.next_id();
        self.append("accessories", defaults::accessory(id))
    }

    pub fn add_related_product(&mut self) -> Result<(), PathError> {
        self.append("relatedProducts", defaults::related_product())
    }

    pub fn add_case_study(&mut self) -> Result<(), PathError> {
        self.append("caseStudies", defaults::case_study())
    }

    pub fn add_faq(&mut self) -> Result<(), PathError> {
        self.append("faqs", defaults::faq())
    }

    pub fn add_industry(&mut self) -> Result<(), PathError> {
        self.append("industries", defaults::industry())
    }

    /// Set one field of the record at `path[index]`; out-of-bounds is a
    /// no-op, matching the engine contract.
    pub fn update_item(&mut self, path: &str, index: usize, field: &str, value: Value) -> Result<(), PathError> {
        self.doc = engine::update_item_field(&self.doc, path, index, field, value)?;
        Ok(())
    }

    pub fn remove_item(&mut self, path: &str, index: usize) -> Result<(), PathError> {
        self.doc = engine::remove_item(&self.doc, path, index)?;
        Ok(())
    }

    // -- per-row feature strings (accessories, industries) ------------------

    pub fn add_feature_string(&mut self, path: &str, index: usize) -> Result<(), PathError> {
        self.doc = engine::append_nested_string(&self.doc, path, index, "features")?;
        Ok(())
    }

    pub fn update_feature_string(
        &mut self,
        path: &str,
        index: usize,
        feature_index: usize,
        value: &str,
    ) -> Result<(), PathError> {
        self.doc = engine::update_nested_string(&self.doc, path, index, "features", feature_index, value)?;
        Ok(())
    }

    pub fn remove_feature_string(&mut self, path: &str, index: usize, feature_index: usize) -> Result<(), PathError> {
        self.doc = engine::remove_nested_string(&self.doc, path, index, "features", feature_index)?;
        Ok(())
    }

    // -- model list + keyed spec tables -------------------------------------

    pub fn add_model(&mut self) -> Result<(), PathError> {
        self.doc = keyed::add_model(&self.doc)?;
        Ok(())
    }

    pub fn update_model(&mut self, index: usize, name: &str) -> Result<(), PathError> {
        self.doc = keyed::update_model(&self.doc, index, name)?;
        Ok(())
    }

    /// Cascade-removes the model's technical and dimensional data with it.
    pub fn remove_model(&mut self, index: usize) -> Result<(), PathError> {
        self.doc = keyed::remove_model(&self.doc, index)?;
        Ok(())
    }

    /// Insert a fresh empty row and return its generated key.
    pub fn add_spec_field(&mut self, table: SpecTable, model: &str) -> Result<String, PathError> {
        let key = self.keys.next_key();
        self.doc = keyed::add_field(&self.doc, table, model, &key)?;
        Ok(key)
    }

    /// Full replace of one row; unchanged sibling values are re-sent by the
    /// caller alongside the edited one.
    pub fn update_spec_field(
        &mut self,
        table: SpecTable,
        model: &str,
        key: &str,
        name: &str,
        metric: &str,
        imperial: &str,
    ) -> Result<(), PathError> {
        self.doc = keyed::update_field(&self.doc, table, model, key, name, metric, imperial)?;
        Ok(())
    }

    pub fn remove_spec_field(&mut self, table: SpecTable, model: &str, key: &str) -> Result<(), PathError> {
        self.doc = keyed::remove_field(&self.doc, table, model, key)?;
        Ok(())
    }

    // -- upload wiring -------------------------------------------------------

    /// Write an upload's stored URL into the target leaf field. Called only
    /// after the upload resolved; a failed upload never touches the field.
    pub fn apply_upload(&mut self, path: &str, descriptor: &UploadedFileDescriptor) -> Result<(), PathError> {
        tracing::debug!(path, url = %descriptor.url, "applying upload result");
        self.set_text(path, &descriptor.url)
    }

    // -- section expansion ---------------------------------------------------

    pub fn toggle_section(&mut self, section: Section) {
        if !self.expanded.remove(&section) {
            self.expanded.insert(section);
        }
    }

    pub fn is_expanded(&self, section: Section) -> bool {
        self.expanded.contains(&section)
    }

    // -- submit --------------------------------------------------------------

    /// Validate the working copy; used to surface errors while keeping the
    /// session alive.
    pub fn validate(&self) -> Result<(), DocumentValidationError> {
        validate_product(&self.doc)
    }

    /// Validate and yield the outbound payload, consuming the session.
    pub fn into_document(self) -> Result<Value, DocumentValidationError> {
        validate_product(&self.doc)?;
        Ok(self.doc)
    }

    fn append(&mut self, path: &str, record: Value) -> Result<(), PathError> {
        self.doc = engine::append_item(&self.doc, path, record)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session() -> EditorSession {
        EditorSession::with_keygen(defaults::new_product(), KeyGen::with_seed(1_700_000_000_000))
    }

    #[test]
    fn add_two_quick_specs_remove_first_keeps_second_at_zero() {
        let mut s = session();
        s.add_quick_spec().unwrap();
        s.update_item("product.quickSpecs", 0, "label", json!("Torque")).unwrap();
        s.add_quick_spec().unwrap();
        s.update_item("product.quickSpecs", 1, "label", json!("Weight")).unwrap();
        s.remove_item("product.quickSpecs", 0).unwrap();

        let specs = s.get("product.quickSpecs").unwrap().as_array().unwrap().clone();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0]["label"], "Weight");
    }

    #[test]
    fn accessory_rows_get_distinct_ids() {
        let mut s = session();
        s.add_accessory().unwrap();
        s.add_accessory().unwrap();
        let accessories = s.get("accessories").unwrap().as_array().unwrap().clone();
        assert_ne!(accessories[0]["id"], accessories[1]["id"]);
    }

    #[test]
    fn spec_field_keys_stay_stable_across_edits() {
        let mut s = session();
        s.add_model().unwrap();
        s.update_model(0, "TSL-07").unwrap();
        let key = s.add_spec_field(SpecTable::Technical, "TSL-07").unwrap();
        s.update_spec_field(SpecTable::Technical, "TSL-07", &key, "Max Torque", "1,020 Nm", "752 ft-lb")
            .unwrap();

        let rows = s.get("technicalSpecifications.technicalData").unwrap()["TSL-07"]
            .as_object()
            .unwrap()
            .clone();
        assert!(rows.contains_key(&key));
        assert_eq!(rows[&key]["metric"], "1,020 Nm");
    }

    #[test]
    fn spec_field_keys_are_unique_across_tables_and_models() {
        let mut s = session();
        s.add_model().unwrap();
        s.update_model(0, "A").unwrap();
        s.add_model().unwrap();
        s.update_model(1, "B").unwrap();

        let mut keys = vec![
            s.add_spec_field(SpecTable::Technical, "A").unwrap(),
            s.add_spec_field(SpecTable::Technical, "B").unwrap(),
            s.add_spec_field(SpecTable::Dimensional, "A").unwrap(),
            s.add_spec_field(SpecTable::Dimensional, "B").unwrap(),
        ];
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 4);
    }

    #[test]
    fn removing_model_never_leaves_orphaned_tables() {
        let mut s = session();
        s.add_model().unwrap();
        s.update_model(0, "M").unwrap();
        s.add_spec_field(SpecTable::Technical, "M").unwrap();
        s.add_spec_field(SpecTable::Dimensional, "M").unwrap();
        s.remove_model(0).unwrap();

        let doc = s.document();
        assert_eq!(doc["technicalSpecifications"]["models"], json!([]));
        assert!(doc["technicalSpecifications"]["technicalData"]
            .as_object()
            .unwrap()
            .is_empty());
        assert!(doc["technicalSpecifications"]["dimensionalData"]
            .as_object()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn apply_upload_writes_url_to_target_leaf() {
        let mut s = session();
        let descriptor = UploadedFileDescriptor {
            url: "https://cdn.example.com/hero.jpg".to_string(),
            size: 1024,
            mimetype: "image/jpeg".to_string(),
            originalname: "hero.jpg".to_string(),
        };
        s.apply_upload("product.heroImage", &descriptor).unwrap();
        assert_eq!(s.get("product.heroImage").unwrap(), "https://cdn.example.com/hero.jpg");
    }

    #[test]
    fn sections_toggle_and_basic_starts_expanded() {
        let mut s = session();
        assert!(s.is_expanded(Section::Basic));
        assert!(!s.is_expanded(Section::Faqs));
        s.toggle_section(Section::Faqs);
        assert!(s.is_expanded(Section::Faqs));
        s.toggle_section(Section::Faqs);
        assert!(!s.is_expanded(Section::Faqs));
    }

    #[test]
    fn into_document_refuses_incomplete_copy() {
        let s = session();
        assert!(s.into_document().is_err());
    }
}
