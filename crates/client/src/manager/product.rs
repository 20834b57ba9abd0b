//! Product list/detail manager. The editing payload is a full
//! [`EditorSession`] over the nested product document.

use std::sync::Arc;

use catalog_core::{CategoryDocument, EditorSession, ProductDocument};

use crate::gateway::CatalogBackend;

use super::{ConfirmPrompt, Phase};

enum State {
    Listing,
    Editing { session: EditorSession, editing_id: Option<String> },
    Submitting { session: EditorSession, editing_id: Option<String> },
}

pub struct ProductManager {
    backend: Arc<dyn CatalogBackend>,
    state: State,
    products: Vec<ProductDocument>,
    list_loading: bool,
    error: Option<String>,
    notice: Option<String>,
    pending_edit_target: Option<String>,
    open_form_on_load: bool,
}

impl ProductManager {
    pub fn new(backend: Arc<dyn CatalogBackend>) -> Self {
        Self {
            backend,
            state: State::Listing,
            products: Vec::new(),
            list_loading: false,
            error: None,
            notice: None,
            pending_edit_target: None,
            open_form_on_load: false,
        }
    }

    pub fn with_edit_target(backend: Arc<dyn CatalogBackend>, id: impl Into<String>) -> Self {
        let mut manager = Self::new(backend);
        manager.pending_edit_target = Some(id.into());
        manager
    }

    pub fn with_open_form(backend: Arc<dyn CatalogBackend>) -> Self {
        let mut manager = Self::new(backend);
        manager.open_form_on_load = true;
        manager
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::Listing => Phase::Listing,
            State::Editing { .. } => Phase::Editing,
            State::Submitting { .. } => Phase::Submitting,
        }
    }

    pub fn products(&self) -> &[ProductDocument] {
        &self.products
    }

    pub fn list_loading(&self) -> bool {
        self.list_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn session(&self) -> Option<&EditorSession> {
        match &self.state {
            State::Editing { session, .. } | State::Submitting { session, .. } => Some(session),
            State::Listing => None,
        }
    }

    /// Mutable access to the open edit session; `None` outside `Editing`
    /// (the working copy is frozen while a submit is in flight).
    pub fn session_mut(&mut self) -> Option<&mut EditorSession> {
        match &mut self.state {
            State::Editing { session, .. } => Some(session),
            _ => None,
        }
    }

    pub async fn refresh(&mut self) {
        self.list_loading = true;
        self.error = None;
        let result = self.backend.products().await;
        self.list_loading = false;
        match result {
            Ok(list) => {
                tracing::info!(count = list.len(), "fetched products");
                self.products = list;
                self.resolve_deep_link();
            }
            Err(err) => self.error = Some(err.display_message()),
        }
    }

    /// Active categories for the editor's category drop-down; failures are
    /// logged but non-fatal (the original form edits on regardless).
    pub async fn category_options(&mut self) -> Vec<CategoryDocument> {
        match self.backend.active_categories().await {
            Ok(list) => list,
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch categories for drop-down");
                Vec::new()
            }
        }
    }

    fn resolve_deep_link(&mut self) {
        if self.open_form_on_load {
            self.open_form_on_load = false;
            self.open_create();
        }
        if let Some(id) = self.pending_edit_target.take() {
            self.open_edit(&id);
        }
    }

    pub fn open_create(&mut self) {
        if matches!(self.state, State::Listing) {
            self.state = State::Editing {
                session: EditorSession::new_product(),
                editing_id: None,
            };
        }
    }

    /// Edit the cached row from the last fetch; its serialized form becomes
    /// the session's working copy.
    pub fn open_edit(&mut self, id: &str) {
        if !matches!(self.state, State::Listing) {
            return;
        }
        let Some(doc) = self.products.iter().find(|p| p.id.as_deref() == Some(id)) else {
            return;
        };
        match serde_json::to_value(doc) {
            Ok(value) => {
                self.state = State::Editing {
                    session: EditorSession::from_document(value),
                    editing_id: Some(id.to_string()),
                };
            }
            Err(err) => self.error = Some(format!("Failed to open product: {err}")),
        }
    }

    pub fn cancel(&mut self) {
        if matches!(self.state, State::Editing { .. }) {
            self.state = State::Listing;
            self.error = None;
            self.notice = None;
        }
    }

    pub async fn submit(&mut self) {
        if matches!(self.state, State::Submitting { .. }) {
            return;
        }
        let State::Editing { session, editing_id } = std::mem::replace(&mut self.state, State::Listing)
        else {
            return;
        };

        if let Err(err) = session.validate() {
            self.error = Some(err.to_string());
            self.state = State::Editing { session, editing_id };
            return;
        }

        self.error = None;
        self.notice = None;
        let payload = session.document().clone();
        let target = editing_id.clone();
        self.state = State::Submitting { session, editing_id };

        let result = match target.as_deref() {
            Some(id) => self.backend.update_product(id, &payload).await,
            None => self.backend.create_product(&payload).await,
        };

        match result {
            Ok(()) => {
                self.notice = Some(if target.is_some() {
                    "Product updated successfully!".to_string()
                } else {
                    "Product created successfully!".to_string()
                });
                self.state = State::Listing;
                self.refresh().await;
            }
            Err(err) => {
                self.error = Some(err.display_message());
                if let State::Submitting { session, editing_id } =
                    std::mem::replace(&mut self.state, State::Listing)
                {
                    self.state = State::Editing { session, editing_id };
                }
            }
        }
    }

    /// Flip the active flag; both directions prompt for confirmation.
    pub async fn toggle_active(&mut self, id: &str, confirm: &mut dyn ConfirmPrompt) {
        let Some(doc) = self.products.iter().find(|p| p.id.as_deref() == Some(id)) else {
            self.error = Some("Product not found in the current list.".to_string());
            return;
        };
        let currently_active = doc.is_active;
        let prompt = if currently_active {
            "Are you sure you want to disable this product?"
        } else {
            "Are you sure you want to enable this product?"
        };
        if !confirm.confirm(prompt) {
            return;
        }

        self.error = None;
        self.notice = None;
        let result = if currently_active {
            self.backend.disable_product(id).await
        } else {
            self.backend.enable_product(id).await
        };

        match result {
            Ok(()) => {
                self.notice = Some(if currently_active {
                    "Product disabled successfully!".to_string()
                } else {
                    "Product enabled successfully!".to_string()
                });
                self.refresh().await;
            }
            Err(err) => self.error = Some(err.display_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{MockBackend, ScriptedConfirm};
    use super::*;
    use crate::error::ClientError;
    use serde_json::json;

    fn fill_required(session: &mut EditorSession, slug: &str) {
        for (path, value) in [
            ("slug", slug),
            ("product.id", slug),
            ("product.name", "TSL Series"),
            ("product.category", "Wrenches"),
            ("product.type", "Square Drive"),
            ("product.tagline", "tagline"),
            ("product.description", "description"),
        ] {
            session.set_text(path, value).unwrap();
        }
    }

    #[tokio::test]
    async fn create_product_with_quick_specs_end_to_end() {
        let backend = Arc::new(MockBackend::default());
        let mut m = ProductManager::new(backend.clone());
        m.refresh().await;

        m.open_create();
        {
            let session = m.session_mut().unwrap();
            fill_required(session, "tsl-series");
            session.add_quick_spec().unwrap();
            session
                .update_item("product.quickSpecs", 0, "label", json!("Max Torque"))
                .unwrap();
            session.add_quick_spec().unwrap();
            session
                .update_item("product.quickSpecs", 1, "label", json!("Weight"))
                .unwrap();
            session.remove_item("product.quickSpecs", 0).unwrap();
        }
        m.submit().await;

        assert_eq!(m.phase(), Phase::Listing);
        assert_eq!(m.products().len(), 1);
        let specs = &m.products()[0].product.quick_specs;
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].label, "Weight");
    }

    #[tokio::test]
    async fn incomplete_product_fails_validation_before_network() {
        let backend = Arc::new(MockBackend::default());
        let mut m = ProductManager::new(backend.clone());
        m.refresh().await;
        let calls_before = backend.calls();

        m.open_create();
        m.submit().await;

        assert_eq!(m.phase(), Phase::Editing);
        assert!(m.error().unwrap().contains("required"));
        assert_eq!(backend.calls(), calls_before);
    }

    #[tokio::test]
    async fn submit_failure_preserves_working_copy() {
        let backend = Arc::new(MockBackend::default());
        let mut m = ProductManager::new(backend.clone());
        m.refresh().await;

        m.open_create();
        fill_required(m.session_mut().unwrap(), "tsl-series");
        backend.queue_failure(ClientError::Server {
            status: 500,
            message: "boom".to_string(),
        });
        m.submit().await;

        assert_eq!(m.phase(), Phase::Editing);
        assert_eq!(m.error(), Some("boom"));
        let doc = m.session().unwrap().document();
        assert_eq!(doc["slug"], "tsl-series");

        // operator retries and it goes through
        m.submit().await;
        assert_eq!(m.phase(), Phase::Listing);
        assert_eq!(m.products().len(), 1);
    }

    #[tokio::test]
    async fn edit_uses_cached_row_without_refetch() {
        let backend = Arc::new(MockBackend::default());
        backend.seed_product("p1", "tsl-series", true);
        let mut m = ProductManager::new(backend.clone());
        m.refresh().await;
        let calls_before = backend.calls();

        m.open_edit("p1");
        assert_eq!(m.phase(), Phase::Editing);
        assert_eq!(backend.calls(), calls_before, "no single-row re-fetch");
        assert!(m.session().unwrap().is_existing());

        m.session_mut()
            .unwrap()
            .set_text("product.tagline", "Updated tagline")
            .unwrap();
        m.submit().await;

        assert_eq!(m.products()[0].product.tagline, "Updated tagline");
        assert_eq!(m.products()[0].id.as_deref(), Some("p1"));
    }

    #[tokio::test]
    async fn both_toggle_directions_prompt() {
        let backend = Arc::new(MockBackend::default());
        backend.seed_product("p1", "tsl-series", true);
        let mut m = ProductManager::new(backend.clone());
        m.refresh().await;

        let mut declined = ScriptedConfirm::new([false]);
        m.toggle_active("p1", &mut declined).await;
        assert_eq!(declined.asked, 1);
        assert!(m.products()[0].is_active);

        let mut confirmed = ScriptedConfirm::new([true, true]);
        m.toggle_active("p1", &mut confirmed).await;
        assert!(!m.products()[0].is_active);
        m.toggle_active("p1", &mut confirmed).await;
        assert!(m.products()[0].is_active);
        assert_eq!(confirmed.asked, 2);
    }

    #[tokio::test]
    async fn deep_link_create_opens_fresh_session_after_fetch() {
        let backend = Arc::new(MockBackend::default());
        let mut m = ProductManager::with_open_form(backend.clone());
        m.refresh().await;

        assert_eq!(m.phase(), Phase::Editing);
        assert!(!m.session().unwrap().is_existing());
    }

    #[tokio::test]
    async fn deep_link_to_absent_product_stays_listing() {
        let backend = Arc::new(MockBackend::default());
        let mut m = ProductManager::with_edit_target(backend.clone(), "ghost");
        m.refresh().await;

        assert_eq!(m.phase(), Phase::Listing);
        assert!(m.error().is_none());
    }
}
