//! Category list/detail manager.

use std::sync::Arc;

use catalog_core::document::validate::validate_new_category;
use catalog_core::{CategoryDocument, CategoryUpdate, CountryLang, NewCategory};

use crate::gateway::CatalogBackend;

use super::{ConfirmPrompt, Phase};

/// The three editable fields of the category form. On edit, `url` and
/// `country_lang` are shown but immutable; only the title is sent.
#[derive(Debug, Clone, Default)]
pub struct CategoryForm {
    pub url: String,
    pub country_lang: CountryLang,
    pub title: String,
}

impl CategoryForm {
    fn from_document(doc: &CategoryDocument) -> Self {
        Self {
            url: doc.url.clone(),
            country_lang: doc.country_lang,
            title: doc.title.clone(),
        }
    }
}

enum State {
    Listing,
    Editing { form: CategoryForm, editing_id: Option<String> },
    Submitting { form: CategoryForm, editing_id: Option<String> },
}

pub struct CategoryManager {
    backend: Arc<dyn CatalogBackend>,
    state: State,
    categories: Vec<CategoryDocument>,
    list_loading: bool,
    error: Option<String>,
    notice: Option<String>,
    /// Deep-link target resolved once the first fetch completes.
    pending_edit_target: Option<String>,
    open_form_on_load: bool,
}

impl CategoryManager {
    pub fn new(backend: Arc<dyn CatalogBackend>) -> Self {
        Self {
            backend,
            state: State::Listing,
            categories: Vec::new(),
            list_loading: false,
            error: None,
            notice: None,
            pending_edit_target: None,
            open_form_on_load: false,
        }
    }

    /// Deep link straight into editing `id` once the collection loads.
    pub fn with_edit_target(backend: Arc<dyn CatalogBackend>, id: impl Into<String>) -> Self {
        let mut manager = Self::new(backend);
        manager.pending_edit_target = Some(id.into());
        manager
    }

    /// Deep link straight into the create form.
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

    pub fn categories(&self) -> &[CategoryDocument] {
        &self.categories
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

    pub fn form(&self) -> Option<&CategoryForm> {
        match &self.state {
            State::Editing { form, .. } | State::Submitting { form, .. } => Some(form),
            State::Listing => None,
        }
    }

    /// Whether the open form edits an existing category (url/countryLang
    /// locked) rather than creating a new one.
    pub fn is_editing_existing(&self) -> bool {
        matches!(
            &self.state,
            State::Editing { editing_id: Some(_), .. } | State::Submitting { editing_id: Some(_), .. }
        )
    }

    /// Fetch the full collection (disabled categories included).
    pub async fn refresh(&mut self) {
        self.list_loading = true;
        self.error = None;
        let result = self.backend.all_categories().await;
        self.list_loading = false;
        match result {
            Ok(list) => {
                tracing::info!(count = list.len(), "fetched categories");
                self.categories = list;
                self.resolve_deep_link();
            }
            Err(err) => self.error = Some(err.display_message()),
        }
    }

    fn resolve_deep_link(&mut self) {
        if self.open_form_on_load {
            self.open_form_on_load = false;
            self.open_create();
        }
        if let Some(id) = self.pending_edit_target.take() {
            // An absent id is an acceptable no-op: it may reference a
            // not-yet-loaded or disabled item.
            self.open_edit(&id);
        }
    }

    pub fn open_create(&mut self) {
        if matches!(self.state, State::Listing) {
            self.state = State::Editing {
                form: CategoryForm::default(),
                editing_id: None,
            };
        }
    }

    /// Edit the row from the last successful fetch; no single-row re-fetch.
    pub fn open_edit(&mut self, id: &str) {
        if !matches!(self.state, State::Listing) {
            return;
        }
        if let Some(doc) = self.categories.iter().find(|c| c.id == id) {
            self.state = State::Editing {
                form: CategoryForm::from_document(doc),
                editing_id: Some(doc.id.clone()),
            };
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        if let State::Editing { form, .. } = &mut self.state {
            form.title = title.into();
        }
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        if let State::Editing { form, editing_id: None } = &mut self.state {
            form.url = url.into();
        }
    }

    pub fn set_country_lang(&mut self, lang: CountryLang) {
        if let State::Editing { form, editing_id: None } = &mut self.state {
            form.country_lang = lang;
        }
    }

    /// Discard in-progress edits; no confirmation required.
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
        let State::Editing { form, editing_id } = std::mem::replace(&mut self.state, State::Listing)
        else {
            return;
        };

        if let Err(err) = validate_new_category(&form.url, &form.title) {
            self.error = Some(err.to_string());
            self.state = State::Editing { form, editing_id };
            return;
        }

        self.error = None;
        self.notice = None;
        self.state = State::Submitting {
            form: form.clone(),
            editing_id: editing_id.clone(),
        };

        let result = match editing_id.as_deref() {
            Some(id) => {
                let update = CategoryUpdate { title: form.title.clone() };
                self.backend.update_category(id, &update).await
            }
            None => {
                let new = NewCategory {
                    url: form.url.clone(),
                    country_lang: form.country_lang,
                    title: form.title.clone(),
                };
                self.backend.create_category(&new).await
            }
        };

        match result {
            Ok(()) => {
                self.notice = Some(if editing_id.is_some() {
                    "Category updated successfully!".to_string()
                } else {
                    "Category created successfully!".to_string()
                });
                self.state = State::Listing;
                self.refresh().await;
            }
            Err(err) => {
                self.error = Some(err.display_message());
                self.state = State::Editing { form, editing_id };
            }
        }
    }

    /// Flip the active flag. Disabling asks for confirmation first; a
    /// declined prompt issues no request at all.
    pub async fn toggle_active(&mut self, id: &str, confirm: &mut dyn ConfirmPrompt) {
        let Some(doc) = self.categories.iter().find(|c| c.id == id) else {
            self.error = Some("Category not found in the current list.".to_string());
            return;
        };
        let currently_active = doc.is_active;
        if currently_active && !confirm.confirm("Are you sure you want to disable this category?") {
            return;
        }

        self.error = None;
        self.notice = None;
        let result = if currently_active {
            self.backend.disable_category(id).await
        } else {
            self.backend.enable_category(id).await
        };

        match result {
            Ok(()) => {
                self.notice = Some(if currently_active {
                    "Category disabled successfully!".to_string()
                } else {
                    "Category enabled successfully!".to_string()
                });
                self.refresh().await;
            }
            Err(err) => self.error = Some(err.display_message()),
        }
    }
}
