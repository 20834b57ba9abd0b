//! List/detail managers: one per entity type, each a small state machine
//! over `Listing`, `Editing` and `Submitting`.
//!
//! Managers catch every failure locally and surface a single message; no
//! error propagates past them, nothing is retried, and loading flags are
//! cleared on every exit path.

mod category;
mod product;

pub use category::{CategoryForm, CategoryManager};
pub use product::ProductManager;

/// Blocking confirmation before destructive-looking actions (disabling a
/// record). Implemented by the console over stdin and by tests as a
/// scripted sequence.
pub trait ConfirmPrompt {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Prompt that never blocks; useful for non-interactive callers.
pub struct AlwaysConfirm;

impl ConfirmPrompt for AlwaysConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// Display state of a manager, as seen by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Listing,
    Editing,
    Submitting,
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;

    use catalog_core::{
        CategoryDocument, CategoryUpdate, CountryLang, NewCategory, ProductDocument,
        UploadedFileDescriptor,
    };

    use crate::error::{ClientError, ClientResult};
    use crate::gateway::{CatalogBackend, LoginResponse};
    use crate::session::AuthUser;
    use crate::upload::FileBlob;

    use super::ConfirmPrompt;

    /// In-memory backend: every trait method logs itself and consumes a
    /// queued failure if one is pending.
    #[derive(Default)]
    pub struct MockBackend {
        pub categories: Mutex<Vec<CategoryDocument>>,
        pub products: Mutex<Vec<ProductDocument>>,
        log: Mutex<Vec<&'static str>>,
        failures: Mutex<VecDeque<ClientError>>,
        next_id: AtomicUsize,
    }

    impl MockBackend {
        pub fn calls(&self) -> usize {
            self.log.lock().unwrap().len()
        }

        pub fn log(&self) -> Vec<&'static str> {
            self.log.lock().unwrap().clone()
        }

        pub fn queue_failure(&self, err: ClientError) {
            self.failures.lock().unwrap().push_back(err);
        }

        pub fn seed_category(&self, id: &str, url: &str, title: &str, active: bool) {
            self.categories.lock().unwrap().push(CategoryDocument {
                id: id.to_string(),
                url: url.to_string(),
                country_lang: CountryLang::Default,
                title: title.to_string(),
                is_active: active,
                created_at: None,
            });
        }

        pub fn seed_product(&self, id: &str, slug: &str, active: bool) {
            let mut doc: ProductDocument =
                serde_json::from_value(catalog_core::document::defaults::new_product()).unwrap();
            doc.id = Some(id.to_string());
            doc.slug = slug.to_string();
            doc.is_active = active;
            doc.product.id = slug.to_string();
            doc.product.name = slug.to_uppercase();
            doc.product.category = "Wrenches".to_string();
            doc.product.product_type = "Square Drive".to_string();
            doc.product.tagline = "tagline".to_string();
            doc.product.description = "description".to_string();
            self.products.lock().unwrap().push(doc);
        }

        fn record(&self, name: &'static str) -> ClientResult<()> {
            self.log.lock().unwrap().push(name);
            match self.failures.lock().unwrap().pop_front() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }

        fn mint_id(&self, prefix: &str) -> String {
            let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            format!("{prefix}-{n}")
        }
    }

    #[async_trait]
    impl CatalogBackend for MockBackend {
        async fn login(&self, email: &str, _password: &str) -> ClientResult<LoginResponse> {
            self.record("login")?;
            Ok(LoginResponse {
                token: "mock-token".to_string(),
                user: AuthUser {
                    id: Some("u1".to_string()),
                    name: "Operator".to_string(),
                    email: email.to_string(),
                },
            })
        }

        async fn register(&self, _name: &str, _email: &str, _password: &str) -> ClientResult<()> {
            self.record("register")
        }

        async fn me(&self) -> ClientResult<AuthUser> {
            self.record("me")?;
            Ok(AuthUser {
                id: Some("u1".to_string()),
                name: "Operator".to_string(),
                email: "op@example.com".to_string(),
            })
        }

        async fn active_categories(&self) -> ClientResult<Vec<CategoryDocument>> {
            self.record("active_categories")?;
            Ok(self
                .categories
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.is_active)
                .cloned()
                .collect())
        }

        async fn all_categories(&self) -> ClientResult<Vec<CategoryDocument>> {
            self.record("all_categories")?;
            Ok(self.categories.lock().unwrap().clone())
        }

        async fn create_category(&self, new: &NewCategory) -> ClientResult<()> {
            self.record("create_category")?;
            let id = self.mint_id("cat");
            self.categories.lock().unwrap().push(CategoryDocument {
                id,
                url: new.url.clone(),
                country_lang: new.country_lang,
                title: new.title.clone(),
                is_active: true,
                created_at: None,
            });
            Ok(())
        }

        async fn update_category(&self, id: &str, update: &CategoryUpdate) -> ClientResult<()> {
            self.record("update_category")?;
            let mut categories = self.categories.lock().unwrap();
            match categories.iter_mut().find(|c| c.id == id) {
                Some(cat) => {
                    cat.title = update.title.clone();
                    Ok(())
                }
                None => Err(ClientError::NotFound(format!("category {id}"))),
            }
        }

        async fn disable_category(&self, id: &str) -> ClientResult<()> {
            self.record("disable_category")?;
            self.set_category_active(id, false)
        }

        async fn enable_category(&self, id: &str) -> ClientResult<()> {
            self.record("enable_category")?;
            self.set_category_active(id, true)
        }

        async fn products(&self) -> ClientResult<Vec<ProductDocument>> {
            self.record("products")?;
            Ok(self.products.lock().unwrap().clone())
        }

        async fn create_product(&self, doc: &Value) -> ClientResult<()> {
            self.record("create_product")?;
            let mut parsed: ProductDocument = serde_json::from_value(doc.clone())
                .map_err(|err| ClientError::Server {
                    status: 400,
                    message: format!("invalid product: {err}"),
                })?;
            parsed.id = Some(self.mint_id("prod"));
            self.products.lock().unwrap().push(parsed);
            Ok(())
        }

        async fn update_product(&self, id: &str, doc: &Value) -> ClientResult<()> {
            self.record("update_product")?;
            let parsed: ProductDocument = serde_json::from_value(doc.clone())
                .map_err(|err| ClientError::Server {
                    status: 400,
                    message: format!("invalid product: {err}"),
                })?;
            let mut products = self.products.lock().unwrap();
            match products.iter_mut().find(|p| p.id.as_deref() == Some(id)) {
                Some(existing) => {
                    *existing = parsed;
                    existing.id = Some(id.to_string());
                    Ok(())
                }
                None => Err(ClientError::NotFound(format!("product {id}"))),
            }
        }

        async fn disable_product(&self, id: &str) -> ClientResult<()> {
            self.record("disable_product")?;
            self.set_product_active(id, false)
        }

        async fn enable_product(&self, id: &str) -> ClientResult<()> {
            self.record("enable_product")?;
            self.set_product_active(id, true)
        }

        async fn upload(&self, blob: &FileBlob) -> ClientResult<UploadedFileDescriptor> {
            self.record("upload")?;
            Ok(UploadedFileDescriptor {
                url: format!("https://cdn.example.com/{}", blob.originalname),
                size: blob.size(),
                mimetype: blob.mimetype.clone(),
                originalname: blob.originalname.clone(),
            })
        }
    }

    impl MockBackend {
        fn set_category_active(&self, id: &str, active: bool) -> ClientResult<()> {
            let mut categories = self.categories.lock().unwrap();
            match categories.iter_mut().find(|c| c.id == id) {
                Some(cat) => {
                    cat.is_active = active;
                    Ok(())
                }
                None => Err(ClientError::NotFound(format!("category {id}"))),
            }
        }

        fn set_product_active(&self, id: &str, active: bool) -> ClientResult<()> {
            let mut products = self.products.lock().unwrap();
            match products.iter_mut().find(|p| p.id.as_deref() == Some(id)) {
                Some(product) => {
                    product.is_active = active;
                    Ok(())
                }
                None => Err(ClientError::NotFound(format!("product {id}"))),
            }
        }
    }

    /// Confirmation prompt answering from a fixed script.
    pub struct ScriptedConfirm {
        answers: VecDeque<bool>,
        pub asked: usize,
    }

    impl ScriptedConfirm {
        pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
            Self {
                answers: answers.into_iter().collect(),
                asked: 0,
            }
        }
    }

    impl ConfirmPrompt for ScriptedConfirm {
        fn confirm(&mut self, _prompt: &str) -> bool {
            self.asked += 1;
            self.answers.pop_front().unwrap_or(false)
        }
    }
}
