//! HTTP gateway to the catalog backend.
//!
//! Wraps every outbound endpoint, injects the bearer token from the
//! session store, unwraps the `{success, data}` envelope, and normalizes
//! failures into [`ClientError`]. No timeouts and no retries are
//! configured here; in-flight requests resolve or reject on the network
//! stack's terms.

use async_trait::async_trait;
use reqwest::{multipart, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use catalog_core::{CategoryDocument, CategoryUpdate, NewCategory, ProductDocument, UploadedFileDescriptor};

use crate::error::{ClientError, ClientResult};
use crate::session::{AuthUser, SessionStore};
use crate::upload::FileBlob;

/// `POST /users/login` response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthUser,
}

/// Standard `{success, data}` wrapper on collection and upload endpoints.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    #[allow(dead_code)]
    success: bool,
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Everything the managers and the upload adapter need from the backend.
/// Object-safe so tests can substitute an in-memory implementation.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse>;
    async fn register(&self, name: &str, email: &str, password: &str) -> ClientResult<()>;
    async fn me(&self) -> ClientResult<AuthUser>;

    /// Active categories only — feeds the product editor's drop-down.
    async fn active_categories(&self) -> ClientResult<Vec<CategoryDocument>>;
    /// All categories, disabled included — feeds the category manager list.
    async fn all_categories(&self) -> ClientResult<Vec<CategoryDocument>>;
    async fn create_category(&self, new: &NewCategory) -> ClientResult<()>;
    async fn update_category(&self, id: &str, update: &CategoryUpdate) -> ClientResult<()>;
    async fn disable_category(&self, id: &str) -> ClientResult<()>;
    async fn enable_category(&self, id: &str) -> ClientResult<()>;

    async fn products(&self) -> ClientResult<Vec<ProductDocument>>;
    async fn create_product(&self, doc: &Value) -> ClientResult<()>;
    async fn update_product(&self, id: &str, doc: &Value) -> ClientResult<()>;
    async fn disable_product(&self, id: &str) -> ClientResult<()>;
    async fn enable_product(&self, id: &str) -> ClientResult<()>;

    async fn upload(&self, blob: &FileBlob) -> ClientResult<UploadedFileDescriptor>;
}

/// Concrete gateway over `reqwest`.
#[derive(Debug, Clone)]
pub struct Gateway {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl Gateway {
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn check(&self, resp: Response) -> ClientResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        // Non-2xx responses carry {message}; anything else is transport-level.
        let body: ErrorBody = resp
            .json()
            .await
            .map_err(|err| ClientError::Transport(format!("unparseable error body: {err}")))?;
        tracing::error!(status = status.as_u16(), message = %body.message, "backend request failed");
        Err(ClientError::from_status(status.as_u16(), body.message))
    }

    /// Endpoints that answer with the raw document (auth endpoints).
    async fn parse_raw<T: DeserializeOwned>(&self, resp: Response) -> ClientResult<T> {
        let resp = self.check(resp).await?;
        resp.json::<T>()
            .await
            .map_err(|err| ClientError::Transport(format!("unparseable response body: {err}")))
    }

    /// Endpoints that answer with the `{success, data}` envelope.
    async fn parse_enveloped<T: DeserializeOwned>(&self, resp: Response) -> ClientResult<T> {
        let envelope: Envelope<T> = self.parse_raw(resp).await?;
        Ok(envelope.data)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: reqwest::Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> ClientResult<Response> {
        let mut req = self.authorize(self.http.request(method, self.url(endpoint)));
        if let Some(body) = body {
            req = req.json(body);
        }
        Ok(req.send().await?)
    }

    /// Mutation endpoints whose response body we do not consume; managers
    /// re-fetch the collection after success.
    async fn send_and_discard<B: Serialize + ?Sized>(
        &self,
        method: reqwest::Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> ClientResult<()> {
        let resp = self.send_json(method, endpoint, body).await?;
        self.check(resp).await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogBackend for Gateway {
    async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = serde_json::json!({ "email": email, "password": password });
        let resp = self
            .send_json(reqwest::Method::POST, "/users/login", Some(&body))
            .await?;
        self.parse_raw(resp).await
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> ClientResult<()> {
        let body = serde_json::json!({ "name": name, "email": email, "password": password });
        self.send_and_discard(reqwest::Method::POST, "/users", Some(&body)).await
    }

    async fn me(&self) -> ClientResult<AuthUser> {
        let resp = self
            .send_json::<Value>(reqwest::Method::GET, "/users/me", None)
            .await?;
        self.parse_raw(resp).await
    }

    async fn active_categories(&self) -> ClientResult<Vec<CategoryDocument>> {
        let resp = self
            .send_json::<Value>(reqwest::Method::GET, "/categories", None)
            .await?;
        self.parse_enveloped(resp).await
    }

    async fn all_categories(&self) -> ClientResult<Vec<CategoryDocument>> {
        let resp = self
            .send_json::<Value>(reqwest::Method::GET, "/categories/admin/all", None)
            .await?;
        self.parse_enveloped(resp).await
    }

    async fn create_category(&self, new: &NewCategory) -> ClientResult<()> {
        self.send_and_discard(reqwest::Method::POST, "/categories", Some(new)).await
    }

    async fn update_category(&self, id: &str, update: &CategoryUpdate) -> ClientResult<()> {
        self.send_and_discard(reqwest::Method::PUT, &format!("/categories/{id}"), Some(update))
            .await
    }

    /// Soft-disable, despite the verb.
    async fn disable_category(&self, id: &str) -> ClientResult<()> {
        self.send_and_discard::<Value>(reqwest::Method::DELETE, &format!("/categories/{id}"), None)
            .await
    }

    async fn enable_category(&self, id: &str) -> ClientResult<()> {
        self.send_and_discard::<Value>(reqwest::Method::PATCH, &format!("/categories/{id}/enable"), None)
            .await
    }

    async fn products(&self) -> ClientResult<Vec<ProductDocument>> {
        let resp = self
            .send_json::<Value>(reqwest::Method::GET, "/products", None)
            .await?;
        self.parse_enveloped(resp).await
    }

    async fn create_product(&self, doc: &Value) -> ClientResult<()> {
        self.send_and_discard(reqwest::Method::POST, "/products", Some(doc)).await
    }

    /// Full-document replace.
    async fn update_product(&self, id: &str, doc: &Value) -> ClientResult<()> {
        self.send_and_discard(reqwest::Method::PUT, &format!("/products/{id}"), Some(doc))
            .await
    }

    async fn disable_product(&self, id: &str) -> ClientResult<()> {
        self.send_and_discard::<Value>(reqwest::Method::PATCH, &format!("/products/{id}/disable"), None)
            .await
    }

    async fn enable_product(&self, id: &str) -> ClientResult<()> {
        self.send_and_discard::<Value>(reqwest::Method::PATCH, &format!("/products/{id}/enable"), None)
            .await
    }

    async fn upload(&self, blob: &FileBlob) -> ClientResult<UploadedFileDescriptor> {
        let part = multipart::Part::bytes(blob.bytes.clone())
            .file_name(blob.originalname.clone())
            .mime_str(&blob.mimetype)
            .map_err(|err| ClientError::Transport(format!("invalid mime type: {err}")))?;
        let form = multipart::Form::new().part("image", part);

        let req = self.authorize(self.http.post(self.url("/upload"))).multipart(form);
        let resp = req.send().await?;
        self.parse_enveloped(resp).await
    }
}
