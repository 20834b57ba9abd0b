//! Interactive shell: top-level command dispatch plus the product editor
//! sub-mode. The shell only parses input and renders output; all behavior
//! lives in the managers and the editor session.

use std::io::Write as _;
use std::sync::Arc;

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use catalog_client::{
    CatalogBackend, CategoryManager, ConfirmPrompt, FileBlob, Gateway, Phase, ProductManager,
    SessionStore, UploadAdapter,
};
use catalog_core::{CountryLang, Section, SpecTable};

use crate::config::AppConfig;

const TOP_HELP: &str = "\
Commands:
  login <email>                       authenticate against the backend
  register <name> <email>             create an operator account
  logout                              clear the session token
  whoami | status                     show session info
  categories                          list all categories (disabled included)
  categories add <url> <lang> <title> create a category
  categories edit <id> <title>        rename a category (url/lang are fixed)
  categories toggle <id>              enable/disable a category
  products                            list all products
  products create                     open the product editor on a new document
  products edit <id>                  open the product editor on a cached row
  products toggle <id>                enable/disable a product
  upload <file>                       upload a file and print its stored URL
  help                                show this help
  quit | exit                         leave the console";

const EDITOR_HELP: &str = "\
Editor commands:
  show [path]                         print the working copy (or one field)
  set <path> <value>                  set a scalar leaf, e.g. set product.name TSL Series
  add <kind>                          append a record: quickspec document stat mainfeature
                                      detailedfeature image accessory related casestudy faq industry
  item <path> <index> <field> <value> set one field of an array record
  rm <path> <index>                   remove an array record
  feat add <path> <index>             append a feature string (accessories/industries)
  feat set <path> <index> <fi> <value>
  feat rm <path> <index> <fi>
  model add | model set <i> <name> | model rm <i>
  tech add <model>                    new technical-data row (prints its key)
  tech set <model> <key> <name>|<metric>|<imperial>
  tech rm <model> <key>
  dim add|set|rm ...                  same for dimensional data
  upload <path> <file>                upload a file into a leaf field
  categories                          list active categories for the drop-down
  sections | toggle <section>         section expansion
  save                                validate and submit
  cancel                              discard the working copy";

/// Blocking yes/no prompt on stdin, used for disable/enable confirmation.
struct StdinConfirm;

impl ConfirmPrompt for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        let _ = std::io::stdout().flush();
        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y" | "yes")
    }
}

pub struct Shell {
    rl: DefaultEditor,
    backend: Arc<Gateway>,
    session: SessionStore,
    categories: CategoryManager,
    products: ProductManager,
    uploads: UploadAdapter,
}

impl Shell {
    pub fn new(gateway: Arc<Gateway>, session: SessionStore, config: AppConfig) -> Result<Self> {
        let backend: Arc<dyn CatalogBackend> = gateway.clone();
        Ok(Self {
            rl: DefaultEditor::new()?,
            backend: gateway,
            session,
            categories: CategoryManager::new(backend.clone()),
            products: ProductManager::new(backend),
            uploads: UploadAdapter::new(config.upload_policy()),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("catalog-console. Type 'help' for commands.");
        loop {
            let line = match self.rl.readline("catalog> ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            };
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }
            let _ = self.rl.add_history_entry(&line);

            let words: Vec<&str> = line.split_whitespace().collect();
            match words.as_slice() {
                ["quit"] | ["exit"] => break,
                ["help"] => println!("{TOP_HELP}"),
                ["login", email] => self.login(email).await,
                ["register", name, email] => self.register(name, email).await,
                ["logout"] => {
                    self.session.log_out();
                    println!("logged out");
                }
                ["whoami"] | ["status"] => self.status(),
                ["categories"] => {
                    self.categories.refresh().await;
                    self.render_category_feedback();
                    self.render_categories();
                }
                ["categories", "add", url, lang, ..] => {
                    let title = rest(&line, 4);
                    self.category_add(url, lang, &title).await;
                }
                ["categories", "edit", id, ..] => {
                    let title = rest(&line, 3);
                    self.category_edit(id, &title).await;
                }
                ["categories", "toggle", id] => {
                    let id = id.to_string();
                    self.ensure_categories().await;
                    self.categories.toggle_active(&id, &mut StdinConfirm).await;
                    self.render_category_feedback();
                }
                ["products"] => {
                    self.products.refresh().await;
                    self.render_product_feedback();
                    self.render_products();
                }
                ["products", "create"] => {
                    self.ensure_products().await;
                    self.products.open_create();
                    self.edit_product_loop().await?;
                }
                ["products", "edit", id] => {
                    let id = id.to_string();
                    self.ensure_products().await;
                    self.products.open_edit(&id);
                    if self.products.phase() == Phase::Editing {
                        self.edit_product_loop().await?;
                    } else {
                        println!("product `{id}` is not in the current list");
                    }
                }
                ["products", "toggle", id] => {
                    let id = id.to_string();
                    self.ensure_products().await;
                    self.products.toggle_active(&id, &mut StdinConfirm).await;
                    self.render_product_feedback();
                }
                ["upload", path] => self.upload_standalone(path).await,
                _ => println!("unknown command; type 'help'"),
            }
        }
        Ok(())
    }

    async fn login(&mut self, email: &str) {
        let password = match self.rl.readline("password: ") {
            Ok(p) => p,
            Err(_) => return,
        };
        match self.backend.login(email, password.trim()).await {
            Ok(login) => {
                println!("logged in as {} <{}>", login.user.name, login.user.email);
                self.session.log_in(login.token, login.user);
            }
            Err(err) => println!("login failed: {}", err.display_message()),
        }
    }

    async fn register(&mut self, name: &str, email: &str) {
        let password = match self.rl.readline("password: ") {
            Ok(p) => p,
            Err(_) => return,
        };
        match self.backend.register(name, email, password.trim()).await {
            Ok(()) => println!("account created; log in with `login {email}`"),
            Err(err) => println!("registration failed: {}", err.display_message()),
        }
    }

    fn status(&self) {
        match self.session.user() {
            Some(user) => println!("logged in as {} <{}>", user.name, user.email),
            None => println!("not logged in"),
        }
    }

    async fn ensure_categories(&mut self) {
        if self.categories.categories().is_empty() {
            self.categories.refresh().await;
        }
    }

    async fn ensure_products(&mut self) {
        if self.products.products().is_empty() {
            self.products.refresh().await;
        }
    }

    async fn category_add(&mut self, url: &str, lang: &str, title: &str) {
        let lang: CountryLang = match lang.parse() {
            Ok(lang) => lang,
            Err(err) => {
                println!("{err}");
                return;
            }
        };
        self.ensure_categories().await;
        self.categories.open_create();
        self.categories.set_url(url);
        self.categories.set_country_lang(lang);
        self.categories.set_title(title);
        self.categories.submit().await;
        self.render_category_feedback();
        if self.categories.phase() == Phase::Editing {
            self.categories.cancel();
        } else {
            self.render_categories();
        }
    }

    async fn category_edit(&mut self, id: &str, title: &str) {
        self.ensure_categories().await;
        self.categories.open_edit(id);
        if self.categories.phase() != Phase::Editing {
            println!("category `{id}` is not in the current list");
            return;
        }
        self.categories.set_title(title);
        self.categories.submit().await;
        self.render_category_feedback();
        if self.categories.phase() == Phase::Editing {
            self.categories.cancel();
        } else {
            self.render_categories();
        }
    }

    fn render_category_feedback(&self) {
        if let Some(err) = self.categories.error() {
            println!("error: {err}");
        }
        if let Some(notice) = self.categories.notice() {
            println!("{notice}");
        }
    }

    fn render_product_feedback(&self) {
        if let Some(err) = self.products.error() {
            println!("error: {err}");
        }
        if let Some(notice) = self.products.notice() {
            println!("{notice}");
        }
    }

    fn render_categories(&self) {
        let categories = self.categories.categories();
        if categories.is_empty() {
            println!("no categories");
            return;
        }
        println!("{:<26} {:<22} {:<9} {:<8} title", "id", "url", "lang", "status");
        for cat in categories {
            println!(
                "{:<26} {:<22} {:<9} {:<8} {}",
                cat.id,
                cat.url,
                cat.country_lang,
                if cat.is_active { "active" } else { "disabled" },
                cat.title
            );
        }
    }

    fn render_products(&self) {
        let products = self.products.products();
        if products.is_empty() {
            println!("no products");
            return;
        }
        println!("{:<26} {:<40} {:<9} {:<8} name", "id", "slug", "lang", "status");
        for doc in products {
            println!(
                "{:<26} {:<40} {:<9} {:<8} {}",
                doc.id.as_deref().unwrap_or("-"),
                doc.slug,
                doc.country_lang,
                if doc.is_active { "active" } else { "disabled" },
                doc.product.name
            );
        }
    }

    async fn upload_standalone(&mut self, path: &str) {
        let blob = match FileBlob::from_path(std::path::Path::new(path)) {
            Ok(blob) => blob,
            Err(err) => {
                println!("cannot read `{path}`: {err}");
                return;
            }
        };
        if let Some(preview) = self.uploads.preview(&blob) {
            println!("preview: {} bytes as data URL ({} chars)", blob.size(), preview.len());
        }
        match self.uploads.submit(self.backend.as_ref(), &blob).await {
            Ok(descriptor) => {
                println!("uploaded: {}", descriptor.url);
                println!("  size: {:.2} KB", descriptor.size as f64 / 1024.0);
                println!("  type: {}", descriptor.mimetype);
            }
            Err(err) => println!("upload failed: {}", err.display_message()),
        }
    }

    /// Product editor sub-mode; returns when the operator saves or cancels.
    async fn edit_product_loop(&mut self) -> Result<()> {
        println!("product editor; 'help' for commands, 'save' or 'cancel' to leave");
        loop {
            if self.products.phase() != Phase::Editing {
                return Ok(());
            }
            let line = match self.rl.readline("product> ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    self.products.cancel();
                    return Ok(());
                }
                Err(err) => return Err(err.into()),
            };
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }
            let _ = self.rl.add_history_entry(&line);

            if line == "save" {
                self.products.submit().await;
                self.render_product_feedback();
                if self.products.phase() == Phase::Listing {
                    self.render_products();
                    return Ok(());
                }
                continue;
            }
            if line == "cancel" {
                self.products.cancel();
                return Ok(());
            }
            if line == "categories" {
                let options = self.products.category_options().await;
                for cat in options {
                    println!("{:<26} {} ({})", cat.id, cat.title, cat.country_lang);
                }
                continue;
            }
            if let Err(message) = self.dispatch_editor_command(&line).await {
                println!("{message}");
            }
        }
    }

    async fn dispatch_editor_command(&mut self, line: &str) -> std::result::Result<(), String> {
        let words: Vec<&str> = line.split_whitespace().collect();

        // upload needs the adapter and backend, so it cannot borrow the
        // session across the await; resolve the descriptor first.
        if let ["upload", target_path, file] = words.as_slice() {
            let blob = FileBlob::from_path(std::path::Path::new(file))
                .map_err(|err| format!("cannot read `{file}`: {err}"))?;
            let descriptor = self
                .uploads
                .submit(self.backend.as_ref(), &blob)
                .await
                .map_err(|err| err.display_message())?;
            let session = self.products.session_mut().ok_or("no open editor")?;
            session
                .apply_upload(target_path, &descriptor)
                .map_err(|err| err.to_string())?;
            println!("uploaded into {target_path}: {}", descriptor.url);
            return Ok(());
        }

        let session = self.products.session_mut().ok_or("no open editor")?;
        match words.as_slice() {
            ["help"] => println!("{EDITOR_HELP}"),
            ["show"] => println!("{}", serde_json::to_string_pretty(session.document()).unwrap_or_default()),
            ["show", path] => {
                let value = session.get(path).map_err(|err| err.to_string())?;
                println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
            }
            ["set", path, ..] => {
                let value = rest(line, 2);
                match value.as_str() {
                    "true" => session.set_field(path, serde_json::Value::Bool(true)),
                    "false" => session.set_field(path, serde_json::Value::Bool(false)),
                    _ => session.set_text(path, &value),
                }
                .map_err(|err| err.to_string())?;
            }
            ["add", kind] => add_record(session, kind)?,
            ["item", path, index, field, ..] => {
                let index = parse_index(index)?;
                let value = rest(line, 4);
                session
                    .update_item(path, index, field, serde_json::Value::String(value))
                    .map_err(|err| err.to_string())?;
            }
            ["rm", path, index] => {
                let index = parse_index(index)?;
                session.remove_item(path, index).map_err(|err| err.to_string())?;
            }
            ["feat", "add", path, index] => {
                session
                    .add_feature_string(path, parse_index(index)?)
                    .map_err(|err| err.to_string())?;
            }
            ["feat", "set", path, index, fi, ..] => {
                let value = rest(line, 5);
                session
                    .update_feature_string(path, parse_index(index)?, parse_index(fi)?, &value)
                    .map_err(|err| err.to_string())?;
            }
            ["feat", "rm", path, index, fi] => {
                session
                    .remove_feature_string(path, parse_index(index)?, parse_index(fi)?)
                    .map_err(|err| err.to_string())?;
            }
            ["model", "add"] => session.add_model().map_err(|err| err.to_string())?,
            ["model", "set", index, ..] => {
                let name = rest(line, 3);
                session
                    .update_model(parse_index(index)?, &name)
                    .map_err(|err| err.to_string())?;
            }
            ["model", "rm", index] => {
                session.remove_model(parse_index(index)?).map_err(|err| err.to_string())?;
            }
            ["tech", sub, rest_words @ ..] => spec_command(session, SpecTable::Technical, sub, rest_words, line)?,
            ["dim", sub, rest_words @ ..] => spec_command(session, SpecTable::Dimensional, sub, rest_words, line)?,
            ["sections"] => {
                for section in Section::ALL {
                    let marker = if session.is_expanded(section) { "▼" } else { "▶" };
                    println!("{marker} {section}");
                }
            }
            ["toggle", section] => {
                let section: Section = section.parse()?;
                session.toggle_section(section);
            }
            _ => return Err("unknown editor command; type 'help'".to_string()),
        }
        Ok(())
    }
}

fn add_record(session: &mut catalog_core::EditorSession, kind: &str) -> std::result::Result<(), String> {
    let result = match kind {
        "quickspec" => session.add_quick_spec(),
        "document" => session.add_document_link(),
        "stat" => session.add_stat(),
        "mainfeature" => session.add_main_feature(),
        "detailedfeature" => session.add_detailed_feature(),
        "image" => session.add_media_image(),
        "accessory" => session.add_accessory(),
        "related" => session.add_related_product(),
        "casestudy" => session.add_case_study(),
        "faq" => session.add_faq(),
        "industry" => session.add_industry(),
        other => return Err(format!("unknown record kind `{other}`")),
    };
    result.map_err(|err| err.to_string())
}

fn spec_command(
    session: &mut catalog_core::EditorSession,
    table: SpecTable,
    sub: &str,
    words: &[&str],
    line: &str,
) -> std::result::Result<(), String> {
    match (sub, words) {
        ("add", [model]) => {
            let key = session.add_spec_field(table, model).map_err(|err| err.to_string())?;
            println!("added row `{key}`");
        }
        ("set", [model, key, ..]) => {
            let value = rest(line, 4);
            let mut parts = value.splitn(3, '|').map(str::trim);
            let name = parts.next().unwrap_or_default();
            let metric = parts.next().unwrap_or_default();
            let imperial = parts.next().unwrap_or_default();
            session
                .update_spec_field(table, model, key, name, metric, imperial)
                .map_err(|err| err.to_string())?;
        }
        ("rm", [model, key]) => {
            session
                .remove_spec_field(table, model, key)
                .map_err(|err| err.to_string())?;
        }
        _ => return Err("usage: tech|dim add <model> | set <model> <key> <name>|<metric>|<imperial> | rm <model> <key>".to_string()),
    }
    Ok(())
}

fn parse_index(raw: &str) -> std::result::Result<usize, String> {
    raw.parse().map_err(|_| format!("`{raw}` is not an index"))
}

/// Remainder of `line` after its first `skip` whitespace-separated tokens,
/// preserving internal spacing of the value.
fn rest(line: &str, skip: usize) -> String {
    let mut remainder = line.trim_start();
    for _ in 0..skip {
        match remainder.find(char::is_whitespace) {
            Some(pos) => remainder = remainder[pos..].trim_start(),
            None => return String::new(),
        }
    }
    remainder.to_string()
}
