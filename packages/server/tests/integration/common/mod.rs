
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use common::storage::filesystem::FilesystemObjectStore;
use common::storage::{ObjectKey, ObjectStore, StorageError};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tempfile::TempDir;

use inventory_server::config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, ImageConfig, ServerConfig,
};
use inventory_server::controllers::{
    CatalogController, MaterialController, ProjectController, SignUpController, ToolController,
    UserController,
};
use inventory_server::services::{
    CategoryService, ImageService, MaintenanceNoteService, MaterialService, ProjectService,
    ProviderService, ToolService, UserService,
};
use inventory_server::state::AppState;
use inventory_server::validation::{
    CategoryValidator, MaintenanceNoteValidator, MaterialValidator, ProfileValidator,
    ProjectImageValidator, ProjectValidator, ProviderValidator, SignInValidator,
    SignUpValidator, ToolValidator,
};

use memory::{
    MemCategories, MemMaterials, MemNotes, MemProjectImages, MemProjects, MemProviders,
    MemTools, MemUsers, MemoryDb,
};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const PASSWORD: &str = "correct horse";

pub mod routes {
    pub const SIGN_UP: &str = "/api/v1/auth/sign-up";
    pub const SIGN_IN: &str = "/api/v1/auth/sign-in";
    pub const ME: &str = "/api/v1/auth/me";
    pub const TOOLS: &str = "/api/v1/tools";
    pub const MATERIALS: &str = "/api/v1/materials";
    pub const CATEGORIES: &str = "/api/v1/categories";
    pub const PROVIDERS: &str = "/api/v1/providers";
    pub const USERS: &str = "/api/v1/users";
    pub const PROJECTS: &str = "/api/v1/projects";

    pub fn tool(id: i64) -> String {
        format!("/api/v1/tools/{id}")
    }

    pub fn tool_notes(id: i64) -> String {
        format!("/api/v1/tools/{id}/notes")
    }

    pub fn tool_note(id: i64, note_id: i64) -> String {
        format!("/api/v1/tools/{id}/notes/{note_id}")
    }

    pub fn material(id: i64) -> String {
        format!("/api/v1/materials/{id}")
    }

    pub fn category(id: i64) -> String {
        format!("/api/v1/categories/{id}")
    }

    pub fn provider(id: i64) -> String {
        format!("/api/v1/providers/{id}")
    }

    pub fn user(id: i64) -> String {
        format!("/api/v1/users/{id}")
    }

    pub fn project(id: i64) -> String {
        format!("/api/v1/projects/{id}")
    }

    pub fn project_images(id: i64) -> String {
        format!("/api/v1/projects/{id}/images")
    }

    pub fn project_image(id: i64, image_id: i64) -> String {
        format!("/api/v1/projects/{id}/images/{image_id}")
    }
}

/// Object store whose every write is refused.
pub struct RejectingStore;

#[async_trait]
impl ObjectStore for RejectingStore {
    async fn put(
        &self,
        key: &ObjectKey,
        _data: &[u8],
        _content_type: &str,
    ) -> Result<String, StorageError> {
        Err(StorageError::Rejected {
            status: 503,
            key: key.to_string(),
        })
    }

    async fn delete(&self, _key: &ObjectKey) -> Result<bool, StorageError> {
        Ok(false)
    }

    async fn exists(&self, _key: &ObjectKey) -> Result<bool, StorageError> {
        Ok(false)
    }

    fn public_base_url(&self) -> &str {
        "https://media.invalid"
    }
}

/// A running test server.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: Arc<MemoryDb>,
    pub media_root: PathBuf,
    _dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// `Location` header, if any.
    pub location: Option<String>,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let location = res
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self {
            status,
            location,
            text,
            body,
        }
    }
}

/// Multipart form with text fields and an optional file part.
pub fn multipart(fields: &[(&str, &str)], file: Option<(&str, &str, &str, Vec<u8>)>) -> Form {
    let mut form = Form::new();
    for (name, value) in fields {
        form = form.text(name.to_string(), value.to_string());
    }
    if let Some((field, file_name, mime, bytes)) = file {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .expect("Failed to set MIME type");
        form = form.part(field.to_string(), part);
    }
    form
}

/// A few bytes with a PNG signature.
pub fn png_bytes() -> Vec<u8> {
    vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0]
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_store(None).await
    }

    /// Spawn with a custom object store instead of the temp-dir filesystem
    /// store.
    pub async fn spawn_with_store(store: Option<Arc<dyn ObjectStore>>) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let media_root = dir.path().join("media");
        let objects: Arc<dyn ObjectStore> = match store {
            Some(store) => store,
            None => Arc::new(
                FilesystemObjectStore::new(media_root.clone(), "/media", 10 * 1024 * 1024)
                    .await
                    .expect("Failed to open filesystem store"),
            ),
        };

        let auth = AuthConfig {
            jwt_secret: "test-secret-for-integration-tests".into(),
            token_ttl_hours: 1,
            admin_emails: vec![ADMIN_EMAIL.into()],
        };
        let images = ImageConfig {
            staging_dir: dir.path().join("staging"),
            max_bytes: 1024 * 1024,
        };
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig {
                url: "memory://".into(),
            },
            auth: auth.clone(),
            storage: common::config::ObjectStorageConfig::Filesystem(
                common::config::FilesystemConfig {
                    root: media_root.clone(),
                    public_base_url: "/media".into(),
                    max_object_size: 10 * 1024 * 1024,
                },
            ),
            images: images.clone(),
        };

        let db = MemoryDb::new();
        let image_service = Arc::new(ImageService::new(objects, images));
        let categories = Arc::new(CategoryService::new(Arc::new(MemCategories(db.clone()))));
        let providers = Arc::new(ProviderService::new(Arc::new(MemProviders(db.clone()))));
        let notes = Arc::new(MaintenanceNoteService::new(Arc::new(MemNotes(db.clone()))));
        let tools = Arc::new(ToolService::new(
            Arc::new(MemTools(db.clone())),
            notes.clone(),
            categories.clone(),
            providers.clone(),
        ));
        let materials = Arc::new(MaterialService::new(
            Arc::new(MemMaterials(db.clone())),
            categories.clone(),
            providers.clone(),
        ));
        let users = Arc::new(UserService::new(Arc::new(MemUsers(db.clone()))));
        let projects = Arc::new(ProjectService::new(
            Arc::new(MemProjects(db.clone())),
            Arc::new(MemProjectImages(db.clone())),
        ));

        let state = AppState {
            config: Arc::new(config),
            tools: Arc::new(ToolController::new(
                image_service.clone(),
                Arc::new(ToolValidator),
                categories.clone(),
                providers.clone(),
                tools,
                Arc::new(MaintenanceNoteValidator),
                notes,
            )),
            materials: Arc::new(MaterialController::new(
                Arc::new(MaterialValidator::new()),
                categories.clone(),
                providers.clone(),
                materials,
            )),
            catalog: Arc::new(CatalogController::new(
                Arc::new(CategoryValidator),
                categories,
                Arc::new(ProviderValidator),
                providers,
            )),
            users: Arc::new(UserController::new(
                users.clone(),
                image_service.clone(),
                Arc::new(ProfileValidator),
            )),
            sign_up: Arc::new(SignUpController::new(
                users,
                Arc::new(SignUpValidator),
                Arc::new(SignInValidator),
                auth,
            )),
            projects: Arc::new(ProjectController::new(
                projects,
                image_service,
                Arc::new(ProjectValidator),
                Arc::new(ProjectImageValidator),
            )),
        };

        let app = inventory_server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build HTTP client");

        Self {
            addr,
            client,
            db,
            media_root,
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn send(&self, req: reqwest::RequestBuilder, token: Option<&str>) -> TestResponse {
        let req = match token {
            Some(token) => req.header("Authorization", format!("Bearer {token}")),
            None => req,
        };
        let res = req.send().await.expect("Failed to send request");
        TestResponse::from_response(res).await
    }

    pub async fn get_with_token(&self, path: &str, token: &str) -> TestResponse {
        self.send(self.client.get(self.url(path)), Some(token)).await
    }

    pub async fn get_without_token(&self, path: &str) -> TestResponse {
        self.send(self.client.get(self.url(path)), None).await
    }

    pub async fn post_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        self.send(self.client.post(self.url(path)).json(body), Some(token))
            .await
    }

    pub async fn post_without_token(&self, path: &str, body: &Value) -> TestResponse {
        self.send(self.client.post(self.url(path)).json(body), None)
            .await
    }

    pub async fn put_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        self.send(self.client.put(self.url(path)).json(body), Some(token))
            .await
    }

    pub async fn delete_with_token(&self, path: &str, token: &str) -> TestResponse {
        self.send(self.client.delete(self.url(path)), Some(token))
            .await
    }

    pub async fn post_multipart(&self, path: &str, form: Form, token: &str) -> TestResponse {
        self.send(self.client.post(self.url(path)).multipart(form), Some(token))
            .await
    }

    pub async fn put_multipart(&self, path: &str, form: Form, token: &str) -> TestResponse {
        self.send(self.client.put(self.url(path)).multipart(form), Some(token))
            .await
    }

    /// Register an account and sign in, returning `(user id, token)`.
    pub async fn create_authenticated_user(&self, email: &str) -> (i64, String) {
        let reg = self
            .post_without_token(
                routes::SIGN_UP,
                &serde_json::json!({
                    "email": email,
                    "full_name": "Test User",
                    "password": PASSWORD,
                    "password_confirmation": PASSWORD,
                }),
            )
            .await;
        assert_eq!(reg.status, 201, "Sign-up failed: {}", reg.text);

        let res = self
            .post_without_token(
                routes::SIGN_IN,
                &serde_json::json!({"email": email, "password": PASSWORD}),
            )
            .await;
        assert_eq!(res.status, 200, "Sign-in failed: {}", res.text);

        let id = reg.body["id"].as_i64().expect("user id");
        let token = res.body["token"]
            .as_str()
            .expect("token")
            .to_string();
        (id, token)
    }

    /// Staff account token.
    pub async fn staff_token(&self) -> String {
        self.create_authenticated_user("staff@example.com").await.1
    }

    /// Seed category 3 ("Electrical") and provider 7 ("Acme Supply").
    pub fn seed_catalog(&self) {
        self.db.seed_category(3, "Electrical");
        self.db.seed_provider(7, "Acme Supply");
    }

    /// Number of files stored under `prefix/` in the media directory.
    pub fn stored_files(&self, prefix: &str) -> usize {
        std::fs::read_dir(self.media_root.join(prefix))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}
