//! Client tests against a real HTTP server.
//!
//! Starts an in-process axum backend that mimics the REST resources and
//! the optional login endpoint, then drives the client through actual requests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use inventario_client::{
    authenticator_for, register, ApiClient, AuthMode, ClientConfig, ClientError, MemoryStorage,
    RecordClient, ResourceClient, SessionOptions, SessionStorage, SessionStore,
};
use inventario_core::auth::Registration;
use inventario_core::error::AuthError;
use inventario_core::navigation::{Navigation, Route};
use inventario_core::resource::Resource;
use inventario_core::types::Empresa;
use inventario_core::SESSION_STORAGE_KEY;

// =====================================================================
// Fake backend
// =====================================================================

const TOKEN: &str = "token-ana";

#[derive(Default)]
struct Backend {
    usuarios: Vec<Value>,
    empresas: Vec<Value>,
    roles: Vec<Value>,
    created: Vec<Value>,
    last_auth: Option<String>,
}

type Shared = Arc<Mutex<Backend>>;

fn seed() -> Backend {
    Backend {
        usuarios: vec![
            json!({
                "id": 1, "nombre_completo": "Ana", "email": "a@x.com", "estado": "Activo",
                "passwordHash": "p1", "roles": [{ "id": 1, "nombre": "Administrador" }]
            }),
            json!({
                "id": 2, "nombre_completo": "Beto", "email": "b@x.com", "estado": "Inactivo",
                "passwordHash": "p2", "roles": [{ "id": 3 }]
            }),
            json!({
                "id": 3, "nombre_completo": "Caro", "email": "c@x.com", "estado": "Activo",
                "passwordHash": "p3", "roles": [{ "id": 1 }]
            }),
            json!({
                "id": 4, "nombre_completo": "Dani", "email": "d@x.com", "estado": "Activo",
                "passwordHash": "p4"
            }),
        ],
        empresas: vec![json!({ "id": 1, "nombre": "Acme", "estado": "Activo" })],
        roles: vec![
            json!({ "id": 1, "nombre": "Administrador" }),
            json!({ "id": 3, "nombre": "Vendedor" }),
        ],
        ..Default::default()
    }
}

fn reason_for(backend: &Backend, email: &str, password: &str) -> Result<Value, &'static str> {
    let user = backend
        .usuarios
        .iter()
        .find(|u| u["email"] == email)
        .ok_or("user_not_found")?;
    if user["estado"] != "Activo" {
        return Err("account_inactive");
    }
    if user["passwordHash"] != password {
        return Err("invalid_credential");
    }
    Ok(user.clone())
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> impl IntoResponse {
    let backend = state.lock().unwrap();
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    match reason_for(&backend, email, password) {
        Ok(user) => (
            StatusCode::OK,
            Json(json!({ "access_token": TOKEN, "usuario": user })),
        ),
        Err(reason) => (StatusCode::UNAUTHORIZED, Json(json!({ "error": reason }))),
    }
}

fn record_auth(state: &Shared, headers: &HeaderMap) {
    state.lock().unwrap().last_auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
}

async fn list_usuarios(State(state): State<Shared>) -> Json<Value> {
    Json(Value::Array(state.lock().unwrap().usuarios.clone()))
}

async fn create_usuario(State(state): State<Shared>, Json(body): Json<Value>) -> impl IntoResponse {
    let mut backend = state.lock().unwrap();
    if backend.usuarios.iter().any(|u| u["email"] == body["email"]) {
        return (StatusCode::CONFLICT, Json(json!({ "message": "duplicate" })));
    }
    backend.created.push(body.clone());
    (StatusCode::CREATED, Json(body))
}

async fn list_empresas(State(state): State<Shared>, headers: HeaderMap) -> Json<Value> {
    record_auth(&state, &headers);
    Json(Value::Array(state.lock().unwrap().empresas.clone()))
}

async fn get_empresa(State(state): State<Shared>, Path(id): Path<i64>) -> impl IntoResponse {
    let backend = state.lock().unwrap();
    match backend.empresas.iter().find(|e| e["id"] == id) {
        Some(e) => (StatusCode::OK, Json(e.clone())).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn create_empresa(State(state): State<Shared>, Json(body): Json<Value>) -> impl IntoResponse {
    let mut backend = state.lock().unwrap();
    let mut record = body;
    record["id"] = json!(backend.empresas.len() as i64 + 1);
    backend.empresas.push(record.clone());
    (StatusCode::CREATED, Json(record))
}

/// Answers 200 with an empty body, like backends that skip the echo.
async fn update_empresa(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> StatusCode {
    let mut backend = state.lock().unwrap();
    if let Some(e) = backend.empresas.iter_mut().find(|e| e["id"] == id) {
        *e = body;
    }
    StatusCode::OK
}

async fn delete_empresa(State(state): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    state.lock().unwrap().empresas.retain(|e| e["id"] != id);
    StatusCode::NO_CONTENT
}

async fn list_roles(State(state): State<Shared>) -> Json<Value> {
    Json(Value::Array(state.lock().unwrap().roles.clone()))
}

struct TestServer {
    base_url: String,
    state: Shared,
}

async fn start_test_server() -> TestServer {
    let state: Shared = Arc::new(Mutex::new(seed()));

    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/usuarios", get(list_usuarios).post(create_usuario))
        .route("/empresas", get(list_empresas).post(create_empresa))
        .route(
            "/empresas/{id}",
            get(get_empresa).put(update_empresa).delete(delete_empresa),
        )
        .route("/roles", get(list_roles))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}", addr),
        state,
    }
}

fn api(server: &TestServer) -> ApiClient {
    ApiClient::with_client(reqwest::Client::new(), &server.base_url).unwrap()
}

fn session_store(server: &TestServer, mode: AuthMode, options: SessionOptions) -> (SessionStore, Arc<MemoryStorage>) {
    let api = api(server);
    let storage = Arc::new(MemoryStorage::new());
    let store = SessionStore::new(
        api.clone(),
        storage.clone(),
        Arc::from(authenticator_for(mode, api, "auth/login")),
        options,
    );
    (store, storage)
}

// =====================================================================
// Login
// =====================================================================

#[tokio::test]
async fn token_login_establishes_admin_session() {
    let server = start_test_server().await;
    let (store, storage) = session_store(&server, AuthMode::Token, SessionOptions::default());

    let outcome = store.login("a@x.com", "p1").await.unwrap();
    assert_eq!(outcome.session.token.as_deref(), Some(TOKEN));
    assert!(outcome.session.is_admin());
    assert_eq!(
        outcome.navigation,
        Navigation::Delayed {
            route: Route::Dashboard,
            delay: Duration::ZERO
        }
    );

    let menu = store.menu().await;
    assert_eq!(menu.items.len(), 10);
    assert!(menu.contains(Route::Usuarios));
    assert!(menu.contains(Route::Roles));
    assert!(storage.get(SESSION_STORAGE_KEY).unwrap().is_some());

    // Later requests carry the token.
    RecordClient::new(store.api().clone(), Resource::Empresas)
        .list()
        .await
        .unwrap();
    assert_eq!(
        server.state.lock().unwrap().last_auth.as_deref(),
        Some("Bearer token-ana")
    );
}

#[tokio::test]
async fn token_login_maps_backend_reasons() {
    let server = start_test_server().await;
    let (store, storage) = session_store(&server, AuthMode::Token, SessionOptions::default());

    let cases = [
        ("zz@x.com", "p1", AuthError::UserNotFound),
        ("b@x.com", "p2", AuthError::AccountInactive),
        ("a@x.com", "bad", AuthError::InvalidCredential),
    ];
    for (email, secret, expected) in cases {
        let err = store.login(email, secret).await.unwrap_err();
        assert_eq!(err.auth_reason(), Some(expected), "{email}");
    }

    // The backend accepts a user without roles; the client still refuses.
    let err = store.login("d@x.com", "p4").await.unwrap_err();
    assert_eq!(err.auth_reason(), Some(AuthError::NoRoleAssigned));

    assert!(!store.is_authenticated().await);
    assert_eq!(storage.get(SESSION_STORAGE_KEY).unwrap(), None);
}

#[tokio::test]
async fn legacy_scan_matches_token_login_outcomes() {
    let server = start_test_server().await;
    let (store, _) = session_store(&server, AuthMode::LegacyScan, SessionOptions::default());

    let cases = [
        ("zz@x.com", "p1", AuthError::UserNotFound),
        ("b@x.com", "p2", AuthError::AccountInactive),
        ("a@x.com", "bad", AuthError::InvalidCredential),
        ("d@x.com", "p4", AuthError::NoRoleAssigned),
    ];
    for (email, secret, expected) in cases {
        let err = store.login(email, secret).await.unwrap_err();
        assert_eq!(err.auth_reason(), Some(expected), "{email}");
    }

    let outcome = store.login("a@x.com", "p1").await.unwrap();
    assert!(outcome.session.token.is_none());
    assert!(outcome.session.is_admin());
}

#[tokio::test]
async fn default_config_logs_in_against_plain_resource_backend() {
    // Only the REST resources: no login endpoint.
    let app = Router::new().route(
        "/usuarios",
        get(|| async {
            Json(json!([{
                "id": 1, "nombre_completo": "Ana", "email": "a@x.com", "estado": "Activo",
                "passwordHash": "p1", "roles": [{ "id": 1, "nombre": "Administrador" }]
            }]))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let mut config = ClientConfig::default();
    config.api.base_url = format!("http://{}", addr);
    assert_eq!(config.auth_mode(), AuthMode::LegacyScan);

    let api = ApiClient::new(&config.api).unwrap();
    let store = SessionStore::new(
        api.clone(),
        Arc::new(MemoryStorage::new()),
        Arc::from(authenticator_for(config.auth_mode(), api, &config.auth.login_path)),
        SessionOptions::default(),
    );

    let outcome = store.login("a@x.com", "p1").await.unwrap();
    assert!(outcome.session.is_admin());
    assert_eq!(store.menu().await.items.len(), 10);
}

#[tokio::test]
async fn legacy_scan_tolerates_null_roles_and_malformed_records() {
    let server = start_test_server().await;
    {
        let mut backend = server.state.lock().unwrap();
        backend.usuarios.insert(0, json!({ "id": "x", "email": 7, "roles": "?" }));
        backend.usuarios.push(json!({
            "id": 5, "nombre_completo": "Nico", "email": "n@x.com", "estado": "Activo",
            "passwordHash": "p5", "roles": null
        }));
    }
    let (store, storage) = session_store(&server, AuthMode::LegacyScan, SessionOptions::default());

    let err = store.login("n@x.com", "p5").await.unwrap_err();
    assert_eq!(err.auth_reason(), Some(AuthError::NoRoleAssigned));
    let err = store.login("d@x.com", "p4").await.unwrap_err();
    assert_eq!(err.auth_reason(), Some(AuthError::NoRoleAssigned));
    assert_eq!(storage.get(SESSION_STORAGE_KEY).unwrap(), None);

    let outcome = store.login("a@x.com", "p1").await.unwrap();
    assert!(outcome.session.is_admin());
}

#[tokio::test]
async fn bare_role_reference_is_admin_only_when_resolved() {
    let server = start_test_server().await;

    let (plain, _) = session_store(&server, AuthMode::Token, SessionOptions::default());
    let session = plain.login("c@x.com", "p3").await.unwrap().session;
    assert!(!session.is_admin());
    assert_eq!(plain.menu().await.items.len(), 8);

    let (resolving, _) = session_store(
        &server,
        AuthMode::Token,
        SessionOptions {
            resolve_role_references: true,
            redirect_delay: Duration::from_secs(2),
        },
    );
    let outcome = resolving.login("c@x.com", "p3").await.unwrap();
    assert!(outcome.session.is_admin());
    assert_eq!(outcome.navigation.route(), Route::Dashboard);
    assert_eq!(resolving.menu().await.items.len(), 10);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_failure() {
    let api = ApiClient::with_client(reqwest::Client::new(), "http://127.0.0.1:9").unwrap();
    let store = SessionStore::new(
        api.clone(),
        Arc::new(MemoryStorage::new()),
        Arc::from(authenticator_for(AuthMode::Token, api, "auth/login")),
        SessionOptions::default(),
    );
    let err = store.login("a@x.com", "p1").await.unwrap_err();
    assert!(err.is_network_failure(), "{err}");
}

// =====================================================================
// Registration
// =====================================================================

#[tokio::test]
async fn register_posts_active_user_with_default_role() {
    let server = start_test_server().await;
    let api = api(&server);

    let nav = register(
        &api,
        Registration {
            nombre_completo: "Eva".into(),
            email: "e@x.com".into(),
            telefono: None,
            password: "p5".into(),
            empresa_id: None,
        },
        Duration::from_secs(2),
    )
    .await
    .unwrap();
    assert_eq!(
        nav,
        Navigation::Delayed {
            route: Route::Login,
            delay: Duration::from_secs(2)
        }
    );

    let created = server.state.lock().unwrap().created.clone();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["estado"], "Activo");
    assert_eq!(created[0]["roles"], json!([{ "id": 3 }]));
    assert_eq!(created[0]["passwordHash"], "p5");
}

#[tokio::test]
async fn duplicate_registration_surfaces_http_failure() {
    let server = start_test_server().await;
    let err = register(
        &api(&server),
        Registration {
            nombre_completo: "Ana".into(),
            email: "a@x.com".into(),
            telefono: None,
            password: "x".into(),
            empresa_id: None,
        },
        Duration::ZERO,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ClientError::Http { status: 409, .. }));
}

// =====================================================================
// Resources
// =====================================================================

#[tokio::test]
async fn record_client_crud() {
    let server = start_test_server().await;
    let empresas = RecordClient::new(api(&server), Resource::Empresas);

    let created = empresas
        .create(&json!({ "nombre": "Globex", "estado": "Activo" }))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created["id"], 2);

    assert_eq!(empresas.list().await.unwrap().len(), 2);
    assert_eq!(empresas.get(2).await.unwrap()["nombre"], "Globex");

    // 200 with an empty body is success without payload.
    let updated = empresas
        .update(2, &json!({ "id": 2, "nombre": "Globex SA" }))
        .await
        .unwrap();
    assert!(updated.is_none());

    empresas.delete(2).await.unwrap();
    let err = empresas.get(2).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Http { status: 404, ref status_text } if status_text == "Not Found"
    ));
}

#[tokio::test]
async fn typed_resource_client_decodes_models() {
    let server = start_test_server().await;
    let empresas = ResourceClient::<Empresa>::new(api(&server));

    let all = empresas.list().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].nombre, "Acme");
    assert!(all[0].estado.is_active());

    let one = empresas.get(1).await.unwrap();
    assert_eq!(one, all[0]);
}
