use std::sync::Arc;

use httpmock::MockServer;
use serde_json::{Value, json};

use crm_admin::models::config::ClientConfig;
use crm_admin::repository::HttpRepository;
use crm_admin::session::InMemorySessionStore;

pub const CONTACT_ID: &str = "6f1c1a7e-4a5b-4c1e-9f0a-2b3c4d5e6f70";
pub const USER_ID: &str = "0b7e4f0e-2d7c-4a59-8d6e-3c1f2a9b8e11";

/// Adapter pointed at `<server>/api`, sharing `session` with the caller.
pub fn repository(server: &MockServer, session: Arc<InMemorySessionStore>) -> HttpRepository {
    let config = ClientConfig {
        api_url: server.url("/api"),
        timeout_secs: 5,
        session_file: None,
    };
    HttpRepository::new(&config, session).expect("valid config")
}

pub fn contact_json(id: &str, nombres: &str, apellidos: &str) -> Value {
    json!({
        "id": id,
        "nombres": nombres,
        "apellidos": apellidos,
        "nombreCompleto": format!("{nombres} {apellidos}"),
        "email": "ana@example.com",
        "telefono": "+57 300 000 0000",
        "estado": "cliente",
        "cedula": null,
        "ciudad": "Medellín",
        "pais": "Colombia",
        "notas": null,
        "createdAt": "2024-05-01T10:00:00",
        "updatedAt": "2024-05-02T11:30:00.250000"
    })
}

pub fn user_json() -> Value {
    json!({
        "id": USER_ID,
        "email": "admin@example.com",
        "nombres": "Admin",
        "apellidos": "Root",
        "nombreCompleto": "Admin Root",
        "isActive": true,
        "isSuperuser": true,
        "themePreference": "dark",
        "createdAt": "2024-01-15T08:00:00",
        "updatedAt": "2024-01-15T08:00:00"
    })
}
