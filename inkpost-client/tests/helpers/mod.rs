#![allow(dead_code)]

use fake::faker::internet::en::{FreeEmail, Username};
use fake::Fake;
use inkpost_client::resources::Resources;
use inkpost_client::storage::MemoryStore;
use inkpost_client::{ApiClient, Session, SessionStore};
use inkpost_common::domain::Role;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;
use wiremock::MockServer;

pub struct TestApp {
    pub server: MockServer,
    pub session: Arc<SessionStore>,
    pub api: ApiClient,
    pub resources: Resources,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let server = MockServer::start().await;
        let session = Arc::new(SessionStore::restore(Box::new(MemoryStore::new())));
        let api = ApiClient::new(&format!("{}/api", server.uri()), session.clone()).unwrap();
        let resources = Resources::new(api.clone());

        Self {
            server,
            session,
            api,
            resources,
        }
    }

    pub async fn spawn_logged_in() -> (Self, Session) {
        let app = Self::spawn().await;
        let session = fake_session();
        app.session.establish(session.clone()).unwrap();
        (app, session)
    }
}

pub fn fake_session() -> Session {
    Session {
        id: Uuid::new_v4(),
        token: format!("tok-{}", Uuid::new_v4()),
        username: Username().fake(),
        email: FreeEmail().fake(),
        role: Role::Regular,
    }
}

pub fn envelope(data: Value) -> Value {
    json!({ "success": true, "message": "ok", "data": data })
}

pub fn page(content: Vec<Value>, total_pages: u32, total_elements: u64, number: u32) -> Value {
    let size = content.len();
    json!({
        "content": content,
        "totalPages": total_pages,
        "totalElements": total_elements,
        "size": size,
        "number": number,
    })
}

pub fn post_json(title: &str) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "title": title,
        "content": format!("{title} body"),
        "status": "PUBLISHED",
        "owner": { "id": Uuid::new_v4(), "username": "writer", "email": "w@example.com", "avatar": null },
        "mediaUrls": [],
        "likeCount": 0,
        "commentCount": 0,
        "createdAt": "2024-05-01T12:00:00",
        "updatedAt": "2024-05-01T12:00:00"
    })
}

pub fn notification_json(message: &str, is_read: bool) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "type": "LIKE",
        "message": message,
        "referenceId": Uuid::new_v4(),
        "isRead": is_read,
        "createdAt": "2024-05-01T12:00:00"
    })
}
