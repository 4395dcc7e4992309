use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::{Duration, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use todolist_core::remote::{NewTodo, TodoPatch};
use todolist_core::{
    Filter, HttpTodoApi, RemoteConfig, RemoteTodoStore, StoreError, TodoApi, TodoId,
};

#[derive(Clone, Serialize)]
struct Record {
    #[serde(rename = "_id")]
    id: String,
    text: String,
    completed: bool,
    #[serde(rename = "createdAt")]
    created_at: String,
}

#[derive(Default)]
struct Collection {
    records: Vec<Record>,
    created: i64,
    fail_list: bool,
    fail_writes: bool,
}

type Shared = Arc<Mutex<Collection>>;

async fn list(State(state): State<Shared>) -> Response {
    let state = state.lock().unwrap();
    if state.fail_list {
        return (StatusCode::BAD_GATEWAY, "upstream down").into_response();
    }
    let mut records = state.records.clone();
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    (StatusCode::OK, Json(records)).into_response()
}

async fn create(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    let text = body["text"].as_str().unwrap_or_default().trim().to_string();
    if text.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Todo text is required" })),
        )
            .into_response();
    }
    if state.fail_writes {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to create todo" })),
        )
            .into_response();
    }
    state.created += 1;
    let created_at = (Utc::now() + Duration::milliseconds(state.created))
        .to_rfc3339_opts(SecondsFormat::Millis, true);
    let record = Record {
        id: format!("{:024x}", state.created),
        text,
        completed: false,
        created_at,
    };
    state.records.push(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn update(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    if state.fail_writes {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to update todo" })),
        )
            .into_response();
    }
    let Some(record) = state.records.iter_mut().find(|r| r.id == id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Todo not found" })),
        )
            .into_response();
    };
    if let Some(completed) = body["completed"].as_bool() {
        record.completed = completed;
    }
    if let Some(text) = body["text"].as_str() {
        record.text = text.trim().to_string();
    }
    (StatusCode::OK, Json(record.clone())).into_response()
}

async fn remove(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let mut state = state.lock().unwrap();
    let before = state.records.len();
    state.records.retain(|r| r.id != id);
    if state.records.len() == before {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Todo not found" })),
        )
            .into_response();
    }
    (
        StatusCode::OK,
        Json(json!({ "message": "Todo deleted successfully" })),
    )
        .into_response()
}

async fn spawn_server() -> (String, Shared) {
    let state: Shared = Arc::default();
    let app = Router::new()
        .route("/api/todos", get(list).post(create))
        .route("/api/todos/{id}", put(update).delete(remove))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}/api", addr), state)
}

fn open(base_url: &str) -> HttpTodoApi {
    HttpTodoApi::open(&RemoteConfig {
        base_url: base_url.to_string(),
    })
    .unwrap()
}

#[tokio::test]
async fn load_from_empty_collection_is_empty() {
    let (url, _state) = spawn_server().await;
    let mut store = RemoteTodoStore::new(open(&url));
    store.load().await.unwrap();
    assert!(store.todos().is_empty());
    store.into_api().close();
}

#[tokio::test]
async fn create_toggle_and_reload() {
    let (url, _state) = spawn_server().await;
    let mut store = RemoteTodoStore::new(open(&url));
    store.load().await.unwrap();

    let first = store.add("Buy milk").await.unwrap().unwrap();
    let second = store.add("Walk dog").await.unwrap().unwrap();
    store.toggle(&first.id).await.unwrap();

    assert_eq!(store.todos()[0].id, second.id);
    assert_eq!(store.filter(Filter::Completed).len(), 1);

    let mut reloaded = RemoteTodoStore::new(open(&url));
    reloaded.load().await.unwrap();
    assert_eq!(reloaded.todos(), store.todos());
}

#[tokio::test]
async fn server_error_on_create_leaves_store_unchanged() {
    let (url, state) = spawn_server().await;
    let mut store = RemoteTodoStore::new(open(&url));
    store.load().await.unwrap();

    state.lock().unwrap().fail_writes = true;
    let err = store.add("Buy milk").await.unwrap_err();
    match &err {
        StoreError::Status { status, message } => {
            assert_eq!(*status, 500);
            assert_eq!(message, "Failed to create todo");
        }
        other => panic!("expected status error, got {:?}", other),
    }
    assert!(store.todos().is_empty());
    assert!(store.last_error().is_some());
}

#[tokio::test]
async fn plain_text_error_body_becomes_message() {
    let (url, state) = spawn_server().await;
    state.lock().unwrap().fail_list = true;

    let err = open(&url).list().await.unwrap_err();
    match err {
        StoreError::Status { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "upstream down");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn missing_record_is_not_found() {
    let (url, _state) = spawn_server().await;
    let api = open(&url);
    let id = TodoId::from("000000000000000000000099");

    let err = api.update(&id, &TodoPatch::completed(true)).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(ref missing) if missing == &id));

    let err = api.delete(&id).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert!(!err.is_request_failure());
}

#[tokio::test]
async fn blank_create_is_rejected_by_server() {
    let (url, _state) = spawn_server().await;
    let err = open(&url)
        .create(&NewTodo {
            text: "   ".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Status { status: 400, .. }));
}

#[tokio::test]
async fn unreachable_server_is_a_request_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut store = RemoteTodoStore::new(open(&format!("http://{}/api", addr)));
    let err = store.load().await.unwrap_err();
    assert!(matches!(err, StoreError::Request(_)));
    assert!(store.last_error().unwrap().starts_with("Failed to load todos"));
}

#[tokio::test]
async fn clear_completed_deletes_each_record() {
    let (url, state) = spawn_server().await;
    let mut store = RemoteTodoStore::new(open(&url));
    store.load().await.unwrap();

    for text in ["one", "two", "three"] {
        let todo = store.add(text).await.unwrap().unwrap();
        if text != "two" {
            store.toggle(&todo.id).await.unwrap();
        }
    }

    assert_eq!(store.clear_completed().await.unwrap(), 2);
    assert_eq!(store.todos().len(), 1);
    assert_eq!(store.todos()[0].text, "two");
    assert_eq!(state.lock().unwrap().records.len(), 1);
}
