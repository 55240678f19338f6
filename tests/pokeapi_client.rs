use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

use pokebox_backend::app::{AppState, build_app};
use pokebox_backend::config::Config;
use pokebox_backend::db::MemoryStore;
use pokebox_backend::pokeapi::{PokeApi, PokeApiClient, PokeApiError};

type Seen = Arc<Mutex<Vec<String>>>;

/// Stand-in for PokéAPI that records every request target it receives.
async fn upstream(State(seen): State<Seen>, uri: Uri) -> Response {
    seen.lock().unwrap().push(uri.to_string());
    match uri.path() {
        "/api/v2/pokemon/pikachu" => Json(json!({
            "id": 25,
            "name": "pikachu",
            "types": [{"slot": 1, "type": {"name": "electric", "url": ""}}]
        }))
        .into_response(),
        "/api/v2/pokemon" => Json(json!({"count": 0, "results": []})).into_response(),
        "/api/v2/pokemon/broken" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "/api/v2/pokemon/slowpoke" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({"id": 79, "name": "slowpoke"})).into_response()
        }
        // Valid data for a different resource type.
        "/api/v2/berry/cheri" => Json(json!({"id": 1, "name": "cheri"})).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn start_upstream() -> (String, Seen) {
    let seen = Seen::default();
    let app = Router::new().fallback(upstream).with_state(seen.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/api/v2"), seen)
}

fn client(base: &str) -> PokeApiClient {
    PokeApiClient::new(base, Duration::from_millis(300)).unwrap()
}

#[tokio::test]
async fn fetches_and_decodes_pokemon() {
    let (base, seen) = start_upstream().await;
    let data = client(&base).pokemon("Pikachu").await.unwrap();
    assert_eq!(data.id, 25);
    assert_eq!(data.types[0].type_.name, "electric");
    assert_eq!(*seen.lock().unwrap(), ["/api/v2/pokemon/pikachu"]);
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_ignored() {
    let (base, seen) = start_upstream().await;
    client(&format!("{base}/")).pokemon("pikachu").await.unwrap();
    assert_eq!(*seen.lock().unwrap(), ["/api/v2/pokemon/pikachu"]);
}

#[tokio::test]
async fn upstream_404_is_not_found() {
    let (base, _) = start_upstream().await;
    let err = client(&base).pokemon("missingno").await.unwrap_err();
    assert!(matches!(err, PokeApiError::NotFound(_)), "{err:?}");
}

#[tokio::test]
async fn upstream_500_is_a_request_failure() {
    let (base, _) = start_upstream().await;
    let err = client(&base).pokemon("broken").await.unwrap_err();
    match err {
        PokeApiError::Http(e) => {
            assert_eq!(e.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR))
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn page_sends_limit_and_offset() {
    let (base, seen) = start_upstream().await;
    let page = client(&base).pokemon_page(5, 10).await.unwrap();
    assert!(page.results.is_empty());
    assert_eq!(*seen.lock().unwrap(), ["/api/v2/pokemon?limit=5&offset=10"]);
}

#[tokio::test]
async fn stalled_upstream_hits_timeout() {
    let (base, _) = start_upstream().await;
    let err = client(&base).pokemon("slowpoke").await.unwrap_err();
    match err {
        PokeApiError::Http(e) => assert!(e.is_timeout(), "{e}"),
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn name_cannot_escape_its_path_segment() {
    let (base, seen) = start_upstream().await;
    let err = client(&base).pokemon("../berry/cheri").await.unwrap_err();
    assert!(matches!(err, PokeApiError::NotFound(_)), "{err:?}");

    let err = client(&base).move_detail("tackle?x=1#frag").await.unwrap_err();
    assert!(matches!(err, PokeApiError::NotFound(_)), "{err:?}");

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0], "/api/v2/pokemon/..%2Fberry%2Fcheri");
    assert_eq!(seen[1], "/api/v2/move/tackle%3Fx=1%23frag");
}

#[tokio::test]
async fn detail_route_does_not_reach_other_resources() {
    let (base, seen) = start_upstream().await;
    let state = AppState::new(
        Config::default(),
        Arc::new(MemoryStore::new()),
        Arc::new(client(&base)),
    );
    let app = build_app(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let res = reqwest::get(format!("http://{addr}/pokemon/..%2Fberry%2Fcheri"))
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await.unwrap();
    assert_eq!(body["code"], "NOT_FOUND");
    assert!(!seen.lock().unwrap().iter().any(|p| p.contains("berry")));
}
