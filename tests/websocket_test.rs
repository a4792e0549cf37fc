//! Real-time channel integration tests against a live server

use callboard::application::{BroadcastGateway, CallBoardService, DEFAULT_CHANNEL_CAPACITY};
use callboard::config::Config;
use callboard::domain::call::CallHistoryStore;
use callboard::infrastructure::media::MediaLibrary;
use callboard::interface::api::{build_router, detached_metrics_handle, AppState};
use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn start_server() -> (SocketAddr, Arc<CallBoardService>) {
    let store = Arc::new(CallHistoryStore::new(4));
    let gateway = Arc::new(BroadcastGateway::new(store.clone(), DEFAULT_CHANNEL_CAPACITY));
    let board = Arc::new(CallBoardService::new(store, gateway));

    let state = AppState::new(
        board.clone(),
        Arc::new(MediaLibrary::default()),
        detached_metrics_handle(),
    );
    let app = build_router(state, &Config::default().server);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, board)
}

async fn connect(addr: SocketAddr) -> Client {
    let (ws, _) = connect_async(format!("ws://{}/ws", addr)).await.unwrap();
    ws
}

/// Next JSON text frame, failing the test after a short wait
async fn next_event(ws: &mut Client) -> Value {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("timed out waiting for event")
            .expect("stream ended")
            .unwrap();

        if let Message::Text(text) = msg {
            return serde_json::from_str(&text).unwrap();
        }
    }
}

/// Asserts nothing arrives within a short window
async fn assert_no_event(ws: &mut Client) {
    let result = tokio::time::timeout(Duration::from_millis(200), ws.next()).await;
    assert!(result.is_err(), "unexpected frame: {:?}", result);
}

async fn call(ws: &mut Client, number: &str, counter: &str) {
    let frame = json!({ "event": "call_number", "data": { "number": number, "counter": counter } });
    ws.send(Message::Text(frame.to_string())).await.unwrap();
}

async fn wait_for_clients(board: &CallBoardService, count: usize) {
    for _ in 0..50 {
        if board.gateway().client_count() == count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("expected {} connected clients", count);
}

#[tokio::test]
async fn test_new_client_receives_current_state() {
    let (addr, board) = start_server().await;

    let mut empty = connect(addr).await;
    let event = next_event(&mut empty).await;
    assert_eq!(
        event,
        json!({ "event": "current_state", "data": { "current": {}, "history": [] } })
    );

    board
        .submit(
            &callboard::domain::call::CallRequest::new("12", "Counter 1"),
            callboard::application::CallSource::Http,
        )
        .unwrap();
    // The first client sees the broadcast
    let event = next_event(&mut empty).await;
    assert_eq!(event["data"]["current"]["number"], "12");

    // A later client gets the state without triggering a call
    let mut late = connect(addr).await;
    let event = next_event(&mut late).await;
    assert_eq!(event["event"], "current_state");
    assert_eq!(event["data"]["current"]["number"], "12");
    assert_eq!(event["data"]["current"]["counter"], "Counter 1");

    // Connecting does not broadcast to the others
    assert_no_event(&mut empty).await;
}

#[tokio::test]
async fn test_call_number_broadcasts_to_all_clients() {
    let (addr, board) = start_server().await;

    let mut staff = connect(addr).await;
    let mut display = connect(addr).await;
    next_event(&mut staff).await;
    next_event(&mut display).await;

    call(&mut staff, "12", "Counter 1").await;
    next_event(&mut staff).await;
    next_event(&mut display).await;

    call(&mut staff, "13", "Counter 2").await;
    for ws in [&mut staff, &mut display] {
        let event = next_event(ws).await;
        assert_eq!(event["event"], "current_state");
        assert_eq!(event["data"]["current"]["number"], "13");
        assert_eq!(event["data"]["current"]["counter"], "Counter 2");
        assert_eq!(event["data"]["history"][0]["number"], "12");
        assert_eq!(event["data"]["history"].as_array().unwrap().len(), 1);
    }

    assert_eq!(board.store().len(), 2);
}

#[tokio::test]
async fn test_invalid_call_errors_only_sender() {
    let (addr, board) = start_server().await;

    let mut staff = connect(addr).await;
    let mut display = connect(addr).await;
    next_event(&mut staff).await;
    next_event(&mut display).await;

    call(&mut staff, "", "Counter 1").await;
    let event = next_event(&mut staff).await;
    assert_eq!(event["event"], "error");
    assert_eq!(event["data"]["message"], "number is required");

    staff
        .send(Message::Text("{\"event\":\"call_number\"".to_string()))
        .await
        .unwrap();
    let event = next_event(&mut staff).await;
    assert_eq!(event["event"], "error");

    assert_no_event(&mut display).await;
    assert!(board.store().is_empty());
}

#[tokio::test]
async fn test_disconnect_is_isolated() {
    let (addr, board) = start_server().await;

    let mut staff = connect(addr).await;
    let mut leaving = connect(addr).await;
    next_event(&mut staff).await;
    next_event(&mut leaving).await;
    wait_for_clients(&board, 2).await;

    leaving.close(None).await.unwrap();
    drop(leaving);
    wait_for_clients(&board, 1).await;

    call(&mut staff, "7", "Window 3").await;
    let event = next_event(&mut staff).await;
    assert_eq!(event["data"]["current"]["number"], "7");
}
