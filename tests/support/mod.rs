// Shared primitives for one-time server bootstrapping across integration tests.
#![allow(dead_code)]

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

// Global address used by all tests after the server publishes its bound port.
static SERVER_ADDR: OnceLock<String> = OnceLock::new();
// One-time guard that ensures the server bootstrap path runs only once.
static SERVER_READY: OnceLock<()> = OnceLock::new();

// Ensure the test server is running and return its host:port.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        let published = Arc::new(OnceLock::<String>::new());
        let published_thread = Arc::clone(&published);
        // Spawn an OS thread so the server outlives individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // Bind to an ephemeral port to avoid collisions with local services.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_thread.set(addr.to_string());
                shooter_server::run(listener).await.expect("server failed");
            });
        });
        wait_for_readiness(published);
    });

    SERVER_ADDR
        .get()
        .expect("server address should be initialized")
        .as_str()
}

fn wait_for_readiness(published: Arc<OnceLock<String>>) {
    let addr = loop {
        if let Some(addr) = published.get() {
            break addr.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };
    let _ = SERVER_ADDR.set(addr.clone());

    // Retry for a short period to avoid racing server bind/accept.
    for _ in 0..100 {
        if std::net::TcpStream::connect(&addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    panic!("server did not become ready in time");
}

/// Opens a game connection and returns it with the player id from the Identity message.
pub async fn connect() -> (Client, String) {
    let url = format!("ws://{}/connect", ensure_server());
    let (mut client, _) = connect_async(url).await.expect("websocket handshake");

    let identity = next_json(&mut client).await;
    assert_eq!(identity["type"], "Identity");
    let player_id = identity["data"]["player_id"]
        .as_str()
        .expect("player id should be a string")
        .to_string();
    (client, player_id)
}

pub async fn send(client: &mut Client, token: &str) {
    client.send(Message::text(token)).await.expect("send token");
}

/// Next JSON text frame, failing the test if none arrives within two seconds.
pub async fn next_json(client: &mut Client) -> Value {
    tokio::time::timeout(Duration::from_secs(2), next_text(client))
        .await
        .expect("message should arrive in time")
}

async fn next_text(client: &mut Client) -> Value {
    loop {
        let msg = client
            .next()
            .await
            .expect("stream should stay open")
            .expect("frame should decode");
        if msg.is_text() {
            let text = msg.into_text().expect("text frame");
            return serde_json::from_str(&text).expect("valid json");
        }
    }
}

/// Reads world updates until `pred` accepts one, or fails after five seconds.
pub async fn wait_for_update<F>(client: &mut Client, mut pred: F) -> Value
where
    F: FnMut(&Value) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let msg = next_text(client).await;
            if msg["type"] == "WorldUpdate" && pred(&msg["data"]) {
                return msg["data"].clone();
            }
        }
    })
    .await
    .expect("expected world update did not arrive")
}

pub fn find_player<'a>(update: &'a Value, player_id: &str) -> Option<&'a Value> {
    update["players"]
        .as_array()?
        .iter()
        .find(|p| p["id"] == player_id)
}
