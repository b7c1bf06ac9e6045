//! HTTP/WebSocket front end.
//!
//! One listener serves the static web client and the `/ws` upgrade
//! endpoint. Each accepted WebSocket gets its own [`Session`]; the inbound
//! loop feeds the segmenter and the interrupt, a writer task drains the
//! outbound delivery queue into the socket.

use crate::config::{AudioConfig, Config};
use crate::error::Result;
use crate::session::{ClientPayload, Engines, Session};
use axum::{
    Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
    routing::get,
};
use futures_util::{SinkExt, StreamExt};
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{debug, info, warn};

/// Shared state for connection handlers.
#[derive(Clone)]
pub struct AppState {
    pub engines: Engines,
    pub audio: AudioConfig,
}

/// Builds the application router.
pub fn router(state: AppState, web_root: &Path) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .fallback_service(ServeDir::new(web_root))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_connection(socket, state))
}

/// Runs one connection's lifetime: spawn the session workers, pump
/// messages both ways, tear everything down when the socket closes.
async fn handle_connection(socket: WebSocket, state: AppState) {
    info!("new connection");

    let mut session = Session::spawn(state.engines, &state.audio);
    let Some(mut outbound) = session.take_outbound() else {
        warn!("session outbound queue already taken");
        return;
    };

    let (mut sink, mut stream) = socket.split();

    // Writer: drains the delivery queue into the socket. Ends on its own
    // once the transmission worker (the only sender) is gone.
    let writer = tokio::spawn(async move {
        while let Some(payload) = outbound.recv().await {
            let message = match payload {
                ClientPayload::Text(text) => Message::Text(text),
                ClientPayload::Binary(bytes) => Message::Binary(bytes),
            };
            if sink.send(message).await.is_err() {
                break;
            }
        }
    });

    while let Some(message) = stream.next().await {
        match message {
            Ok(Message::Binary(bytes)) => {
                // A malformed frame fails alone; the session lives on
                if let Err(e) = session.handle_binary(&bytes) {
                    warn!("dropping inbound frame: {e}");
                }
            }
            Ok(Message::Text(text)) => session.handle_text(&text),
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!("connection closed: {e}");
                break;
            }
        }

        if session.is_stopped() {
            break;
        }
    }

    session.shutdown().await;
    if let Err(e) = writer.await {
        warn!("socket writer panicked: {e}");
    }
    info!("connection done");
}

/// Binds the listener and serves until the process exits.
pub async fn serve(config: Config, engines: Engines) -> Result<()> {
    let state = AppState {
        engines,
        audio: config.audio.clone(),
    };
    let app = router(state, &config.server.web_root);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on http://{addr} (WebSocket endpoint at /ws)");

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockGenerator;
    use crate::stt::MockTranscriber;
    use crate::tts::MockSynthesizer;
    use std::sync::Arc;

    fn mock_state() -> AppState {
        AppState {
            engines: Engines {
                transcriber: Arc::new(MockTranscriber::new("stt")),
                generator: Arc::new(MockGenerator::new("llm")),
                synthesizer: Arc::new(MockSynthesizer::new("tts")),
            },
            audio: AudioConfig::default(),
        }
    }

    #[test]
    fn test_router_builds() {
        let _router = router(mock_state(), Path::new("web"));
    }

    #[test]
    fn test_state_is_cloneable() {
        let state = mock_state();
        let clone = state.clone();
        assert_eq!(
            clone.audio.target_sample_rate,
            state.audio.target_sample_rate
        );
    }

    #[tokio::test]
    async fn test_serve_binds_ephemeral_port() {
        // Bind to port 0 and immediately drop: proves the listener setup
        // path works without a running client.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = addr.port();

        let state_config = config.clone();
        let handle = tokio::spawn(async move {
            let _ = serve(state_config, mock_state().engines).await;
        });

        // Give the server a moment, then connect to prove it is listening.
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        let connected = tokio::net::TcpStream::connect(("127.0.0.1", config.server.port)).await;
        assert!(connected.is_ok());
        handle.abort();
    }
}
