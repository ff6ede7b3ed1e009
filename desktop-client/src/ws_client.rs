use eframe::egui;
use futures_util::{SinkExt, StreamExt};
use stablephone_common::engine::EngineEvent;
use stablephone_common::protocol::decode_server_message;
use stablephone_common::{log, warn, ServerMessage};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

use crate::state::{ConnectionStatus, SharedState};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid server url {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("unsupported url scheme '{0}', expected ws or wss")]
    UnsupportedScheme(String),
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}

pub fn parse_server_url(raw: &str) -> Result<Url, TransportError> {
    let url = Url::parse(raw.trim()).map_err(|source| TransportError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "ws" | "wss" => Ok(url),
        other => Err(TransportError::UnsupportedScheme(other.to_string())),
    }
}

/// Turns one inbound text frame into an engine event. Frames that are not
/// snapshots are logged and skipped.
pub fn frame_to_event(text: &str) -> Option<EngineEvent> {
    match decode_server_message(text) {
        Ok(ServerMessage::GameState(snapshot)) => Some(EngineEvent::Snapshot(snapshot)),
        Ok(ServerMessage::Unsupported) => {
            log!("Ignoring unsupported message: {}", text);
            None
        }
        Err(e) => {
            warn!("{}", e);
            None
        }
    }
}

/// Runs one websocket session. There is no reconnect: when the socket closes
/// or fails, the engine gets `TransportClosed` and the task ends.
pub async fn ws_client_task(
    url: Url,
    shared_state: SharedState,
    events: mpsc::UnboundedSender<EngineEvent>,
    outbound_rx: mpsc::UnboundedReceiver<String>,
    repaint: egui::Context,
) -> Result<(), TransportError> {
    let result = run_session(&url, &shared_state, &events, outbound_rx, &repaint).await;

    shared_state.set_connection(ConnectionStatus::Closed);
    if let Err(e) = &result {
        shared_state.set_error(format!("Connection to {} failed: {}", url, e));
    }
    let _ = events.send(EngineEvent::TransportClosed);
    repaint.request_repaint();

    result
}

async fn run_session(
    url: &Url,
    shared_state: &SharedState,
    events: &mpsc::UnboundedSender<EngineEvent>,
    mut outbound_rx: mpsc::UnboundedReceiver<String>,
    repaint: &egui::Context,
) -> Result<(), TransportError> {
    log!("Connecting to {}", url);
    let (ws, _response) = tokio_tungstenite::connect_async(url.as_str()).await?;
    let (mut write, mut read) = ws.split();

    shared_state.set_connection(ConnectionStatus::Open);
    shared_state.clear_error();
    repaint.request_repaint();
    log!("Connected to {}", url);

    loop {
        tokio::select! {
            payload = outbound_rx.recv() => {
                match payload {
                    Some(payload) => write.send(Message::Text(payload.into())).await?,
                    None => {
                        let _ = write.send(Message::Close(None)).await;
                        break;
                    }
                }
            }

            frame = read.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(event) = frame_to_event(text.as_str()) {
                            if events.send(event).is_err() {
                                break;
                            }
                            repaint.request_repaint();
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        log!("Server closed the connection: {:?}", frame);
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_server_url_accepts_websocket_schemes() {
        assert!(parse_server_url("ws://localhost:8000/ws").is_ok());
        assert!(parse_server_url(" wss://example.org/ws ").is_ok());
    }

    #[test]
    fn test_parse_server_url_rejects_other_schemes() {
        assert!(matches!(
            parse_server_url("http://localhost:8000/ws"),
            Err(TransportError::UnsupportedScheme(scheme)) if scheme == "http"
        ));
        assert!(matches!(
            parse_server_url("not a url"),
            Err(TransportError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_snapshot_frame_becomes_event() {
        let event = frame_to_event(r#"{"type":"game_state","players":[],"phase":"lobby","round_number":1}"#);
        assert!(matches!(event, Some(EngineEvent::Snapshot(_))));
    }

    #[test]
    fn test_other_frames_are_skipped() {
        assert_eq!(frame_to_event(r#"{"type":"pong"}"#), None);
        assert_eq!(frame_to_event("{"), None);
    }
}
