//! WebSocket front door: one task per socket feeding the dispatcher.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures::{SinkExt, StreamExt};
use tracing::{debug, info};

use crate::dispatcher::Dispatcher;
use crate::registry::{ChannelTransport, SessionId, Transport};

pub fn router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .with_state(dispatcher)
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(dispatcher): State<Arc<Dispatcher>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, dispatcher))
}

async fn handle_socket(socket: WebSocket, dispatcher: Arc<Dispatcher>) {
    let session = SessionId::new();
    let (mut sender, mut receiver) = socket.split();
    let (transport, mut outbox) = ChannelTransport::new();
    let transport: Arc<dyn Transport> = Arc::new(transport);
    info!(%session, "socket opened");

    let writer = tokio::spawn(async move {
        while let Some(text) = outbox.recv().await {
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
        let _ = sender.close().await;
    });

    while let Some(frame) = receiver.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                dispatcher
                    .handle_text(session, Arc::clone(&transport), text.as_str())
                    .await;
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(%session, error = %e, "socket read failed");
                break;
            }
        }
    }

    dispatcher.disconnect(session).await;
    // The registry no longer holds the transport, so this is the last sender.
    drop(transport);
    let _ = writer.await;
    info!(%session, "socket closed");
}
