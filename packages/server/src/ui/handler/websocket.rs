//! WebSocket connection handlers.
//!
//! Each socket runs one receive loop that owns the connection's lifecycle
//! state. Outbound frames flow through the message pusher into a separate
//! writer task, so a slow client never holds up a room broadcast.

use std::{ops::ControlFlow, sync::Arc};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{ConnectionId, ConnectionState, MessageContent, SignalPayload},
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
    usecase::{JoinError, JoinRequest},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that forwards pushed frames to the WebSocket sink.
///
/// The task ends once the connection is unregistered from the pusher (all
/// senders dropped and the queue drained) or the sink fails.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
        let _ = sender.close().await;
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = state.connect_participant_usecase.execute(tx).await;
    tracing::info!("Connection '{}' opened", connection_id);

    let mut send_task = pusher_loop(rx, sender);
    let mut connection = ConnectionState::default();

    loop {
        tokio::select! {
            frame = receiver.next() => {
                let message = match frame {
                    Some(Ok(message)) => message,
                    Some(Err(e)) => {
                        tracing::debug!("WebSocket error on '{}': {}", connection_id, e);
                        break;
                    }
                    None => break,
                };

                match message {
                    Message::Text(text) => {
                        let flow =
                            handle_frame(&state, &connection_id, &mut connection, text.as_str())
                                .await;
                        if flow.is_break() {
                            break;
                        }
                    }
                    Message::Close(_) => {
                        tracing::debug!("Connection '{}' requested close", connection_id);
                        break;
                    }
                    // ping/pong is answered by the protocol layer
                    _ => {}
                }
            }
            _ = &mut send_task => {
                tracing::debug!("Writer for '{}' stopped", connection_id);
                break;
            }
        }
    }

    let room_id = connection.disconnect();
    state
        .disconnect_participant_usecase
        .execute(&connection_id, room_id)
        .await;
    tracing::info!("Connection '{}' closed", connection_id);
}

/// Dispatch one inbound text frame. `Break` closes the connection.
async fn handle_frame(
    state: &AppState,
    connection_id: &ConnectionId,
    connection: &mut ConnectionState,
    text: &str,
) -> ControlFlow<()> {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!("Ignoring malformed frame from '{}': {}", connection_id, e);
            return ControlFlow::Continue(());
        }
    };

    match message {
        ClientMessage::JoinRoom {
            room_id,
            username,
            password,
        } => {
            let result = join(state, connection_id, connection, room_id, username, password).await;
            if let Err(e) = result {
                state.join_room_usecase.reject(connection_id, &e).await;
            }
        }
        ClientMessage::SendMessage { content } => {
            let Some(room_id) = connection.joined_room() else {
                tracing::debug!("Ignoring message from '{}': not joined", connection_id);
                return ControlFlow::Continue(());
            };
            match MessageContent::try_from(content) {
                Ok(content) => {
                    state
                        .send_message_usecase
                        .execute(room_id, connection_id, content)
                        .await;
                }
                Err(e) => tracing::debug!("Ignoring message from '{}': {}", connection_id, e),
            }
        }
        ClientMessage::Signal { target_id, signal } => match ConnectionId::parse(&target_id) {
            Ok(target) => {
                state
                    .relay_signal_usecase
                    .execute(connection_id, &target, SignalPayload::new(signal))
                    .await;
            }
            Err(e) => tracing::debug!("Ignoring signal from '{}': {}", connection_id, e),
        },
        ClientMessage::MediaStatus { status } => {
            if let Some(room_id) = connection.joined_room() {
                state
                    .update_status_usecase
                    .execute(room_id, connection_id, status.into())
                    .await;
            }
        }
        ClientMessage::Ready => {
            if let Some(room_id) = connection.joined_room() {
                state
                    .announce_ready_usecase
                    .execute(room_id, connection_id)
                    .await;
            }
        }
        ClientMessage::LeaveRoom => {
            tracing::debug!("Connection '{}' left explicitly", connection_id);
            return ControlFlow::Break(());
        }
    }

    ControlFlow::Continue(())
}

async fn join(
    state: &AppState,
    connection_id: &ConnectionId,
    connection: &mut ConnectionState,
    room_id: String,
    username: String,
    password: String,
) -> Result<(), JoinError> {
    if let Some(current) = connection.joined_room() {
        if state.join_room_usecase.is_member(current, connection_id).await {
            return Err(JoinError::AlreadyJoined);
        }
        tracing::debug!(
            "Room '{}' no longer lists '{}', allowing a new join",
            current,
            connection_id
        );
        connection.release();
    }
    if !connection.can_join() {
        return Err(JoinError::AlreadyJoined);
    }

    let request = JoinRequest::parse(room_id, username, password)?;
    let room_id = request.room_id.clone();
    state
        .join_room_usecase
        .execute(connection_id.clone(), request)
        .await?;
    connection.join(room_id);
    Ok(())
}
