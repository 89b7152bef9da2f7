use crate::domain::{Command, PlayerId};
use crate::interface_adapters::protocol::{ServerMessage, WorldUpdateDto};
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::utils::ids::connection_id;
use crate::use_cases::throttle::{should_log, throttle_start};
use crate::use_cases::{GameEvent, WorldView};

use axum::{
    Error,
    extract::{
        State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    response::IntoResponse,
};
use futures::SinkExt;
use std::{sync::Arc, time::Instant};
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{Instrument, debug, error, info, info_span, warn};

#[derive(Debug)]
enum NetError {
    // Categorizes connection lifecycle failures so callers can decide policy.
    #[allow(dead_code)]
    Ws(axum::Error),
    Serialization(serde_json::Error),
    InputClosed,
}

impl From<axum::Error> for NetError {
    fn from(e: axum::Error) -> Self {
        NetError::Ws(e)
    }
}

enum LoopControl {
    Continue,
    Disconnect,
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| {
        // The connection id doubles as the player id for the lifetime of the socket.
        let player_id = connection_id();
        handle_socket(socket, state, player_id).instrument(info_span!("conn", player_id))
    })
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>, player_id: PlayerId) {
    let (outbound_tx, mut outbound_rx) = mpsc::channel::<WorldView>(state.outbound_capacity);

    if let Err(e) = bootstrap_connection(&mut socket, &state, player_id, outbound_tx).await {
        error!(error = ?e, "failed to bootstrap connection");
        let _ = socket
            .send(Message::Close(Some(CloseFrame {
                code: close_code::ERROR,
                reason: "bootstrap failed".into(),
            })))
            .await;
        let _ = socket.close().await;
        return;
    }
    info!("client connected");

    let mut ctx = ConnCtx::new(player_id, state.input_tx.clone());

    // Main Client Loop
    if let Err(e) = run_client_loop(&mut socket, &mut outbound_rx, &mut ctx).await {
        warn!(error = ?e, "client loop exited with error");
    }
}

async fn send_message(socket: &mut WebSocket, msg: &ServerMessage) -> Result<usize, NetError> {
    let txt = serde_json::to_string(msg).map_err(NetError::Serialization)?;
    let bytes = txt.len();
    socket.send(Message::Text(txt.into())).await?;
    Ok(bytes)
}

/// Registers the connection with the world task, then tells the client who it is.
async fn bootstrap_connection(
    socket: &mut WebSocket,
    state: &AppState,
    player_id: PlayerId,
    outbound: mpsc::Sender<WorldView>,
) -> Result<(), NetError> {
    // Join before Identity so the first world update already contains this player.
    state
        .input_tx
        .send(GameEvent::Join {
            player_id,
            outbound,
        })
        .await
        .map_err(|_| NetError::InputClosed)?;

    let identity = ServerMessage::Identity {
        player_id: player_id.to_string(),
    };
    if let Err(e) = send_message(socket, &identity).await {
        // Compensate so the world never keeps a player without a connection.
        state
            .input_tx
            .send(GameEvent::Leave { player_id })
            .await
            .map_err(|_| NetError::InputClosed)?;
        return Err(e);
    }
    Ok(())
}

struct ConnCtx {
    player_id: PlayerId,
    input_tx: mpsc::Sender<GameEvent>,

    msgs_in: u64,
    msgs_out: u64,
    bytes_in: u64,
    bytes_out: u64,
    ignored: u64,
    encode_failures: u64,

    last_input_full_log: Instant,

    close_frame: Option<CloseFrame>,
}

impl ConnCtx {
    fn new(player_id: PlayerId, input_tx: mpsc::Sender<GameEvent>) -> Self {
        Self {
            player_id,
            input_tx,
            msgs_in: 0,
            msgs_out: 0,
            bytes_in: 0,
            bytes_out: 0,
            ignored: 0,
            encode_failures: 0,
            last_input_full_log: throttle_start(),
            close_frame: None,
        }
    }
}

async fn run_client_loop(
    socket: &mut WebSocket,
    outbound_rx: &mut mpsc::Receiver<WorldView>,
    ctx: &mut ConnCtx,
) -> Result<(), NetError> {
    let mut fatal: Option<NetError> = None;

    loop {
        let disconnect: bool = tokio::select! {
            // Incoming command from the client
            incoming = socket.recv() => {
                match handle_incoming_ws(incoming, ctx).await {
                    Ok(LoopControl::Continue) => false,
                    Ok(LoopControl::Disconnect) => true,
                    Err(e) => {
                        fatal = Some(e);
                        true
                    }
                }
            }

            // Outgoing personal world view
            view = outbound_rx.recv() => {
                match view {
                    Some(view) => matches!(
                        forward_world_view(&view, socket, ctx).await,
                        LoopControl::Disconnect
                    ),
                    None => {
                        // The world task dropped our handle; nothing more will arrive.
                        debug!(player_id = ctx.player_id, "outbound queue closed");
                        true
                    }
                }
            }
        };

        if disconnect {
            if let Some(frame) = ctx.close_frame.take() {
                let _ = socket.send(Message::Close(Some(frame))).await;
            }
            if let Err(err) = socket.close().await.map_err(NetError::Ws) {
                debug!(error = ?err, "socket close error");
            }
            break;
        }
    }

    if let Err(e) = disconnect_cleanup(ctx).await {
        warn!(error = ?e, "error during disconnect cleanup");
        if fatal.is_none() {
            fatal = Some(e);
        }
    }

    match fatal {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

async fn handle_incoming_ws(
    incoming: Option<Result<Message, Error>>,
    ctx: &mut ConnCtx,
) -> Result<LoopControl, NetError> {
    let player_id = ctx.player_id;
    match incoming {
        Some(Ok(msg)) => match msg {
            Message::Text(text) => {
                ctx.msgs_in += 1;
                ctx.bytes_in += text.len() as u64;

                match Command::parse(text.as_str()) {
                    Some(command) => enqueue_command(ctx, command).await,
                    None => {
                        // Unknown tokens are part of normal client chatter; count only.
                        ctx.ignored += 1;
                        Ok(LoopControl::Continue)
                    }
                }
            }
            Message::Binary(_) => {
                ctx.close_frame = Some(CloseFrame {
                    code: close_code::UNSUPPORTED,
                    reason: "binary messages not supported".into(),
                });
                Ok(LoopControl::Disconnect)
            }
            Message::Ping(_) | Message::Pong(_) => Ok(LoopControl::Continue),
            Message::Close(_) => Ok(LoopControl::Disconnect),
        },
        Some(Err(e)) => {
            warn!(player_id, error = %e, "websocket recv error");
            Ok(LoopControl::Disconnect)
        }
        None => {
            info!(player_id, "websocket closed");
            Ok(LoopControl::Disconnect)
        }
    }
}

// Press/release tokens are edge-triggered, so none may be lost. A full queue stalls only this
// connection's reads until the world task drains it.
async fn enqueue_command(ctx: &mut ConnCtx, command: Command) -> Result<LoopControl, NetError> {
    let player_id = ctx.player_id;
    match ctx
        .input_tx
        .try_send(GameEvent::Command { player_id, command })
    {
        Ok(()) => Ok(LoopControl::Continue),
        Err(TrySendError::Full(evt)) => {
            if should_log(&mut ctx.last_input_full_log) {
                warn!(player_id, "input channel full; waiting for world task");
            }
            ctx.input_tx
                .send(evt)
                .await
                .map_err(|_| NetError::InputClosed)?;
            Ok(LoopControl::Continue)
        }
        Err(TrySendError::Closed(_evt)) => Err(NetError::InputClosed),
    }
}

async fn forward_world_view(
    view: &WorldView,
    socket: &mut WebSocket,
    ctx: &mut ConnCtx,
) -> LoopControl {
    let msg = ServerMessage::WorldUpdate(WorldUpdateDto::from(view));
    match send_message(socket, &msg).await {
        Ok(bytes) => {
            ctx.msgs_out += 1;
            ctx.bytes_out += bytes as u64;
            LoopControl::Continue
        }
        Err(NetError::Serialization(e)) => {
            // Skip this tick for this recipient only.
            ctx.encode_failures += 1;
            error!(
                player_id = ctx.player_id,
                tick = view.snapshot.tick,
                error = %e,
                "failed to serialize world update"
            );
            LoopControl::Continue
        }
        Err(err) => {
            // Log unexpected send failures; disconnect will follow immediately.
            warn!(error = ?err, "failed to send world update");
            LoopControl::Disconnect
        }
    }
}

async fn disconnect_cleanup(ctx: &ConnCtx) -> Result<(), NetError> {
    let player_id = ctx.player_id;
    // Removes the registry entry and the player in one world-task step.
    ctx.input_tx
        .send(GameEvent::Leave { player_id })
        .await
        .map_err(|_| NetError::InputClosed)?;

    debug!(
        player_id,
        msgs_in = ctx.msgs_in,
        msgs_out = ctx.msgs_out,
        bytes_in = ctx.bytes_in,
        bytes_out = ctx.bytes_out,
        ignored = ctx.ignored,
        encode_failures = ctx.encode_failures,
        "connection stats"
    );
    info!(player_id, "client disconnected");
    Ok(())
}
