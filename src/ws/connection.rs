//! Client connection state machine.
//!
//! One background task per manager owns the socket, the reconnect timer,
//! and frame dispatch. The task moves through
//! `Connecting → Connected → (Reconnecting | Disconnected)`: every session
//! close or failed dial consumes one reconnect attempt with exponentially
//! growing delay, a successful open resets the budget, and an exhausted
//! budget is terminal until the host creates a new manager.
//!
//! The previous socket is fully dropped before the next dial, so a stale
//! session can never dispatch frames or leak its half of the transport.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use super::backoff::RetryPolicy;
use super::codec;
use super::dispatch::Dispatcher;
use super::messages::ClientMessage;
use super::subscription::ChannelFilter;
use crate::config::LinkConfig;
use crate::domain::{ClientId, ConnectionState};
use crate::error::LinkError;
use crate::ui::{Frontend, StatusIndicator};

/// Connected client socket type.
type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Write half of a connected session.
type WsSink = SplitSink<WsStream, Message>;

/// Commands from the manager handle to the connection task.
enum Command {
    /// Transmit a message if a session is open; drop it otherwise.
    Send(ClientMessage),
    /// Close the session and end the task.
    Shutdown,
}

/// Owns one resilient WebSocket connection to the dashboard server.
///
/// The host constructs the manager when its page is ready, holds it for the
/// page's lifetime, and either calls [`ConnectionManager::shutdown`] for a
/// clean close or drops it to abort the background task.
pub struct ConnectionManager {
    client_id: ClientId,
    command_tx: mpsc::UnboundedSender<Command>,
    state_rx: watch::Receiver<ConnectionState>,
    task: Option<JoinHandle<()>>,
}

impl fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("client_id", &self.client_id)
            .field("state", &*self.state_rx.borrow())
            .finish_non_exhaustive()
    }
}

impl ConnectionManager {
    /// Spawns the connection task and immediately begins dialing.
    ///
    /// Must be called from within a tokio runtime. A fresh [`ClientId`] is
    /// generated here and kept for the manager's lifetime.
    #[must_use]
    pub fn spawn(config: LinkConfig, frontend: Arc<dyn Frontend>) -> Self {
        let client_id = ClientId::new();
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(ConnectionState::Connecting);

        let task = tokio::spawn(run(
            config,
            client_id.clone(),
            frontend,
            command_rx,
            state_tx,
        ));

        Self {
            client_id,
            command_tx,
            state_rx,
            task: Some(task),
        }
    }

    /// Returns the identity stamped on every outgoing envelope.
    #[must_use]
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the current connection state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state_rx.borrow().clone()
    }

    /// Returns a watch receiver observing every state transition.
    #[must_use]
    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    /// Sends a message to the server, fire-and-forget.
    ///
    /// If no session is currently open the message is dropped with a debug
    /// diagnostic — it is never queued for a later session and never
    /// raises.
    pub fn send(&self, message: ClientMessage) {
        if self.command_tx.send(Command::Send(message)).is_err() {
            tracing::debug!("connection task ended, dropping outgoing message");
        }
    }

    /// Closes the session, cancels any pending reconnect timer, and joins
    /// the background task.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::TaskFailed`] if the task had already ended
    /// abnormally.
    pub async fn shutdown(mut self) -> Result<(), LinkError> {
        let _ = self.command_tx.send(Command::Shutdown);
        if let Some(task) = self.task.take() {
            task.await?;
        }
        Ok(())
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        // Deterministic teardown for hosts that never call shutdown():
        // aborting the task drops the socket and any pending timer.
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

/// How a dial attempt ended.
enum DialOutcome {
    /// Handshake completed.
    Connected(Box<WsStream>),
    /// Dial or handshake failed; the retry budget decides what happens.
    Failed,
    /// Shutdown requested while dialing.
    Shutdown,
}

/// How an established session ended.
enum SessionEnd {
    /// The transport closed (remote close, read error, or write failure).
    Closed,
    /// Shutdown requested by the manager handle.
    Shutdown,
}

/// How a backoff wait ended.
enum WaitOutcome {
    /// Timer elapsed; dial again.
    Elapsed,
    /// Shutdown requested while waiting.
    Shutdown,
}

/// Connection task body: dial, session, retry, repeat.
async fn run(
    config: LinkConfig,
    client_id: ClientId,
    frontend: Arc<dyn Frontend>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    state: watch::Sender<ConnectionState>,
) {
    let policy = config.retry_policy();
    let url = config.endpoint(&client_id);
    let dispatcher = Dispatcher::new(
        ChannelFilter::subscribed_to([config.channel.clone()]),
        config.target.clone(),
        Arc::clone(&frontend),
        config.notification_timing(),
    );
    let mut attempt: u32 = 0;

    loop {
        publish(&state, &frontend, ConnectionState::Connecting);

        match dial(&url, &mut commands).await {
            DialOutcome::Shutdown => break,
            DialOutcome::Connected(socket) => {
                attempt = 0;
                publish(&state, &frontend, ConnectionState::Connected);
                tracing::info!(client_id = %client_id, "websocket connected");

                match run_session(*socket, &config, &client_id, &dispatcher, &mut commands).await {
                    SessionEnd::Shutdown => break,
                    SessionEnd::Closed => {
                        tracing::info!(client_id = %client_id, "websocket session closed");
                    }
                }
            }
            DialOutcome::Failed => {}
        }

        if policy.exhausted(attempt) {
            tracing::error!(
                attempts = attempt,
                "reconnect budget exhausted, giving up until recreated"
            );
            break;
        }

        let delay = policy.delay_for_attempt(attempt);
        publish(&state, &frontend, ConnectionState::Reconnecting { attempt });
        tracing::info!(?delay, attempt, "reconnect scheduled");

        match wait_backoff(delay, &mut commands).await {
            WaitOutcome::Shutdown => break,
            WaitOutcome::Elapsed => attempt += 1,
        }
    }

    publish(&state, &frontend, ConnectionState::Disconnected);
}

/// Publishes a state transition to watchers and the status indicator.
fn publish(
    state: &watch::Sender<ConnectionState>,
    frontend: &Arc<dyn Frontend>,
    next: ConnectionState,
) {
    frontend.update_status(&StatusIndicator::from(&next));
    state.send_replace(next);
}

/// Dials the server while draining (and dropping) outgoing messages, which
/// must not queue up for the next session.
async fn dial(url: &str, commands: &mut mpsc::UnboundedReceiver<Command>) -> DialOutcome {
    let connect = connect_async(url);
    tokio::pin!(connect);

    loop {
        tokio::select! {
            // Drain pending sends before the handshake can complete: a
            // message sent while closed must never ride the next session.
            biased;
            cmd = commands.recv() => match cmd {
                Some(Command::Send(_)) => {
                    tracing::debug!("transport not open, dropping outgoing message");
                }
                Some(Command::Shutdown) | None => return DialOutcome::Shutdown,
            },
            result = &mut connect => {
                return match result {
                    Ok((socket, _response)) => DialOutcome::Connected(Box::new(socket)),
                    Err(error) => {
                        tracing::error!(%error, %url, "websocket connect failed");
                        DialOutcome::Failed
                    }
                };
            }
        }
    }
}

/// Waits out a backoff delay while draining (and dropping) outgoing
/// messages. The timer is cancelled by shutdown.
async fn wait_backoff(
    delay: Duration,
    commands: &mut mpsc::UnboundedReceiver<Command>,
) -> WaitOutcome {
    let sleep = tokio::time::sleep(delay);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            biased;
            cmd = commands.recv() => match cmd {
                Some(Command::Send(_)) => {
                    tracing::debug!("transport not open, dropping outgoing message");
                }
                Some(Command::Shutdown) | None => return WaitOutcome::Shutdown,
            },
            () = &mut sleep => return WaitOutcome::Elapsed,
        }
    }
}

/// Runs one established session: registration, then the read/write loop.
async fn run_session(
    socket: WsStream,
    config: &LinkConfig,
    client_id: &ClientId,
    dispatcher: &Dispatcher,
    commands: &mut mpsc::UnboundedReceiver<Command>,
) -> SessionEnd {
    let (mut sink, mut stream) = socket.split();

    // Fire-and-forget registration: announce the page, then subscribe to
    // its broadcast channel. No acknowledgment is awaited.
    let registration = [
        ClientMessage::Register {
            page: config.page.clone(),
        },
        ClientMessage::Subscribe {
            channel: config.channel.clone(),
        },
    ];
    for message in registration {
        if let Err(error) = send_envelope(&mut sink, &message, client_id).await {
            tracing::warn!(%error, "registration send failed");
            return SessionEnd::Closed;
        }
    }

    loop {
        tokio::select! {
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => match codec::decode(text.as_str()) {
                    Ok(message) => {
                        tracing::trace!(msg_type = message.type_str(), "frame received");
                        dispatcher.dispatch(message);
                    }
                    Err(error) => tracing::warn!(%error, "dropping undecodable frame"),
                },
                Some(Ok(Message::Close(_))) | None => return SessionEnd::Closed,
                Some(Ok(_)) => {
                    // Ping/pong are answered by tungstenite; binary frames
                    // are not part of the protocol.
                }
                Some(Err(error)) => {
                    tracing::error!(%error, "websocket read error");
                    return SessionEnd::Closed;
                }
            },
            cmd = commands.recv() => match cmd {
                Some(Command::Send(message)) => {
                    if let Err(error) = send_envelope(&mut sink, &message, client_id).await {
                        tracing::warn!(%error, "websocket send failed");
                        return SessionEnd::Closed;
                    }
                }
                Some(Command::Shutdown) | None => {
                    let _ = sink.send(Message::Close(None)).await;
                    return SessionEnd::Shutdown;
                }
            }
        }
    }
}

/// Wraps `message` in an envelope and transmits it as one text frame.
async fn send_envelope(
    sink: &mut WsSink,
    message: &ClientMessage,
    client_id: &ClientId,
) -> Result<(), LinkError> {
    let frame = codec::encode_envelope(message, client_id, Utc::now())?;
    sink.send(Message::Text(frame.into())).await?;
    Ok(())
}
