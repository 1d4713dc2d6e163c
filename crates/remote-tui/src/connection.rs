//! Backend transport — one WebSocket, split into a writer task fed by a
//! command channel and a reader task that forwards text frames to the App.

use anyhow::Context;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

use remote_proto::Command;

use crate::app::AppMessage;

/// Connect to `url` and start the reader/writer tasks.  Commands sent on the
/// returned channel go out in order; inbound text arrives as
/// [`AppMessage::Inbound`], and the end of the stream as
/// [`AppMessage::Disconnected`].
pub async fn connect(
    url: &str,
    app_tx: mpsc::Sender<AppMessage>,
) -> anyhow::Result<mpsc::Sender<Command>> {
    let (ws_stream, _) = connect_async(url)
        .await
        .with_context(|| format!("connecting to {}", url))?;
    info!("connected to {}", url);

    let (mut ws_tx, mut ws_rx) = ws_stream.split();
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(64);

    // ── Writer ────────────────────────────────────────────────────────────────
    let writer_app_tx = app_tx.clone();
    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            let wire = cmd.encode();
            debug!("send {}", wire);
            if let Err(e) = ws_tx.send(Message::Text(wire)).await {
                warn!("send failed: {}", e);
                let _ = writer_app_tx
                    .send(AppMessage::Disconnected(e.to_string()))
                    .await;
                break;
            }
        }
        let _ = ws_tx.close().await;
    });

    // ── Reader ────────────────────────────────────────────────────────────────
    tokio::spawn(async move {
        let reason = loop {
            match ws_rx.next().await {
                Some(Ok(Message::Text(text))) => {
                    if app_tx.send(AppMessage::Inbound(text)).await.is_err() {
                        return;
                    }
                }
                Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes) {
                    Ok(text) => {
                        if app_tx.send(AppMessage::Inbound(text)).await.is_err() {
                            return;
                        }
                    }
                    Err(_) => warn!("dropping non-UTF-8 binary frame"),
                },
                Some(Ok(Message::Close(frame))) => {
                    break frame
                        .map(|f| format!("closed by backend: {}", f.reason))
                        .unwrap_or_else(|| "closed by backend".to_string());
                }
                // Ping/pong are answered by tungstenite
                Some(Ok(_)) => {}
                Some(Err(e)) => break e.to_string(),
                None => break "connection ended".to_string(),
            }
        };
        info!("backend connection closed: {}", reason);
        let _ = app_tx.send(AppMessage::Disconnected(reason)).await;
    });

    Ok(cmd_tx)
}

/// Connect, send a single command, print whatever the backend answers within
/// `wait`, then close.
pub async fn send_once(url: &str, cmd: Command, wait: std::time::Duration) -> anyhow::Result<()> {
    let (ws_stream, _) = connect_async(url)
        .await
        .with_context(|| format!("connecting to {}", url))?;
    let (mut ws_tx, mut ws_rx) = ws_stream.split();

    ws_tx.send(Message::Text(cmd.encode())).await?;
    info!("sent {}", cmd);

    let deadline = tokio::time::sleep(wait);
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            _ = &mut deadline => break,
            msg = ws_rx.next() => match msg {
                Some(Ok(Message::Text(text))) => println!("{}", text),
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
            },
        }
    }
    let _ = ws_tx.close().await;
    Ok(())
}
