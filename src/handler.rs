//! TCP connection handler
//!
//! Handles individual client connections: CRLF line framing and
//! bidirectional communication with the ChatServer actor.

use futures_util::StreamExt;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};
use tracing::{debug, error, info, warn};

use crate::error::AppError;
use crate::server::ServerCommand;
use crate::types::ClientId;

/// Longest accepted inbound line, terminator excluded
pub const MAX_LINE_LEN: usize = 512;

/// Handle a new TCP connection
///
/// Registers the connection with the ChatServer, forwards every inbound line
/// and writes every outbound line with a CRLF terminator until either side
/// closes.
pub async fn handle_connection(
    stream: TcpStream,
    cmd_tx: mpsc::Sender<ServerCommand>,
) -> Result<(), AppError> {
    let peer_addr = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    let client_id = ClientId::new();
    info!("Client {} connected from {}", client_id, peer_addr);

    let (reader, writer) = stream.into_split();

    // Create channel for server -> client lines
    let (line_tx, line_rx) = mpsc::unbounded_channel::<String>();

    // Register with ChatServer
    if cmd_tx
        .send(ServerCommand::Connect {
            client_id,
            sender: line_tx,
        })
        .await
        .is_err()
    {
        error!("Failed to register client {} - server closed", client_id);
        return Err(AppError::ChannelSend);
    }

    // Spawn read task (socket -> ServerCommand)
    let cmd_tx_read = cmd_tx.clone();
    let mut read_task = tokio::spawn(async move {
        if let Err(e) = read_lines(client_id, reader, cmd_tx_read).await {
            error!("Read error for {}: {}", client_id, e);
        }
        debug!("Read task ended for {}", client_id);
    });

    // Spawn write task (outbound lines -> socket)
    let mut write_task = tokio::spawn(async move {
        if let Err(e) = write_lines(writer, line_rx).await {
            error!("Write error for {}: {}", client_id, e);
        }
        debug!("Write task ended for {}", client_id);
    });

    // Wait for either task to complete, then stop the other one
    tokio::select! {
        _ = &mut read_task => {
            debug!("Read task completed for {}", client_id);
            write_task.abort();
        }
        _ = &mut write_task => {
            debug!("Write task completed for {}", client_id);
            read_task.abort();
        }
    }

    // Send disconnect command
    let _ = cmd_tx.send(ServerCommand::Disconnect { client_id }).await;

    info!("Client {} disconnected", client_id);

    Ok(())
}

/// Forward framed lines to the server until EOF
///
/// Lines longer than [`MAX_LINE_LEN`] are dropped; reading resumes at the
/// next line.
async fn read_lines<R>(
    client_id: ClientId,
    reader: R,
    cmd_tx: mpsc::Sender<ServerCommand>,
) -> Result<(), AppError>
where
    R: AsyncRead + Unpin,
{
    let mut lines = FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_LINE_LEN));
    // FramedRead yields one `None` after a decode error before reading on
    let mut skipped = false;

    loop {
        let line = match lines.next().await {
            Some(Ok(line)) => line,
            Some(Err(LinesCodecError::MaxLineLengthExceeded)) => {
                warn!("Dropping over-long line from {}", client_id);
                skipped = true;
                continue;
            }
            Some(Err(e)) => return Err(e.into()),
            None if skipped => {
                skipped = false;
                continue;
            }
            None => return Ok(()),
        };
        skipped = false;

        cmd_tx
            .send(ServerCommand::Line { client_id, line })
            .await
            .map_err(|_| AppError::ChannelSend)?;
    }
}

/// Write queued lines, appending CRLF, until the server drops the sender
async fn write_lines<W>(mut writer: W, mut line_rx: mpsc::UnboundedReceiver<String>) -> Result<(), AppError>
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = line_rx.recv().await {
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\r\n").await?;
    }
    writer.shutdown().await?;
    Ok(())
}
