//! Single-instance coordination over a Unix domain socket.
//!
//! The first process binds the socket and becomes the primary instance. A
//! later process connects, writes its arguments as one JSON line and exits.
//! The primary turns each message into a [`ShellEvent`] on its channel.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::AppError;

const MAX_MESSAGE_BYTES: u64 = 64 * 1024;
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    SecondInstance { open_directory: Option<PathBuf> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct InstanceMessage {
    args: Vec<String>,
    #[serde(default)]
    cwd: Option<PathBuf>,
}

#[derive(Debug)]
pub enum InstanceRole {
    Primary {
        instance: PrimaryInstance,
        events: mpsc::UnboundedReceiver<ShellEvent>,
    },
    Secondary,
}

/// Holds the instance socket. Call [`shutdown`](Self::shutdown) on exit.
#[derive(Debug)]
pub struct PrimaryInstance {
    socket_path: PathBuf,
    accept_task: JoinHandle<()>,
}

impl PrimaryInstance {
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    pub fn shutdown(self) {
        self.accept_task.abort();
        match std::fs::remove_file(&self.socket_path) {
            Ok(()) => debug!(path = %self.socket_path.display(), "instance socket removed"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.socket_path.display(),
                error = %e,
                "failed to remove instance socket"
            ),
        }
    }
}

/// Becomes the primary instance, or hands `args` to the running one.
pub async fn acquire(
    socket_path: &Path,
    args: &[String],
    cwd: Option<&Path>,
) -> Result<InstanceRole, AppError> {
    match UnixStream::connect(socket_path).await {
        Ok(stream) => {
            let message = InstanceMessage {
                args: args.to_vec(),
                cwd: cwd.map(Path::to_path_buf),
            };
            send_message(stream, &message).await?;
            info!(path = %socket_path.display(), "handed arguments to running instance");
            return Ok(InstanceRole::Secondary);
        }
        Err(e) if matches!(e.kind(), ErrorKind::ConnectionRefused | ErrorKind::NotFound) => {
            debug!(error = %e, "no running instance");
        }
        Err(e) => return Err(AppError::filesystem(socket_path, e)),
    }

    match tokio::fs::remove_file(socket_path).await {
        Ok(()) => debug!(path = %socket_path.display(), "removed stale instance socket"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(AppError::filesystem(socket_path, e)),
    }
    if let Some(parent) = socket_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::filesystem(parent, e))?;
    }

    let listener =
        UnixListener::bind(socket_path).map_err(|e| AppError::filesystem(socket_path, e))?;
    let (tx, rx) = mpsc::unbounded_channel();
    let accept_task = tokio::spawn(accept_loop(listener, tx));

    info!(path = %socket_path.display(), "acquired instance lock");
    Ok(InstanceRole::Primary {
        instance: PrimaryInstance {
            socket_path: socket_path.to_path_buf(),
            accept_task,
        },
        events: rx,
    })
}

/// The directory named by the last command-line argument, if any.
///
/// `args[0]` is the program itself. Relative paths resolve against `cwd`.
pub async fn startup_directory(args: &[String], cwd: Option<&Path>) -> Option<PathBuf> {
    if args.len() < 2 {
        return None;
    }
    let target = Path::new(args.last()?);
    let target = match cwd {
        Some(cwd) if target.is_relative() => cwd.join(target),
        _ => target.to_path_buf(),
    };

    match tokio::fs::metadata(&target).await {
        Ok(metadata) if metadata.is_dir() => Some(target),
        _ => None,
    }
}

async fn send_message(mut stream: UnixStream, message: &InstanceMessage) -> Result<(), AppError> {
    let mut line = serde_json::to_vec(message)?;
    line.push(b'\n');
    stream.write_all(&line).await?;
    stream.shutdown().await?;
    Ok(())
}

async fn read_message(stream: UnixStream) -> Result<InstanceMessage, AppError> {
    let mut reader = BufReader::new(stream.take(MAX_MESSAGE_BYTES));
    let mut line = String::new();
    reader.read_line(&mut line).await?;
    Ok(serde_json::from_str(line.trim())?)
}

async fn accept_loop(listener: UnixListener, tx: mpsc::UnboundedSender<ShellEvent>) {
    loop {
        let stream = match listener.accept().await {
            Ok((stream, _)) => stream,
            Err(e) => {
                warn!(error = %e, "instance socket accept failed");
                tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                continue;
            }
        };

        let tx = tx.clone();
        tokio::spawn(async move {
            let message = match read_message(stream).await {
                Ok(message) => message,
                Err(e) => {
                    warn!(error = %e, "ignoring malformed instance message");
                    return;
                }
            };
            let open_directory = startup_directory(&message.args, message.cwd.as_deref()).await;
            debug!(?open_directory, "second instance started");
            if tx
                .send(ShellEvent::SecondInstance { open_directory })
                .is_err()
            {
                debug!("shell event channel closed");
            }
        });
    }
}
