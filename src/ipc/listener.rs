//! Unix-socket [`CommandSource`] implementation.
//!
//! Binds a Unix stream socket and accepts one connection at a time.
//! Each line received is parsed as a JSON-encoded [`Command`].
//!
//! # Wire format
//!
//! Every message is a single line of JSON followed by `\n`:
//!
//! ```json
//! {"Key":"alt+3"}
//! {"Key":"alt+shift+7"}
//! {"GoToGroup":"6"}
//! {"MoveWindowToGroup":"2"}
//! ```

use crate::command::Command;
use crate::traits::CommandSource;
use log::{debug, error, info};
use std::io::{BufRead, BufReader};
use std::os::unix::net::UnixListener;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// A [`CommandSource`] that listens on a Unix stream socket for
/// JSON-encoded commands.
///
/// Each accepted connection can send multiple newline-delimited JSON
/// commands.  When the connection closes, the listener waits for the
/// next one.
pub struct UnixSocketListener {
    path: PathBuf,
}

/// Errors produced by the Unix socket listener.
#[derive(Debug, thiserror::Error)]
pub enum UnixSocketError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl UnixSocketListener {
    /// Create a new listener bound to `path`.
    ///
    /// The socket file is created when [`run`](CommandSource::run) is called.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CommandSource for UnixSocketListener {
    type Error = UnixSocketError;

    /// Bind the socket and start accepting connections.
    ///
    /// Blocks serving clients, so run it on a dedicated thread.  A dropped
    /// receiver is only noticed when the next command fails to send; the
    /// socket file is then removed and `Ok(())` returned.  Fails early if the
    /// socket cannot be bound.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error> {
        // Remove stale socket if present.
        let _ = std::fs::remove_file(&self.path);

        let listener = UnixListener::bind(&self.path)?;
        info!("listening on {}", self.path.display());

        for stream in listener.incoming() {
            let stream = match stream {
                Ok(s) => s,
                Err(e) => {
                    error!("accept error: {}", e);
                    continue;
                }
            };
            debug!("client connected");
            for line in BufReader::new(stream).lines() {
                match line {
                    Ok(ref text) if text.trim().is_empty() => continue,
                    Ok(text) => match serde_json::from_str::<Command>(&text) {
                        Ok(cmd) => {
                            debug!("received {:?}", cmd);
                            if sink.send(cmd).is_err() {
                                info!("sink closed, shutting down");
                                let _ = std::fs::remove_file(&self.path);
                                return Ok(());
                            }
                        }
                        Err(e) => error!("bad command: {} ({})", text, e),
                    },
                    Err(e) => {
                        error!("read error: {}", e);
                        break;
                    }
                }
            }
            debug!("client disconnected");
        }
        Ok(())
    }
}

//  Tests
