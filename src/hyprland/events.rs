//! Turns Hyprland's window events into grprouter [`Command`]s.
//!
//! Hyprland writes one event per line to its event socket (`socket2`) in the
//! form `EVENT>>DATA`.  Only `openwindow` is of interest here:
//!
//! | Event        | Payload                                  |
//! |--------------|------------------------------------------|
//! | `openwindow` | `<address>,<workspace>,<class>,<title>`  |
//!
//! Each one becomes a [`Command::WindowOpened`] so window rules can send the
//! new window to its group.

use crate::command::Command;
use crate::hyprland::wm::hypr_socket;
use crate::traits::CommandSource;
use log::{debug, error, info, warn};
use std::io::{BufRead, BufReader};
use std::os::unix::net::UnixStream;
use std::sync::mpsc;

/// A [`CommandSource`] reading Hyprland's event socket.
#[derive(Debug, Default)]
pub struct HyprlandEventSource;

impl HyprlandEventSource {
    pub fn new() -> Self {
        Self
    }
}

/// Error from the Hyprland event source.
#[derive(Debug, thiserror::Error)]
#[error("hyprland event error: {0}")]
pub struct HyprlandEventError(String);

/// Parse a single event line from socket2.
///
/// Lines have the form `EVENT>>DATA\n`.
fn parse_event_line(line: &str) -> Option<(&str, &str)> {
    let sep = line.find(">>")?;
    Some((&line[..sep], &line[sep + 2..]))
}

/// Build the command for one event, if it is one we act on.
///
/// Window titles may contain commas, so only the first three fields are
/// split off.  Event addresses come without the `0x` prefix that the
/// dispatchers expect.
fn command_for_event(event: &str, data: &str) -> Option<Command> {
    match event {
        "openwindow" => {
            let mut parts = data.splitn(4, ',');
            let address = parts.next()?.trim();
            let _workspace = parts.next()?;
            let class = parts.next()?;
            let title = parts.next().unwrap_or("");
            if address.is_empty() {
                return None;
            }
            let address = if address.starts_with("0x") {
                address.to_string()
            } else {
                format!("0x{}", address)
            };
            Some(Command::WindowOpened {
                address,
                class: class.to_string(),
                title: title.to_string(),
            })
        }
        _ => None,
    }
}

impl CommandSource for HyprlandEventSource {
    type Error = HyprlandEventError;

    /// Connect to Hyprland's event socket and forward window events.
    ///
    /// This method **blocks** until the socket closes.  Run it on a
    /// dedicated thread.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error> {
        let path = hypr_socket(".socket2.sock").map_err(HyprlandEventError)?;
        let stream = UnixStream::connect(&path)
            .map_err(|e| HyprlandEventError(format!("connect to {}: {}", path.display(), e)))?;
        info!("event source connected to {}", path.display());

        for line in BufReader::new(stream).lines() {
            match line {
                Ok(line) if line.is_empty() => continue,
                Ok(line) => {
                    let Some((event, data)) = parse_event_line(&line) else {
                        continue;
                    };
                    if let Some(cmd) = command_for_event(event, data) {
                        debug!("event {:?}", cmd);
                        if sink.send(cmd).is_err() {
                            info!("sink closed, shutting down");
                            return Ok(());
                        }
                    }
                }
                Err(e) => {
                    error!("socket2 read error: {}", e);
                    return Err(HyprlandEventError(format!("read error: {}", e)));
                }
            }
        }

        warn!("socket2 stream ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_event_line_valid() {
        assert_eq!(
            parse_event_line("openwindow>>55d0,2,kitty,~"),
            Some(("openwindow", "55d0,2,kitty,~"))
        );
        assert_eq!(parse_event_line("garbage"), None);
    }

    #[test]
    fn openwindow_becomes_window_opened() {
        let cmd = command_for_event("openwindow", "55d0a1,3,slack,Slack | general");
        assert_eq!(
            cmd,
            Some(Command::WindowOpened {
                address: "0x55d0a1".into(),
                class: "slack".into(),
                title: "Slack | general".into(),
            })
        );
    }

    #[test]
    fn title_keeps_commas() {
        let cmd = command_for_event("openwindow", "abc,1,brave-browser,a, b, c").unwrap();
        match cmd {
            Command::WindowOpened { title, .. } => assert_eq!(title, "a, b, c"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn prefixed_address_is_kept() {
        let cmd = command_for_event("openwindow", "0xabc,1,kitty,t").unwrap();
        assert!(matches!(cmd, Command::WindowOpened { address, .. } if address == "0xabc"));
    }

    #[test]
    fn short_or_other_events_ignored() {
        assert_eq!(command_for_event("openwindow", "abc,1"), None);
        assert_eq!(command_for_event("openwindow", ",1,kitty,t"), None);
        assert_eq!(command_for_event("workspace", "2"), None);
        assert_eq!(command_for_event("activewindow", "kitty,~"), None);
    }
}
