//! [`WindowManager`] implementation backed by Hyprland IPC.
//!
//! Communicates directly with Hyprland through its Unix socket at
//! `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`.
//!
//! Groups map to *named* Hyprland workspaces (`name:<group>`), and screen
//! indices map to Hyprland monitor ids.

use crate::command::{ScreenInfo, WindowInfo};
use crate::traits::WindowManager;
use log::debug;
use serde::Deserialize;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Hyprland-backed window manager.
///
/// No connection is held open; every call is a short-lived IPC request.
#[derive(Debug, Default)]
pub struct HyprlandWm;

/// Errors that can occur when talking to Hyprland.
#[derive(Debug, thiserror::Error)]
#[error("hyprland IPC error: {0}")]
pub struct HyprlandWmError(String);

impl HyprlandWm {
    pub fn new() -> Self {
        Self
    }
}

//  Direct Hyprland IPC helpers

/// Resolve a Hyprland socket path (`.socket.sock` or `.socket2.sock`).
pub(crate) fn hypr_socket(file: &str) -> Result<PathBuf, String> {
    let runtime_dir =
        std::env::var("XDG_RUNTIME_DIR").map_err(|_| "XDG_RUNTIME_DIR not set".to_string())?;
    let his = std::env::var("HYPRLAND_INSTANCE_SIGNATURE")
        .map_err(|_| "HYPRLAND_INSTANCE_SIGNATURE not set".to_string())?;
    Ok(PathBuf::from(format!("{}/hypr/{}/{}", runtime_dir, his, file)))
}

/// Send a raw command to the Hyprland command socket and return the
/// response as a string.
fn ipc_request(command: &str) -> Result<String, HyprlandWmError> {
    let path = hypr_socket(".socket.sock").map_err(HyprlandWmError)?;
    let mut stream = UnixStream::connect(&path)
        .map_err(|e| HyprlandWmError(format!("connect to {}: {}", path.display(), e)))?;

    stream
        .write_all(command.as_bytes())
        .map_err(|e| HyprlandWmError(format!("write: {}", e)))?;

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .map_err(|e| HyprlandWmError(format!("read: {}", e)))?;

    String::from_utf8(response).map_err(|e| HyprlandWmError(format!("utf-8: {}", e)))
}

/// Send a JSON data query (`j/<command>`) and return the raw JSON string.
fn ipc_json(data_command: &str) -> Result<String, HyprlandWmError> {
    ipc_request(&format!("j/{}", data_command))
}

/// Send a dispatch command and check for `"ok"`.
fn ipc_dispatch(args: &str) -> Result<(), HyprlandWmError> {
    debug!("dispatch {}", args);
    let response = ipc_request(&format!("/dispatch {}", args))?;
    if response.trim() == "ok" {
        Ok(())
    } else {
        Err(HyprlandWmError(format!("dispatch {:?}: {}", args, response.trim())))
    }
}

//  Minimal serde structs for the JSON we care about

/// Subset of the JSON object returned by `j/monitors`.
#[derive(Deserialize)]
struct MonitorJson {
    id: i64,
    name: String,
    #[serde(default)]
    focused: bool,
}

/// Subset of the JSON object returned by `j/activewindow`.
#[derive(Deserialize)]
struct ActiveWindowJson {
    address: String,
    #[serde(default)]
    class: String,
    #[serde(default)]
    title: String,
}

fn parse_monitors(json: &str) -> Result<Vec<ScreenInfo>, HyprlandWmError> {
    let monitors: Vec<MonitorJson> =
        serde_json::from_str(json).map_err(|e| HyprlandWmError(format!("parse: {}", e)))?;
    Ok(monitors
        .into_iter()
        .filter(|m| m.id >= 0)
        .map(|m| ScreenInfo {
            index: m.id as usize,
            name: m.name,
            focused: m.focused,
        })
        .collect())
}

/// Hyprland returns an empty object `{}` when no window is focused.
fn parse_active_window(json: &str) -> Result<Option<WindowInfo>, HyprlandWmError> {
    if json.trim() == "{}" || json.trim().is_empty() {
        return Ok(None);
    }
    let w: ActiveWindowJson =
        serde_json::from_str(json).map_err(|e| HyprlandWmError(format!("parse: {}", e)))?;
    Ok(Some(WindowInfo {
        address: w.address,
        class: w.class,
        title: w.title,
    }))
}

/// Dispatcher arguments for moving `address` to group `name`.
fn move_args(address: &str, name: &str, switch_active_group: bool) -> String {
    let dispatcher = if switch_active_group {
        "movetoworkspace"
    } else {
        "movetoworkspacesilent"
    };
    format!("{} name:{},address:{}", dispatcher, name, address)
}

//  WindowManager implementation

impl WindowManager for HyprlandWm {
    type Error = HyprlandWmError;

    fn screens(&self) -> Result<Vec<ScreenInfo>, Self::Error> {
        parse_monitors(&ipc_json("monitors")?)
    }

    fn focus_screen(&self, index: usize) -> Result<(), Self::Error> {
        // `focusmonitor` silently accepts unknown ids, so check first.
        let screens = self.screens()?;
        if !screens.iter().any(|s| s.index == index) {
            return Err(HyprlandWmError(format!(
                "no monitor with id {} (have {})",
                index,
                screens.len()
            )));
        }
        ipc_dispatch(&format!("focusmonitor {}", index))
    }

    fn activate_group(&self, name: &str) -> Result<(), Self::Error> {
        // Pulls the workspace onto the focused monitor instead of jumping to
        // wherever it was last shown.
        ipc_dispatch(&format!("focusworkspaceoncurrentmonitor name:{}", name))
    }

    fn current_window(&self) -> Result<Option<WindowInfo>, Self::Error> {
        parse_active_window(&ipc_json("activewindow")?)
    }

    fn reassign_window_group(
        &self,
        window: &WindowInfo,
        name: &str,
        switch_active_group: bool,
    ) -> Result<(), Self::Error> {
        ipc_dispatch(&move_args(&window.address, name, switch_active_group))
    }
}
