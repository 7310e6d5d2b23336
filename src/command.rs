//! Commands and types used throughout grprouter.
//!
//! This module defines the vocabulary that all components share:
//! [`Command`] describes every request the daemon can act on, and
//! [`ScreenInfo`] / [`WindowInfo`] describe what the window manager reports
//! back.
//!
//! Key chords arrive as plain strings (e.g. `"alt+shift+3"`) and are parsed
//! by the daemon, see [`Chord`](crate::bindings::Chord).

use crate::bindings::Chord;
use serde::{Deserialize, Serialize};

/// Every request the [`Dispatcher`](crate::dispatcher::Dispatcher) handles.
///
/// Commands are produced by [`CommandSource`](crate::traits::CommandSource)
/// implementations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// A key chord was pressed; resolved through the binding table.
    Key(Chord),

    /// Show group `G` on the screen its affinity names, focusing that screen.
    GoToGroup(String),

    /// Move the focused window to group `G`, then route to `G` like
    /// [`GoToGroup`](Command::GoToGroup).
    MoveWindowToGroup(String),

    /// A new window was mapped by the window manager.
    ///
    /// Window rules decide whether it gets sent to a group.
    WindowOpened {
        address: String,
        class: String,
        title: String,
    },
}

/// Static information about a screen known to the window manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenInfo {
    /// Index the router uses to address this screen.
    pub index: usize,
    /// Connector name (e.g. `"DP-1"`).
    pub name: String,
    /// Whether the screen currently has input focus.
    pub focused: bool,
}

/// Minimal information about a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    /// Window manager address / id.
    pub address: String,
    /// Window class (`wm_class` on X11, `class` on Hyprland).
    pub class: String,
    /// Human-readable title.
    pub title: String,
}
