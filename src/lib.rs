//! **grprouter** — pins tiling-WM groups to fixed monitors.
//!
//! Every group (workspace) has a screen affinity.  Asking for group `G`
//! focuses the screen `G` belongs to and shows `G` there, no matter which
//! screen had focus before.  Moving a window to `G` reassigns the window
//! first and then does the same.
//!
//! # Architecture
//!
//! The crate is organised around two core traits:
//!
//! * [`traits::WindowManager`] — the runtime that owns screens, groups and
//!   windows.  The [`router::ScreenRouter`] only decides *which* screen and
//!   issues calls through this trait.
//! * [`traits::CommandSource`] — abstracts the transport that delivers
//!   user intent (a Unix socket, the compositor's event stream, …).
//!
//! [`dispatcher::Dispatcher`] sits between the two: it resolves key chords
//! through the static [`bindings::BindingTable`], applies
//! [`rules::WindowRules`] to new windows and hands known group names to the
//! router.
//!
//! Concrete implementations live in [`hyprland`] (Hyprland IPC) and
//! [`ipc`] (Unix-socket command listener).

pub mod bindings;
pub mod command;
pub mod config;
pub mod dispatcher;
pub mod group;
pub mod hyprland;
pub mod ipc;
pub mod router;
pub mod rules;
pub mod traits;

#[cfg(test)]
mod mock;
