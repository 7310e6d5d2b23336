//! IPC listener that accepts commands over a Unix socket.
//!
//! Compositor key binds, scripts and the Hyprland bind lines printed by
//! `--print-bindings` connect to the socket and send newline-delimited JSON
//! commands.

pub mod listener;
