//! Core traits that decouple grprouter from any specific window manager or
//! transport mechanism.
//!
//! Every concrete backend (Hyprland, a Unix-socket listener, a test harness,
//! …) implements one of these traits.  The [`ScreenRouter`](crate::router::ScreenRouter)
//! and [`Dispatcher`](crate::dispatcher::Dispatcher) only depend on these
//! abstractions.

use crate::command::{Command, ScreenInfo, WindowInfo};
use std::sync::mpsc;

/// Abstraction over the window-manager runtime that owns screens, groups
/// and windows.
///
/// All focus and placement state lives behind this trait.  The router never
/// keeps a copy of it; every operation receives the handle explicitly.
pub trait WindowManager {
    /// The error type produced by this window manager.
    type Error: std::error::Error + Send + 'static;

    /// Return the screens the window manager knows about.
    fn screens(&self) -> Result<Vec<ScreenInfo>, Self::Error>;

    /// Give input focus to the screen at `index`.
    ///
    /// Fails if no attached screen has that index.
    fn focus_screen(&self, index: usize) -> Result<(), Self::Error>;

    /// Show group `name` on the currently focused screen.
    fn activate_group(&self, name: &str) -> Result<(), Self::Error>;

    /// Return the currently focused window, or `None` if no window has focus.
    fn current_window(&self) -> Result<Option<WindowInfo>, Self::Error>;

    /// Make `window` a member of group `name`.
    ///
    /// With `switch_active_group == false` the visible group stays as it is.
    fn reassign_window_group(
        &self,
        window: &WindowInfo,
        name: &str,
        switch_active_group: bool,
    ) -> Result<(), Self::Error>;
}

//  Command Source

/// A source of [`Command`]s.
///
/// Implementations listen on some transport — a Unix socket, Hyprland's
/// event stream, an in-memory channel, … — and forward parsed commands
/// into the provided [`mpsc::Sender`].
///
/// # Contract
///
/// * [`run`](CommandSource::run) **blocks** until the source is exhausted or
///   an unrecoverable error occurs.
/// * Each received command must be sent through `sink` exactly once.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait CommandSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start listening and forward every incoming [`Command`] into `sink`.
    ///
    /// This method blocks the calling thread.  To run multiple sources
    /// concurrently, spawn each one on its own thread.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error>;
}
