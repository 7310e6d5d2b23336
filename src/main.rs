//! Entry point for the **grprouter** daemon.
//!
//! Spawns the command sources on background threads and processes incoming
//! commands one at a time on the main thread.
//!
//! Run with `--help` for the flags.

use grprouter::command::Command;
use grprouter::config::Config;
use grprouter::dispatcher::Dispatcher;
use grprouter::hyprland::binds::bind_lines;
use grprouter::hyprland::events::HyprlandEventSource;
use grprouter::hyprland::wm::HyprlandWm;
use grprouter::ipc::listener::UnixSocketListener;
use grprouter::traits::{CommandSource, WindowManager};
use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::mpsc;

/// Default socket path for the command listener.
fn default_socket_path() -> String {
    let runtime = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".into());
    format!("{}/grprouter.sock", runtime)
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/grprouter`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("grprouter")
}

/// Pins tiling-WM groups to fixed monitors on a two-screen Hyprland setup.
#[derive(Debug, Parser)]
#[command(name = "grprouter", version)]
struct Args {
    /// Config file (default `$XDG_CONFIG_HOME/grprouter/config.json`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Command socket path.
    #[arg(long, default_value_t = default_socket_path())]
    socket: String,

    /// Print Hyprland `bind` lines for the group chords and exit.
    #[arg(long)]
    print_bindings: bool,

    /// Do not follow Hyprland's event socket (disables window rules).
    #[arg(long)]
    no_events: bool,
}

/// Load the config from `path` (or the default location).
///
/// A missing default file means compiled-in defaults.  Anything else that
/// goes wrong, including a broken default file, is fatal.
fn load_config(path: Option<&PathBuf>) -> Config {
    let (path, loaded) = match path {
        Some(path) => (path.clone(), Config::load(path)),
        None => {
            let path = config_dir().join("config.json");
            let loaded = Config::load_or_default(&path);
            (path, loaded)
        }
    };
    match loaded {
        Ok(cfg) => {
            if path.exists() {
                info!("loaded config from {}", path.display());
            }
            cfg
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

//  Main

fn main() {
    env_logger::init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref());

    let dispatcher = match Dispatcher::from_config(&config) {
        Ok(d) => d,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if args.print_bindings {
        print!("{}", bind_lines(dispatcher.bindings(), &args.socket));
        return;
    }

    let wm = HyprlandWm::new();
    match wm.screens() {
        Ok(screens) => {
            info!("found {} screen(s)", screens.len());
            let router = dispatcher.router();
            for screen in [router.partition().main_screen(), router.partition().secondary_screen()] {
                if !screens.iter().any(|s| s.index == screen) {
                    warn!("screen {} is not attached; groups routed there will fail", screen);
                }
            }
        }
        Err(e) => {
            error!("failed to query screens: {}", e);
            std::process::exit(1);
        }
    }

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    spawn_command_sources(cmd_tx, &args);

    info!("grprouter running");
    for cmd in cmd_rx {
        if let Err(e) = dispatcher.handle(&wm, cmd) {
            error!("command error: {}", e);
        }
    }
    info!("all command sources closed, exiting");
}

//  Helpers

fn spawn_command_sources(tx: mpsc::Sender<Command>, args: &Args) {
    {
        let tx = tx.clone();
        let path = args.socket.clone();
        std::thread::spawn(move || {
            let mut source = UnixSocketListener::new(&path);
            if let Err(e) = source.run(tx) {
                error!("socket listener error: {}", e);
            }
        });
    }

    if !args.no_events {
        let tx = tx.clone();
        std::thread::spawn(move || {
            let mut source = HyprlandEventSource::new();
            if let Err(e) = source.run(tx) {
                error!("event source error: {}", e);
            }
        });
    }

    drop(tx);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_parse() {
        let args = Args::try_parse_from([
            "grprouter",
            "--config",
            "/etc/grprouter.json",
            "--socket",
            "/run/g.sock",
            "--no-events",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/etc/grprouter.json")));
        assert_eq!(args.socket, "/run/g.sock");
        assert!(args.no_events);
        assert!(!args.print_bindings);
    }

    #[test]
    fn defaults_and_unknown_flags() {
        let args = Args::try_parse_from(["grprouter"]).unwrap();
        assert_eq!(args.socket, default_socket_path());
        assert!(args.config.is_none());
        assert!(!args.no_events);

        assert!(Args::try_parse_from(["grprouter", "--bogus"]).is_err());
    }
}
