//! Turns incoming [`Command`]s into router and rule calls.
//!
//! The [`Dispatcher`] is the only caller of the [`ScreenRouter`]: it owns
//! the binding table and the window rules, and it makes sure the router is
//! only ever handed group names from the configured group list.

use crate::bindings::{Action, BindingTable};
use crate::command::{Command, WindowInfo};
use crate::config::{Config, ConfigError};
use crate::router::ScreenRouter;
use crate::rules::WindowRules;
use crate::traits::WindowManager;
use log::{debug, info, warn};

/// Possible errors from handling a command.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The window manager returned an error.
    #[error("window manager error: {0}")]
    WindowManager(String),

    /// A direct group command named a group that is not configured.
    #[error("unknown group {0:?}")]
    UnknownGroup(String),
}

/// Resolves commands against the static configuration.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    router: ScreenRouter,
    bindings: BindingTable,
    rules: WindowRules,
}

impl Dispatcher {
    pub fn new(router: ScreenRouter, bindings: BindingTable, rules: WindowRules) -> Self {
        Self {
            router,
            bindings,
            rules,
        }
    }

    /// Validate `config` and build the router, bindings and rules from it.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let partition = config.partition()?;
        let bindings = BindingTable::build(partition.groups(), config.modifier)?;
        let rules = WindowRules::new(&config.window_rules, &config.groups);
        info!(
            "{} groups ({} on screen {}), {} bindings, {} window rules",
            partition.groups().count(),
            partition.main_groups().count(),
            partition.main_screen(),
            bindings.len(),
            rules.len()
        );
        Ok(Self::new(ScreenRouter::new(partition), bindings, rules))
    }

    pub fn router(&self) -> &ScreenRouter {
        &self.router
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    /// Process a single [`Command`] against `wm`.
    ///
    /// Unbound chords and windows without a matching rule are ignored.
    /// Window-manager failures are reported, never retried.
    pub fn handle<W: WindowManager>(&self, wm: &W, cmd: Command) -> Result<(), DispatchError> {
        match cmd {
            Command::Key(chord) => match self.bindings.lookup(&chord) {
                Some(action) => {
                    debug!("{} -> {}", chord, action);
                    self.run_action(wm, action)
                }
                None => {
                    debug!("no binding for {}", chord);
                    Ok(())
                }
            },

            Command::GoToGroup(name) => {
                self.check_known(&name)?;
                self.run_action(wm, &Action::GoToGroup(name))
            }

            Command::MoveWindowToGroup(name) => {
                self.check_known(&name)?;
                self.run_action(wm, &Action::MoveWindowToGroup(name))
            }

            Command::WindowOpened {
                address,
                class,
                title,
            } => {
                let window = WindowInfo {
                    address,
                    class,
                    title,
                };
                self.rules
                    .apply(wm, &window)
                    .map(|_| ())
                    .map_err(|e| DispatchError::WindowManager(e.to_string()))
            }
        }
    }

    fn check_known(&self, name: &str) -> Result<(), DispatchError> {
        if self.router.partition().contains(name) {
            Ok(())
        } else {
            warn!("ignoring request for unknown group {:?}", name);
            Err(DispatchError::UnknownGroup(name.to_string()))
        }
    }

    fn run_action<W: WindowManager>(&self, wm: &W, action: &Action) -> Result<(), DispatchError> {
        let res = match action {
            Action::GoToGroup(name) => self.router.route_to_group(wm, name),
            Action::MoveWindowToGroup(name) => self.router.route_to_group_with_window(wm, name),
        };
        res.map_err(|e| DispatchError::WindowManager(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Call, RecorderWm};

    fn dispatcher() -> Dispatcher {
        Dispatcher::from_config(&Config::default()).unwrap()
    }

    fn key(s: &str) -> Command {
        Command::Key(s.parse().unwrap())
    }

    #[test]
    fn mod_digit_switches_group() {
        let d = dispatcher();
        let wm = RecorderWm::default();
        d.handle(&wm, key("alt+3")).unwrap();
        assert_eq!(
            wm.calls(),
            [Call::FocusScreen(1), Call::ActivateGroup("3".into())]
        );
    }

    #[test]
    fn mod_shift_digit_moves_window() {
        let d = dispatcher();
        let wm = RecorderWm::with_window("0xw");
        d.handle(&wm, key("alt+shift+6")).unwrap();
        assert_eq!(wm.group_of("0xw").as_deref(), Some("6"));
        assert_eq!(wm.focused_screen(), 0);
        assert_eq!(wm.visible_on(0).as_deref(), Some("6"));
    }

    #[test]
    fn unbound_chord_is_ignored() {
        let d = dispatcher();
        let wm = RecorderWm::default();
        d.handle(&wm, key("super+3")).unwrap();
        d.handle(&wm, key("alt+9")).unwrap();
        assert!(wm.calls().is_empty());
    }

    #[test]
    fn direct_commands_route() {
        let d = dispatcher();
        let wm = RecorderWm::with_window("0xw");
        d.handle(&wm, Command::GoToGroup("7".into())).unwrap();
        assert_eq!(wm.visible_on(0).as_deref(), Some("7"));
        d.handle(&wm, Command::MoveWindowToGroup("2".into())).unwrap();
        assert_eq!(wm.group_of("0xw").as_deref(), Some("2"));
        assert_eq!(wm.visible_on(1).as_deref(), Some("2"));
    }

    #[test]
    fn unknown_group_never_reaches_router() {
        let d = dispatcher();
        let wm = RecorderWm::with_window("0xw");
        let err = d.handle(&wm, Command::GoToGroup("12".into())).unwrap_err();
        assert!(matches!(err, DispatchError::UnknownGroup(g) if g == "12"));
        let err = d
            .handle(&wm, Command::MoveWindowToGroup("".into()))
            .unwrap_err();
        assert!(matches!(err, DispatchError::UnknownGroup(_)));
        assert!(wm.calls().is_empty());
    }

    #[test]
    fn window_opened_applies_rules() {
        let d = dispatcher();
        let wm = RecorderWm::default();
        d.handle(
            &wm,
            Command::WindowOpened {
                address: "0xs".into(),
                class: "slack".into(),
                title: "Slack | general".into(),
            },
        )
        .unwrap();
        assert_eq!(wm.group_of("0xs").as_deref(), Some("5"));
        assert!(wm
            .calls()
            .iter()
            .all(|c| !matches!(c, Call::FocusScreen(_) | Call::ActivateGroup(_))));
    }

    #[test]
    fn runtime_error_is_reported() {
        let d = Dispatcher::from_config(&Config {
            main_screen: 4,
            groups: vec![crate::group::Group::new("1", 4)],
            window_rules: vec![],
            ..Config::default()
        })
        .unwrap();
        let wm = RecorderWm::default();
        let err = d.handle(&wm, key("alt+1")).unwrap_err();
        assert!(matches!(err, DispatchError::WindowManager(msg) if msg.contains("no screen 4")));
    }

    #[test]
    fn bindings_follow_group_order() {
        let d = dispatcher();
        assert_eq!(d.bindings().len(), 14);
        let first: Vec<String> = d.bindings().iter().take(2).map(|(c, _)| c.to_string()).collect();
        assert_eq!(first, ["alt+1", "alt+shift+1"]);
    }

    #[test]
    fn move_without_focused_window_still_routes() {
        let d = dispatcher();
        let wm = RecorderWm::default();
        d.handle(&wm, Command::MoveWindowToGroup("6".into())).unwrap();
        assert_eq!(
            wm.calls(),
            [
                Call::CurrentWindow,
                Call::FocusScreen(0),
                Call::ActivateGroup("6".into())
            ]
        );
        assert!(wm.membership.borrow().is_empty());
    }

    #[test]
    fn colliding_bindings_are_rejected() {
        let shift = Config {
            modifier: crate::bindings::Modifier::Shift,
            ..Config::default()
        };
        assert!(Dispatcher::from_config(&shift).is_err());

        let cased = Config {
            groups: vec![
                crate::group::Group::new("A", 1),
                crate::group::Group::new("a", 0),
            ],
            window_rules: vec![],
            ..Config::default()
        };
        assert!(Dispatcher::from_config(&cased).is_err());
    }
}
