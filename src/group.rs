//! Groups and the screen-affinity partition.
//!
//! A [`Group`] is a named workspace.  The [`AffinityPartition`] splits all
//! known group names into *main-screen* groups and *secondary-screen*
//! groups.  It is built once from the configuration and offers no way to
//! change it afterwards; a different partition means a config reload.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A logical workspace.
///
/// Only `name` and `screen_affinity` matter for routing.  `layout` and
/// `label` are passed through for the window manager's own use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    /// Index of the screen this group prefers.
    pub screen_affinity: usize,
    #[serde(default)]
    pub layout: String,
    #[serde(default)]
    pub label: String,
    /// Window classes that are sent to this group when they open.
    #[serde(default)]
    pub matches: Vec<String>,
}

impl Group {
    pub fn new(name: impl Into<String>, screen_affinity: usize) -> Self {
        Self {
            name: name.into(),
            screen_affinity,
            layout: String::new(),
            label: String::new(),
            matches: Vec::new(),
        }
    }

    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = layout.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_matches(mut self, classes: &[&str]) -> Self {
        self.matches = classes.iter().map(|c| c.to_string()).collect();
        self
    }
}

/// Static split of the group names between the two screens.
///
/// Only the main subset is stored; the secondary subset is everything else
/// in `all`, so every known name lands in exactly one of the two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffinityPartition {
    main_screen: usize,
    secondary_screen: usize,
    /// All known group names, in declaration order.
    all: Vec<String>,
    main: HashSet<String>,
}

impl AffinityPartition {
    /// Build a partition from the names that belong on the main screen.
    ///
    /// `main_names` entries that are not in `all` are kept out of the
    /// partition; [`Config::partition`](crate::config::Config::partition)
    /// rejects such configs before this point.
    pub fn new<I, S>(main_screen: usize, secondary_screen: usize, all: Vec<String>, main_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let main = main_names
            .into_iter()
            .map(Into::into)
            .filter(|n: &String| all.contains(n))
            .collect();
        Self {
            main_screen,
            secondary_screen,
            all,
            main,
        }
    }

    /// Build a partition from each group's own `screen_affinity`.
    pub fn from_groups(groups: &[Group], main_screen: usize, secondary_screen: usize) -> Self {
        let all = groups.iter().map(|g| g.name.clone()).collect();
        let main = groups
            .iter()
            .filter(|g| g.screen_affinity == main_screen)
            .map(|g| g.name.clone());
        Self::new(main_screen, secondary_screen, all, main)
    }

    pub fn main_screen(&self) -> usize {
        self.main_screen
    }

    pub fn secondary_screen(&self) -> usize {
        self.secondary_screen
    }

    /// Whether `name` belongs to the main-screen subset.
    pub fn is_main(&self, name: &str) -> bool {
        self.main.contains(name)
    }

    /// Whether `name` is a known group.
    pub fn contains(&self, name: &str) -> bool {
        self.all.iter().any(|n| n == name)
    }

    /// Screen index that `name` is routed to.
    ///
    /// Anything outside the main subset goes to the secondary screen.
    pub fn screen_for(&self, name: &str) -> usize {
        if self.is_main(name) {
            self.main_screen
        } else {
            self.secondary_screen
        }
    }

    /// Main-screen group names, in declaration order.
    pub fn main_groups(&self) -> impl Iterator<Item = &str> {
        self.all
            .iter()
            .filter(|n| self.main.contains(n.as_str()))
            .map(String::as_str)
    }

    /// Secondary-screen group names, in declaration order.
    pub fn secondary_groups(&self) -> impl Iterator<Item = &str> {
        self.all
            .iter()
            .filter(|n| !self.main.contains(n.as_str()))
            .map(String::as_str)
    }

    /// All known group names, in declaration order.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.all.iter().map(String::as_str)
    }
}
