//! Window rules: send newly opened windows to a group.
//!
//! A rule matches a window by exact title or exact class.  The first
//! matching rule wins.  Applying a rule moves the window silently: the
//! visible group and the focused screen stay as they are.

use crate::command::WindowInfo;
use crate::group::Group;
use crate::traits::WindowManager;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// What a rule compares against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Matcher {
    Title(String),
    Class(String),
}

impl Matcher {
    pub fn matches(&self, window: &WindowInfo) -> bool {
        match self {
            Matcher::Title(t) => window.title == *t,
            Matcher::Class(c) => window.class == *c,
        }
    }
}

/// A single `matcher → group` rule.
///
/// On the wire: `{"match": {"title": "cursor"}, "group": "3"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRule {
    #[serde(rename = "match")]
    pub matcher: Matcher,
    pub group: String,
}

impl WindowRule {
    pub fn title(title: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            matcher: Matcher::Title(title.into()),
            group: group.into(),
        }
    }

    pub fn class(class: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            matcher: Matcher::Class(class.into()),
            group: group.into(),
        }
    }
}

/// Ordered rule list.
#[derive(Debug, Clone, Default)]
pub struct WindowRules {
    rules: Vec<WindowRule>,
}

impl WindowRules {
    /// Explicit rules first, then one class rule per entry in each group's
    /// `matches` list.
    pub fn new(explicit: &[WindowRule], groups: &[Group]) -> Self {
        let from_groups = groups.iter().flat_map(|g| {
            g.matches
                .iter()
                .map(move |class| WindowRule::class(class.clone(), g.name.clone()))
        });
        Self {
            rules: explicit.iter().cloned().chain(from_groups).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Group the first matching rule names, if any.
    pub fn target_for(&self, window: &WindowInfo) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.matcher.matches(window))
            .map(|r| r.group.as_str())
    }

    /// Move `window` to its rule's group without switching groups.
    ///
    /// Returns the group it was sent to.
    pub fn apply<W: WindowManager>(
        &self,
        wm: &W,
        window: &WindowInfo,
    ) -> Result<Option<String>, W::Error> {
        match self.target_for(window) {
            Some(group) => {
                info!(
                    "window {} ({} / {:?}) -> group {}",
                    window.address, window.class, window.title, group
                );
                wm.reassign_window_group(window, group, false)?;
                Ok(Some(group.to_string()))
            }
            None => {
                debug!("no rule for window {} ({})", window.address, window.class);
                Ok(None)
            }
        }
    }
}
