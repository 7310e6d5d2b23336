//! Key chords and the static group binding table.
//!
//! For every group `G` two chords are bound when the daemon starts:
//!
//! | Chord              | Action                         |
//! |--------------------|--------------------------------|
//! | `<mod>+G`          | [`Action::GoToGroup`]          |
//! | `<mod>+shift+G`    | [`Action::MoveWindowToGroup`]  |
//!
//! The table is built once from the group list and only read afterwards.
//! Chords travel over the wire as strings such as `"alt+shift+3"`.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A keyboard modifier.
///
/// Variants are ordered so that chords render in a stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Super,
    Ctrl,
    Alt,
    Shift,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Super => write!(f, "super"),
            Modifier::Ctrl => write!(f, "ctrl"),
            Modifier::Alt => write!(f, "alt"),
            Modifier::Shift => write!(f, "shift"),
        }
    }
}

impl FromStr for Modifier {
    type Err = ChordParseError;

    /// Accepts X11-style aliases (`mod1` = alt, `mod4` = super).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "super" | "mod4" | "win" | "logo" => Ok(Modifier::Super),
            "ctrl" | "control" => Ok(Modifier::Ctrl),
            "alt" | "mod1" => Ok(Modifier::Alt),
            "shift" => Ok(Modifier::Shift),
            other => Err(ChordParseError::UnknownModifier(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Modifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(DeError::custom)
    }
}

impl Serialize for Modifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Error from parsing a chord or modifier string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChordParseError {
    #[error("empty chord")]
    Empty,
    #[error("unknown modifier: {0:?}")]
    UnknownModifier(String),
}

/// Error from building the binding table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    #[error("group name {0:?} cannot be used as a key")]
    UnusableKey(String),
    #[error("chord {chord} would both {first} and {second}")]
    Collision {
        chord: Chord,
        first: Action,
        second: Action,
    },
}

/// Characters that cannot appear in a group name bound as a key.
///
/// `+` separates chord parts, `,` separates Hyprland dispatcher arguments,
/// and quotes or backslashes would break the generated `bind` lines.
const RESERVED_KEY_CHARS: [char; 5] = ['+', ',', '\'', '"', '\\'];

/// Check that `name` survives the trip through a chord string.
pub fn validate_key(name: &str) -> Result<(), BindingError> {
    let bad = name.is_empty()
        || name
            .chars()
            .any(|c| c.is_whitespace() || RESERVED_KEY_CHARS.contains(&c));
    if bad {
        Err(BindingError::UnusableKey(name.to_string()))
    } else {
        Ok(())
    }
}

/// A set of modifiers plus one key, e.g. `alt+shift+3`.
///
/// Modifiers are kept sorted and de-duplicated, and the key is lower-cased,
/// so `"Shift+ALT+3"` and `"alt+shift+3"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chord {
    modifiers: Vec<Modifier>,
    key: String,
}

impl Chord {
    pub fn new(modifiers: impl IntoIterator<Item = Modifier>, key: impl Into<String>) -> Self {
        let mut modifiers: Vec<Modifier> = modifiers.into_iter().collect();
        modifiers.sort();
        modifiers.dedup();
        Self {
            modifiers,
            key: key.into().to_lowercase(),
        }
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.modifiers {
            write!(f, "{}+", m)?;
        }
        write!(f, "{}", self.key)
    }
}

impl FromStr for Chord {
    type Err = ChordParseError;

    /// The last `+`-separated part is the key, everything before it a
    /// modifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let key = match parts.pop() {
            Some(k) if !k.is_empty() => k,
            _ => return Err(ChordParseError::Empty),
        };
        let modifiers = parts
            .into_iter()
            .map(str::parse)
            .collect::<Result<Vec<Modifier>, _>>()?;
        Ok(Chord::new(modifiers, key))
    }
}

impl<'de> Deserialize<'de> for Chord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|e| DeError::custom(format!("invalid chord {:?}: {}", s, e)))
    }
}

impl Serialize for Chord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What a bound chord does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    GoToGroup(String),
    MoveWindowToGroup(String),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::GoToGroup(g) => write!(f, "switch to group {}", g),
            Action::MoveWindowToGroup(g) => write!(f, "move window to group {}", g),
        }
    }
}

/// Chord → action table.
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    /// Registration order, for listing.
    order: Vec<Chord>,
    actions: HashMap<Chord, Action>,
}

impl BindingTable {
    /// Register the two group chords for every name in `groups`.
    ///
    /// Fails if a name cannot be written as a key, or if two bindings end up
    /// on the same chord (names differing only in case, or `shift` as the
    /// group modifier).
    pub fn build<'a>(
        groups: impl IntoIterator<Item = &'a str>,
        modifier: Modifier,
    ) -> Result<Self, BindingError> {
        let mut table = Self::default();
        for name in groups {
            validate_key(name)?;
            table.insert(
                Chord::new([modifier], name),
                Action::GoToGroup(name.to_string()),
            )?;
            table.insert(
                Chord::new([modifier, Modifier::Shift], name),
                Action::MoveWindowToGroup(name.to_string()),
            )?;
        }
        Ok(table)
    }

    fn insert(&mut self, chord: Chord, action: Action) -> Result<(), BindingError> {
        if let Some(first) = self.actions.get(&chord) {
            return Err(BindingError::Collision {
                chord,
                first: first.clone(),
                second: action,
            });
        }
        self.actions.insert(chord.clone(), action);
        self.order.push(chord);
        Ok(())
    }

    pub fn lookup(&self, chord: &Chord) -> Option<&Action> {
        self.actions.get(chord)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Bindings in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Chord, &Action)> {
        self.order
            .iter()
            .filter_map(|c| self.actions.get(c).map(|a| (c, a)))
    }
}
