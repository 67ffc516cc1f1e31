//! Session commands and the keys that trigger them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_DIGIT_LABEL;
use crate::geometry::Point;
use crate::model::Label;

/// Everything the operator can ask a session to do.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Drop pending clicks and boxes and restart from the first image
    Clear,
    /// Attach a label to the two pending clicks
    AssignLabel(Label),
    /// Commit the current image's boxes and move to the next image
    Advance,
    /// Write prior and session annotations to the output table
    Save,
    /// End the session without saving
    Quit,
    /// Add a corner click, in image pixel coordinates
    RegisterClick(Point),
}

impl Command {
    /// Name shown on the status line after the command runs.
    pub fn name(&self) -> String {
        match self {
            Command::Clear => "Clear".to_string(),
            Command::AssignLabel(label) => format!("Assign {label}"),
            Command::Advance => "Done&Next".to_string(),
            Command::Save => "Save".to_string(),
            Command::Quit => "Quit".to_string(),
            Command::RegisterClick(_) => "Click".to_string(),
        }
    }

    /// Whether running this command updates the status line.
    pub fn updates_status(&self) -> bool {
        !matches!(self, Command::RegisterClick(_))
    }
}

/// Keyboard keys understood by the key binding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    /// A printable character, stored lowercase
    Char(char),
    Space,
    Escape,
    Enter,
    Tab,
    Backspace,
}

impl Key {
    /// Digit keys `0`-`9`.
    pub fn digit(value: u32) -> Option<Key> {
        char::from_digit(value, 10).map(Key::Char)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::Space => f.write_str("space"),
            Key::Escape => f.write_str("escape"),
            Key::Enter => f.write_str("enter"),
            Key::Tab => f.write_str("tab"),
            Key::Backspace => f.write_str("backspace"),
        }
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "space" => return Ok(Key::Space),
            "escape" | "esc" => return Ok(Key::Escape),
            "enter" | "return" => return Ok(Key::Enter),
            "tab" => return Ok(Key::Tab),
            "backspace" => return Ok(Key::Backspace),
            _ => {}
        }

        let mut chars = lower.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() => Ok(Key::Char(c)),
            _ => Err(format!("unknown key '{s}'")),
        }
    }
}

impl TryFrom<String> for Key {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

/// A single key to command mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: Key,
    pub command: Command,
}

/// Key binding table used by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    bindings: Vec<KeyBinding>,
}

impl Default for KeyBindings {
    /// Space commits, `c` clears, Escape saves and digits assign labels.
    fn default() -> Self {
        let mut bindings = vec![
            KeyBinding {
                key: Key::Space,
                command: Command::Advance,
            },
            KeyBinding {
                key: Key::Char('c'),
                command: Command::Clear,
            },
            KeyBinding {
                key: Key::Escape,
                command: Command::Save,
            },
        ];

        for label in 0..=MAX_DIGIT_LABEL {
            if let Some(key) = Key::digit(label) {
                bindings.push(KeyBinding {
                    key,
                    command: Command::AssignLabel(label),
                });
            }
        }

        Self { bindings }
    }
}

impl KeyBindings {
    /// Create keybindings with the default table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from explicit bindings. Later entries for the same key win.
    pub fn from_bindings(bindings: Vec<KeyBinding>) -> Self {
        Self { bindings }
    }

    /// Get the command a key press maps to, if any.
    pub fn command_for_key(&self, key: Key) -> Option<Command> {
        self.bindings
            .iter()
            .rev()
            .find(|binding| binding.key == key)
            .map(|binding| binding.command)
    }

    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }
}
