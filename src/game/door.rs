use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    pub opened: bool,
    pub has_prize: bool,
    pub picked: bool,
}

impl Door {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prize() -> Self {
        Self {
            has_prize: true,
            ..Self::default()
        }
    }

    pub fn is_closed(&self) -> bool {
        !self.opened
    }
}

impl fmt::Display for Door {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.picked { ">>> " } else { "    " };
        let face = match (self.opened, self.has_prize) {
            (false, _) => "🚪",
            (true, true) => "🚗 The car!!!",
            (true, false) => "🐐 A goat",
        };
        write!(f, "{}{}", marker, face)
    }
}
