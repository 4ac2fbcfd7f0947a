//! Session-scoped user profile.

use serde::{Deserialize, Serialize};

/// Upper bound accepted for a user-entered age.
pub const MAX_AGE: u32 = 120;

/// Age assumed when the profile carries none.
pub const DEFAULT_AGE: u32 = 30;

/// The user's self-reported profile for one session.
///
/// Created with defaults at session start, mutated by user input and
/// discarded with the session. Nothing here is ever persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    /// Free text, comma or space separated condition mentions.
    pub conditions: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Guest".to_string(),
            age: DEFAULT_AGE,
            conditions: String::new(),
        }
    }
}

impl UserProfile {
    /// Set the age from user input, clamping to `0..=MAX_AGE`.
    pub fn set_age(&mut self, age: u32) {
        self.age = age.min(MAX_AGE);
    }

    /// The age to report to external services; a zero age falls back to
    /// `DEFAULT_AGE`.
    pub fn effective_age(&self) -> u32 {
        if self.age == 0 {
            DEFAULT_AGE
        } else {
            self.age
        }
    }
}
