//! Composer profile boundary types.
//!
//! The composer catalog itself (names, portraits, search) lives outside this
//! core; these types are the slice of it the session layer consumes.

use serde::{Deserialize, Serialize};

/// Profile of a composer a conversation can be held with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerProfile {
    /// Stable string identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Musical era, e.g. "Baroque"
    pub era: String,
    /// Short characterization used to flavor generated replies
    pub style_notes: String,
}

impl ComposerProfile {
    /// Minimal profile for a composer the directory does not know.
    ///
    /// Keeps the session layer functional when the catalog and the stored
    /// conversations disagree (e.g. a composer was removed from the catalog
    /// after a chat with them was persisted).
    pub fn unknown(composer_id: impl Into<String>) -> Self {
        let id = composer_id.into();
        Self {
            name: id.clone(),
            id,
            era: String::new(),
            style_notes: String::new(),
        }
    }

    /// Deterministic stand-in reply used when generation fails.
    ///
    /// This is regular transcript content, persisted like any other
    /// assistant message; raw generation errors never reach the transcript.
    pub fn placeholder_reply(&self) -> String {
        format!(
            "{} sets down the quill for a moment. \"Forgive me, my thoughts have \
             wandered to an unfinished score. Ask me once more and I shall answer properly.\"",
            self.name
        )
    }
}

/// Read-only access to composer profiles.
///
/// Implemented by the (excluded) catalog component; tests use a map.
pub trait ComposerDirectory: Send + Sync {
    /// Looks up a profile by composer id.
    fn profile(&self, composer_id: &str) -> Option<ComposerProfile>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_reply_is_deterministic_and_named() {
        let profile = ComposerProfile {
            id: "clara-schumann".to_string(),
            name: "Clara Schumann".to_string(),
            era: "Romantic".to_string(),
            style_notes: "lyrical, virtuosic".to_string(),
        };
        let first = profile.placeholder_reply();
        assert_eq!(first, profile.placeholder_reply());
        assert!(first.contains("Clara Schumann"));
    }

    #[test]
    fn unknown_profile_falls_back_to_the_id() {
        let profile = ComposerProfile::unknown("salieri");
        assert_eq!(profile.id, "salieri");
        assert_eq!(profile.name, "salieri");
        assert!(profile.placeholder_reply().contains("salieri"));
    }
}
