//! Bounded most-recently-used roster of composers.

/// Default number of composers kept active at once.
pub const DEFAULT_CAPACITY: usize = 5;

/// Result of a [`ActiveRoster::touch`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchOutcome {
    /// Membership after the touch, most-recently-used first.
    pub members: Vec<String>,
    /// The composer that fell off the end, if the roster was full.
    pub evicted: Option<String>,
}

/// A capacity-bounded, most-recently-used-ordered set of composer ids.
///
/// Pure policy object: no persistence, no knowledge of conversations.
/// Invariants after every mutation: no duplicate ids, `len() <= capacity`.
///
/// Recency is defined purely by `touch` call order. Callers touch exactly
/// once per user-authored message send, never on view, so merely reading an
/// old chat cannot resurrect it and evict a genuinely active one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRoster {
    members: Vec<String>,
    capacity: usize,
}

impl ActiveRoster {
    /// Creates an empty roster. A capacity of zero is clamped to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            members: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Rebuilds a roster from persisted members.
    ///
    /// Persisted data is sanitized so the invariants hold even if the blob
    /// was written by older code or edited by hand: duplicates keep their
    /// first (most recent) occurrence, excess members are dropped from the
    /// least-recently-used end.
    pub fn from_members(members: Vec<String>, capacity: usize) -> Self {
        let mut roster = Self::new(capacity);
        for id in members {
            if !roster.members.contains(&id) && roster.members.len() < roster.capacity {
                roster.members.push(id);
            }
        }
        roster
    }

    /// Marks a composer most-recently-used, inserting it if absent.
    ///
    /// Insertion adds at most one element, so at most one member can be
    /// evicted per call.
    pub fn touch(&mut self, composer_id: &str) -> TouchOutcome {
        if let Some(position) = self.members.iter().position(|m| m == composer_id) {
            self.members.remove(position);
        }
        self.members.insert(0, composer_id.to_string());

        let evicted = if self.members.len() > self.capacity {
            self.members.pop()
        } else {
            None
        };

        TouchOutcome {
            members: self.members.clone(),
            evicted,
        }
    }

    /// Removes a composer if present; no-op otherwise.
    pub fn remove(&mut self, composer_id: &str) -> bool {
        match self.members.iter().position(|m| m == composer_id) {
            Some(position) => {
                self.members.remove(position);
                true
            }
            None => false,
        }
    }

    /// Empties the roster.
    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Current membership, most-recently-used first.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn contains(&self, composer_id: &str) -> bool {
        self.members.iter().any(|m| m == composer_id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ActiveRoster {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
