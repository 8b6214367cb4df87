use arrayvec::ArrayVec;

/// A player request for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
}

impl Intent {
    /// Number of intents (4).
    pub const LEN: usize = 4;

    /// All intents in processing order.
    pub const ALL: [Self; Self::LEN] = [
        Intent::MoveLeft,
        Intent::MoveRight,
        Intent::SoftDrop,
        Intent::Rotate,
    ];
}

/// The intents collected for a single tick, at most one of each.
///
/// Duplicates are dropped on insertion. Iteration always follows [`Intent::ALL`],
/// regardless of insertion order.
///
/// # Example
///
/// ```
/// use quadris_engine::{Intent, IntentSet};
///
/// let mut intents = IntentSet::new();
/// assert!(intents.insert(Intent::Rotate));
/// assert!(intents.insert(Intent::MoveLeft));
/// assert!(!intents.insert(Intent::Rotate));
///
/// let order: Vec<_> = intents.iter().collect();
/// assert_eq!(order, [Intent::MoveLeft, Intent::Rotate]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntentSet {
    intents: ArrayVec<Intent, { Intent::LEN }>,
}

impl FromIterator<Intent> for IntentSet {
    fn from_iter<T: IntoIterator<Item = Intent>>(iter: T) -> Self {
        let mut set = Self::new();
        for intent in iter {
            set.insert(intent);
        }
        set
    }
}

impl IntentSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an intent. Returns `false` if it was already present.
    pub fn insert(&mut self, intent: Intent) -> bool {
        if self.contains(intent) {
            return false;
        }
        self.intents.push(intent);
        true
    }

    #[must_use]
    pub fn contains(&self, intent: Intent) -> bool {
        self.intents.contains(&intent)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn clear(&mut self) {
        self.intents.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Intent> + '_ {
        Intent::ALL
            .into_iter()
            .filter(|intent| self.contains(*intent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_are_ignored() {
        let intents: IntentSet = [
            Intent::SoftDrop,
            Intent::SoftDrop,
            Intent::MoveRight,
            Intent::SoftDrop,
        ]
        .into_iter()
        .collect();
        assert_eq!(intents.len(), 2);
    }

    #[test]
    fn test_iteration_order_is_canonical() {
        let intents: IntentSet = Intent::ALL.into_iter().rev().collect();
        let order: Vec<_> = intents.iter().collect();
        assert_eq!(order, Intent::ALL);
    }

    #[test]
    fn test_clear() {
        let mut intents: IntentSet = Intent::ALL.into_iter().collect();
        assert_eq!(intents.len(), Intent::LEN);
        intents.clear();
        assert!(intents.is_empty());
        assert!(!intents.contains(Intent::Rotate));
    }
}
