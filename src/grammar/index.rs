//! Rule-keyed indices built alongside decoding.

use indexmap::IndexMap;

use super::RuleId;

/// Rule id to the offset of that rule's id token.
///
/// Iteration follows discovery order. Re-inserting an id overwrites its
/// offset but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetIndex {
    map: IndexMap<RuleId, usize>,
}

impl OffsetIndex {
    /// Record a rule header, returning the offset it replaced.
    pub fn insert(&mut self, id: RuleId, offset: usize) -> Option<usize> {
        self.map.insert(id, offset)
    }

    pub fn get(&self, id: RuleId) -> Option<usize> {
        self.map.get(&id).copied()
    }

    pub fn contains(&self, id: RuleId) -> bool {
        self.map.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = RuleId> + '_ {
        self.map.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RuleId, usize)> + '_ {
        self.map.iter().map(|(&id, &offset)| (id, offset))
    }
}

/// Rule id to the arena slot holding that rule's alternates.
///
/// Entries are created as soon as a rule header is read, so a rule's
/// alternates are reachable by id while they are still being decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlternateIndex {
    map: IndexMap<RuleId, usize>,
}

impl AlternateIndex {
    pub(crate) fn insert(&mut self, id: RuleId, slot: usize) {
        self.map.insert(id, slot);
    }

    pub fn slot(&self, id: RuleId) -> Option<usize> {
        self.map.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut index = OffsetIndex::default();
        assert_eq!(index.insert(RuleId(7), 0), None);
        assert_eq!(index.insert(RuleId(3), 3), None);
        assert_eq!(index.insert(RuleId(7), 9), Some(0));

        assert_eq!(index.get(RuleId(7)), Some(9));
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.iter().collect::<Vec<_>>(),
            [(RuleId(7), 9), (RuleId(3), 3)]
        );
    }

    #[test]
    fn test_missing_id() {
        let index = OffsetIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.get(RuleId(1)), None);
        assert!(!index.contains(RuleId(1)));
    }
}
