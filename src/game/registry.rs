//! Entity Registry
//!
//! Ids and group membership. Every entity is exclusively owned by one typed
//! collection on the level; the registry only maps ids to the set of group
//! tags the entity belongs to. Groups are derived views over that map, so no
//! entity is ever owned by two containers.
//!
//! Membership is fixed at creation and ends at destruction. Queries iterate
//! a sorted id snapshot, which keeps group sweeps removal-safe and the whole
//! simulation order deterministic.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Unique entity identifier, allocated monotonically per level.
///
/// `Ord` so BTreeMap iteration (and therefore update order) is stable.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct EntityId(pub u32);

/// Named collision/query groups.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Group {
    /// Every entity
    All,
    /// Solid static geometry
    Walls,
    /// Climbable zones
    Ladders,
    /// Swimmable zones
    Water,
    /// Level-exit doors
    Doors,
    /// All hostile actors
    Enemies,
    /// Slime actors
    Slimes,
    /// Brute actors
    Brutes,
    /// Collectible pickups
    Items,
    /// The player actor
    Player,
    /// Transient melee hitboxes
    Attacks,
}

/// Id allocator plus id -> group-tag map.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Registry {
    next_id: u32,
    tags: BTreeMap<EntityId, BTreeSet<Group>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh id tagged with the given groups (plus `All`).
    pub fn allocate(&mut self, groups: &[Group]) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;

        let mut set: BTreeSet<Group> = groups.iter().copied().collect();
        set.insert(Group::All);
        self.tags.insert(id, set);
        id
    }

    /// Drop an entity from every group.
    pub fn remove(&mut self, id: EntityId) {
        self.tags.remove(&id);
    }

    /// Whether the id is still registered.
    pub fn contains(&self, id: EntityId) -> bool {
        self.tags.contains_key(&id)
    }

    /// Whether the id carries a group tag.
    pub fn is_member(&self, id: EntityId, group: Group) -> bool {
        self.tags.get(&id).is_some_and(|set| set.contains(&group))
    }

    /// Sorted snapshot of a group's members.
    ///
    /// A snapshot rather than a live iterator: callers routinely destroy
    /// entities while sweeping a group.
    pub fn members(&self, group: Group) -> Vec<EntityId> {
        self.tags
            .iter()
            .filter(|(_, set)| set.contains(&group))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Number of members in a group. O(n); fine at this scale, and the
    /// narrow query surface leaves room for a spatial index later.
    pub fn count(&self, group: Group) -> usize {
        self.tags.values().filter(|set| set.contains(&group)).count()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_tags_all_group() {
        let mut registry = Registry::new();
        let id = registry.allocate(&[Group::Enemies, Group::Slimes]);

        assert!(registry.is_member(id, Group::All));
        assert!(registry.is_member(id, Group::Enemies));
        assert!(registry.is_member(id, Group::Slimes));
        assert!(!registry.is_member(id, Group::Items));
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut registry = Registry::new();
        let a = registry.allocate(&[]);
        let b = registry.allocate(&[]);
        let c = registry.allocate(&[]);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_remove_drops_all_memberships() {
        let mut registry = Registry::new();
        let id = registry.allocate(&[Group::Enemies]);
        registry.remove(id);

        assert!(!registry.contains(id));
        assert!(!registry.is_member(id, Group::Enemies));
        assert!(!registry.is_member(id, Group::All));
    }

    #[test]
    fn test_members_sorted_snapshot() {
        let mut registry = Registry::new();
        let a = registry.allocate(&[Group::Enemies]);
        let _ = registry.allocate(&[Group::Items]);
        let c = registry.allocate(&[Group::Enemies]);

        assert_eq!(registry.members(Group::Enemies), vec![a, c]);
        assert_eq!(registry.count(Group::Enemies), 2);
        assert_eq!(registry.count(Group::All), 3);
    }

    #[test]
    fn test_removed_ids_are_not_reused() {
        let mut registry = Registry::new();
        let a = registry.allocate(&[]);
        registry.remove(a);
        let b = registry.allocate(&[]);
        assert_ne!(a, b);
    }
}
