//! Person (node) types

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unique identifier for a person
///
/// Ids are handed out by [`FamilyTree`](crate::FamilyTree) starting at 1 and
/// are never reused, even after the person is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub u64);

impl PersonId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PersonId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<u64> for PersonId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A person in the family tree (a node)
///
/// Links to other people are stored as ids and resolved through the tree
/// that owns this person. Fields are only readable from outside the crate;
/// every change goes through the validated operations on
/// [`FamilyTree`](crate::FamilyTree).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    id: PersonId,

    name: String,

    /// Current partner, always mirrored on the partner's side
    #[serde(skip_serializing_if = "Option::is_none")]
    partner: Option<PersonId>,

    /// Children in the order the relationships were created
    children: Vec<PersonId>,

    /// Parent slots, filled first-empty-first. Slot order carries no meaning.
    parents: [Option<PersonId>; 2],
}

impl Person {
    pub(crate) fn new(id: PersonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            partner: None,
            children: Vec::new(),
            parents: [None, None],
        }
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn partner(&self) -> Option<PersonId> {
        self.partner
    }

    pub fn children(&self) -> &[PersonId] {
        &self.children
    }

    /// Copy of both parent slots
    pub fn parents(&self) -> [Option<PersonId>; 2] {
        self.parents
    }

    /// Iterate over the filled parent slots
    pub fn parent_ids(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.parents.iter().flatten().copied()
    }

    pub fn parent_count(&self) -> usize {
        self.parents.iter().filter(|p| p.is_some()).count()
    }

    pub fn has_parent(&self, id: PersonId) -> bool {
        self.parents.contains(&Some(id))
    }

    pub fn has_child(&self, id: PersonId) -> bool {
        self.children.contains(&id)
    }

    /// A root has no recorded parents and starts a traversal
    pub fn is_root(&self) -> bool {
        self.parents == [None, None]
    }

    /// Name normalized for case-insensitive comparison
    pub(crate) fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutation (tree only)
    // ─────────────────────────────────────────────────────────────────────────

    pub(crate) fn set_partner(&mut self, partner: PersonId) {
        self.partner = Some(partner);
    }

    pub(crate) fn clear_partner(&mut self) -> Option<PersonId> {
        self.partner.take()
    }

    pub(crate) fn push_child(&mut self, child: PersonId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    pub(crate) fn remove_child(&mut self, child: PersonId) -> bool {
        if let Some(pos) = self.children.iter().position(|c| *c == child) {
            self.children.remove(pos);
            true
        } else {
            false
        }
    }

    /// Put `parent` into the first empty slot, returning the slot index.
    /// Returns `None` when both slots are taken.
    pub(crate) fn assign_parent(&mut self, parent: PersonId) -> Option<usize> {
        let slot = self.parents.iter().position(|p| p.is_none())?;
        self.parents[slot] = Some(parent);
        Some(slot)
    }

    /// Empty every slot holding `parent`, returning how many were cleared
    pub(crate) fn clear_parent(&mut self, parent: PersonId) -> usize {
        let mut cleared = 0;
        for slot in self.parents.iter_mut() {
            if *slot == Some(parent) {
                *slot = None;
                cleared += 1;
            }
        }
        cleared
    }
}

/// Trim and lowercase a name for matching
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
