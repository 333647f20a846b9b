//! Family tree store
//!
//! [`FamilyTree`] owns every [`Person`] in an id-keyed arena. People refer to
//! each other by [`PersonId`] only, so all links are resolved back through
//! the tree. Each mutation asks a [`RelationshipValidator`] first and only
//! touches the arena once the change has been accepted.

use crate::error::{Error, Operation, Result};
use crate::person::{Person, PersonId};
use crate::validation::{RelationKind, RelationshipValidator, ValidationError};
use crate::visitor::{RenderVisitor, SearchVisitor, TreeVisitor};
use std::collections::BTreeMap;

/// Genealogical record store
///
/// Ids grow monotonically, so iteration order of the arena is also
/// registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyTree {
    people: BTreeMap<PersonId, Person>,
    next_id: i64,
}

impl Default for FamilyTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FamilyTree {
    pub fn new() -> Self {
        tracing::debug!("Family tree initialized (empty)");
        Self {
            people: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.people.contains_key(&id)
    }

    /// All persons in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    fn validator(&self) -> RelationshipValidator<'_> {
        RelationshipValidator::new(&self.people)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Registration and lookup
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a new person under the next free id
    pub fn register(&mut self, name: impl Into<String>) -> Result<&Person> {
        let name = name.into();
        tracing::debug!("Registering {} (candidate id {})", name, self.next_id);

        let id = self
            .validator()
            .validate_id(Some(self.next_id))
            .map_err(|e| {
                tracing::warn!("Failed to register {}: {}", name, e);
                Error::from(e)
            })?;

        self.next_id += 1;
        tracing::info!("Registered {} (id {})", name, id);
        let person = self.people.entry(id).or_insert_with(|| Person::new(id, name));
        Ok(&*person)
    }

    /// Look up a person by id
    pub fn get(&self, id: PersonId) -> Result<&Person> {
        self.people.get(&id).ok_or_else(|| {
            tracing::warn!("Person {} not found ({} registered)", id, self.people.len());
            Error::PersonNotFound(id)
        })
    }

    /// Persons with no recorded parents, in registration order
    pub fn roots(&self) -> Vec<&Person> {
        let roots: Vec<&Person> = self.people.values().filter(|p| p.is_root()).collect();
        tracing::debug!("Found {} root(s)", roots.len());
        roots
    }

    /// Run `visitor` from every root, reusing the same visitor instance
    pub fn traverse<V: TreeVisitor + ?Sized>(&self, visitor: &mut V) {
        for root in self.roots() {
            tracing::trace!("Traversing from root {} ({})", root.name(), root.id());
            visitor.visit(self, root);
        }
    }

    /// Render the whole forest as an indented tree
    pub fn render(&self) -> String {
        let mut visitor = RenderVisitor::new();
        self.traverse(&mut visitor);
        visitor.result()
    }

    /// Persons whose name matches `name`, ignoring case and surrounding space
    pub fn search(&self, name: &str) -> Vec<&Person> {
        let mut visitor = SearchVisitor::new(name);
        self.traverse(&mut visitor);
        visitor.resolve(self)
    }

    /// Whether `ancestor` is reachable from `descendant` through parent links
    pub fn is_ancestor(&self, ancestor: PersonId, descendant: PersonId) -> Result<bool> {
        self.get(ancestor)?;
        let descendant = self.get(descendant)?;
        Ok(self.validator().is_ancestor(ancestor, descendant))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Relationship operations
    // ─────────────────────────────────────────────────────────────────────────

    fn check(
        &self,
        first: PersonId,
        second: PersonId,
        kind: RelationKind,
        operation: Operation,
    ) -> Result<()> {
        let a = self.get(first)?;
        let b = self.get(second)?;
        self.validator().validate(a, b, kind).map_err(|e| {
            tracing::warn!("Cannot {} ({} / {}): {}", operation, a.name(), b.name(), e);
            match e {
                ValidationError::Relationship(source) => Error::Relationship { operation, source },
                ValidationError::HasDescendants { name, children } => {
                    Error::HasDescendants { name, children }
                }
            }
        })
    }

    /// Record `child` as a child of `parent`
    pub fn add_child(&mut self, parent: PersonId, child: PersonId) -> Result<()> {
        self.check(parent, child, RelationKind::ParentChild, Operation::AddChild)?;

        if let Some(p) = self.people.get_mut(&parent) {
            p.push_child(child);
        }
        if let Some(c) = self.people.get_mut(&child) {
            let slot = c.assign_parent(parent);
            tracing::debug!("Parent {} stored in slot {:?} of {}", parent, slot, child);
        }

        tracing::info!("Added child: {} -> {}", parent, child);
        Ok(())
    }

    /// Make two people partners of each other
    pub fn add_partner(&mut self, first: PersonId, second: PersonId) -> Result<()> {
        self.check(first, second, RelationKind::Partner, Operation::AddPartner)?;

        if let Some(p) = self.people.get_mut(&first) {
            p.set_partner(second);
        }
        if let Some(p) = self.people.get_mut(&second) {
            p.set_partner(first);
        }

        tracing::info!("Added partners: {} <-> {}", first, second);
        Ok(())
    }

    /// Dissolve the partnership between two people
    pub fn remove_partner(&mut self, first: PersonId, second: PersonId) -> Result<()> {
        self.check(
            first,
            second,
            RelationKind::RemovePartner,
            Operation::RemovePartner,
        )?;

        for id in [first, second] {
            if let Some(p) = self.people.get_mut(&id) {
                p.clear_partner();
            }
        }

        tracing::info!("Removed partners: {} <-> {}", first, second);
        Ok(())
    }

    /// Delete a person and unlink them from everyone else.
    ///
    /// A person with children is only deleted when `confirm_break` is set;
    /// otherwise [`Error::HasDescendants`] is returned and nothing changes.
    /// Returns the removed person as it stood before deletion.
    pub fn delete(&mut self, id: PersonId, confirm_break: bool) -> Result<Person> {
        let person = self.get(id)?;
        tracing::debug!(
            "Deleting {} ({}): {} child(ren), partner {:?}, confirm_break={}",
            person.name(),
            id,
            person.children().len(),
            person.partner(),
            confirm_break
        );

        if !confirm_break {
            self.check(id, id, RelationKind::DeletionImpact, Operation::Delete)?;
        }

        let removed = match self.people.remove(&id) {
            Some(person) => person,
            None => return Err(Error::PersonNotFound(id)),
        };

        if let Some(partner) = removed.partner() {
            if let Some(p) = self.people.get_mut(&partner) {
                p.clear_partner();
                tracing::debug!("Unlinked partner {} of {}", partner, id);
            }
        }

        for parent in removed.parent_ids() {
            if let Some(p) = self.people.get_mut(&parent) {
                p.remove_child(id);
            }
        }

        for child in removed.children() {
            if let Some(c) = self.people.get_mut(child) {
                let cleared = c.clear_parent(id);
                tracing::debug!("Cleared {} parent slot(s) of {}", cleared, child);
            }
        }

        tracing::info!("Deleted {} ({})", removed.name(), id);
        Ok(removed)
    }
}
