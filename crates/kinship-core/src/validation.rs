//! Relationship validation rules
//!
//! The validator only reads. It is built over the current set of persons,
//! asked about one proposed change, and dropped. A rejected change leaves the
//! tree exactly as it was.

use crate::person::{Person, PersonId};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Maximum number of recorded parents per person
pub const MAX_PARENTS: usize = 2;

/// Kind of change being validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// First person becomes a parent of the second
    ParentChild,
    /// Both persons become partners
    Partner,
    /// Both persons stop being partners
    RemovePartner,
    /// First person is about to be deleted
    DeletionImpact,
}

/// Relationship that was attempted when an incest rule fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    ParentChild,
    Partner,
}

/// Why a candidate id was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    #[error("id cannot be empty")]
    Missing,

    #[error("id {0} must be a positive integer")]
    NotPositive(i64),

    #[error("id {0} already belongs to another person")]
    Taken(PersonId),
}

/// Why a relationship change was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelationshipError {
    #[error("{name} cannot be their own parent")]
    SelfParent { name: String },

    #[error("{name} already has {} parents", MAX_PARENTS)]
    ParentLimitExceeded { name: String },

    #[error("{parent} is already a parent of {child}")]
    AlreadyParent { parent: String, child: String },

    #[error("{}", incest_message(.parent, .child, .attempted))]
    Incest {
        parent: String,
        child: String,
        attempted: Attempt,
    },

    #[error("temporal paradox: {ancestor} is an ancestor of {descendant}")]
    TemporalCycle { ancestor: String, descendant: String },

    #[error("{name} cannot be their own partner")]
    SelfPartner { name: String },

    #[error("{name} already has a partner: {partner}")]
    AlreadyPartnered { name: String, partner: String },

    #[error("failed to validate partner removal: {first} and {second} {reason}")]
    PartnerNotFound {
        first: String,
        second: String,
        reason: PartnerGap,
    },
}

/// Reason a partner removal cannot happen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartnerGap {
    /// At least one side has no partner at all
    Unpartnered,
    /// Both have partners, just not each other
    NotEachOther,
}

impl std::fmt::Display for PartnerGap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unpartnered => write!(f, "are not both partnered"),
            Self::NotEachOther => write!(f, "are not partners"),
        }
    }
}

fn incest_message(parent: &str, child: &str, attempted: &Attempt) -> String {
    match attempted {
        Attempt::ParentChild => format!(
            "{} cannot be a child of {} because they are partners",
            child, parent
        ),
        Attempt::Partner => format!(
            "{} is a parent of {}, they cannot be partners",
            parent, child
        ),
    }
}

/// Outcome of [`RelationshipValidator::validate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    Relationship(#[from] RelationshipError),

    /// Soft warning: deleting this person needs explicit confirmation
    #[error(
        "{name} has {children} child(ren); deleting them splits the tree and breaks the lineage, confirmation required"
    )]
    HasDescendants { name: String, children: usize },
}

/// Read-only rule engine over the persons of one tree
pub struct RelationshipValidator<'a> {
    people: &'a BTreeMap<PersonId, Person>,
}

impl<'a> RelationshipValidator<'a> {
    pub fn new(people: &'a BTreeMap<PersonId, Person>) -> Self {
        tracing::debug!("Validator created over {} persons", people.len());
        Self { people }
    }

    /// Validate a proposed change between two persons.
    ///
    /// For [`RelationKind::DeletionImpact`] only `first` is inspected.
    pub fn validate(
        &self,
        first: &Person,
        second: &Person,
        kind: RelationKind,
    ) -> Result<(), ValidationError> {
        tracing::debug!(
            "Validating {:?}: {} ({}) / {} ({})",
            kind,
            first.name(),
            first.id(),
            second.name(),
            second.id()
        );

        match kind {
            RelationKind::ParentChild => self.validate_parent_child(first, second)?,
            RelationKind::Partner => self.validate_partner(first, second)?,
            RelationKind::RemovePartner => self.validate_remove_partner(first, second)?,
            RelationKind::DeletionImpact => Self::validate_deletion_impact(first)?,
        }
        Ok(())
    }

    /// Check a candidate id before a person is built with it
    pub fn validate_id(&self, candidate: Option<i64>) -> Result<PersonId, IdError> {
        tracing::debug!("Validating id: {:?}", candidate);

        let raw = candidate.ok_or_else(|| {
            tracing::warn!("Attempt to use an empty id");
            IdError::Missing
        })?;
        if raw <= 0 {
            tracing::warn!("Id must be positive: {}", raw);
            return Err(IdError::NotPositive(raw));
        }

        let id = PersonId(raw as u64);
        if let Some(existing) = self.people.get(&id) {
            tracing::warn!("Id {} already belongs to {}", id, existing.name());
            return Err(IdError::Taken(id));
        }
        Ok(id)
    }

    fn validate_parent_child(
        &self,
        parent: &Person,
        child: &Person,
    ) -> Result<(), RelationshipError> {
        if parent.id() == child.id() {
            tracing::warn!("{} cannot be their own parent", parent.name());
            return Err(RelationshipError::SelfParent {
                name: parent.name().to_string(),
            });
        }

        if child.parent_count() >= MAX_PARENTS {
            tracing::warn!("Parent limit exceeded for {}", child.name());
            return Err(RelationshipError::ParentLimitExceeded {
                name: child.name().to_string(),
            });
        }

        if child.partner() == Some(parent.id()) || parent.partner() == Some(child.id()) {
            tracing::warn!("{} and {} are partners", parent.name(), child.name());
            return Err(RelationshipError::Incest {
                parent: parent.name().to_string(),
                child: child.name().to_string(),
                attempted: Attempt::ParentChild,
            });
        }

        if self.is_ancestor(child.id(), parent) {
            tracing::warn!(
                "Temporal cycle detected: {} is an ancestor of {}",
                child.name(),
                parent.name()
            );
            return Err(RelationshipError::TemporalCycle {
                ancestor: child.name().to_string(),
                descendant: parent.name().to_string(),
            });
        }

        // Keeps the parent's children list free of duplicates
        if child.has_parent(parent.id()) {
            tracing::warn!("{} is already a parent of {}", parent.name(), child.name());
            return Err(RelationshipError::AlreadyParent {
                parent: parent.name().to_string(),
                child: child.name().to_string(),
            });
        }

        tracing::debug!("Parent-child accepted: {} -> {}", parent.name(), child.name());
        Ok(())
    }

    fn validate_partner(&self, first: &Person, second: &Person) -> Result<(), RelationshipError> {
        if first.id() == second.id() {
            tracing::warn!("{} cannot partner with themselves", first.name());
            return Err(RelationshipError::SelfPartner {
                name: first.name().to_string(),
            });
        }

        for person in [first, second] {
            if let Some(partner) = person.partner() {
                let partner = self.name_of(partner);
                tracing::warn!("{} already has a partner: {}", person.name(), partner);
                return Err(RelationshipError::AlreadyPartnered {
                    name: person.name().to_string(),
                    partner,
                });
            }
        }

        for (parent, child) in [(first, second), (second, first)] {
            if child.has_parent(parent.id()) {
                tracing::warn!("{} is a parent of {}", parent.name(), child.name());
                return Err(RelationshipError::Incest {
                    parent: parent.name().to_string(),
                    child: child.name().to_string(),
                    attempted: Attempt::Partner,
                });
            }
        }

        tracing::debug!("Partner accepted: {} <-> {}", first.name(), second.name());
        Ok(())
    }

    fn validate_remove_partner(
        &self,
        first: &Person,
        second: &Person,
    ) -> Result<(), RelationshipError> {
        let reason = match (first.partner(), second.partner()) {
            (Some(a), Some(b)) if a == second.id() && b == first.id() => None,
            (Some(_), Some(_)) => Some(PartnerGap::NotEachOther),
            _ => Some(PartnerGap::Unpartnered),
        };

        match reason {
            None => {
                tracing::debug!("Partner removal accepted: {} <-> {}", first.name(), second.name());
                Ok(())
            }
            Some(reason) => {
                tracing::warn!(
                    "Cannot remove partnership between {} and {}: {}",
                    first.name(),
                    second.name(),
                    reason
                );
                Err(RelationshipError::PartnerNotFound {
                    first: first.name().to_string(),
                    second: second.name().to_string(),
                    reason,
                })
            }
        }
    }

    fn validate_deletion_impact(person: &Person) -> Result<(), ValidationError> {
        let children = person.children().len();
        if children > 0 {
            tracing::warn!(
                "Deleting {} would detach {} child(ren)",
                person.name(),
                children
            );
            return Err(ValidationError::HasDescendants {
                name: person.name().to_string(),
                children,
            });
        }
        Ok(())
    }

    /// Whether `target` can be reached by walking up the parent slots of `start`
    pub fn is_ancestor(&self, target: PersonId, start: &Person) -> bool {
        let mut seen = HashSet::from([start.id()]);
        let mut pending: Vec<PersonId> = start.parent_ids().collect();

        while let Some(id) = pending.pop() {
            if id == target {
                return true;
            }
            if !seen.insert(id) {
                continue;
            }
            if let Some(parent) = self.people.get(&id) {
                pending.extend(parent.parent_ids());
            }
        }
        false
    }

    fn name_of(&self, id: PersonId) -> String {
        self.people
            .get(&id)
            .map(|p| p.name().to_string())
            .unwrap_or_else(|| format!("#{}", id))
    }
}
