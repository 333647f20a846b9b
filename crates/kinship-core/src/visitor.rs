//! Read-only walks over the family forest
//!
//! A visitor is handed each root by [`FamilyTree::traverse`] and walks down
//! through children on its own. Visitors keep a visited set across calls, so
//! a person reachable from two roots (for example through both parents) is
//! handled once per visitor instance.

use crate::person::{normalize_name, Person, PersonId};
use crate::tree::FamilyTree;
use std::collections::HashSet;

/// Output of [`RenderVisitor::result`] when nothing was rendered
pub const EMPTY_FOREST: &str = "No persons registered.";

const BRANCH_LAST: &str = "└─";
const BRANCH_MID: &str = "├─";
const INDENT_OPEN: &str = "│  ";
const INDENT_CLOSED: &str = "   ";

/// Walk started from a person
pub trait TreeVisitor {
    fn visit(&mut self, tree: &FamilyTree, person: &Person);
}

/// Renders the forest as an indented tree, one line per person
///
/// ```text
/// └─ Aegon I (id: 1) -> 2
///    ├─ Aenys I (id: 4)
///    └─ Maegor I (id: 5)
/// ```
#[derive(Debug, Default)]
pub struct RenderVisitor {
    lines: Vec<String>,
    visited: HashSet<PersonId>,
}

impl RenderVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered lines joined by newlines, or [`EMPTY_FOREST`]
    pub fn result(&self) -> String {
        if self.lines.is_empty() {
            return EMPTY_FOREST.to_string();
        }
        self.lines.join("\n")
    }

    /// Depth-first with an explicit stack; children are pushed in reverse so
    /// they pop in order
    fn render(&mut self, tree: &FamilyTree, root: PersonId) {
        let mut stack = vec![(root, true, String::new())];

        while let Some((id, is_last, prefix)) = stack.pop() {
            if self.visited.contains(&id) {
                continue;
            }
            let Ok(person) = tree.get(id) else {
                continue;
            };

            let symbol = if is_last { BRANCH_LAST } else { BRANCH_MID };
            let mut line = format!("{}{} {} (id: {})", prefix, symbol, person.name(), id);
            if let Some(partner) = person.partner() {
                line.push_str(&format!(" -> {}", partner));
            }
            self.lines.push(line);
            self.visited.insert(id);

            // Children seen elsewhere neither render nor count toward "last"
            let pending: Vec<PersonId> = person
                .children()
                .iter()
                .copied()
                .filter(|child| !self.visited.contains(child))
                .collect();

            let child_prefix = format!(
                "{}{}",
                prefix,
                if is_last { INDENT_CLOSED } else { INDENT_OPEN }
            );
            for (i, child) in pending.iter().enumerate().rev() {
                stack.push((*child, i + 1 == pending.len(), child_prefix.clone()));
            }
        }
    }
}

impl TreeVisitor for RenderVisitor {
    fn visit(&mut self, tree: &FamilyTree, person: &Person) {
        self.render(tree, person.id());
    }
}

/// Collects persons whose name matches a target, ignoring case and
/// surrounding whitespace
#[derive(Debug)]
pub struct SearchVisitor {
    target: String,
    matches: Vec<PersonId>,
    visited: HashSet<PersonId>,
}

impl SearchVisitor {
    pub fn new(name: &str) -> Self {
        Self {
            target: normalize_name(name),
            matches: Vec::new(),
            visited: HashSet::new(),
        }
    }

    /// Ids of matching persons in visit order
    pub fn matches(&self) -> &[PersonId] {
        &self.matches
    }

    /// Matching persons looked up in `tree`
    pub fn resolve<'t>(&self, tree: &'t FamilyTree) -> Vec<&'t Person> {
        self.matches
            .iter()
            .filter_map(|id| tree.get(*id).ok())
            .collect()
    }
}

impl TreeVisitor for SearchVisitor {
    fn visit(&mut self, tree: &FamilyTree, person: &Person) {
        let mut stack = vec![person.id()];

        while let Some(id) = stack.pop() {
            if !self.visited.insert(id) {
                continue;
            }
            let Ok(current) = tree.get(id) else {
                continue;
            };

            if current.normalized_name() == self.target {
                tracing::debug!("Search match: {} ({})", current.name(), id);
                self.matches.push(id);
            }
            stack.extend(current.children().iter().rev());
        }
    }
}
