//! Output formatting utilities

use clap::ValueEnum;
use kinship_core::{FamilyTree, Person, PersonId};
use serde::{Deserialize, Serialize};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Pretty-printed JSON, or `{}` if serialization fails
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

/// Search hits, one `- name (id)` line each
pub fn format_matches(matches: &[&Person]) -> String {
    if matches.is_empty() {
        return "No results found.".to_string();
    }
    let mut out = String::from("Results:");
    for person in matches {
        out.push_str(&format!("\n- {} ({})", person.name(), person.id()));
    }
    out
}

fn label(tree: &FamilyTree, id: PersonId) -> String {
    match tree.get(id) {
        Ok(person) => format!("{} ({})", person.name(), id),
        Err(_) => format!("<unknown> ({})", id),
    }
}

fn label_list(tree: &FamilyTree, ids: impl Iterator<Item = PersonId>) -> String {
    let labels: Vec<String> = ids.map(|id| label(tree, id)).collect();
    if labels.is_empty() {
        "-".to_string()
    } else {
        labels.join(", ")
    }
}

/// Person details with relatives resolved to names
pub fn format_person(tree: &FamilyTree, person: &Person) -> String {
    let partner = person
        .partner()
        .map(|id| label(tree, id))
        .unwrap_or_else(|| "-".to_string());

    [
        format!("Name:     {}", person.name()),
        format!("Id:       {}", person.id()),
        format!("Partner:  {}", partner),
        format!("Parents:  {}", label_list(tree, person.parent_ids())),
        format!("Children: {}", label_list(tree, person.children().iter().copied())),
    ]
    .join("\n")
}

/// How one person relates to another along parent links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ancestry {
    pub ancestor: PersonId,
    pub descendant: PersonId,
    pub is_parent: bool,
    pub is_ancestor: bool,
}

impl Ancestry {
    pub fn between(
        tree: &FamilyTree,
        ancestor: PersonId,
        descendant: PersonId,
    ) -> kinship_core::Result<Self> {
        let is_ancestor = tree.is_ancestor(ancestor, descendant)?;
        let is_parent = tree.get(ancestor)?.has_child(descendant);
        Ok(Self {
            ancestor,
            descendant,
            is_parent,
            is_ancestor,
        })
    }
}

pub fn format_ancestry(tree: &FamilyTree, ancestry: &Ancestry) -> String {
    let relation = if ancestry.is_parent {
        "is a parent of"
    } else if ancestry.is_ancestor {
        "is an ancestor of"
    } else {
        "is not an ancestor of"
    };
    format!(
        "{} {} {}",
        label(tree, ancestry.ancestor),
        relation,
        label(tree, ancestry.descendant)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family() -> FamilyTree {
        let mut tree = FamilyTree::new();
        for name in ["Viserys I", "Aemma Arryn", "Rhaenyra"] {
            tree.register(name).unwrap();
        }
        tree.add_partner(PersonId(1), PersonId(2)).unwrap();
        tree.add_child(PersonId(1), PersonId(3)).unwrap();
        tree.add_child(PersonId(2), PersonId(3)).unwrap();
        tree
    }

    #[test]
    fn test_format_matches() {
        let tree = family();
        assert_eq!(format_matches(&[]), "No results found.");
        assert_eq!(
            format_matches(&tree.search("rhaenyra")),
            "Results:\n- Rhaenyra (3)"
        );
    }

    #[test]
    fn test_format_person() {
        let tree = family();
        let rhaenyra = tree.get(PersonId(3)).unwrap();
        let text = format_person(&tree, rhaenyra);

        assert!(text.contains("Name:     Rhaenyra"));
        assert!(text.contains("Partner:  -"));
        assert!(text.contains("Parents:  Viserys I (1), Aemma Arryn (2)"));
        assert!(text.contains("Children: -"));
    }

    #[test]
    fn test_format_json() {
        let tree = family();
        let json = format_json(&tree.get(PersonId(1)).unwrap());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "Viserys I");
        assert_eq!(value["partner"], 2);
    }

    #[test]
    fn test_format_display_matches_serde() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(
            serde_json::to_string(&OutputFormat::Text).unwrap(),
            "\"text\""
        );
    }

    #[test]
    fn test_ancestry() {
        let mut tree = family();
        tree.register("Aegon III").unwrap();
        tree.add_child(PersonId(3), PersonId(4)).unwrap();

        let parent = Ancestry::between(&tree, PersonId(3), PersonId(4)).unwrap();
        assert!(parent.is_parent && parent.is_ancestor);
        assert_eq!(
            format_ancestry(&tree, &parent),
            "Rhaenyra (3) is a parent of Aegon III (4)"
        );

        let grand = Ancestry::between(&tree, PersonId(1), PersonId(4)).unwrap();
        assert!(!grand.is_parent && grand.is_ancestor);
        assert_eq!(
            format_ancestry(&tree, &grand),
            "Viserys I (1) is an ancestor of Aegon III (4)"
        );

        let none = Ancestry::between(&tree, PersonId(4), PersonId(1)).unwrap();
        assert_eq!(
            format_ancestry(&tree, &none),
            "Aegon III (4) is not an ancestor of Viserys I (1)"
        );

        assert!(Ancestry::between(&tree, PersonId(1), PersonId(9)).is_err());
    }
}
