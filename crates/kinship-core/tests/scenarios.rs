use kinship_core::{
    Error, FamilyTree, PersonId, RelationshipError, SearchVisitor, TreeVisitor, EMPTY_FOREST,
};

fn register(tree: &mut FamilyTree, name: &str) -> PersonId {
    tree.register(name).unwrap().id()
}

#[test]
fn test_partners_link_both_ways() {
    let mut tree = FamilyTree::new();
    let aegon = register(&mut tree, "Aegon");
    let rhaenys = register(&mut tree, "Rhaenys");
    assert_eq!((aegon, rhaenys), (PersonId(1), PersonId(2)));

    tree.add_partner(aegon, rhaenys).unwrap();
    assert_eq!(tree.get(PersonId(1)).unwrap().partner(), Some(PersonId(2)));
    assert_eq!(tree.get(PersonId(2)).unwrap().partner(), Some(PersonId(1)));
}

#[test]
fn test_child_cannot_become_parent_of_parent() {
    let mut tree = FamilyTree::new();
    let father = register(&mut tree, "Father");
    let child = register(&mut tree, "Child");

    tree.add_child(father, child).unwrap();
    assert_eq!(tree.get(child).unwrap().parents(), [Some(father), None]);

    let err = tree.add_child(child, father).unwrap_err();
    assert!(matches!(
        err,
        Error::Relationship {
            source: RelationshipError::TemporalCycle { .. },
            ..
        }
    ));
    assert!(err.to_string().contains("is an ancestor of"));
}

#[test]
fn test_two_parents_maximum() {
    let mut tree = FamilyTree::new();
    let first = register(&mut tree, "First");
    let second = register(&mut tree, "Second");
    let child = register(&mut tree, "Child");

    tree.add_child(first, child).unwrap();
    tree.add_child(second, child).unwrap();

    let third = register(&mut tree, "Third");
    assert_eq!(third, PersonId(4));
    let err = tree.add_child(third, child).unwrap_err();
    assert!(matches!(
        err.relationship(),
        Some(RelationshipError::ParentLimitExceeded { .. })
    ));
    assert!(err.to_string().contains("already has 2 parents"));
}

#[test]
fn test_partner_cannot_become_child() {
    let mut tree = FamilyTree::new();
    let a = register(&mut tree, "A");
    let b = register(&mut tree, "B");
    tree.add_partner(a, b).unwrap();

    let err = tree.add_child(a, b).unwrap_err();
    assert!(matches!(
        err.relationship(),
        Some(RelationshipError::Incest { .. })
    ));
    let message = err.to_string();
    assert!(message.contains("A") && message.contains("B"));
}

#[test]
fn test_parent_cannot_become_partner() {
    let mut tree = FamilyTree::new();
    let a = register(&mut tree, "A");
    let b = register(&mut tree, "B");
    tree.add_child(a, b).unwrap();

    assert!(tree.add_partner(a, b).is_err());
    assert!(tree.add_partner(b, a).is_err());
}

#[test]
fn test_delete_middle_generation() {
    let mut tree = FamilyTree::new();
    let root = register(&mut tree, "Root");
    let child = register(&mut tree, "Child");
    let grandchild = register(&mut tree, "Grandchild");
    tree.add_child(root, child).unwrap();
    tree.add_child(child, grandchild).unwrap();

    let err = tree.delete(child, false).unwrap_err();
    assert!(matches!(err, Error::HasDescendants { children: 1, .. }));
    assert_eq!(tree.len(), 3);

    tree.delete(child, true).unwrap();
    assert_eq!(tree.get(grandchild).unwrap().parents(), [None, None]);
    assert!(!tree.get(root).unwrap().has_child(child));

    // The grandchild is a root of its own now
    let roots: Vec<PersonId> = tree.roots().iter().map(|p| p.id()).collect();
    assert_eq!(roots, vec![root, grandchild]);
}

#[test]
fn test_empty_forest_sentinel() {
    let tree = FamilyTree::new();
    assert_eq!(tree.render(), EMPTY_FOREST);
    assert_eq!(tree.render(), "No persons registered.");
}

#[test]
fn test_search_across_branches() {
    let mut tree = FamilyTree::new();
    let viserys = register(&mut tree, "Viserys I");
    let aemma = register(&mut tree, "Aemma Arryn");
    let alicent = register(&mut tree, "Alicent Hightower");
    tree.add_partner(viserys, aemma).unwrap();

    let baelon = register(&mut tree, "Baelon");
    tree.add_child(viserys, baelon).unwrap();
    tree.add_child(aemma, baelon).unwrap();

    tree.remove_partner(viserys, aemma).unwrap();
    tree.add_partner(viserys, alicent).unwrap();

    let other_baelon = register(&mut tree, "baelon");
    tree.add_child(alicent, other_baelon).unwrap();

    let mut visitor = SearchVisitor::new("BAELON");
    tree.traverse(&mut visitor);
    assert_eq!(visitor.matches(), &[baelon, other_baelon]);

    // A fresh search over the same tree gives the same answer
    let again: Vec<PersonId> = tree.search("baelon").iter().map(|p| p.id()).collect();
    assert_eq!(again, vec![baelon, other_baelon]);
}

#[test]
fn test_custom_visitor() {
    struct CountVisitor(usize);

    impl TreeVisitor for CountVisitor {
        fn visit(&mut self, tree: &FamilyTree, person: &kinship_core::Person) {
            self.0 += 1;
            for child in person.children() {
                self.visit(tree, tree.get(*child).unwrap());
            }
        }
    }

    let mut tree = FamilyTree::new();
    let a = register(&mut tree, "A");
    let b = register(&mut tree, "B");
    register(&mut tree, "C");
    tree.add_child(a, b).unwrap();

    let mut visitor = CountVisitor(0);
    tree.traverse(&mut visitor);
    assert_eq!(visitor.0, 3);
}
