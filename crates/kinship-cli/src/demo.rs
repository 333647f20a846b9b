//! Built-in Targaryen dynasty used when the CLI starts with data
//!
//! Every person and link goes through the validated tree operations, so the
//! seed doubles as a check that the rules accept a real, messy family.

use anyhow::Context;
use kinship_core::{FamilyTree, PersonId};

/// Seeds dynasties into a tree, looking persons up by exact name
pub struct DemoLoader<'a> {
    tree: &'a mut FamilyTree,
}

impl<'a> DemoLoader<'a> {
    pub fn new(tree: &'a mut FamilyTree) -> Self {
        Self { tree }
    }

    /// Load every generation in order
    pub fn load(mut self) -> anyhow::Result<()> {
        self.aegon_i()?;
        self.aenys_i_children()?;
        self.aegon_and_rhaena()?;
        self.jaehaerys_i()?;
        self.baelon_and_alyssa()?;
        self.viserys_i()?;
        self.aegon_ii_children()?;
        self.daemon_and_laena()?;
        self.daemon_and_rhaenyra()?;
        self.aegon_iii()?;
        self.viserys_ii()?;
        tracing::info!("Loaded demo dynasty with {} persons", self.tree.len());
        Ok(())
    }

    fn register(&mut self, name: &str) -> anyhow::Result<PersonId> {
        Ok(self.tree.register(name)?.id())
    }

    fn find(&self, name: &str) -> anyhow::Result<PersonId> {
        self.tree
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.id())
            .with_context(|| format!("demo person '{}' missing during load", name))
    }

    /// Register each name as a child of every given parent
    fn children(&mut self, parents: &[PersonId], names: &[&str]) -> anyhow::Result<()> {
        for name in names {
            let child = self.register(name)?;
            for parent in parents {
                self.tree.add_child(*parent, child)?;
            }
        }
        Ok(())
    }

    /// Unlink a couple, doing nothing unless they are partnered to each other
    fn separate(&mut self, first: PersonId, second: PersonId) -> anyhow::Result<()> {
        if self.tree.get(first)?.partner() == Some(second) {
            self.tree.remove_partner(first, second)?;
        }
        Ok(())
    }

    fn aegon_i(&mut self) -> anyhow::Result<()> {
        let aegon = self.register("Aegon I")?;
        let rhaenys = self.register("Rhaenys")?;
        let visenya = self.register("Visenya")?;
        self.tree.add_partner(aegon, rhaenys)?;

        let aenys = self.register("Aenys I")?;
        let maegor = self.register("Maegor I the Cruel")?;
        self.tree.add_child(aegon, aenys)?;
        self.tree.add_child(rhaenys, aenys)?;
        self.tree.add_child(aegon, maegor)?;
        self.tree.add_child(visenya, maegor)?;
        Ok(())
    }

    fn aenys_i_children(&mut self) -> anyhow::Result<()> {
        let aenys = self.find("Aenys I")?;
        let alyssa = self.register("Alyssa Velaryon")?;
        self.tree.add_partner(aenys, alyssa)?;

        self.children(
            &[aenys, alyssa],
            &[
                "Aegon (son of Aenys I)",
                "Rhaena",
                "Viserys (son of Aenys I)",
                "Jaehaerys I the Conciliator",
                "Alysanne the Good Queen",
                "Vaella",
            ],
        )
    }

    fn aegon_and_rhaena(&mut self) -> anyhow::Result<()> {
        let aegon = self.find("Aegon (son of Aenys I)")?;
        let rhaena = self.find("Rhaena")?;
        let maegor = self.find("Maegor I the Cruel")?;

        self.tree.add_partner(aegon, rhaena)?;
        self.children(&[aegon, rhaena], &["Aerea", "Rhaella"])?;

        // Rhaena later marries her uncle
        self.separate(aegon, rhaena)?;
        self.tree.add_partner(maegor, rhaena)?;
        Ok(())
    }

    fn jaehaerys_i(&mut self) -> anyhow::Result<()> {
        let jaehaerys = self.find("Jaehaerys I the Conciliator")?;
        let alysanne = self.find("Alysanne the Good Queen")?;
        self.tree.add_partner(jaehaerys, alysanne)?;

        self.children(
            &[jaehaerys, alysanne],
            &[
                "Aegon (son of Jaehaerys I)",
                "Daenerys (daughter of Jaehaerys I)",
                "Aemon (son of Jaehaerys I)",
                "Baelon",
                "Alyssa Targaryen",
                "Maegelle",
                "Vaegon",
                "Daella",
                "Saera",
                "Viserra",
                "Gaemon",
                "Valerion",
                "Gael",
            ],
        )?;

        let aemon = self.find("Aemon (son of Jaehaerys I)")?;
        let jocelyn = self.register("Jocelyn Baratheon")?;
        self.tree.add_partner(aemon, jocelyn)?;
        self.children(&[aemon, jocelyn], &["Rhaenys (the Queen Who Never Was)"])
    }

    fn baelon_and_alyssa(&mut self) -> anyhow::Result<()> {
        let baelon = self.find("Baelon")?;
        let alyssa = self.find("Alyssa Targaryen")?;
        self.tree.add_partner(baelon, alyssa)?;

        self.children(
            &[baelon, alyssa],
            &["Viserys I", "Daemon", "Aegon (son of Baelon)"],
        )
    }

    fn viserys_i(&mut self) -> anyhow::Result<()> {
        let viserys = self.find("Viserys I")?;
        let aemma = self.register("Aemma Arryn")?;
        self.tree.add_partner(viserys, aemma)?;
        self.children(
            &[viserys, aemma],
            &["Rhaenyra", "Baelon (son of Viserys I)"],
        )?;

        let alicent = self.register("Alicent Hightower")?;
        self.separate(viserys, aemma)?;
        self.tree.add_partner(viserys, alicent)?;
        self.children(
            &[viserys, alicent],
            &[
                "Aegon II the Usurper",
                "Aemond One-Eye",
                "Helaena",
                "Daeron the Daring",
            ],
        )
    }

    fn aegon_ii_children(&mut self) -> anyhow::Result<()> {
        let aegon = self.find("Aegon II the Usurper")?;
        let helaena = self.find("Helaena")?;
        self.tree.add_partner(aegon, helaena)?;

        self.children(
            &[aegon, helaena],
            &["Jaehaera", "Jaehaerys (son of Aegon II)", "Maelor"],
        )
    }

    fn daemon_and_laena(&mut self) -> anyhow::Result<()> {
        let daemon = self.find("Daemon")?;
        let laena = self.register("Laena Velaryon")?;
        self.tree.add_partner(daemon, laena)?;

        self.children(&[daemon, laena], &["Baela", "Rhaena (daughter of Daemon)"])
    }

    fn daemon_and_rhaenyra(&mut self) -> anyhow::Result<()> {
        let daemon = self.find("Daemon")?;
        let rhaenyra = self.find("Rhaenyra")?;
        let laena = self.find("Laena Velaryon")?;

        self.separate(daemon, laena)?;
        self.tree.add_partner(daemon, rhaenyra)?;
        self.children(
            &[daemon, rhaenyra],
            &[
                "Aegon III Dragonbane",
                "Viserys II",
                "Visenya (daughter of Rhaenyra)",
            ],
        )
    }

    fn aegon_iii(&mut self) -> anyhow::Result<()> {
        let aegon_iii = self.find("Aegon III Dragonbane")?;
        let aegon_ii = self.find("Aegon II the Usurper")?;
        let jaehaera = self.find("Jaehaera")?;

        // Aegon II is her father, not her partner, so this leaves the tree alone
        self.separate(aegon_ii, jaehaera)?;
        self.tree.add_partner(aegon_iii, jaehaera)?;

        // Mother not recorded
        self.children(
            &[aegon_iii],
            &[
                "Daeron I the Young Dragon",
                "Baelor I the Blessed",
                "Daena the Defiant",
                "Elaena",
                "Rhaena (septa)",
            ],
        )?;

        let baelor = self.find("Baelor I the Blessed")?;
        let daena = self.find("Daena the Defiant")?;
        self.tree.add_partner(baelor, daena)?;
        Ok(())
    }

    fn viserys_ii(&mut self) -> anyhow::Result<()> {
        let viserys = self.find("Viserys II")?;
        let larra = self.register("Larra Rogare")?;
        self.tree.add_partner(viserys, larra)?;
        self.children(
            &[viserys, larra],
            &[
                "Aegon IV the Unworthy",
                "Aemon the Dragonknight",
                "Naerys",
            ],
        )?;

        let aegon_iv = self.find("Aegon IV the Unworthy")?;
        let naerys = self.find("Naerys")?;
        self.tree.add_partner(aegon_iv, naerys)?;
        self.children(&[aegon_iv, naerys], &["Daeron II"])?;

        let daena = self.find("Daena the Defiant")?;
        self.children(&[aegon_iv, daena], &["Daemon Blackfyre"])
    }
}

/// A fresh tree holding the demo dynasty
pub fn demo_tree() -> anyhow::Result<FamilyTree> {
    let mut tree = FamilyTree::new();
    DemoLoader::new(&mut tree)
        .load()
        .context("failed to load demo dynasty")?;
    Ok(tree)
}
