//! Line-oriented interactive session over a family tree

use std::io::{BufRead, Write};

use kinship_core::{FamilyTree, PersonId};

use crate::output::{
    format_ancestry, format_json, format_matches, format_person, Ancestry, OutputFormat,
};

const PROMPT: &str = "kinship> ";

const HELP: &str = "\
Commands:
  add <name>                    Register a new person
  delete <id>                   Delete a person (asks before breaking a lineage)
  search <name>                 Find persons by name
  tree                          Show the whole family tree
  child <parent-id> <child-id>  Record a parent-child link
  partner <id> <id>             Make two persons partners
  unpartner <id> <id>           Dissolve a partnership
  show <id>                     Show one person
  ancestor <id> <id>            Check whether the first is an ancestor of the second
  help                          Show this help
  quit | exit                   Leave the shell";

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Add(String),
    Delete(PersonId),
    Search(String),
    Tree,
    Child(PersonId, PersonId),
    Partner(PersonId, PersonId),
    Unpartner(PersonId, PersonId),
    Show(PersonId),
    Ancestor(PersonId, PersonId),
    Help,
    Quit,
}

fn parse_id(raw: &str) -> Result<PersonId, String> {
    raw.parse()
        .map_err(|_| format!("'{}' is not a valid id", raw))
}

fn parse_pair(rest: &str, usage: &str) -> Result<(PersonId, PersonId), String> {
    let parts: Vec<&str> = rest.split_whitespace().collect();
    match parts.as_slice() {
        [a, b] => Ok((parse_id(a)?, parse_id(b)?)),
        _ => Err(format!("usage: {}", usage)),
    }
}

fn require<'s>(rest: &'s str, usage: &str) -> Result<&'s str, String> {
    if rest.is_empty() {
        Err(format!("usage: {}", usage))
    } else {
        Ok(rest)
    }
}

impl std::str::FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "add" => Ok(Self::Add(require(rest, "add <name>")?.to_string())),
            "delete" => Ok(Self::Delete(parse_id(require(rest, "delete <id>")?)?)),
            "search" => Ok(Self::Search(require(rest, "search <name>")?.to_string())),
            "tree" => Ok(Self::Tree),
            "child" => {
                let (parent, child) = parse_pair(rest, "child <parent-id> <child-id>")?;
                Ok(Self::Child(parent, child))
            }
            "partner" => {
                let (a, b) = parse_pair(rest, "partner <id> <id>")?;
                Ok(Self::Partner(a, b))
            }
            "unpartner" => {
                let (a, b) = parse_pair(rest, "unpartner <id> <id>")?;
                Ok(Self::Unpartner(a, b))
            }
            "show" => Ok(Self::Show(parse_id(require(rest, "show <id>")?)?)),
            "ancestor" => {
                let (ancestor, descendant) = parse_pair(rest, "ancestor <id> <id>")?;
                Ok(Self::Ancestor(ancestor, descendant))
            }
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command '{}', type 'help' for a list", other)),
        }
    }
}

/// Interactive session reading commands from `input` and writing to `output`
pub struct Shell<'t, R, W> {
    tree: &'t mut FamilyTree,
    input: R,
    output: W,
    format: OutputFormat,
}

impl<'t, R: BufRead, W: Write> Shell<'t, R, W> {
    pub fn new(tree: &'t mut FamilyTree, input: R, output: W, format: OutputFormat) -> Self {
        Self {
            tree,
            input,
            output,
            format,
        }
    }

    /// Run until `quit` or end of input
    pub fn run(&mut self) -> anyhow::Result<()> {
        tracing::info!("Shell started with {} persons", self.tree.len());
        writeln!(self.output, "Kinship family tree shell. Type 'help' for commands.")?;

        loop {
            let Some(line) = self.prompt(PROMPT)? else {
                tracing::info!("EOF on input, leaving shell");
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            tracing::debug!("Shell command: {}", line.trim());
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command)?,
                Err(e) => {
                    tracing::warn!("Rejected shell input: {}", e);
                    writeln!(self.output, "Error: {}", e)?;
                }
            }
        }

        writeln!(self.output, "Goodbye.")?;
        Ok(())
    }

    /// Print `text` and read one line; `None` at end of input
    fn prompt(&mut self, text: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn execute(&mut self, command: Command) -> anyhow::Result<()> {
        let result = match command {
            Command::Add(name) => self
                .tree
                .register(name)
                .map(|p| format!("Person {} registered with id {}.", p.name(), p.id())),
            Command::Delete(id) => return self.delete(id),
            Command::Search(name) => {
                let matches = self.tree.search(&name);
                Ok(match self.format {
                    OutputFormat::Json => format_json(&matches),
                    OutputFormat::Text => format_matches(&matches),
                })
            }
            Command::Tree => Ok(self.tree.render()),
            Command::Child(parent, child) => {
                self.tree.add_child(parent, child).and_then(|()| {
                    Ok(format!(
                        "{} is now a parent of {}",
                        self.tree.get(parent)?.name(),
                        self.tree.get(child)?.name()
                    ))
                })
            }
            Command::Partner(a, b) => self.tree.add_partner(a, b).and_then(|()| {
                Ok(format!(
                    "{} is now a partner of {}",
                    self.tree.get(a)?.name(),
                    self.tree.get(b)?.name()
                ))
            }),
            Command::Unpartner(a, b) => self.tree.remove_partner(a, b).and_then(|()| {
                Ok(format!(
                    "{} is no longer a partner of {}",
                    self.tree.get(a)?.name(),
                    self.tree.get(b)?.name()
                ))
            }),
            Command::Show(id) => {
                let tree = &*self.tree;
                tree.get(id).map(|person| match self.format {
                    OutputFormat::Json => format_json(person),
                    OutputFormat::Text => format_person(tree, person),
                })
            }
            Command::Ancestor(ancestor, descendant) => {
                let tree = &*self.tree;
                Ancestry::between(tree, ancestor, descendant).map(|ancestry| match self.format {
                    OutputFormat::Json => format_json(&ancestry),
                    OutputFormat::Text => format_ancestry(tree, &ancestry),
                })
            }
            Command::Help => Ok(HELP.to_string()),
            Command::Quit => Ok(String::new()),
        };

        match result {
            Ok(text) => writeln!(self.output, "{}", text)?,
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(())
    }

    /// Two-phase delete: a lineage break is confirmed before retrying
    fn delete(&mut self, id: PersonId) -> anyhow::Result<()> {
        let removed = match self.tree.delete(id, false) {
            Ok(person) => person,
            Err(e) if e.is_warning() => {
                writeln!(self.output, "{}", e)?;
                let answer = self.prompt("Continue? [y/N] ")?.unwrap_or_default();
                if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
                    tracing::info!("Deletion of {} cancelled", id);
                    writeln!(self.output, "Deletion cancelled.")?;
                    return Ok(());
                }
                match self.tree.delete(id, true) {
                    Ok(person) => person,
                    Err(e) => {
                        writeln!(self.output, "Error: {}", e)?;
                        return Ok(());
                    }
                }
            }
            Err(e) => {
                writeln!(self.output, "Error: {}", e)?;
                return Ok(());
            }
        };

        writeln!(self.output, "Person {} deleted.", removed.name())?;
        Ok(())
    }
}
