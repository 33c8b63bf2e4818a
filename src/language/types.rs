//! Types representing a parsed Projectfile

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A natural number of unbounded size, kept as its normalized decimal
/// digits. There is no upper limit on the number of digits in a version
/// component so we don't narrow to a machine integer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Natural(String);

impl Natural {
    /// Accepts a non-empty run of ASCII digits. Leading zeros are dropped
    /// so that `007` and `7` compare equal.
    pub fn parse(digits: &str) -> Option<Natural> {
        if digits.is_empty() {
            return None;
        }
        if !digits
            .bytes()
            .all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Some(Natural("0".to_string()))
        } else {
            Some(Natural(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Natural {
    fn default() -> Self {
        Natural("0".to_string())
    }
}

impl From<u64> for Natural {
    fn from(value: u64) -> Self {
        Natural(value.to_string())
    }
}

// normalized digit strings order numerically by length first, then
// lexically.
impl Ord for Natural {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Natural {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Natural {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Natural {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// The minimum tool version a Projectfile declares with its `from` line.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Version {
    pub major: Natural,
    pub minor: Natural,
    pub patch: Natural,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Version {
        Version {
            major: Natural::from(major),
            minor: Natural::from(minor),
            patch: Natural::from(patch),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub version: Version,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub variables: Variables,
    pub commands: Commands,
}

impl Document {
    pub fn new() -> Document {
        Document::default()
    }

    /// The command currently being assembled: the first one, in
    /// declaration order, that has not been finished yet.
    pub fn current_command(&self) -> Option<&CommandSpec> {
        self.commands
            .first_unfinished()
            .and_then(|i| match &self.commands.entries[i].1 {
                Entry::Command(command) => Some(command),
                Entry::Alias(_) => None,
            })
    }

    pub fn current_command_mut(&mut self) -> Option<&mut CommandSpec> {
        let i = self
            .commands
            .advance_unfinished()?;

        match &mut self.commands.entries[i].1 {
            Entry::Command(command) => Some(command),
            Entry::Alias(_) => None,
        }
    }

    /// Look a name up, following an alias to the command it names. Aliases
    /// are only references by name, so this returns None if the target was
    /// never declared (or is itself an alias).
    pub fn resolve(&self, name: &str) -> Option<&CommandSpec> {
        match self
            .commands
            .get(name)?
        {
            Entry::Command(command) => Some(command),
            Entry::Alias(alias) => match self
                .commands
                .get(&alias.alias_of)?
            {
                Entry::Command(command) => Some(command),
                Entry::Alias(_) => None,
            },
        }
    }
}

/// Ordered name to value mapping. Declaring a name a second time replaces
/// the value but keeps the original position.
#[derive(Clone, Debug, Default)]
pub struct Variables {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Variables {
    pub fn insert(&mut self, name: String, value: String) {
        match self
            .index
            .get(&name)
        {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index
                    .insert(name.clone(), self.entries.len());
                self.entries
                    .push((name, value));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.index
            .get(name)
            .map(|&i| self.entries[i].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries
            .is_empty()
    }
}

// the index is derived from the entries
impl PartialEq for Variables {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Variables {}

impl<const N: usize> From<[(&str, &str); N]> for Variables {
    fn from(pairs: [(&str, &str); N]) -> Self {
        let mut variables = Variables::default();
        for (name, value) in pairs {
            variables.insert(name.to_string(), value.to_string());
        }
        variables
    }
}

impl Serialize for Variables {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Ordered mapping of command and alias names, sharing one namespace. The
/// order is significant to consumers: the first command is the default one.
///
/// Positions of commands inserted unfinished are kept in `pending`. Some
/// of them may since have been finished or overwritten; those are dropped
/// the next time the set is searched.
#[derive(Clone, Debug, Default)]
pub struct Commands {
    entries: Vec<(String, Entry)>,
    index: HashMap<String, usize>,
    pending: BTreeSet<usize>,
}

impl Commands {
    /// No uniqueness check is made here; re-declaring a name replaces the
    /// earlier entry in place.
    pub fn insert(&mut self, name: String, entry: Entry) {
        let unfinished = is_unfinished(&entry);

        let i = match self
            .index
            .get(&name)
        {
            Some(&i) => {
                self.entries[i].1 = entry;
                i
            }
            None => {
                let i = self
                    .entries
                    .len();
                self.index
                    .insert(name.clone(), i);
                self.entries
                    .push((name, entry));
                i
            }
        };

        if unfinished {
            self.pending
                .insert(i);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.index
            .get(name)
            .map(|&i| &self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries
            .is_empty()
    }

    /// Number of entries that are commands proper, not aliases.
    pub fn command_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, entry)| matches!(entry, Entry::Command(_)))
            .count()
    }

    pub fn alias_count(&self) -> usize {
        self.len() - self.command_count()
    }

    fn first_unfinished(&self) -> Option<usize> {
        self.pending
            .iter()
            .copied()
            .find(|&i| is_unfinished(&self.entries[i].1))
    }

    /// As first_unfinished(), but discarding the stale positions passed
    /// over so they are not looked at again.
    fn advance_unfinished(&mut self) -> Option<usize> {
        while let Some(&i) = self
            .pending
            .first()
        {
            if is_unfinished(&self.entries[i].1) {
                return Some(i);
            }
            self.pending
                .remove(&i);
        }
        None
    }
}

fn is_unfinished(entry: &Entry) -> bool {
    matches!(entry, Entry::Command(command) if !command.finished)
}

// the index and pending set are derived from the entries
impl PartialEq for Commands {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Commands {}

impl<const N: usize> From<[(&str, Entry); N]> for Commands {
    fn from(entries: [(&str, Entry); N]) -> Self {
        let mut commands = Commands::default();
        for (name, entry) in entries {
            commands.insert(name.to_string(), entry);
        }
        commands
    }
}

impl Serialize for Commands {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, entry) in self.iter() {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Entry {
    Command(CommandSpec),
    Alias(AliasSpec),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    pub finished: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    // None means the section was never opened, which is distinct from an
    // opened section with no lines in it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AliasSpec {
    pub alias_of: String,
}
