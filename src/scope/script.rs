use std::{
	collections::HashSet,
	path::{Path, PathBuf},
};

use super::{ContextId, GroupId, ScriptId};

/// A loaded script. Only its identity, directory and group matter to the scope
/// chain; they decide `DIRECTORY` and `GROUP` access.
#[derive(Debug, Clone)]
pub struct Script {
	pub name:      String,
	pub directory: PathBuf,
	pub group:     Option<GroupId>,
	lines:         Vec<String>,
}

impl Script {
	pub fn new(name: impl Into<String>, directory: impl Into<PathBuf>, lines: Vec<String>, group: Option<GroupId>) -> Self {
		Self { name: name.into(), directory: directory.into(), group, lines }
	}

	pub fn directory(&self) -> &Path { &self.directory }

	/// The raw source of a 1-based line.
	pub fn raw_line(&self, line: usize) -> Option<&str> {
		line.checked_sub(1).and_then(|index| self.lines.get(index)).map(String::as_str)
	}
}

/// A named collection of scripts sharing one variable scope.
#[derive(Debug, Clone)]
pub struct ScriptGroup {
	pub name:    String,
	pub parent:  Option<GroupId>,
	/// The group's own scope.
	pub context: ContextId,
	members:     HashSet<ScriptId>,
}

impl ScriptGroup {
	pub(super) fn new(name: impl Into<String>, parent: Option<GroupId>, context: ContextId) -> Self {
		Self { name: name.into(), parent, context, members: HashSet::new() }
	}

	pub(super) fn insert(&mut self, script: ScriptId) { self.members.insert(script); }

	/// A copy of the member set; membership only changes through the tree.
	pub fn scripts(&self) -> HashSet<ScriptId> { self.members.clone() }

	pub fn has_script(&self, script: ScriptId) -> bool { self.members.contains(&script) }

	pub fn has_any_scripts(&self, scripts: &[ScriptId]) -> bool { scripts.iter().any(|s| self.has_script(*s)) }

	pub fn has_all_scripts(&self, scripts: &[ScriptId]) -> bool { scripts.iter().all(|s| self.has_script(*s)) }
}
