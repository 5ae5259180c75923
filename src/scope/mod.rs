//! The scope chain.
//!
//! Every running script executes inside a [`ScriptContext`]. Contexts form a
//! tree rooted at [`ContextId::GLOBAL`]: a block, function or script context
//! points at the context it was opened from, and a variable lookup walks that
//! chain outwards until it finds a context that binds the name.
//!
//! All contexts of one tree live in a [`ContextTree`] arena and refer to each
//! other by [`ContextId`]. A parent link is just an index, so re-pointing it is
//! cheap and a broken chain can't leave anything dangling; it is the job of the
//! [`Corrector`](crate::corrector::Corrector) to find and fix such chains.
//!
//! Each binding carries a [`ProtectionModifier`] that decides which other
//! contexts may see it.
mod protection;
mod script;
mod value;

use std::{collections::BTreeMap, fmt::Display, path::PathBuf};

use tracing::trace;

pub use self::{
	protection::ProtectionModifier,
	script::{Script, ScriptGroup},
	value::{NullValue, Value},
};
use crate::error::scope::ScopeError;

/// Handle of a context inside its [`ContextTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(usize);

impl ContextId {
	/// The root of every tree.
	pub const GLOBAL: ContextId = ContextId(0);
}

impl Display for ContextId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if *self == Self::GLOBAL { write!(f, "GLOBAL") } else { write!(f, "#{}", self.0) }
	}
}

/// Handle of a [`Script`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScriptId(usize);

/// Handle of a [`ScriptGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(usize);

impl GroupId {
	/// The group every tree starts with; its scope is [`ContextId::GLOBAL`].
	pub const GLOBAL: GroupId = GroupId(0);
}

/// A bound variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSlot<V> {
	pub protection: ProtectionModifier,
	pub value:      V,
}

/// One scope of the chain.
#[derive(Debug, Clone)]
pub struct ScriptContext<V> {
	parent:    Option<ContextId>,
	script:    Option<ScriptId>,
	group:     Option<GroupId>,
	variables: BTreeMap<String, VariableSlot<V>>,
}

impl<V> ScriptContext<V> {
	fn new(parent: Option<ContextId>, script: Option<ScriptId>, group: Option<GroupId>) -> Self {
		Self { parent, script, group, variables: BTreeMap::new() }
	}

	pub fn parent(&self) -> Option<ContextId> { self.parent }

	pub fn script(&self) -> Option<ScriptId> { self.script }

	pub fn group(&self) -> Option<GroupId> { self.group }

	/// Names bound directly in this context.
	pub fn local_variables(&self) -> impl Iterator<Item = &str> { self.variables.keys().map(String::as_str) }

	pub fn slots(&self) -> impl Iterator<Item = (&str, &VariableSlot<V>)> {
		self.variables.iter().map(|(name, slot)| (name.as_str(), slot))
	}

	pub(crate) fn remove_local(&mut self, name: &str) -> Option<VariableSlot<V>> { self.variables.remove(name) }
}

/// Arena holding every context, script and group of one running program.
#[derive(Debug, Clone)]
pub struct ContextTree<V = Value> {
	contexts: Vec<ScriptContext<V>>,
	scripts:  Vec<Script>,
	groups:   Vec<ScriptGroup>,
}

impl<V> Default for ContextTree<V> {
	fn default() -> Self { Self::new() }
}

impl<V> ContextTree<V> {
	pub fn new() -> Self {
		Self {
			contexts: vec![ScriptContext::new(None, None, Some(GroupId::GLOBAL))],
			scripts:  Vec::new(),
			groups:   vec![ScriptGroup::new("Global", None, ContextId::GLOBAL)],
		}
	}

	pub fn context(&self, id: ContextId) -> Result<&ScriptContext<V>, ScopeError> {
		self.contexts.get(id.0).ok_or(ScopeError::UnknownContext(id))
	}

	pub(crate) fn context_mut(&mut self, id: ContextId) -> Result<&mut ScriptContext<V>, ScopeError> {
		self.contexts.get_mut(id.0).ok_or(ScopeError::UnknownContext(id))
	}

	pub fn context_ids(&self) -> impl Iterator<Item = ContextId> { (0..self.contexts.len()).map(ContextId) }

	/// Open a new scope below `parent`.
	pub fn create_context(&mut self, parent: ContextId) -> Result<ContextId, ScopeError> {
		self.context(parent)?;
		Ok(self.push(ScriptContext::new(Some(parent), None, None)))
	}

	/// Open the top level scope of a script. The context belongs to the
	/// script's group.
	pub fn create_script_context(&mut self, parent: ContextId, script: ScriptId) -> Result<ContextId, ScopeError> {
		self.context(parent)?;
		let group = self.script(script).ok_or(ScopeError::UnknownScript(script))?.group;
		Ok(self.push(ScriptContext::new(Some(parent), Some(script), group)))
	}

	/// A context with no parent at all. Such a context is not rooted at
	/// `GLOBAL` until it is re-parented or repaired.
	pub fn create_detached_context(&mut self) -> ContextId { self.push(ScriptContext::new(None, None, None)) }

	fn push(&mut self, context: ScriptContext<V>) -> ContextId {
		let id = ContextId(self.contexts.len());
		trace!(%id, parent = ?context.parent, "created context");
		self.contexts.push(context);
		id
	}

	/// Register a group whose scope hangs below the scope of `parent`.
	pub fn add_group(&mut self, name: impl Into<String>, parent: GroupId) -> Result<GroupId, ScopeError> {
		let parent_context = self.group(parent).ok_or(ScopeError::UnknownGroup(parent))?.context;
		let id = GroupId(self.groups.len());
		let context = self.push(ScriptContext::new(Some(parent_context), None, Some(id)));
		self.groups.push(ScriptGroup::new(name, Some(parent), context));
		Ok(id)
	}

	/// Register a script, adding it to `group` when one is given.
	pub fn add_script(
		&mut self,
		name: impl Into<String>,
		directory: impl Into<PathBuf>,
		lines: Vec<String>,
		group: Option<GroupId>,
	) -> Result<ScriptId, ScopeError> {
		let id = ScriptId(self.scripts.len());
		if let Some(group) = group {
			self.groups.get_mut(group.0).ok_or(ScopeError::UnknownGroup(group))?.insert(id);
		}
		self.scripts.push(Script::new(name, directory, lines, group));
		Ok(id)
	}

	pub fn script(&self, id: ScriptId) -> Option<&Script> { self.scripts.get(id.0) }

	pub fn group(&self, id: GroupId) -> Option<&ScriptGroup> { self.groups.get(id.0) }

	/// The script a context runs, if any.
	pub fn script_of(&self, context: ContextId) -> Option<&Script> {
		self.contexts.get(context.0).and_then(|c| c.script).and_then(|s| self.script(s))
	}

	pub fn group_of(&self, context: ContextId) -> Option<GroupId> { self.contexts.get(context.0).and_then(|c| c.group) }

	pub fn parent(&self, id: ContextId) -> Result<Option<ContextId>, ScopeError> { Ok(self.context(id)?.parent) }

	/// Point `id` at a new parent without any checks. This can break the
	/// chain; the corrector is what finds and repairs such chains. `GLOBAL`
	/// never gets a parent.
	pub fn reparent(&mut self, id: ContextId, parent: Option<ContextId>) -> Result<(), ScopeError> {
		if let Some(parent) = parent {
			self.context(parent)?;
		}
		let context = self.context_mut(id)?;
		if id != ContextId::GLOBAL {
			trace!(%id, ?parent, "re-parented context");
			context.parent = parent;
		}
		Ok(())
	}

	/// Hang `id` directly below `GLOBAL`.
	pub fn orphan(&mut self, id: ContextId) -> Result<(), ScopeError> { self.reparent(id, Some(ContextId::GLOBAL)) }

	/// `id`, its parent, its grandparent and so on. The walk never visits more
	/// steps than there are contexts, so it ends even on a cyclic chain.
	pub fn ancestors(&self, id: ContextId) -> Ancestors<'_, V> {
		let next = self.contexts.get(id.0).map(|_| id);
		Ancestors { tree: self, next, remaining: self.contexts.len() }
	}

	/// Follow `n` parent links from `id`; `n == 0` is `id` itself.
	pub fn nth_parent(&self, id: ContextId, n: usize) -> Result<ContextId, ScopeError> {
		let mut current = id;
		self.context(current)?;
		for _ in 0..n {
			current = self.context(current)?.parent.ok_or(ScopeError::ParentChainTooShort { context: id, depth: n })?;
		}
		Ok(current)
	}

	/// Bind `name` in `id` itself. Returns false, leaving the old binding, when
	/// the name is already bound locally.
	pub fn add_variable(
		&mut self,
		id: ContextId,
		name: impl Into<String>,
		protection: ProtectionModifier,
		value: V,
	) -> Result<bool, ScopeError> {
		let variables = &mut self.context_mut(id)?.variables;
		let name = name.into();
		if variables.contains_key(&name) {
			return Ok(false);
		}
		variables.insert(name, VariableSlot { protection, value });
		Ok(true)
	}

	/// The context binding `name`, searching outwards from the `n`th parent of `id`.
	pub fn owner_of(&self, id: ContextId, name: &str, n: usize) -> Result<ContextId, ScopeError> {
		let start = self.nth_parent(id, n)?;
		self.ancestors(start)
			.find(|context| self.contexts[context.0].variables.contains_key(name))
			.ok_or_else(|| ScopeError::VariableNotFound { context: start, name: name.to_string() })
	}

	pub fn slot(&self, id: ContextId, name: &str, n: usize) -> Result<&VariableSlot<V>, ScopeError> {
		let owner = self.owner_of(id, name, n)?;
		self.contexts[owner.0]
			.variables
			.get(name)
			.ok_or_else(|| ScopeError::VariableNotFound { context: owner, name: name.to_string() })
	}

	pub fn get_variable(&self, id: ContextId, name: &str, n: usize) -> Result<&V, ScopeError> {
		Ok(&self.slot(id, name, n)?.value)
	}

	/// Like [`get_variable`](Self::get_variable), but on behalf of `accessor`,
	/// honouring the binding's protection.
	pub fn get_variable_from(
		&self,
		accessor: Option<ContextId>,
		id: ContextId,
		name: &str,
		n: usize,
	) -> Result<&V, ScopeError> {
		let owner = self.owner_of(id, name, n)?;
		let slot = self.slot(owner, name, 0)?;
		if !self.can_access(accessor, Some(owner), slot.protection) {
			return Err(ScopeError::AccessDenied { context: owner, name: name.to_string(), protection: slot.protection });
		}
		Ok(&slot.value)
	}

	/// Overwrite the value of the nearest binding, keeping its protection.
	pub fn set_variable(&mut self, id: ContextId, name: &str, value: V, n: usize) -> Result<(), ScopeError> {
		let owner = self.owner_of(id, name, n)?;
		if let Some(slot) = self.contexts[owner.0].variables.get_mut(name) {
			slot.value = value;
		}
		Ok(())
	}

	/// Unbind the nearest binding of `name`.
	pub fn remove_variable(&mut self, id: ContextId, name: &str, n: usize) -> Result<VariableSlot<V>, ScopeError> {
		let owner = self.owner_of(id, name, n)?;
		self.contexts[owner.0]
			.remove_local(name)
			.ok_or_else(|| ScopeError::VariableNotFound { context: owner, name: name.to_string() })
	}

	/// Every name visible from `id`, nearest scope first. Shadowed names show
	/// up once per scope that binds them.
	pub fn variable_list(&self, id: ContextId) -> Result<Vec<&str>, ScopeError> {
		self.context(id)?;
		Ok(self.ancestors(id).flat_map(move |context| self.contexts[context.0].local_variables()).collect())
	}

	pub fn local_variables(&self, id: ContextId) -> Result<Vec<&str>, ScopeError> {
		Ok(self.context(id)?.local_variables().collect())
	}

	pub fn can_access(&self, from: Option<ContextId>, to: Option<ContextId>, protection: ProtectionModifier) -> bool {
		ProtectionModifier::can_access(self, from, to, protection)
	}
}

/// Iterator returned by [`ContextTree::ancestors`].
pub struct Ancestors<'t, V> {
	tree:      &'t ContextTree<V>,
	next:      Option<ContextId>,
	remaining: usize,
}

impl<V> Iterator for Ancestors<'_, V> {
	type Item = ContextId;

	fn next(&mut self) -> Option<Self::Item> {
		if self.remaining == 0 {
			return None;
		}
		let current = self.next?;
		self.remaining -= 1;
		self.next = self.tree.contexts.get(current.0).and_then(|c| c.parent);
		Some(current)
	}
}
