use crate::scope::{ContextId, GroupId, ProtectionModifier, ScriptId};

/// Scope chain lookup failures
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
	/// The walk reached the root without finding the name
	#[error("variable '{name}' not found from context {context}")]
	VariableNotFound { context: ContextId, name: String },
	/// Fewer than `depth` parents above the context
	#[error("parent chain of context {context} is shorter than {depth}")]
	ParentChainTooShort { context: ContextId, depth: usize },
	/// A handle that does not belong to this tree
	#[error("unknown context {0}")]
	UnknownContext(ContextId),
	#[error("unknown script {0:?}")]
	UnknownScript(ScriptId),
	#[error("unknown group {0:?}")]
	UnknownGroup(GroupId),
	/// The caller may not see the variable
	#[error("{protection} variable '{name}' in context {context} is not accessible")]
	AccessDenied { context: ContextId, name: String, protection: ProtectionModifier },
}
