use std::fmt::Display;

use super::{ContextId, ContextTree};

/// How far a variable is visible outside the context that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProtectionModifier {
	/// Visible from everywhere.
	#[default]
	Public,
	/// Visible from any context whose enclosing chain stays in its own group.
	Group,
	/// Visible from scripts in the owner's directory and its subdirectories.
	Directory,
	/// Visible only from the owning context itself.
	Private,
}

impl ProtectionModifier {
	pub fn from_keyword(word: &str) -> Option<Self> {
		match word {
			"public" => Some(Self::Public),
			"group" => Some(Self::Group),
			"directory" => Some(Self::Directory),
			"private" => Some(Self::Private),
			_ => None,
		}
	}

	pub fn keyword(&self) -> &'static str {
		match self {
			Self::Public => "public",
			Self::Group => "group",
			Self::Directory => "directory",
			Self::Private => "private",
		}
	}

	/// Decide whether `from` may touch something owned by `to` that is guarded
	/// by `target`. A missing accessor only sees public data and nothing can
	/// be read from a missing owner.
	pub fn can_access<V>(tree: &ContextTree<V>, from: Option<ContextId>, to: Option<ContextId>, target: Self) -> bool {
		let Some(to) = to else {
			return false;
		};
		let Some(from) = from else {
			return target == Self::Public;
		};

		match target {
			Self::Private => from == to,
			Self::Directory => match (tree.script_of(from), tree.script_of(to)) {
				(Some(accessor), Some(owner)) => {
					from == ContextId::GLOBAL || accessor.directory().starts_with(owner.directory())
				}
				_ => false,
			},
			Self::Group => {
				let group = tree.group_of(from);
				tree.ancestors(from).any(|context| tree.group_of(context) == group)
			}
			Self::Public => true,
		}
	}
}

impl Display for ProtectionModifier {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.keyword()) }
}
