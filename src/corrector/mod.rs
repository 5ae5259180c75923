//! Audits contexts of a [`ContextTree`] and repairs the ones that break its
//! invariants: a context has no empty variable names, holds no null values,
//! and its parent chain is acyclic and ends at [`ContextId::GLOBAL`].
use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::{info, warn};

use crate::{
	error::scope::ScopeError,
	scope::{ContextId, ContextTree, NullValue},
};

/// What one verification pass found wrong with a context.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InvalidityReport {
	pub has_circular_chain:       bool,
	pub has_null_variable_names:  bool,
	pub has_null_variable_values: bool,
	/// Names bound to the null value.
	pub offending_variable_names: BTreeSet<String>,
	pub final_parent_is_wrong:    bool,
	/// Where the parent walk ended; `None` when it ran into a cycle.
	pub observed_final_parent:    Option<ContextId>,
}

impl InvalidityReport {
	/// Check `id` without touching any cache.
	pub fn inspect<V: NullValue>(tree: &ContextTree<V>, id: ContextId) -> Result<Self, ScopeError> {
		let context = tree.context(id)?;
		let mut report = Self::default();

		for (name, slot) in context.slots() {
			if name.is_empty() {
				report.has_null_variable_names = true;
			}
			if slot.value.is_null() {
				report.has_null_variable_values = true;
				report.offending_variable_names.insert(name.to_string());
			}
		}

		let mut seen = HashSet::new();
		let mut last = id;
		for ancestor in tree.ancestors(id) {
			if !seen.insert(ancestor) {
				break;
			}
			last = ancestor;
		}
		let cyclic = tree.parent(last)?.is_some_and(|parent| seen.contains(&parent));
		if cyclic {
			report.has_circular_chain = true;
		} else {
			report.observed_final_parent = Some(last);
			report.final_parent_is_wrong = last != ContextId::GLOBAL;
		}
		Ok(report)
	}

	pub fn is_valid(&self) -> bool {
		!(self.has_circular_chain
			|| self.has_null_variable_names
			|| self.has_null_variable_values
			|| self.final_parent_is_wrong)
	}
}

/// Verifies contexts and remembers every failing report until the context is
/// repaired.
#[derive(Debug, Default)]
pub struct Corrector {
	reports: HashMap<ContextId, InvalidityReport>,
}

impl Corrector {
	pub fn new() -> Self { Self::default() }

	/// Returns whether `id` is valid. A failing pass replaces the cached report;
	/// a passing one leaves any earlier report in place.
	pub fn verify<V: NullValue>(&mut self, tree: &ContextTree<V>, id: ContextId) -> Result<bool, ScopeError> {
		let report = InvalidityReport::inspect(tree, id)?;
		if report.is_valid() {
			return Ok(true);
		}
		warn!(context = %id, ?report, "context failed verification");
		self.reports.insert(id, report);
		Ok(false)
	}

	/// Fix whatever the cached report for `id` names, verifying first when
	/// there is no report. The report is dropped afterwards and the context is
	/// not verified again. Returns whether anything was repaired.
	pub fn repair<V: NullValue>(&mut self, tree: &mut ContextTree<V>, id: ContextId) -> Result<bool, ScopeError> {
		if !self.reports.contains_key(&id) && self.verify(tree, id)? {
			return Ok(false);
		}
		let Some(report) = self.reports.remove(&id) else {
			return Ok(false);
		};

		if let (true, Some(last)) = (report.final_parent_is_wrong, report.observed_final_parent) {
			tree.orphan(last)?;
		}
		if report.has_circular_chain {
			tree.orphan(id)?;
		}
		let context = tree.context_mut(id)?;
		if report.has_null_variable_names {
			context.remove_local("");
		}
		for name in &report.offending_variable_names {
			context.remove_local(name);
		}
		info!(context = %id, ?report, "repaired context");
		Ok(true)
	}

	/// Repair every context with a cached report. Returns how many were repaired.
	pub fn repair_all<V: NullValue>(&mut self, tree: &mut ContextTree<V>) -> Result<usize, ScopeError> {
		let pending: Vec<ContextId> = self.reports.keys().copied().collect();
		let mut repaired = 0;
		for id in pending {
			if self.repair(tree, id)? {
				repaired += 1;
			}
		}
		Ok(repaired)
	}

	pub fn report(&self, id: ContextId) -> Option<&InvalidityReport> { self.reports.get(&id) }

	pub fn reports(&self) -> &HashMap<ContextId, InvalidityReport> { &self.reports }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::scope::{ProtectionModifier, Value};

	fn tree() -> (ContextTree, ContextId, ContextId) {
		let mut tree = ContextTree::new();
		let a = tree.create_context(ContextId::GLOBAL).unwrap();
		let b = tree.create_context(a).unwrap();
		(tree, a, b)
	}

	#[test]
	fn valid_context() {
		let (mut tree, a, b) = tree();
		tree.add_variable(a, "x", ProtectionModifier::Public, Value::Integer(1)).unwrap();
		let mut corrector = Corrector::new();
		assert_eq!(corrector.verify(&tree, b), Ok(true));
		assert_eq!(corrector.verify(&tree, ContextId::GLOBAL), Ok(true));
		assert!(corrector.reports().is_empty());
		assert_eq!(corrector.repair(&mut tree, b), Ok(false));
	}

	#[test]
	fn two_context_cycle() {
		let (mut tree, a, b) = tree();
		tree.reparent(a, Some(b)).unwrap();
		let mut corrector = Corrector::new();
		assert_eq!(corrector.verify(&tree, a), Ok(false));
		let report = corrector.report(a).unwrap();
		assert!(report.has_circular_chain);
		assert!(!report.final_parent_is_wrong);
		assert_eq!(report.observed_final_parent, None);

		assert_eq!(corrector.repair(&mut tree, a), Ok(true));
		assert_eq!(tree.parent(a), Ok(Some(ContextId::GLOBAL)));
		assert!(corrector.report(a).is_none());
		assert_eq!(corrector.verify(&tree, a), Ok(true));
	}

	#[test]
	fn longer_cycle() {
		let (mut tree, a, b) = tree();
		let c = tree.create_context(b).unwrap();
		tree.reparent(a, Some(c)).unwrap();
		let mut corrector = Corrector::new();
		assert_eq!(corrector.verify(&tree, c), Ok(false));
		assert!(corrector.report(c).unwrap().has_circular_chain);
		corrector.repair(&mut tree, c).unwrap();
		assert_eq!(corrector.verify(&tree, c), Ok(true));
	}

	#[test]
	fn cycle_above_the_context() {
		let (mut tree, a, b) = tree();
		let c = tree.create_context(b).unwrap();
		tree.reparent(a, Some(b)).unwrap();
		let mut corrector = Corrector::new();
		assert_eq!(corrector.verify(&tree, c), Ok(false));
		corrector.repair(&mut tree, c).unwrap();
		assert_eq!(tree.parent(c), Ok(Some(ContextId::GLOBAL)));
		assert_eq!(corrector.verify(&tree, c), Ok(true));
	}

	#[test]
	fn detached_chain() {
		let mut tree = ContextTree::<Value>::new();
		let root = tree.create_detached_context();
		let leaf = tree.create_context(root).unwrap();
		let mut corrector = Corrector::new();
		assert_eq!(corrector.verify(&tree, leaf), Ok(false));
		let report = corrector.report(leaf).unwrap();
		assert!(report.final_parent_is_wrong);
		assert_eq!(report.observed_final_parent, Some(root));

		corrector.repair(&mut tree, leaf).unwrap();
		assert_eq!(tree.parent(root), Ok(Some(ContextId::GLOBAL)));
		assert_eq!(tree.parent(leaf), Ok(Some(root)));
		assert_eq!(corrector.verify(&tree, leaf), Ok(true));
	}

	#[test]
	fn null_names_and_values() {
		let (mut tree, a, _) = tree();
		tree.add_variable(a, "", ProtectionModifier::Public, Value::Integer(1)).unwrap();
		tree.add_variable(a, "gone", ProtectionModifier::Private, Value::Null).unwrap();
		tree.add_variable(a, "kept", ProtectionModifier::Public, Value::Boolean(false)).unwrap();
		let mut corrector = Corrector::new();
		assert_eq!(corrector.verify(&tree, a), Ok(false));
		let report = corrector.report(a).unwrap();
		assert!(report.has_null_variable_names);
		assert!(report.has_null_variable_values);
		assert_eq!(report.offending_variable_names, BTreeSet::from(["gone".to_string()]));

		corrector.repair(&mut tree, a).unwrap();
		assert_eq!(tree.local_variables(a).unwrap(), vec!["kept"]);
	}

	#[test]
	fn passing_verify_keeps_stale_report() {
		let (mut tree, a, _) = tree();
		tree.add_variable(a, "x", ProtectionModifier::Public, Value::Null).unwrap();
		let mut corrector = Corrector::new();
		assert_eq!(corrector.verify(&tree, a), Ok(false));
		tree.set_variable(a, "x", Value::Integer(1), 0).unwrap();
		assert_eq!(corrector.verify(&tree, a), Ok(true));
		assert!(corrector.report(a).is_some());

		// The stale report still drives the repair.
		corrector.repair(&mut tree, a).unwrap();
		assert!(tree.local_variables(a).unwrap().is_empty());
		assert!(corrector.report(a).is_none());
	}

	#[test]
	fn repair_all_drains_cache() {
		let (mut tree, a, b) = tree();
		let c = tree.create_context(ContextId::GLOBAL).unwrap();
		tree.add_variable(a, "x", ProtectionModifier::Public, Value::Null).unwrap();
		tree.add_variable(c, "y", ProtectionModifier::Public, Value::Null).unwrap();
		let mut corrector = Corrector::new();
		assert_eq!(corrector.verify(&tree, a), Ok(false));
		assert_eq!(corrector.verify(&tree, b), Ok(true));
		assert_eq!(corrector.verify(&tree, c), Ok(false));

		assert_eq!(corrector.repair_all(&mut tree), Ok(2));
		assert!(corrector.reports().is_empty());
		assert_eq!(corrector.repair_all(&mut tree), Ok(0));
		for id in [a, b, c] {
			assert_eq!(corrector.verify(&tree, id), Ok(true));
		}
	}
}
