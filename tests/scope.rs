#[cfg(test)]
mod tests {
	use scriptlang::{
		ScopeError,
		scope::{ContextId, ContextTree, GroupId, ProtectionModifier, Value},
	};

	#[test]
	fn scripts_share_their_group_scope() {
		let mut tree = ContextTree::<Value>::new();
		let engine = tree.add_group("engine", GroupId::GLOBAL).unwrap();
		let scope = tree.group(engine).unwrap().context;
		tree.add_variable(scope, "ticks", ProtectionModifier::Group, Value::Integer(0)).unwrap();

		let core = tree.add_script("core", "engine", vec![], Some(engine)).unwrap();
		let menu = tree.add_script("menu", "ui", vec![], None).unwrap();
		let core = tree.create_script_context(scope, core).unwrap();
		let menu = tree.create_script_context(ContextId::GLOBAL, menu).unwrap();
		let block = tree.create_context(core).unwrap();

		assert_eq!(tree.get_variable_from(Some(block), block, "ticks", 0), Ok(&Value::Integer(0)));
		assert_eq!(tree.get_variable_from(Some(menu), scope, "ticks", 0), Ok(&Value::Integer(0)));
		assert_eq!(tree.get_variable_from(Some(ContextId::GLOBAL), scope, "ticks", 0), Ok(&Value::Integer(0)));
		assert!(matches!(
			tree.get_variable_from(None, scope, "ticks", 0),
			Err(ScopeError::AccessDenied { protection: ProtectionModifier::Group, .. })
		));

		tree.set_variable(block, "ticks", Value::Integer(1), 0).unwrap();
		let slot = tree.slot(scope, "ticks", 0).unwrap();
		assert_eq!(slot.value, Value::Integer(1));
		assert_eq!(slot.protection, ProtectionModifier::Group);
	}

	#[test]
	fn directory_variables() {
		let mut tree = ContextTree::<Value>::new();
		let owner = tree.add_script("config", "scripts/net", vec![], None).unwrap();
		let nested = tree.add_script("http", "scripts/net/http", vec![], None).unwrap();
		let outside = tree.add_script("main", "scripts", vec![], None).unwrap();
		let owner = tree.create_script_context(ContextId::GLOBAL, owner).unwrap();
		let nested = tree.create_script_context(ContextId::GLOBAL, nested).unwrap();
		let outside = tree.create_script_context(ContextId::GLOBAL, outside).unwrap();
		tree.add_variable(owner, "port", ProtectionModifier::Directory, Value::Integer(80)).unwrap();

		assert!(tree.get_variable_from(Some(nested), owner, "port", 0).is_ok());
		assert!(tree.get_variable_from(Some(outside), owner, "port", 0).is_err());
		assert!(tree.get_variable_from(Some(ContextId::GLOBAL), owner, "port", 0).is_err());
	}

	#[test]
	fn public_and_private() {
		let mut tree = ContextTree::<Value>::new();
		let a = tree.create_context(ContextId::GLOBAL).unwrap();
		let b = tree.create_context(ContextId::GLOBAL).unwrap();
		tree.add_variable(a, "open", ProtectionModifier::Public, Value::from("yes")).unwrap();
		tree.add_variable(a, "closed", ProtectionModifier::Private, Value::from("no")).unwrap();

		assert!(tree.get_variable_from(Some(b), a, "open", 0).is_ok());
		assert!(tree.get_variable_from(None, a, "open", 0).is_ok());
		assert!(tree.get_variable_from(Some(b), a, "closed", 0).is_err());
		assert!(tree.get_variable_from(Some(a), a, "closed", 0).is_ok());
	}

	#[test]
	fn depth_errors() {
		let mut tree = ContextTree::<Value>::new();
		let a = tree.create_context(ContextId::GLOBAL).unwrap();
		assert_eq!(
			tree.get_variable(a, "x", 2),
			Err(ScopeError::ParentChainTooShort { context: a, depth: 2 })
		);
		assert_eq!(
			tree.get_variable(a, "x", 1),
			Err(ScopeError::VariableNotFound { context: ContextId::GLOBAL, name: "x".to_string() })
		);
	}

	#[test]
	fn error_messages() {
		let error = ScopeError::VariableNotFound { context: ContextId::GLOBAL, name: "x".to_string() };
		assert_eq!(error.to_string(), "variable 'x' not found from context GLOBAL");
	}
}
