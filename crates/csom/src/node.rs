use uuid::Uuid;

use crate::parameter::MethodParameter;

/// A node naming or deriving a reference to a remote object. Object paths
/// never mutate anything by themselves; actions do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectPath {
	/// Instantiate a top-level remote type (e.g. the tenant administration
	/// singleton) by its fixed type GUID.
	Constructor { id: i32, type_id: Uuid },
	/// A named property on a fixed well-known type, no runtime parent.
	StaticProperty {
		id: i32,
		type_id: Uuid,
		name: String,
	},
	/// A named property on a previously defined node.
	Property {
		id: i32,
		parent_id: i32,
		name: String,
	},
	/// Invoke a named method on a parent node, producing a new node.
	Method {
		id: i32,
		parent_id: i32,
		name: String,
		parameters: Vec<MethodParameter>,
	},
	/// A pre-existing remote object referenced purely by its identity string.
	Identity { id: i32, name: String },
}

impl ObjectPath {
	pub fn id(&self) -> i32 {
		match self {
			Self::Constructor { id, .. }
			| Self::StaticProperty { id, .. }
			| Self::Property { id, .. }
			| Self::Method { id, .. }
			| Self::Identity { id, .. } => *id,
		}
	}
}

/// Property selection for the nested child-item query of a collection read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildItemQuery {
	pub select_all: bool,
	pub properties: Vec<String>,
}

/// An operation applied to a previously defined object path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
	/// Bare object-path touch, forces the service to resolve the node.
	Touch { id: i32, object_path_id: i32 },
	/// Invoke a method for its side effect, creating no new node
	/// (e.g. `Update`, `DeleteObject`).
	Method {
		id: i32,
		object_path_id: i32,
		name: String,
		parameters: Vec<MethodParameter>,
	},
	/// Mutate a single property.
	SetProperty {
		id: i32,
		object_path_id: i32,
		name: String,
		parameter: MethodParameter,
	},
	/// Request selected (or all) properties of the node back, optionally with
	/// a nested query over its child items.
	Query {
		id: i32,
		object_path_id: i32,
		select_all: bool,
		properties: Vec<String>,
		child_items: Option<ChildItemQuery>,
	},
	/// Request only the node's identity string back.
	IdentityQuery { id: i32, object_path_id: i32 },
}

impl Action {
	pub fn id(&self) -> i32 {
		match self {
			Self::Touch { id, .. }
			| Self::Method { id, .. }
			| Self::SetProperty { id, .. }
			| Self::Query { id, .. }
			| Self::IdentityQuery { id, .. } => *id,
		}
	}
}

/// The unit emitted on the wire: an optional action paired with an optional
/// object path. Builders produce these in strict allocation order; the
/// serializer splits them into the `<Actions>` and `<ObjectPaths>` blocks
/// while preserving that order within each block.
#[derive(Debug, Clone, Default)]
pub struct ActionObjectPath {
	pub action: Option<Action>,
	pub object_path: Option<ObjectPath>,
}

impl ActionObjectPath {
	pub fn from_action(action: Action) -> Self {
		Self {
			action: Some(action),
			object_path: None,
		}
	}

	pub fn from_path(object_path: ObjectPath) -> Self {
		Self {
			action: None,
			object_path: Some(object_path),
		}
	}
}
