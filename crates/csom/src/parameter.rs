use uuid::Uuid;

/// A method/set-property parameter value.
///
/// The `Scalar` type name is rendered verbatim on the wire, so the
/// default-vs-explicit distinction callers rely on (an inferred integer
/// renders `Int32`, an explicitly overridden one renders whatever was asked
/// for, e.g. `Int`) is preserved by construction rather than normalized away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodParameter {
	Scalar {
		type_name: String,
		value: Option<String>,
	},
	/// A complex remote value, identified by its type GUID, with named
	/// sub-properties. Omitted sub-properties are carried as `Null` scalars.
	Typed {
		type_id: Uuid,
		properties: Vec<TypedProperty>,
	},
	Array(Vec<MethodParameter>),
	/// No inline value: "use the value produced by node N".
	ObjectPathRef(i32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedProperty {
	pub name: String,
	pub parameter: MethodParameter,
}

impl TypedProperty {
	pub fn new(name: impl Into<String>, parameter: MethodParameter) -> Self {
		Self {
			name: name.into(),
			parameter,
		}
	}
}

impl MethodParameter {
	pub fn string(value: impl Into<String>) -> Self {
		Self::Scalar {
			type_name: "String".to_string(),
			value: Some(value.into()),
		}
	}

	/// Integer with the service's default wire type.
	pub fn int32(value: i64) -> Self {
		Self::Scalar {
			type_name: "Int32".to_string(),
			value: Some(value.to_string()),
		}
	}

	/// Integer with an explicitly requested wire type name (some call sites
	/// expect `Int` rather than `Int32`; the override is rendered verbatim).
	pub fn int_with_type(value: i64, type_name: impl Into<String>) -> Self {
		Self::Scalar {
			type_name: type_name.into(),
			value: Some(value.to_string()),
		}
	}

	pub fn boolean(value: bool) -> Self {
		Self::Scalar {
			type_name: "Boolean".to_string(),
			value: Some(value.to_string()),
		}
	}

	/// Guids are rendered braced, the only form the service accepts inline.
	pub fn guid(value: Uuid) -> Self {
		Self::Scalar {
			type_name: "Guid".to_string(),
			value: Some(format!("{{{value}}}")),
		}
	}

	pub fn null() -> Self {
		Self::Scalar {
			type_name: "Null".to_string(),
			value: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_explicit_integer_type_is_kept_verbatim() {
		let inferred = MethodParameter::int32(7);
		let overridden = MethodParameter::int_with_type(7, "Int");

		assert_eq!(
			inferred,
			MethodParameter::Scalar {
				type_name: "Int32".to_string(),
				value: Some("7".to_string())
			}
		);
		assert_eq!(
			overridden,
			MethodParameter::Scalar {
				type_name: "Int".to_string(),
				value: Some("7".to_string())
			}
		);
	}
}
