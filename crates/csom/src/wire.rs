//! Renderer for the object-path wire grammar.
//!
//! A pure tree-to-text transform. The grammar is byte-exact: the service
//! rejects envelopes whose tag shapes or attribute order deviate, so
//! everything here writes fixed text rather than going through a generic XML
//! layer. Order of elements inside `<Actions>` and `<ObjectPaths>` follows
//! the order the builders emitted, which is allocation order.

use crate::node::{Action, ActionObjectPath, ObjectPath};
use crate::parameter::MethodParameter;

pub const SCHEMA_VERSION: &str = "15.0.0.0";
pub const LIBRARY_VERSION: &str = "16.0.0.0";
pub const APPLICATION_NAME: &str = "Lodestone SDK";
const XMLNS: &str = "http://schemas.microsoft.com/sharepoint/clientquery/2009";

/// Render a full request envelope from an ordered action/object-path list.
pub fn render_envelope(action_paths: &[ActionObjectPath]) -> String {
	let mut out = String::with_capacity(512);
	out.push_str(&format!(
		"<Request AddExpandoFieldTypeSuffix=\"true\" SchemaVersion=\"{SCHEMA_VERSION}\" \
		 LibraryVersion=\"{LIBRARY_VERSION}\" ApplicationName=\"{APPLICATION_NAME}\" \
		 xmlns=\"{XMLNS}\"><Actions>"
	));
	for entry in action_paths {
		if let Some(action) = &entry.action {
			render_action(action, &mut out);
		}
	}
	out.push_str("</Actions><ObjectPaths>");
	for entry in action_paths {
		if let Some(path) = &entry.object_path {
			render_object_path(path, &mut out);
		}
	}
	out.push_str("</ObjectPaths></Request>");
	out
}

pub fn render_action(action: &Action, out: &mut String) {
	match action {
		Action::Touch { id, object_path_id } => {
			out.push_str(&format!(
				"<ObjectPath Id=\"{id}\" ObjectPathId=\"{object_path_id}\" />"
			));
		}
		Action::Method {
			id,
			object_path_id,
			name,
			parameters,
		} => {
			out.push_str(&format!(
				"<Method Name=\"{}\" Id=\"{id}\" ObjectPathId=\"{object_path_id}\">",
				escape(name)
			));
			render_parameters(parameters, out);
			out.push_str("</Method>");
		}
		Action::SetProperty {
			id,
			object_path_id,
			name,
			parameter,
		} => {
			out.push_str(&format!(
				"<SetProperty Id=\"{id}\" ObjectPathId=\"{object_path_id}\" Name=\"{}\">",
				escape(name)
			));
			render_parameter("Parameter", None, parameter, out);
			out.push_str("</SetProperty>");
		}
		Action::Query {
			id,
			object_path_id,
			select_all,
			properties,
			child_items,
		} => {
			out.push_str(&format!(
				"<Query Id=\"{id}\" ObjectPathId=\"{object_path_id}\">"
			));
			render_query_body("Query", *select_all, properties, out);
			if let Some(child) = child_items {
				render_query_body("ChildItemQuery", child.select_all, &child.properties, out);
			}
			out.push_str("</Query>");
		}
		Action::IdentityQuery { id, object_path_id } => {
			out.push_str(&format!(
				"<ObjectIdentityQuery Id=\"{id}\" ObjectPathId=\"{object_path_id}\" />"
			));
		}
	}
}

fn render_query_body(tag: &str, select_all: bool, properties: &[String], out: &mut String) {
	out.push_str(&format!("<{tag} SelectAllProperties=\"{select_all}\">"));
	if properties.is_empty() {
		out.push_str("<Properties />");
	} else {
		out.push_str("<Properties>");
		for property in properties {
			out.push_str(&format!(
				"<Property Name=\"{}\" ScalarProperty=\"true\" />",
				escape(property)
			));
		}
		out.push_str("</Properties>");
	}
	out.push_str(&format!("</{tag}>"));
}

pub fn render_object_path(path: &ObjectPath, out: &mut String) {
	match path {
		ObjectPath::Constructor { id, type_id } => {
			out.push_str(&format!(
				"<Constructor Id=\"{id}\" TypeId=\"{{{type_id}}}\" />"
			));
		}
		ObjectPath::StaticProperty { id, type_id, name } => {
			out.push_str(&format!(
				"<StaticProperty Id=\"{id}\" TypeId=\"{{{type_id}}}\" Name=\"{}\" />",
				escape(name)
			));
		}
		ObjectPath::Property {
			id,
			parent_id,
			name,
		} => {
			out.push_str(&format!(
				"<Property Id=\"{id}\" ParentId=\"{parent_id}\" Name=\"{}\" />",
				escape(name)
			));
		}
		ObjectPath::Method {
			id,
			parent_id,
			name,
			parameters,
		} => {
			out.push_str(&format!(
				"<Method Id=\"{id}\" ParentId=\"{parent_id}\" Name=\"{}\">",
				escape(name)
			));
			render_parameters(parameters, out);
			out.push_str("</Method>");
		}
		ObjectPath::Identity { id, name } => {
			out.push_str(&format!(
				"<Identity Id=\"{id}\" Name=\"{}\" />",
				escape(name)
			));
		}
	}
}

/// The `<Parameters>` block is omitted entirely when the list is empty.
fn render_parameters(parameters: &[MethodParameter], out: &mut String) {
	if parameters.is_empty() {
		return;
	}
	out.push_str("<Parameters>");
	for parameter in parameters {
		render_parameter("Parameter", None, parameter, out);
	}
	out.push_str("</Parameters>");
}

/// Render one parameter value under the given tag (`Parameter` at the top
/// level, `Object` inside arrays, `Property` inside complex-typed values).
fn render_parameter(tag: &str, name: Option<&str>, parameter: &MethodParameter, out: &mut String) {
	let name_attr = name
		.map(|n| format!(" Name=\"{}\"", escape(n)))
		.unwrap_or_default();
	match parameter {
		MethodParameter::Scalar { type_name, value } => match value {
			Some(value) => {
				out.push_str(&format!(
					"<{tag}{name_attr} Type=\"{type_name}\">{}</{tag}>",
					escape(value)
				));
			}
			None => {
				out.push_str(&format!("<{tag}{name_attr} Type=\"{type_name}\" />"));
			}
		},
		MethodParameter::Typed {
			type_id,
			properties,
		} => {
			out.push_str(&format!("<{tag}{name_attr} TypeId=\"{{{type_id}}}\">"));
			for property in properties {
				render_parameter("Property", Some(&property.name), &property.parameter, out);
			}
			out.push_str(&format!("</{tag}>"));
		}
		MethodParameter::Array(items) => {
			out.push_str(&format!("<{tag}{name_attr} Type=\"Array\">"));
			for item in items {
				render_parameter("Object", None, item, out);
			}
			out.push_str(&format!("</{tag}>"));
		}
		MethodParameter::ObjectPathRef(object_path_id) => {
			out.push_str(&format!(
				"<{tag}{name_attr} ObjectPathId=\"{object_path_id}\" />"
			));
		}
	}
}

fn escape(raw: &str) -> String {
	let mut escaped = String::with_capacity(raw.len());
	for c in raw.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&apos;"),
			_ => escaped.push(c),
		}
	}
	escaped
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parameter::TypedProperty;
	use uuid::uuid;

	#[test]
	fn test_method_action_without_parameters_keeps_closing_tag() {
		let action = Action::Method {
			id: 5,
			object_path_id: 1,
			name: "Update".to_string(),
			parameters: vec![],
		};
		let mut out = String::new();
		render_action(&action, &mut out);
		assert_eq!(out, "<Method Name=\"Update\" Id=\"5\" ObjectPathId=\"1\"></Method>");
	}

	#[test]
	fn test_method_action_with_parameters() {
		let action = Action::Method {
			id: 4,
			object_path_id: 1,
			name: "SetFieldValue".to_string(),
			parameters: vec![
				MethodParameter::string("Test Field"),
				MethodParameter::string("Test field value"),
			],
		};
		let mut out = String::new();
		render_action(&action, &mut out);
		assert_eq!(
			out,
			"<Method Name=\"SetFieldValue\" Id=\"4\" ObjectPathId=\"1\"><Parameters>\
			 <Parameter Type=\"String\">Test Field</Parameter>\
			 <Parameter Type=\"String\">Test field value</Parameter>\
			 </Parameters></Method>"
		);
	}

	#[test]
	fn test_identity_path_self_closes() {
		let path = ObjectPath::Identity {
			id: 1,
			name: "abc:site:s1".to_string(),
		};
		let mut out = String::new();
		render_object_path(&path, &mut out);
		assert_eq!(out, "<Identity Id=\"1\" Name=\"abc:site:s1\" />");
	}

	#[test]
	fn test_complex_typed_parameter_with_null_property() {
		let parameter = MethodParameter::Typed {
			type_id: uuid!("f1d34cc0-9b50-4a78-be78-d5facfcccfb7"),
			properties: vec![
				TypedProperty::new("LookupId", MethodParameter::int32(2)),
				TypedProperty::new("LookupValue", MethodParameter::null()),
			],
		};
		let mut out = String::new();
		render_parameter("Parameter", None, &parameter, &mut out);
		assert_eq!(
			out,
			"<Parameter TypeId=\"{f1d34cc0-9b50-4a78-be78-d5facfcccfb7}\">\
			 <Property Name=\"LookupId\" Type=\"Int32\">2</Property>\
			 <Property Name=\"LookupValue\" Type=\"Null\" />\
			 </Parameter>"
		);
	}

	#[test]
	fn test_array_parameter_of_strings() {
		let parameter = MethodParameter::Array(vec![
			MethodParameter::string("a"),
			MethodParameter::string("b"),
		]);
		let mut out = String::new();
		render_parameter("Parameter", None, &parameter, &mut out);
		assert_eq!(
			out,
			"<Parameter Type=\"Array\"><Object Type=\"String\">a</Object>\
			 <Object Type=\"String\">b</Object></Parameter>"
		);
	}

	#[test]
	fn test_reference_only_parameter() {
		let mut out = String::new();
		render_parameter("Parameter", None, &MethodParameter::ObjectPathRef(1), &mut out);
		assert_eq!(out, "<Parameter ObjectPathId=\"1\" />");
	}

	#[test]
	fn test_query_action_selecting_all() {
		let action = Action::Query {
			id: 2,
			object_path_id: 1,
			select_all: true,
			properties: vec![],
			child_items: None,
		};
		let mut out = String::new();
		render_action(&action, &mut out);
		assert_eq!(
			out,
			"<Query Id=\"2\" ObjectPathId=\"1\"><Query SelectAllProperties=\"true\">\
			 <Properties /></Query></Query>"
		);
	}

	#[test]
	fn test_text_content_is_escaped() {
		let mut out = String::new();
		render_parameter("Parameter", None, &MethodParameter::string("a<b&c"), &mut out);
		assert_eq!(out, "<Parameter Type=\"String\">a&lt;b&amp;c</Parameter>");
	}
}
