use uuid::{uuid, Uuid};

use crate::error::Error;
use crate::id::IdProvider;
use crate::identity::{tags, IdentityPath};
use crate::node::{Action, ActionObjectPath, ObjectPath};
use crate::parameter::{MethodParameter, TypedProperty};
use crate::requests::Request;
use crate::response::{self, BatchResponse};

/// Creation-information value type for field links.
pub const FIELD_LINK_CREATION_TYPE_ID: Uuid = uuid!("63fb2c92-8f65-4bbb-a658-b6cd294403f4");

/// Attach an existing field to a content type and read back the generated
/// field-link id from the `:fl:` segment of the returned identity.
#[derive(Debug)]
pub struct AddFieldLinkRequest {
	content_type: IdentityPath,
	field: IdentityPath,
	update_children: bool,
	identity_query_id: Option<i32>,
}

impl AddFieldLinkRequest {
	pub fn new(content_type: IdentityPath, field: IdentityPath) -> Self {
		Self {
			content_type,
			field,
			update_children: true,
			identity_query_id: None,
		}
	}
}

impl Request for AddFieldLinkRequest {
	type Result = Uuid;

	fn get_request(&mut self, ids: &mut IdProvider) -> Result<Vec<ActionObjectPath>, Error> {
		let mut out = Vec::with_capacity(7);

		let content_type_id = ids.next();
		out.push(ActionObjectPath::from_path(ObjectPath::Identity {
			id: content_type_id,
			name: self.content_type.render(),
		}));
		let field_id = ids.next();
		out.push(ActionObjectPath::from_path(ObjectPath::Identity {
			id: field_id,
			name: self.field.render(),
		}));
		let field_links_id = ids.next();
		out.push(ActionObjectPath::from_path(ObjectPath::Property {
			id: field_links_id,
			parent_id: content_type_id,
			name: "FieldLinks".to_string(),
		}));
		let add_id = ids.next();
		out.push(ActionObjectPath::from_path(ObjectPath::Method {
			id: add_id,
			parent_id: field_links_id,
			name: "Add".to_string(),
			parameters: vec![MethodParameter::Typed {
				type_id: FIELD_LINK_CREATION_TYPE_ID,
				properties: vec![TypedProperty::new(
					"Field",
					MethodParameter::ObjectPathRef(field_id),
				)],
			}],
		}));

		out.push(ActionObjectPath::from_action(Action::Touch {
			id: ids.next(),
			object_path_id: add_id,
		}));
		let identity_query_id = ids.next();
		self.identity_query_id = Some(identity_query_id);
		out.push(ActionObjectPath::from_action(Action::IdentityQuery {
			id: identity_query_id,
			object_path_id: add_id,
		}));
		out.push(ActionObjectPath::from_action(Action::Method {
			id: ids.next(),
			object_path_id: content_type_id,
			name: "Update".to_string(),
			parameters: vec![MethodParameter::boolean(self.update_children)],
		}));

		Ok(out)
	}

	/// The whole point of this request is the generated id, so a correlation
	/// miss surfaces as an error rather than an empty result.
	fn process_response(&self, raw: &str) -> Result<Uuid, Error> {
		let id = self.identity_query_id.ok_or(Error::NotBuilt)?;
		let batch = BatchResponse::parse(raw)?;
		let identity = batch
			.object_identity(id)
			.ok_or(Error::ResultMissing(id))?;
		response::identity_suffix(identity, tags::FIELD_LINK)
			.and_then(|suffix| Uuid::parse_str(suffix).ok())
			.ok_or_else(|| Error::parse("_ObjectIdentity_", "no field-link segment in identity"))
	}
}
