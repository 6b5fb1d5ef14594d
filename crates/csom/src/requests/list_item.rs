use crate::error::Error;
use crate::fields::{encode_field_update, FieldValue};
use crate::id::IdProvider;
use crate::identity::IdentityPath;
use crate::node::{Action, ActionObjectPath, ObjectPath};
use crate::requests::Request;
use crate::response::BatchResponse;

/// One already-filtered field mutation. The model layer decides which fields
/// are dirty; this builder only receives the survivors.
#[derive(Debug, Clone)]
pub struct FieldUpdate {
	pub name: String,
	pub value: FieldValue,
	/// Identity of the taxonomy field itself, required when `value` is a
	/// multi-value taxonomy update (it becomes the anchor node the value
	/// parameter references).
	pub anchor: Option<IdentityPath>,
}

impl FieldUpdate {
	pub fn new(name: impl Into<String>, value: FieldValue) -> Self {
		Self {
			name: name.into(),
			value,
			anchor: None,
		}
	}

	pub fn with_anchor(mut self, anchor: IdentityPath) -> Self {
		self.anchor = Some(anchor);
		self
	}
}

/// Update fields of an existing list item, then `Update` it.
#[derive(Debug)]
pub struct UpdateListItemRequest {
	item: IdentityPath,
	updates: Vec<FieldUpdate>,
	update_action_id: Option<i32>,
}

impl UpdateListItemRequest {
	pub fn new(item: IdentityPath, updates: Vec<FieldUpdate>) -> Self {
		Self {
			item,
			updates,
			update_action_id: None,
		}
	}
}

impl Request for UpdateListItemRequest {
	type Result = ();

	fn get_request(&mut self, ids: &mut IdProvider) -> Result<Vec<ActionObjectPath>, Error> {
		let mut out = Vec::with_capacity(self.updates.len() + 4);

		let item_path_id = ids.next();
		out.push(ActionObjectPath::from_path(ObjectPath::Identity {
			id: item_path_id,
			name: self.item.render(),
		}));
		out.push(ActionObjectPath::from_action(Action::Touch {
			id: ids.next(),
			object_path_id: item_path_id,
		}));
		out.push(ActionObjectPath::from_action(Action::IdentityQuery {
			id: ids.next(),
			object_path_id: item_path_id,
		}));

		for update in &self.updates {
			let anchor_path_id = match (&update.value, &update.anchor) {
				(FieldValue::MultiTaxonomy(_), Some(anchor)) => {
					let anchor_id = ids.next();
					out.push(ActionObjectPath::from_path(ObjectPath::Identity {
						id: anchor_id,
						name: anchor.render(),
					}));
					Some(anchor_id)
				}
				_ => None,
			};
			let [declaration, value] =
				encode_field_update(&update.name, &update.value, anchor_path_id)?;
			out.push(ActionObjectPath::from_action(Action::Method {
				id: ids.next(),
				object_path_id: item_path_id,
				name: "SetFieldValue".to_string(),
				parameters: vec![declaration, value],
			}));
		}

		let update_action_id = ids.next();
		self.update_action_id = Some(update_action_id);
		out.push(ActionObjectPath::from_action(Action::Method {
			id: update_action_id,
			object_path_id: item_path_id,
			name: "Update".to_string(),
			parameters: vec![],
		}));

		Ok(out)
	}

	/// Fire-and-forget: a parseable, non-error response is the success
	/// signal.
	fn process_response(&self, raw: &str) -> Result<(), Error> {
		BatchResponse::parse(raw)?;
		if let Some(id) = self.update_action_id {
			tracing::trace!(id, "list item update acknowledged");
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::wire;
	use uuid::uuid;

	fn test_item() -> IdentityPath {
		IdentityPath::new(uuid!("fa6e159d-0000-0000-0000-0000000000aa"))
			.site("test-site-id")
			.web("test-web-id")
			.list("test-list-id")
			.item(1, 1)
	}

	#[test]
	fn test_single_field_update_action_ids() {
		let mut request = UpdateListItemRequest::new(
			test_item(),
			vec![FieldUpdate::new(
				"Test Field",
				FieldValue::Text("Test field value".to_string()),
			)],
		);
		let mut ids = IdProvider::new();
		let sequence = request.get_request(&mut ids).expect("should build");
		let envelope = wire::render_envelope(&sequence);

		assert!(envelope.contains(
			"<Method Name=\"SetFieldValue\" Id=\"4\" ObjectPathId=\"1\"><Parameters>\
			 <Parameter Type=\"String\">Test Field</Parameter>\
			 <Parameter Type=\"String\">Test field value</Parameter>\
			 </Parameters></Method>\
			 <Method Name=\"Update\" Id=\"5\" ObjectPathId=\"1\"></Method>"
		));
		assert!(envelope.contains(
			"<Identity Id=\"1\" Name=\"fa6e159d-0000-0000-0000-0000000000aa\
			 |740c6a0b-85e2-48a0-a494-e0f1759d4aa7\
			 :site:test-site-id:web:test-web-id:list:test-list-id:item:1,1\" />"
		));
	}

	#[test]
	fn test_multi_taxonomy_update_emits_anchor_path() {
		let anchor = IdentityPath::new(uuid!("fa6e159d-0000-0000-0000-0000000000aa"))
			.site("s")
			.web("w")
			.field("f-1");
		let mut request = UpdateListItemRequest::new(
			test_item(),
			vec![FieldUpdate::new(
				"SomeTestField",
				FieldValue::MultiTaxonomy(vec![]),
			)
			.with_anchor(anchor)],
		);
		let mut ids = IdProvider::new();
		let sequence = request.get_request(&mut ids).expect("should build");
		let envelope = wire::render_envelope(&sequence);

		// Anchor path gets id 4, so the value parameter references it.
		assert!(envelope.contains(":field:f-1"));
		assert!(envelope.contains("<Parameter ObjectPathId=\"4\" />"));
	}

	#[test]
	fn test_multi_taxonomy_without_anchor_fails_before_serialization() {
		let mut request = UpdateListItemRequest::new(
			test_item(),
			vec![FieldUpdate::new(
				"SomeTestField",
				FieldValue::MultiTaxonomy(vec![]),
			)],
		);
		let mut ids = IdProvider::new();
		assert!(matches!(
			request.get_request(&mut ids),
			Err(Error::MissingTaxonomyAnchor(_))
		));
	}
}
