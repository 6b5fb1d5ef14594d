use uuid::{uuid, Uuid};

use crate::error::Error;
use crate::id::IdProvider;
use crate::identity::IdentityPath;
use crate::node::{Action, ActionObjectPath, ObjectPath};
use crate::parameter::MethodParameter;
use crate::requests::Request;
use crate::response::{self, BatchResponse};

/// Well-known type of the per-context taxonomy session.
pub const TAXONOMY_SESSION_TYPE_ID: Uuid = uuid!("981cbc68-9edc-4f8d-872f-71146fcbb84f");

/// Wire a provisioned field to the term store: point its `SspId`/`TermSetId`
/// properties at the target term set, then `Update` it. Fire-and-forget.
#[derive(Debug)]
pub struct ProvisionTaxonomyFieldRequest {
	field: IdentityPath,
	ssp_id: Uuid,
	term_set_id: Uuid,
}

impl ProvisionTaxonomyFieldRequest {
	pub fn new(field: IdentityPath, ssp_id: Uuid, term_set_id: Uuid) -> Self {
		Self {
			field,
			ssp_id,
			term_set_id,
		}
	}
}

impl Request for ProvisionTaxonomyFieldRequest {
	type Result = ();

	fn get_request(&mut self, ids: &mut IdProvider) -> Result<Vec<ActionObjectPath>, Error> {
		let field_id = ids.next();
		Ok(vec![
			ActionObjectPath::from_path(ObjectPath::Identity {
				id: field_id,
				name: self.field.render(),
			}),
			ActionObjectPath::from_action(Action::Touch {
				id: ids.next(),
				object_path_id: field_id,
			}),
			ActionObjectPath::from_action(Action::SetProperty {
				id: ids.next(),
				object_path_id: field_id,
				name: "SspId".to_string(),
				parameter: MethodParameter::guid(self.ssp_id),
			}),
			ActionObjectPath::from_action(Action::SetProperty {
				id: ids.next(),
				object_path_id: field_id,
				name: "TermSetId".to_string(),
				parameter: MethodParameter::guid(self.term_set_id),
			}),
			ActionObjectPath::from_action(Action::SetProperty {
				id: ids.next(),
				object_path_id: field_id,
				name: "TargetTemplate".to_string(),
				parameter: MethodParameter::null(),
			}),
			ActionObjectPath::from_action(Action::SetProperty {
				id: ids.next(),
				object_path_id: field_id,
				name: "AnchorId".to_string(),
				parameter: MethodParameter::guid(Uuid::nil()),
			}),
			ActionObjectPath::from_action(Action::Method {
				id: ids.next(),
				object_path_id: field_id,
				name: "Update".to_string(),
				parameters: vec![],
			}),
		])
	}

	fn process_response(&self, raw: &str) -> Result<(), Error> {
		BatchResponse::parse(raw)?;
		Ok(())
	}
}

/// Resolve the default term store's id for the current context, via the
/// taxonomy session static property.
#[derive(Debug, Default)]
pub struct ResolveDefaultTermStoreRequest {
	query_id: Option<i32>,
}

impl ResolveDefaultTermStoreRequest {
	pub fn new() -> Self {
		Self::default()
	}
}

impl Request for ResolveDefaultTermStoreRequest {
	type Result = Option<Uuid>;

	fn get_request(&mut self, ids: &mut IdProvider) -> Result<Vec<ActionObjectPath>, Error> {
		let session_id = ids.next();
		let store_id = ids.next();
		let query_id = ids.next();
		self.query_id = Some(query_id);
		Ok(vec![
			ActionObjectPath::from_path(ObjectPath::StaticProperty {
				id: session_id,
				type_id: TAXONOMY_SESSION_TYPE_ID,
				name: "Current".to_string(),
			}),
			ActionObjectPath::from_path(ObjectPath::Method {
				id: store_id,
				parent_id: session_id,
				name: "GetDefaultSiteCollectionTermStore".to_string(),
				parameters: vec![],
			}),
			ActionObjectPath::from_action(Action::Query {
				id: query_id,
				object_path_id: store_id,
				select_all: false,
				properties: vec!["Id".to_string()],
				child_items: None,
			}),
		])
	}

	fn process_response(&self, raw: &str) -> Result<Option<Uuid>, Error> {
		let id = self.query_id.ok_or(Error::NotBuilt)?;
		let batch = BatchResponse::parse(raw)?;
		Ok(batch
			.find_object(id)
			.and_then(|value| value.get("Id"))
			.and_then(serde_json::Value::as_str)
			.and_then(response::wrapped_guid))
	}
}
