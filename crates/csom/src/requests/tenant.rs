use uuid::{uuid, Uuid};

use crate::error::Error;
use crate::id::IdProvider;
use crate::node::{Action, ActionObjectPath, ObjectPath};
use crate::requests::Request;
use crate::response::BatchResponse;
use crate::types::TenantProperties;

/// Well-known type of the tenant administration singleton.
pub const TENANT_ADMIN_TYPE_ID: Uuid = uuid!("268004ae-ef6b-4e9b-8425-127220d84719");

/// Read the tenant administration properties through a constructor path and
/// a select-all query.
#[derive(Debug, Default)]
pub struct GetTenantPropertiesRequest {
	query_id: Option<i32>,
}

impl GetTenantPropertiesRequest {
	pub fn new() -> Self {
		Self::default()
	}
}

impl Request for GetTenantPropertiesRequest {
	type Result = Option<TenantProperties>;

	fn get_request(&mut self, ids: &mut IdProvider) -> Result<Vec<ActionObjectPath>, Error> {
		let tenant_id = ids.next();
		let query_id = ids.next();
		self.query_id = Some(query_id);
		Ok(vec![
			ActionObjectPath::from_path(ObjectPath::Constructor {
				id: tenant_id,
				type_id: TENANT_ADMIN_TYPE_ID,
			}),
			ActionObjectPath::from_action(Action::Query {
				id: query_id,
				object_path_id: tenant_id,
				select_all: true,
				properties: vec![],
				child_items: None,
			}),
		])
	}

	fn process_response(&self, raw: &str) -> Result<Option<TenantProperties>, Error> {
		let id = self.query_id.ok_or(Error::NotBuilt)?;
		let batch = BatchResponse::parse(raw)?;
		batch.deserialize(id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::wire;
	use serde_json::json;

	#[test]
	fn test_constructor_path_and_select_all_query() {
		let mut request = GetTenantPropertiesRequest::new();
		let mut ids = IdProvider::new();
		let envelope = wire::render_envelope(&request.get_request(&mut ids).expect("should build"));

		assert!(envelope.contains(
			"<Constructor Id=\"1\" TypeId=\"{268004ae-ef6b-4e9b-8425-127220d84719}\" />"
		));
		assert!(envelope.contains(
			"<Query Id=\"2\" ObjectPathId=\"1\"><Query SelectAllProperties=\"true\">\
			 <Properties /></Query></Query>"
		));
	}

	#[test]
	fn test_correlation_miss_yields_none() {
		let mut request = GetTenantPropertiesRequest::new();
		let mut ids = IdProvider::new();
		request.get_request(&mut ids).expect("should build");

		let raw = json!([{ "ErrorInfo": null }]).to_string();
		assert!(request.process_response(&raw).expect("should parse").is_none());
	}

	#[test]
	fn test_properties_deserialize() {
		let mut request = GetTenantPropertiesRequest::new();
		let mut ids = IdProvider::new();
		request.get_request(&mut ids).expect("should build");

		let raw = json!([
			{ "ErrorInfo": null },
			2,
			{
				"_ObjectIdentity_": "c0ffee9d|740c6a0b-85e2-48a0-a494-e0f1759d4aa7:tenant",
				"RootSiteUrl": "https://contoso.example",
				"StorageQuota": 1048576,
				"HideDefaultThemes": false
			}
		])
		.to_string();

		let properties = request
			.process_response(&raw)
			.expect("should parse")
			.expect("should be present");
		assert_eq!(
			properties.root_site_url.as_deref(),
			Some("https://contoso.example")
		);
		assert_eq!(properties.storage_quota, Some(1048576));
		assert_eq!(properties.hide_default_themes, Some(false));
	}
}
