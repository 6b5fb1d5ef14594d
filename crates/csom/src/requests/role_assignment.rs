use crate::error::Error;
use crate::id::IdProvider;
use crate::identity::IdentityPath;
use crate::node::{Action, ActionObjectPath, ObjectPath};
use crate::parameter::MethodParameter;
use crate::requests::Request;
use crate::response::BatchResponse;

/// Grant a role definition to a principal on a securable object.
/// Fire-and-forget.
#[derive(Debug)]
pub struct AddRoleAssignmentRequest {
	securable: IdentityPath,
	principal_id: i64,
	role_definition_id: i64,
}

impl AddRoleAssignmentRequest {
	pub fn new(securable: IdentityPath, principal_id: i64, role_definition_id: i64) -> Self {
		Self {
			securable,
			principal_id,
			role_definition_id,
		}
	}
}

impl Request for AddRoleAssignmentRequest {
	type Result = ();

	fn get_request(&mut self, ids: &mut IdProvider) -> Result<Vec<ActionObjectPath>, Error> {
		let securable_id = ids.next();
		Ok(vec![
			ActionObjectPath::from_path(ObjectPath::Identity {
				id: securable_id,
				name: self.securable.render(),
			}),
			ActionObjectPath::from_action(Action::Method {
				id: ids.next(),
				object_path_id: securable_id,
				name: "AddRoleAssignment".to_string(),
				parameters: vec![
					MethodParameter::int32(self.principal_id),
					MethodParameter::int32(self.role_definition_id),
				],
			}),
		])
	}

	fn process_response(&self, raw: &str) -> Result<(), Error> {
		BatchResponse::parse(raw)?;
		Ok(())
	}
}
