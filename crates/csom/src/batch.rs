use tracing::{debug, trace};

use crate::error::Error;
use crate::id::IdProvider;
use crate::node::ActionObjectPath;
use crate::requests::Request;
use crate::wire;

/// One outgoing envelope in the making.
///
/// The batch owns the id provider, so every request added to it draws from
/// the same sequence and later requests can reference nodes produced by
/// earlier ones. Merging preserves each builder's emission order, which is
/// allocation order; the service requires a node to be defined before any
/// action references it and the builders guarantee that per sequence.
#[derive(Debug, Default)]
pub struct Batch {
	ids: IdProvider,
	action_paths: Vec<ActionObjectPath>,
}

impl Batch {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a request into this batch. Build errors (bad input) surface
	/// here, before anything is serialized.
	pub fn add<R: Request>(&mut self, request: &mut R) -> Result<(), Error> {
		let sequence = request.get_request(&mut self.ids)?;
		trace!(entries = sequence.len(), "appended request to batch");
		self.action_paths.extend(sequence);
		Ok(())
	}

	pub fn is_empty(&self) -> bool {
		self.action_paths.is_empty()
	}

	/// Render the merged envelope. The transport layer owns sending it and
	/// handing the raw response text back to each request's
	/// `process_response`.
	pub fn to_envelope(&self) -> String {
		let envelope = wire::render_envelope(&self.action_paths);
		debug!(
			bytes = envelope.len(),
			entries = self.action_paths.len(),
			"rendered batch envelope"
		);
		envelope
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::identity::IdentityPath;
	use crate::requests::{AddRoleAssignmentRequest, GetTenantPropertiesRequest};
	use uuid::uuid;

	#[test]
	fn test_requests_share_one_id_sequence() {
		let mut batch = Batch::new();
		let mut first = GetTenantPropertiesRequest::new();
		let securable = IdentityPath::new(uuid!("fa6e159d-0000-0000-0000-0000000000aa"))
			.site("s")
			.web("w");
		let mut second = AddRoleAssignmentRequest::new(securable, 7, 1073741827);

		batch.add(&mut first).expect("should build");
		batch.add(&mut second).expect("should build");

		let envelope = batch.to_envelope();
		// First request takes ids 1-2, second continues at 3-4.
		assert!(envelope.contains("<Identity Id=\"3\""));
		assert!(envelope
			.contains("<Method Name=\"AddRoleAssignment\" Id=\"4\" ObjectPathId=\"3\">"));
	}
}
