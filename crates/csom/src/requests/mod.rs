//! Per-operation request builders.
//!
//! Each builder turns operation parameters into an ordered action/object-path
//! sequence against a shared [`IdProvider`], remembering the ids whose
//! response values constitute its result, and later extracts that result from
//! the raw batch response text.

use crate::error::Error;
use crate::id::IdProvider;
use crate::node::ActionObjectPath;

mod field_link;
mod list_item;
mod role_assignment;
mod taxonomy;
mod tenant;
mod term;

pub use field_link::AddFieldLinkRequest;
pub use list_item::{FieldUpdate, UpdateListItemRequest};
pub use role_assignment::AddRoleAssignmentRequest;
pub use taxonomy::{ProvisionTaxonomyFieldRequest, ResolveDefaultTermStoreRequest};
pub use tenant::GetTenantPropertiesRequest;
pub use term::{AddTermRequest, GetTermsRequest};

/// One logical operation against the service.
///
/// `get_request` is called exactly once per batch attempt and must allocate
/// every id it needs from the shared provider, recording the ones it will
/// correlate on. `process_response` is called once the batch answer arrives;
/// it only reads the recorded ids and the raw text, so invoking it repeatedly
/// against the same response is safe.
pub trait Request {
	type Result;

	fn get_request(&mut self, ids: &mut IdProvider) -> Result<Vec<ActionObjectPath>, Error>;

	fn process_response(&self, raw: &str) -> Result<Self::Result, Error>;
}
