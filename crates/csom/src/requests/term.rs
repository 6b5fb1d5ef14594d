use uuid::Uuid;

use crate::error::Error;
use crate::id::IdProvider;
use crate::identity::{tags, IdentityPath};
use crate::node::{Action, ActionObjectPath, ChildItemQuery, ObjectPath};
use crate::parameter::MethodParameter;
use crate::requests::Request;
use crate::response::{self, BatchResponse};
use crate::types::Term;

const DEFAULT_LCID: i64 = 1033;

/// Create a term under a term set. The caller supplies the new term's GUID;
/// the response correlation only confirms it via the `:te:` identity segment.
#[derive(Debug)]
pub struct AddTermRequest {
	term_set: IdentityPath,
	label: String,
	term_id: Uuid,
	lcid: i64,
	identity_query_id: Option<i32>,
}

impl AddTermRequest {
	pub fn new(term_set: IdentityPath, label: impl Into<String>, term_id: Uuid) -> Self {
		Self {
			term_set,
			label: label.into(),
			term_id,
			lcid: DEFAULT_LCID,
			identity_query_id: None,
		}
	}

	pub fn with_lcid(mut self, lcid: i64) -> Self {
		self.lcid = lcid;
		self
	}
}

impl Request for AddTermRequest {
	type Result = Uuid;

	fn get_request(&mut self, ids: &mut IdProvider) -> Result<Vec<ActionObjectPath>, Error> {
		let mut out = Vec::with_capacity(4);

		let term_set_id = ids.next();
		out.push(ActionObjectPath::from_path(ObjectPath::Identity {
			id: term_set_id,
			name: self.term_set.render(),
		}));
		let create_id = ids.next();
		out.push(ActionObjectPath::from_path(ObjectPath::Method {
			id: create_id,
			parent_id: term_set_id,
			name: "CreateTerm".to_string(),
			parameters: vec![
				MethodParameter::string(&self.label),
				MethodParameter::int32(self.lcid),
				MethodParameter::guid(self.term_id),
			],
		}));
		out.push(ActionObjectPath::from_action(Action::Touch {
			id: ids.next(),
			object_path_id: create_id,
		}));
		let identity_query_id = ids.next();
		self.identity_query_id = Some(identity_query_id);
		out.push(ActionObjectPath::from_action(Action::IdentityQuery {
			id: identity_query_id,
			object_path_id: create_id,
		}));

		Ok(out)
	}

	fn process_response(&self, raw: &str) -> Result<Uuid, Error> {
		let id = self.identity_query_id.ok_or(Error::NotBuilt)?;
		let batch = BatchResponse::parse(raw)?;
		let identity = batch
			.object_identity(id)
			.ok_or(Error::ResultMissing(id))?;
		response::identity_suffix(identity, tags::TERM)
			.and_then(response::term_guid_from_identity)
			.ok_or_else(|| Error::parse("_ObjectIdentity_", "no term segment in identity"))
	}
}

/// Read the terms of a term set through a nested child-item query.
#[derive(Debug)]
pub struct GetTermsRequest {
	term_set: IdentityPath,
	query_id: Option<i32>,
}

impl GetTermsRequest {
	pub fn new(term_set: IdentityPath) -> Self {
		Self {
			term_set,
			query_id: None,
		}
	}
}

impl Request for GetTermsRequest {
	type Result = Vec<Term>;

	fn get_request(&mut self, ids: &mut IdProvider) -> Result<Vec<ActionObjectPath>, Error> {
		let mut out = Vec::with_capacity(3);

		let term_set_id = ids.next();
		out.push(ActionObjectPath::from_path(ObjectPath::Identity {
			id: term_set_id,
			name: self.term_set.render(),
		}));
		let terms_id = ids.next();
		out.push(ActionObjectPath::from_path(ObjectPath::Property {
			id: terms_id,
			parent_id: term_set_id,
			name: "Terms".to_string(),
		}));
		let query_id = ids.next();
		self.query_id = Some(query_id);
		out.push(ActionObjectPath::from_action(Action::Query {
			id: query_id,
			object_path_id: terms_id,
			select_all: false,
			properties: vec![],
			child_items: Some(ChildItemQuery {
				select_all: false,
				properties: vec![
					"Id".to_string(),
					"Name".to_string(),
					"CreatedDate".to_string(),
				],
			}),
		}));

		Ok(out)
	}

	/// A term set the service answered nothing for is an empty collection,
	/// not an error.
	fn process_response(&self, raw: &str) -> Result<Vec<Term>, Error> {
		let id = self.query_id.ok_or(Error::NotBuilt)?;
		let batch = BatchResponse::parse(raw)?;
		batch
			.child_items(id)
			.into_iter()
			.map(Term::from_value)
			.collect()
	}
}
