//! Structured identity paths.
//!
//! An identity string names one remote object instance, ordered from
//! coarsest segment (site) to finest. Every request that needs one builds an
//! [`IdentityPath`] and renders it through the single canonical renderer
//! below; nothing in the crate glues identity strings together by hand.

use std::fmt;

use uuid::{uuid, Uuid};

/// Fixed application GUID the service expects after the correlation id in
/// every identity string.
pub const SERVICE_APP_ID: Uuid = uuid!("740c6a0b-85e2-48a0-a494-e0f1759d4aa7");

/// Prefix tags of the trailing segment, shared with the response
/// correlator's identity-slicing step.
pub mod tags {
	pub const FIELD_LINK: &str = ":fl:";
	pub const TERM: &str = ":te:";
	pub const GROUP: &str = ":gr:";
	pub const SECURABLE: &str = ":se:";
	pub const TERM_STORE: &str = ":st:";
	pub const TERM_SET: &str = ":ss:";
	pub const CONTENT_TYPE: &str = ":ct:";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
	Site(String),
	Web(String),
	List(String),
	Item { id: i32, version: i32 },
	Field(String),
	FieldLink(String),
	File(String),
	Folder(String),
	ContentType(String),
	Group(String),
	TermStore(String),
	TermSet(String),
	Term(String),
}

impl Segment {
	fn render(&self, out: &mut String) {
		match self {
			Self::Site(v) => push_tagged(out, ":site:", v),
			Self::Web(v) => push_tagged(out, ":web:", v),
			Self::List(v) => push_tagged(out, ":list:", v),
			Self::Item { id, version } => {
				out.push_str(":item:");
				out.push_str(&id.to_string());
				out.push(',');
				out.push_str(&version.to_string());
			}
			Self::Field(v) => push_tagged(out, ":field:", v),
			Self::FieldLink(v) => push_tagged(out, tags::FIELD_LINK, v),
			Self::File(v) => push_tagged(out, ":file:", v),
			Self::Folder(v) => push_tagged(out, ":folder:", v),
			Self::ContentType(v) => push_tagged(out, tags::CONTENT_TYPE, v),
			Self::Group(v) => push_tagged(out, tags::GROUP, v),
			Self::TermStore(v) => push_tagged(out, tags::TERM_STORE, v),
			Self::TermSet(v) => push_tagged(out, tags::TERM_SET, v),
			Self::Term(v) => push_tagged(out, tags::TERM, v),
		}
	}
}

fn push_tagged(out: &mut String, tag: &str, value: &str) {
	out.push_str(tag);
	out.push_str(value);
}

/// Correlation id plus the ordered segment list of one identity string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityPath {
	correlation: Uuid,
	segments: Vec<Segment>,
}

impl IdentityPath {
	pub fn new(correlation: Uuid) -> Self {
		Self {
			correlation,
			segments: Vec::new(),
		}
	}

	pub fn push(mut self, segment: Segment) -> Self {
		self.segments.push(segment);
		self
	}

	pub fn site(self, id: impl Into<String>) -> Self {
		self.push(Segment::Site(id.into()))
	}

	pub fn web(self, id: impl Into<String>) -> Self {
		self.push(Segment::Web(id.into()))
	}

	pub fn list(self, id: impl Into<String>) -> Self {
		self.push(Segment::List(id.into()))
	}

	pub fn item(self, id: i32, version: i32) -> Self {
		self.push(Segment::Item { id, version })
	}

	pub fn field(self, id: impl Into<String>) -> Self {
		self.push(Segment::Field(id.into()))
	}

	pub fn content_type(self, id: impl Into<String>) -> Self {
		self.push(Segment::ContentType(id.into()))
	}

	pub fn term_store(self, id: impl Into<String>) -> Self {
		self.push(Segment::TermStore(id.into()))
	}

	pub fn term_set(self, id: impl Into<String>) -> Self {
		self.push(Segment::TermSet(id.into()))
	}

	pub fn render(&self) -> String {
		let mut out = String::with_capacity(96);
		out.push_str(&self.correlation.to_string());
		out.push('|');
		out.push_str(&SERVICE_APP_ID.to_string());
		for segment in &self.segments {
			segment.render(&mut out);
		}
		out
	}
}

impl fmt::Display for IdentityPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render())
	}
}
