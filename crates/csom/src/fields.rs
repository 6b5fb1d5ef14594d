//! Encoder from logical field updates to parameter pairs.
//!
//! A field update is the field's internal name plus a closed [`FieldValue`]
//! variant; the encoder turns it into exactly two parameters, a declaration
//! and a value. In every kind but one the declaration is the field name as a
//! plain string. Multi-value taxonomy inverts the pair: the declaration
//! becomes an `ObjectPathId` reference to a previously allocated
//! taxonomy-field anchor node and the value carries the composite
//! `wssId;#label|termGuid` string.

use serde_json::Value;
use uuid::{uuid, Uuid};

use crate::error::Error;
use crate::parameter::{MethodParameter, TypedProperty};

/// Remote value-type GUID for lookup field values.
pub const FIELD_LOOKUP_VALUE_TYPE_ID: Uuid = uuid!("f1d34cc0-9b50-4a78-be78-d5facfcccfb7");
/// Remote value-type GUID for user field values.
pub const FIELD_USER_VALUE_TYPE_ID: Uuid = uuid!("c956ab54-16bd-4c18-89d2-996f57282a6f");
/// Remote value-type GUID for url field values.
pub const FIELD_URL_VALUE_TYPE_ID: Uuid = uuid!("fa8b44af-7b43-43f2-904a-bd319497011e");
/// Remote value-type GUID for single-value taxonomy field values.
pub const TAXONOMY_FIELD_VALUE_TYPE_ID: Uuid = uuid!("19e70ed0-4177-456b-8156-015e4d163ff8");

/// One resolved term of a taxonomy field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyTerm {
	pub label: String,
	pub term_id: Uuid,
	/// Site-local term id; `-1` when not yet pinned to the site.
	pub wss_id: i32,
}

impl TaxonomyTerm {
	pub fn new(label: impl Into<String>, term_id: Uuid) -> Self {
		Self {
			label: label.into(),
			term_id,
			wss_id: -1,
		}
	}
}

/// The closed vocabulary of field value kinds the encoder accepts. The
/// field-mapping layer constructs these explicitly; no runtime type
/// inspection happens here.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
	Text(String),
	Choice(String),
	MultiChoice(Vec<String>),
	Number {
		value: i64,
		/// `None` renders the default `Int32`; `Some` renders the supplied
		/// type name verbatim (some call sites expect `Int`).
		explicit_type: Option<String>,
	},
	Bool(bool),
	Lookup(i32),
	MultiLookup(Vec<i32>),
	User(i32),
	Url { url: String, description: String },
	Taxonomy(TaxonomyTerm),
	MultiTaxonomy(Vec<TaxonomyTerm>),
}

/// Semantic field kinds, used when bridging a weakly typed value coming from
/// the model layer into a [`FieldValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
	Text,
	Choice,
	MultiChoice,
	Number,
	Bool,
	Lookup,
	MultiLookup,
	User,
	Url,
	Taxonomy,
	MultiTaxonomy,
	Currency,
	Calculated,
	Attachments,
}

impl FieldValue {
	/// Bridge a weakly typed JSON value into a [`FieldValue`], validating it
	/// against the declared field kind. Kinds the object-path encoder cannot
	/// express are rejected here, before any network interaction.
	pub fn from_json(name: &str, kind: FieldKind, value: &Value) -> Result<Self, Error> {
		let mismatch = || Error::parse(name, format!("value {value} does not match {kind:?}"));
		match kind {
			FieldKind::Text => Ok(Self::Text(value.as_str().ok_or_else(mismatch)?.to_string())),
			FieldKind::Choice => Ok(Self::Choice(
				value.as_str().ok_or_else(mismatch)?.to_string(),
			)),
			FieldKind::MultiChoice => {
				let choices = value
					.as_array()
					.ok_or_else(mismatch)?
					.iter()
					.map(|entry| entry.as_str().map(str::to_string).ok_or_else(mismatch))
					.collect::<Result<Vec<_>, _>>()?;
				Ok(Self::MultiChoice(choices))
			}
			FieldKind::Number => Ok(Self::Number {
				value: value.as_i64().ok_or_else(mismatch)?,
				explicit_type: None,
			}),
			FieldKind::Bool => Ok(Self::Bool(value.as_bool().ok_or_else(mismatch)?)),
			FieldKind::Lookup => Ok(Self::Lookup(lookup_id(value).ok_or_else(mismatch)?)),
			FieldKind::MultiLookup => {
				let ids = value
					.as_array()
					.ok_or_else(mismatch)?
					.iter()
					.map(|entry| lookup_id(entry).ok_or_else(mismatch))
					.collect::<Result<Vec<_>, _>>()?;
				Ok(Self::MultiLookup(ids))
			}
			FieldKind::User => Ok(Self::User(lookup_id(value).ok_or_else(mismatch)?)),
			FieldKind::Url => Ok(Self::Url {
				url: value
					.get("Url")
					.and_then(Value::as_str)
					.ok_or_else(mismatch)?
					.to_string(),
				description: value
					.get("Description")
					.and_then(Value::as_str)
					.unwrap_or_default()
					.to_string(),
			}),
			FieldKind::Taxonomy => Ok(Self::Taxonomy(taxonomy_term(value).ok_or_else(mismatch)?)),
			FieldKind::MultiTaxonomy => {
				let terms = value
					.as_array()
					.ok_or_else(mismatch)?
					.iter()
					.map(|entry| taxonomy_term(entry).ok_or_else(mismatch))
					.collect::<Result<Vec<_>, _>>()?;
				Ok(Self::MultiTaxonomy(terms))
			}
			FieldKind::Currency | FieldKind::Calculated | FieldKind::Attachments => {
				Err(Error::UnsupportedFieldValue(name.to_string()))
			}
		}
	}
}

fn lookup_id(value: &Value) -> Option<i32> {
	value
		.as_i64()
		.or_else(|| value.get("LookupId").and_then(Value::as_i64))
		.and_then(|id| i32::try_from(id).ok())
}

fn taxonomy_term(value: &Value) -> Option<TaxonomyTerm> {
	let label = value.get("Label").and_then(Value::as_str)?;
	let term_id = value
		.get("TermGuid")
		.and_then(Value::as_str)
		.and_then(|raw| Uuid::parse_str(raw).ok())?;
	let wss_id = value
		.get("WssId")
		.and_then(Value::as_i64)
		.and_then(|id| i32::try_from(id).ok())
		.unwrap_or(-1);
	Some(TaxonomyTerm {
		label: label.to_string(),
		term_id,
		wss_id,
	})
}

/// Encode one field update into its `[declaration, value]` parameter pair.
///
/// `anchor_path_id` names the taxonomy-field anchor node the request builder
/// allocated earlier; it is required for (and only used by) multi-value
/// taxonomy updates.
pub fn encode_field_update(
	name: &str,
	value: &FieldValue,
	anchor_path_id: Option<i32>,
) -> Result<[MethodParameter; 2], Error> {
	let declaration = MethodParameter::string(name);
	let value_parameter = match value {
		FieldValue::Text(text) | FieldValue::Choice(text) => MethodParameter::string(text),
		FieldValue::MultiChoice(choices) => MethodParameter::Array(
			choices
				.iter()
				.map(MethodParameter::string)
				.collect(),
		),
		FieldValue::Number {
			value,
			explicit_type,
		} => match explicit_type {
			Some(type_name) => MethodParameter::int_with_type(*value, type_name),
			None => MethodParameter::int32(*value),
		},
		FieldValue::Bool(flag) => MethodParameter::boolean(*flag),
		FieldValue::Lookup(id) => lookup_parameter(*id),
		FieldValue::MultiLookup(ids) => {
			MethodParameter::Array(ids.iter().map(|id| lookup_parameter(*id)).collect())
		}
		FieldValue::User(id) => MethodParameter::Typed {
			type_id: FIELD_USER_VALUE_TYPE_ID,
			properties: vec![
				TypedProperty::new("Email", MethodParameter::null()),
				TypedProperty::new("LookupId", MethodParameter::int32(i64::from(*id))),
				TypedProperty::new("LookupValue", MethodParameter::null()),
			],
		},
		FieldValue::Url { url, description } => MethodParameter::Typed {
			type_id: FIELD_URL_VALUE_TYPE_ID,
			properties: vec![
				TypedProperty::new("Url", MethodParameter::string(url)),
				TypedProperty::new("Description", MethodParameter::string(description)),
			],
		},
		FieldValue::Taxonomy(term) => MethodParameter::Typed {
			type_id: TAXONOMY_FIELD_VALUE_TYPE_ID,
			properties: vec![
				TypedProperty::new("Label", MethodParameter::string(&term.label)),
				TypedProperty::new("TermGuid", MethodParameter::guid(term.term_id)),
				TypedProperty::new("WssId", MethodParameter::int32(i64::from(term.wss_id))),
			],
		},
		FieldValue::MultiTaxonomy(terms) => {
			let anchor = anchor_path_id
				.ok_or_else(|| Error::MissingTaxonomyAnchor(name.to_string()))?;
			return Ok([
				MethodParameter::ObjectPathRef(anchor),
				MethodParameter::string(composite_taxonomy_string(terms)),
			]);
		}
	};
	Ok([declaration, value_parameter])
}

fn lookup_parameter(id: i32) -> MethodParameter {
	MethodParameter::Typed {
		type_id: FIELD_LOOKUP_VALUE_TYPE_ID,
		properties: vec![
			TypedProperty::new("LookupId", MethodParameter::int32(i64::from(id))),
			TypedProperty::new("LookupValue", MethodParameter::null()),
		],
	}
}

/// `wssId;#label|termGuid` entries joined with `;#`.
fn composite_taxonomy_string(terms: &[TaxonomyTerm]) -> String {
	terms
		.iter()
		.map(|term| format!("{};#{}|{}", term.wss_id, term.label, term.term_id))
		.collect::<Vec<_>>()
		.join(";#")
}
