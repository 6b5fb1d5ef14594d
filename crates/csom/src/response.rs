//! Correlator for the flat batch response array.
//!
//! The service answers one envelope with one JSON array. Element 0 is a
//! header (schema/library versions plus error info); from element 1 onward
//! the entries alternate between an integer action id and the value produced
//! for that id. Correlation scans for the id and takes the next element.
//! Every request builder sharing the batch correlates against the same
//! immutable parsed response, so all accessors here take `&self`.

use base64::Engine;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{trace, warn};
use uuid::Uuid;

use crate::error::Error;

/// Key carrying the opaque identity string of a returned object.
pub const OBJECT_IDENTITY_KEY: &str = "_ObjectIdentity_";
/// Key carrying the element array of a collection query result.
pub const CHILD_ITEMS_KEY: &str = "_Child_Items_";

#[derive(Debug)]
pub struct BatchResponse {
	values: Vec<Value>,
}

impl BatchResponse {
	/// Parse the raw response text and check the header for an
	/// envelope-level failure. A non-null `ErrorInfo` fails the whole batch;
	/// no per-request correlation may proceed past it.
	pub fn parse(raw: &str) -> Result<Self, Error> {
		let values: Vec<Value> = serde_json::from_str(raw)?;
		if let Some(error_info) = values.first().and_then(|header| header.get("ErrorInfo")) {
			if !error_info.is_null() {
				let message = error_info
					.get("ErrorMessage")
					.and_then(Value::as_str)
					.unwrap_or("unknown service error")
					.to_string();
				warn!(%message, "batch rejected by the service");
				return Err(Error::Envelope(message));
			}
		}
		Ok(Self { values })
	}

	/// Locate the value correlated with `id`, or `None` when the service
	/// returned nothing for it.
	pub fn find(&self, id: i32) -> Option<&Value> {
		let position = self
			.values
			.iter()
			.enumerate()
			.skip(1)
			.find(|(_, value)| value.as_i64() == Some(i64::from(id)))
			.map(|(index, _)| index)?;
		self.values.get(position + 1)
	}

	/// Like [`find`](Self::find), but treats an `{"IsNull": true}` wrapper as
	/// an absent value.
	pub fn find_object(&self, id: i32) -> Option<&Value> {
		let value = self.find(id)?;
		if value.get("IsNull").and_then(Value::as_bool) == Some(true) {
			trace!(id, "correlated value is a null marker");
			return None;
		}
		Some(value)
	}

	/// Deserialize the value correlated with `id`. A correlation miss is
	/// `Ok(None)`, not an error.
	pub fn deserialize<T: DeserializeOwned>(&self, id: i32) -> Result<Option<T>, Error> {
		match self.find_object(id) {
			Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
			None => {
				trace!(id, "no response entry for action id");
				Ok(None)
			}
		}
	}

	/// The `_Child_Items_` elements of a collection query result. An absent
	/// or empty array yields an empty slice, not an error.
	pub fn child_items(&self, id: i32) -> Vec<&Value> {
		self.find_object(id)
			.and_then(|value| value.get(CHILD_ITEMS_KEY))
			.and_then(Value::as_array)
			.map(|items| items.iter().collect())
			.unwrap_or_default()
	}

	/// The `_ObjectIdentity_` string correlated with `id`, if any.
	pub fn object_identity(&self, id: i32) -> Option<&str> {
		object_identity_of(self.find_object(id)?)
	}
}

/// The `_ObjectIdentity_` string carried by a single response value.
pub fn object_identity_of(value: &Value) -> Option<&str> {
	value.get(OBJECT_IDENTITY_KEY).and_then(Value::as_str)
}

/// Slice the sub-identifier embedded after the last occurrence of `tag`
/// (e.g. `:fl:` or `:te:`) in an identity string.
pub fn identity_suffix<'a>(identity: &'a str, tag: &str) -> Option<&'a str> {
	identity
		.rfind(tag)
		.map(|index| &identity[index + tag.len()..])
}

/// Decode a `/Guid(...)/`-wrapped field value.
pub fn wrapped_guid(raw: &str) -> Option<Uuid> {
	let inner = raw.strip_prefix("/Guid(")?.strip_suffix(")/")?;
	Uuid::parse_str(inner).ok()
}

/// Decode the base64 payload of a `:te:` identity segment into the term's
/// GUID. The service packs the GUID in its little-endian byte layout.
pub fn term_guid_from_identity(suffix: &str) -> Option<Uuid> {
	let bytes = base64::engine::general_purpose::STANDARD
		.decode(suffix)
		.ok()?;
	let bytes: [u8; 16] = bytes.try_into().ok()?;
	Some(Uuid::from_bytes_le(bytes))
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn sample_response() -> String {
		json!([
			{
				"SchemaVersion": "15.0.0.0",
				"LibraryVersion": "16.0.21404.12004",
				"ErrorInfo": null,
				"TraceCorrelationId": "c0ffee9d-1234-4000-9d6e-2f5c1a1d9f00"
			},
			2,
			{ "IsNull": false },
			4,
			{
				"_ObjectIdentity_": "c0ffee9d|740c6a0b-85e2-48a0-a494-e0f1759d4aa7:site:s:web:w:fl:a9bcf42b-0b82-4ee5-b0a6-27c0e31d7a2f",
				"Name": "DocumentStatus"
			}
		])
		.to_string()
	}

	#[test]
	fn test_find_takes_the_element_after_the_id() {
		let response = BatchResponse::parse(&sample_response()).expect("should parse");
		let value = response.find(4).expect("id 4 should be present");
		assert_eq!(value["Name"], "DocumentStatus");
	}

	#[test]
	fn test_missing_id_is_none() {
		let response = BatchResponse::parse(&sample_response()).expect("should parse");
		assert!(response.find(99).is_none());
	}

	#[test]
	fn test_envelope_error_fails_the_whole_batch() {
		let raw = json!([
			{
				"SchemaVersion": "15.0.0.0",
				"ErrorInfo": { "ErrorMessage": "Access denied.", "ErrorCode": -2147024891 }
			}
		])
		.to_string();

		match BatchResponse::parse(&raw) {
			Err(Error::Envelope(message)) => assert_eq!(message, "Access denied."),
			other => panic!("expected envelope error, got {other:?}"),
		}
	}

	#[test]
	fn test_identity_suffix_slices_after_last_tag() {
		let identity = "c0ffee9d|740c6a0b:site:s:web:w:fl:a9bcf42b-0b82-4ee5-b0a6-27c0e31d7a2f";
		assert_eq!(
			identity_suffix(identity, ":fl:"),
			Some("a9bcf42b-0b82-4ee5-b0a6-27c0e31d7a2f")
		);
		assert!(identity_suffix(identity, ":te:").is_none());
	}

	#[test]
	fn test_wrapped_guid_decoding() {
		assert_eq!(
			wrapped_guid("/Guid(5825ed63-099b-43db-bad1-4fffd9ef1b18)/"),
			Some(uuid::uuid!("5825ed63-099b-43db-bad1-4fffd9ef1b18"))
		);
		assert!(wrapped_guid("5825ed63-099b-43db-bad1-4fffd9ef1b18").is_none());
	}

	#[test]
	fn test_term_guid_round_trips_little_endian_layout() {
		let term_id = uuid::uuid!("36db3a5b-6192-4979-b79c-76bdfc831e5c");
		let encoded =
			base64::engine::general_purpose::STANDARD.encode(term_id.to_bytes_le());
		assert_eq!(term_guid_from_identity(&encoded), Some(term_id));
	}

	#[test]
	fn test_child_items_absent_is_empty() {
		let response = BatchResponse::parse(&sample_response()).expect("should parse");
		assert!(response.child_items(4).is_empty());
	}
}
