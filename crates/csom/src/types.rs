use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::Error;
use crate::identity::tags;
use crate::{dates, response};

/// A taxonomy term as returned by term store queries.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
	pub id: Uuid,
	pub name: String,
	pub created: Option<NaiveDateTime>,
}

impl Term {
	/// Map one response fragment to a term. The id comes from the
	/// `/Guid(...)/`-wrapped `Id` field when present, falling back to the
	/// `:te:` segment of the object identity.
	pub(crate) fn from_value(value: &Value) -> Result<Self, Error> {
		let id = value
			.get("Id")
			.and_then(Value::as_str)
			.and_then(response::wrapped_guid)
			.or_else(|| {
				response::object_identity_of(value)
					.and_then(|identity| response::identity_suffix(identity, tags::TERM))
					.and_then(response::term_guid_from_identity)
			})
			.ok_or_else(|| Error::parse("Id", "term carries no recoverable identifier"))?;
		let name = value
			.get("Name")
			.and_then(Value::as_str)
			.unwrap_or_default()
			.to_string();
		let created = value
			.get("CreatedDate")
			.and_then(Value::as_str)
			.and_then(dates::parse_service_date);
		Ok(Self { id, name, created })
	}
}

/// Tenant-level properties read back from the administration singleton.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TenantProperties {
	#[serde(rename = "RootSiteUrl", default)]
	pub root_site_url: Option<String>,
	#[serde(rename = "StorageQuota", default)]
	pub storage_quota: Option<i64>,
	#[serde(rename = "SharingCapability", default)]
	pub sharing_capability: Option<i32>,
	#[serde(rename = "HideDefaultThemes", default)]
	pub hide_default_themes: Option<bool>,
}
