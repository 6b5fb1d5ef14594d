use thiserror::Error;

/// Failures raised while encoding an object-path batch or correlating its
/// response.
///
/// Build-time failures (`UnsupportedFieldValue`, `MissingTaxonomyAnchor`)
/// surface before anything is serialized; correlation failures belong to the
/// individual request that hit them, except `Envelope` which fails the whole
/// batch.
#[derive(Error, Debug)]
pub enum Error {
	#[error("service rejected the batch: {0}")]
	Envelope(String),
	#[error("malformed batch response: {0}")]
	Json(#[from] serde_json::Error),
	#[error("no response entry for action id {0}")]
	ResultMissing(i32),
	#[error("request must be added to a batch before its response can be processed")]
	NotBuilt,
	#[error("unexpected value shape for \"{field}\": {reason}")]
	Parse { field: String, reason: String },
	#[error("field \"{0}\" uses a value kind the object-path encoder does not support")]
	UnsupportedFieldValue(String),
	#[error("multi-value taxonomy field \"{0}\" requires an anchor object path")]
	MissingTaxonomyAnchor(String),
}

impl Error {
	pub(crate) fn parse(field: impl Into<String>, reason: impl Into<String>) -> Self {
		Self::Parse {
			field: field.into(),
			reason: reason.into(),
		}
	}
}
