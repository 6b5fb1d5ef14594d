//! Encoder and correlator for the legacy object-path dialect of the
//! Lodestone content service.
//!
//! The service's older remote-object-model endpoint answers one batched
//! envelope of typed actions and object paths with a single flat JSON array.
//! This crate builds those envelopes — allocating the process-wide sequential
//! ids the service resolves references by — renders them to the exact wire
//! grammar, and maps the response array back to typed results using the
//! remembered ids.
//!
//! Nothing here performs I/O: the transport layer feeds
//! [`Batch::to_envelope`] output to the service and hands the raw response
//! text back to each request's `process_response`. Building is sequential by
//! design; the shared [`IdProvider`] is what lets one request reference
//! another's nodes.

pub mod batch;
pub mod dates;
pub mod error;
pub mod fields;
pub mod identity;
pub mod requests;
pub mod response;
pub mod types;
pub mod wire;

mod id;
mod node;
mod parameter;

pub use batch::Batch;
pub use error::Error;
pub use fields::{FieldKind, FieldValue, TaxonomyTerm};
pub use id::IdProvider;
pub use identity::{IdentityPath, Segment};
pub use node::{Action, ActionObjectPath, ChildItemQuery, ObjectPath};
pub use parameter::{MethodParameter, TypedProperty};
pub use requests::{FieldUpdate, Request};
pub use response::BatchResponse;
pub use types::{TenantProperties, Term};
