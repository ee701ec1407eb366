use thiserror::Error;

use crate::cloudkit::kind::EntityKind;
use crate::cloudkit::record::RecordId;

/// Opaque store failure, surfaced verbatim from the remote store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct StoreError(pub String);

/// Failure of a client operation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The remote store reported an error; not interpreted, just propagated.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    /// The entity payload does not match the schema of its declared kind.
    #[error("failed to decode {kind} payload: {source}")]
    Decode {
        /// Kind declared by the payload wrapper.
        kind: EntityKind,
        #[source]
        source: serde_json::Error,
    },
    /// A store record could not be reconstructed into its typed schema.
    #[error("invalid {kind} record {id}")]
    InvalidEntity {
        /// Kind requested by the read.
        kind: EntityKind,
        /// Identifier of the offending record.
        id: RecordId,
    },
}
