use crate::cloudkit::entity::{CloudEntity, DecodedEntity};
use crate::cloudkit::error::ClientError;
use crate::cloudkit::kind::EntityKind;

/// Kind-tagged opaque entity payload, pending conversion to a record.
///
/// The declared kind and the payload's actual schema must agree; the raw
/// constructor leaves that to the caller, while [`TypedEntity::encode`]
/// makes it structural. The payload is a point-in-time JSON schema with no
/// version tag and no cross-version compatibility promise.
#[derive(Debug, Clone)]
pub struct TypedEntity {
    kind: EntityKind,
    body: Vec<u8>,
}

impl TypedEntity {
    /// Wrap an already-encoded payload under the given kind.
    pub fn new(kind: EntityKind, body: Vec<u8>) -> Self {
        TypedEntity { kind, body }
    }

    /// Serialize a typed entity, tagging the kind from its schema binding.
    pub fn encode<T: CloudEntity>(entity: &T) -> Result<Self, serde_json::Error> {
        Ok(TypedEntity {
            kind: T::KIND,
            body: serde_json::to_vec(entity)?,
        })
    }

    /// Declared kind of the payload.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Raw payload bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Deserialize the payload per the declared kind's schema.
    ///
    /// Fallible by contract: missing, extra or mistyped fields yield
    /// [`ClientError::Decode`], never a panic.
    pub fn decode(&self) -> Result<DecodedEntity, ClientError> {
        (self.kind.descriptor().decode)(&self.body).map_err(|source| ClientError::Decode {
            kind: self.kind,
            source,
        })
    }
}
