use crate::cloudkit::codec::TypedEntity;
use crate::cloudkit::entity::DecodedEntity;
use crate::cloudkit::error::{ClientError, StoreError};
use crate::cloudkit::kind::EntityKind;
use crate::cloudkit::record::{Record, RecordId};

/// One entry of a bulk fetch: the record either decoded at the store layer
/// or carries the store's per-record error.
#[derive(Debug, Clone)]
pub struct FetchedRecord {
    /// Store-assigned identifier.
    pub id: RecordId,
    /// Decoded record or the store-layer failure for this entry.
    pub record: Result<Record, StoreError>,
}

/// Abstract save/fetch capability of the remote record store.
///
/// The production implementation is [`CloudKitWebStore`]; tests use
/// in-memory stubs. Implementations own all I/O concurrency, timeouts and
/// connection state; the client never retries.
///
/// [`CloudKitWebStore`]: crate::cloudkit::webstore::CloudKitWebStore
pub trait RemoteStore {
    /// Persist one record; at-most-once from the caller's perspective.
    async fn save(&self, record: Record) -> Result<(), StoreError>;
    /// Fetch all records of a kind, in store-defined order, with
    /// per-record decode outcomes.
    async fn fetch(&self, kind: EntityKind) -> Result<Vec<FetchedRecord>, StoreError>;
}

/// Remote client orchestrating codec, registry and mapper over a store.
///
/// Holds no mutable state between calls; overlapping operations inherit
/// whatever isolation the store provides.
pub struct CloudClient<S> {
    store: S,
}

impl<S: RemoteStore> CloudClient<S> {
    /// Create a client over the given store capability.
    pub fn new(store: S) -> Self {
        CloudClient { store }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write one entity to the store.
    ///
    /// A payload that fails to decode fails the create; nothing is written.
    /// Store errors propagate verbatim.
    pub async fn create(&self, entity: TypedEntity) -> Result<(), ClientError> {
        let decoded = entity.decode()?;
        let record = Record::from_entity(decoded);
        self.store.save(record).await?;
        Ok(())
    }

    /// Read all entities of a kind from the store.
    ///
    /// All-or-nothing: any record that fails store-layer decoding, carries
    /// the wrong kind tag, or cannot be reconstructed fails the whole read
    /// and partial results are discarded. Records are mapped in the order
    /// the store delivers them.
    pub async fn read(&self, kind: EntityKind) -> Result<Vec<DecodedEntity>, ClientError> {
        let matches = self.store.fetch(kind).await?;
        let descriptor = kind.descriptor();

        let mut entities = Vec::with_capacity(matches.len());
        for fetched in matches {
            let record = fetched.record?;
            if record.kind() != kind {
                return Err(ClientError::InvalidEntity {
                    kind,
                    id: fetched.id,
                });
            }
            let entity = (descriptor.from_record)(&record).ok_or(ClientError::InvalidEntity {
                kind,
                id: fetched.id,
            })?;
            entities.push(entity);
        }

        Ok(entities)
    }
}
