use std::fmt;

use crate::cloudkit::entity::{
    Account, Admin, Appointment, CloudEntity, Company, DecodedEntity, Rating, Service, User,
};
use crate::cloudkit::record::Record;

/// Closed set of SalonGo entity kinds stored in the remote database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Login account.
    Account,
    /// Customer profile.
    User,
    /// Salon company.
    Company,
    /// Customer rating for a company.
    Rating,
    /// Service offered by a company.
    Service,
    /// Booked appointment.
    Appointment,
    /// Company administrator.
    Admin,
}

impl EntityKind {
    /// Every kind, in registration order.
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Account,
        EntityKind::User,
        EntityKind::Company,
        EntityKind::Rating,
        EntityKind::Service,
        EntityKind::Appointment,
        EntityKind::Admin,
    ];

    /// Schema binding for this kind.
    ///
    /// This is the only dispatch over `EntityKind` in the crate; field
    /// registry, payload decoding and record reconstruction all go through
    /// the descriptor, so adding a kind means adding exactly one arm here.
    pub fn descriptor(self) -> EntityDescriptor {
        match self {
            EntityKind::Account => EntityDescriptor::of::<Account>(),
            EntityKind::User => EntityDescriptor::of::<User>(),
            EntityKind::Company => EntityDescriptor::of::<Company>(),
            EntityKind::Rating => EntityDescriptor::of::<Rating>(),
            EntityKind::Service => EntityDescriptor::of::<Service>(),
            EntityKind::Appointment => EntityDescriptor::of::<Appointment>(),
            EntityKind::Admin => EntityDescriptor::of::<Admin>(),
        }
    }

    /// Record type name used by the store for this kind.
    pub fn record_type(self) -> &'static str {
        self.descriptor().record_type
    }

    /// Ordered field names registered for this kind; never empty.
    pub fn fields(self) -> &'static [&'static str] {
        self.descriptor().fields
    }

    /// Resolve a store record type name back to a kind.
    pub fn from_record_type(name: &str) -> Option<EntityKind> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.record_type() == name)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.record_type())
    }
}

/// Per-kind schema binding: field list plus decode and reconstruction hooks.
#[derive(Clone, Copy)]
pub struct EntityDescriptor {
    /// Record type name in the store.
    pub record_type: &'static str,
    /// Ordered field names, positionally aligned with mapper values.
    pub fields: &'static [&'static str],
    /// Deserialize a JSON payload into the typed entity.
    pub decode: fn(&[u8]) -> Result<DecodedEntity, serde_json::Error>,
    /// Reconstruct a typed entity from a generic record, if it fits.
    pub from_record: fn(&Record) -> Option<DecodedEntity>,
}

impl EntityDescriptor {
    fn of<T: CloudEntity>() -> Self {
        EntityDescriptor {
            record_type: T::RECORD_TYPE,
            fields: T::FIELDS,
            decode: |payload| serde_json::from_slice::<T>(payload).map(T::into_decoded),
            from_record: |record| T::from_record(record).map(T::into_decoded),
        }
    }
}
