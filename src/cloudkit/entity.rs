use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cloudkit::kind::EntityKind;
use crate::cloudkit::record::{Record, RecordValue};

/// Schema binding for one entity kind.
///
/// Implemented once per typed entity; everything the registry, codec and
/// mapper need for a kind lives in this single impl. `FIELDS` and
/// `into_values` must stay positionally aligned.
pub trait CloudEntity: Serialize + DeserializeOwned + Sized {
    /// Kind tag of this entity.
    const KIND: EntityKind;
    /// Record type name in the store.
    const RECORD_TYPE: &'static str;
    /// Ordered field names registered for this entity.
    const FIELDS: &'static [&'static str];

    /// Mapper values, one per registered field, in registry order.
    fn into_values(self) -> Vec<RecordValue>;
    /// Reconstruct from a generic record; `None` when a field is missing
    /// or mistyped.
    fn from_record(record: &Record) -> Option<Self>;
    /// Wrap into the kind-tagged union.
    fn into_decoded(self) -> DecodedEntity;
}

/// Strongly typed reconstruction of a payload or record, one variant per
/// entity kind.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedEntity {
    Account(Account),
    User(User),
    Company(Company),
    Rating(Rating),
    Service(Service),
    Appointment(Appointment),
    Admin(Admin),
}

impl DecodedEntity {
    /// Kind tag of the wrapped entity.
    pub fn kind(&self) -> EntityKind {
        match self {
            DecodedEntity::Account(_) => EntityKind::Account,
            DecodedEntity::User(_) => EntityKind::User,
            DecodedEntity::Company(_) => EntityKind::Company,
            DecodedEntity::Rating(_) => EntityKind::Rating,
            DecodedEntity::Service(_) => EntityKind::Service,
            DecodedEntity::Appointment(_) => EntityKind::Appointment,
            DecodedEntity::Admin(_) => EntityKind::Admin,
        }
    }

    /// Mapper values for the wrapped entity, in registry order.
    pub fn into_values(self) -> Vec<RecordValue> {
        match self {
            DecodedEntity::Account(entity) => entity.into_values(),
            DecodedEntity::User(entity) => entity.into_values(),
            DecodedEntity::Company(entity) => entity.into_values(),
            DecodedEntity::Rating(entity) => entity.into_values(),
            DecodedEntity::Service(entity) => entity.into_values(),
            DecodedEntity::Appointment(entity) => entity.into_values(),
            DecodedEntity::Admin(entity) => entity.into_values(),
        }
    }
}

/// Login account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl CloudEntity for Account {
    const KIND: EntityKind = EntityKind::Account;
    const RECORD_TYPE: &'static str = "Account";
    const FIELDS: &'static [&'static str] = &["id", "email", "password", "createdAt"];

    fn into_values(self) -> Vec<RecordValue> {
        vec![
            RecordValue::String(self.id.to_string()),
            RecordValue::String(self.email),
            RecordValue::String(self.password),
            RecordValue::Date(self.created_at),
        ]
    }

    fn from_record(record: &Record) -> Option<Self> {
        Some(Account {
            id: record.uuid("id")?,
            email: record.string("email")?,
            password: record.string("password")?,
            created_at: record.date("createdAt")?,
        })
    }

    fn into_decoded(self) -> DecodedEntity {
        DecodedEntity::Account(self)
    }
}

/// Customer profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CloudEntity for User {
    const KIND: EntityKind = EntityKind::User;
    const RECORD_TYPE: &'static str = "User";
    const FIELDS: &'static [&'static str] =
        &["id", "name", "phoneNumber", "createdAt", "updatedAt"];

    fn into_values(self) -> Vec<RecordValue> {
        vec![
            RecordValue::String(self.id.to_string()),
            RecordValue::String(self.name),
            RecordValue::String(self.phone_number),
            RecordValue::Date(self.created_at),
            RecordValue::Date(self.updated_at),
        ]
    }

    fn from_record(record: &Record) -> Option<Self> {
        Some(User {
            id: record.uuid("id")?,
            name: record.string("name")?,
            phone_number: record.string("phoneNumber")?,
            created_at: record.date("createdAt")?,
            updated_at: record.date("updatedAt")?,
        })
    }

    fn into_decoded(self) -> DecodedEntity {
        DecodedEntity::User(self)
    }
}

/// Salon company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub category: String,
}

impl CloudEntity for Company {
    const KIND: EntityKind = EntityKind::Company;
    const RECORD_TYPE: &'static str = "Company";
    const FIELDS: &'static [&'static str] =
        &["id", "name", "address", "phoneNumber", "category"];

    fn into_values(self) -> Vec<RecordValue> {
        vec![
            RecordValue::String(self.id.to_string()),
            RecordValue::String(self.name),
            RecordValue::String(self.address),
            RecordValue::String(self.phone_number),
            RecordValue::String(self.category),
        ]
    }

    fn from_record(record: &Record) -> Option<Self> {
        Some(Company {
            id: record.uuid("id")?,
            name: record.string("name")?,
            address: record.string("address")?,
            phone_number: record.string("phoneNumber")?,
            category: record.string("category")?,
        })
    }

    fn into_decoded(self) -> DecodedEntity {
        DecodedEntity::Company(self)
    }
}

/// Customer rating for a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Rating {
    pub id: Uuid,
    pub company_id: Uuid,
    pub user_id: Uuid,
    pub stars: i64,
    pub comment: String,
}

impl CloudEntity for Rating {
    const KIND: EntityKind = EntityKind::Rating;
    const RECORD_TYPE: &'static str = "Rating";
    const FIELDS: &'static [&'static str] =
        &["id", "companyId", "userId", "stars", "comment"];

    fn into_values(self) -> Vec<RecordValue> {
        vec![
            RecordValue::String(self.id.to_string()),
            RecordValue::String(self.company_id.to_string()),
            RecordValue::String(self.user_id.to_string()),
            RecordValue::Int(self.stars),
            RecordValue::String(self.comment),
        ]
    }

    fn from_record(record: &Record) -> Option<Self> {
        Some(Rating {
            id: record.uuid("id")?,
            company_id: record.uuid("companyId")?,
            user_id: record.uuid("userId")?,
            stars: record.int("stars")?,
            comment: record.string("comment")?,
        })
    }

    fn into_decoded(self) -> DecodedEntity {
        DecodedEntity::Rating(self)
    }
}

/// Service offered by a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Service {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub price: f64,
    pub duration_minutes: i64,
}

impl CloudEntity for Service {
    const KIND: EntityKind = EntityKind::Service;
    const RECORD_TYPE: &'static str = "Service";
    const FIELDS: &'static [&'static str] =
        &["id", "companyId", "title", "price", "durationMinutes"];

    fn into_values(self) -> Vec<RecordValue> {
        vec![
            RecordValue::String(self.id.to_string()),
            RecordValue::String(self.company_id.to_string()),
            RecordValue::String(self.title),
            RecordValue::Float(self.price),
            RecordValue::Int(self.duration_minutes),
        ]
    }

    fn from_record(record: &Record) -> Option<Self> {
        Some(Service {
            id: record.uuid("id")?,
            company_id: record.uuid("companyId")?,
            title: record.string("title")?,
            price: record.float("price")?,
            duration_minutes: record.int("durationMinutes")?,
        })
    }

    fn into_decoded(self) -> DecodedEntity {
        DecodedEntity::Service(self)
    }
}

/// Booked appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub service_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub confirmed: bool,
}

impl CloudEntity for Appointment {
    const KIND: EntityKind = EntityKind::Appointment;
    const RECORD_TYPE: &'static str = "Appointment";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "userId",
        "companyId",
        "serviceId",
        "scheduledAt",
        "confirmed",
    ];

    fn into_values(self) -> Vec<RecordValue> {
        vec![
            RecordValue::String(self.id.to_string()),
            RecordValue::String(self.user_id.to_string()),
            RecordValue::String(self.company_id.to_string()),
            RecordValue::String(self.service_id.to_string()),
            RecordValue::Date(self.scheduled_at),
            RecordValue::Boolean(self.confirmed),
        ]
    }

    fn from_record(record: &Record) -> Option<Self> {
        Some(Appointment {
            id: record.uuid("id")?,
            user_id: record.uuid("userId")?,
            company_id: record.uuid("companyId")?,
            service_id: record.uuid("serviceId")?,
            scheduled_at: record.date("scheduledAt")?,
            confirmed: record.boolean("confirmed")?,
        })
    }

    fn into_decoded(self) -> DecodedEntity {
        DecodedEntity::Appointment(self)
    }
}

/// Company administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Admin {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub email: String,
}

impl CloudEntity for Admin {
    const KIND: EntityKind = EntityKind::Admin;
    const RECORD_TYPE: &'static str = "Admin";
    const FIELDS: &'static [&'static str] = &["id", "companyId", "name", "email"];

    fn into_values(self) -> Vec<RecordValue> {
        vec![
            RecordValue::String(self.id.to_string()),
            RecordValue::String(self.company_id.to_string()),
            RecordValue::String(self.name),
            RecordValue::String(self.email),
        ]
    }

    fn from_record(record: &Record) -> Option<Self> {
        Some(Admin {
            id: record.uuid("id")?,
            company_id: record.uuid("companyId")?,
            name: record.string("name")?,
            email: record.string("email")?,
        })
    }

    fn into_decoded(self) -> DecodedEntity {
        DecodedEntity::Admin(self)
    }
}
