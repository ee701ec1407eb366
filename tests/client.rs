use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use salongo_cloudkit_client::cloudkit::codec::TypedEntity;
use salongo_cloudkit_client::cloudkit::entity::{
    Account, Admin, Appointment, CloudEntity, Company, DecodedEntity, Rating, Service, User,
};
use salongo_cloudkit_client::cloudkit::error::{ClientError, StoreError};
use salongo_cloudkit_client::cloudkit::kind::EntityKind;
use salongo_cloudkit_client::cloudkit::record::{Record, RecordId, RecordValue};
use salongo_cloudkit_client::cloudkit::remoteclient::{CloudClient, FetchedRecord, RemoteStore};

/// In-memory stand-in for the CloudKit container, with a per-access counter
/// and an injection list for store-layer outcomes the stub cannot produce
/// from saved records alone.
#[derive(Default)]
struct ContainerStub {
    records: Mutex<Vec<Record>>,
    injected: Mutex<Vec<(EntityKind, FetchedRecord)>>,
    records_access_counter: Mutex<usize>,
}

impl ContainerStub {
    fn seed(&self, entity: DecodedEntity) {
        self.records.lock().unwrap().push(Record::from_entity(entity));
    }

    fn inject(&self, kind: EntityKind, fetched: FetchedRecord) {
        self.injected.lock().unwrap().push((kind, fetched));
    }

    fn one_record_for_each_entity(&self) {
        for kind in EntityKind::ALL {
            self.seed(sample_entity(kind));
        }
    }

    fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn access_count(&self) -> usize {
        *self.records_access_counter.lock().unwrap()
    }
}

impl RemoteStore for ContainerStub {
    async fn save(&self, record: Record) -> Result<(), StoreError> {
        self.records.lock().unwrap().push(record);
        Ok(())
    }

    async fn fetch(&self, kind: EntityKind) -> Result<Vec<FetchedRecord>, StoreError> {
        let mut matches = Vec::new();
        for (index, record) in self.records.lock().unwrap().iter().enumerate() {
            if record.kind() == kind {
                *self.records_access_counter.lock().unwrap() += 1;
                matches.push(FetchedRecord {
                    id: RecordId(format!("rec-{index}")),
                    record: Ok(record.clone()),
                });
            }
        }
        for (injected_kind, fetched) in self.injected.lock().unwrap().iter() {
            if *injected_kind == kind {
                matches.push(fetched.clone());
            }
        }
        Ok(matches)
    }
}

/// Store that rejects every operation.
struct FailingStore;

impl RemoteStore for FailingStore {
    async fn save(&self, _record: Record) -> Result<(), StoreError> {
        Err(StoreError("network unavailable".to_string()))
    }

    async fn fetch(&self, _kind: EntityKind) -> Result<Vec<FetchedRecord>, StoreError> {
        Err(StoreError("network unavailable".to_string()))
    }
}

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 11, 8, 9, 0, 0).unwrap()
}

fn sample_account() -> Account {
    Account {
        id: Uuid::new_v4(),
        email: "ana@salongo.app".to_string(),
        password: "s3cret-hash".to_string(),
        created_at: fixed_time(),
    }
}

fn sample_user() -> User {
    User {
        id: Uuid::new_v4(),
        name: "Ana Souza".to_string(),
        phone_number: "+55 11 91234-5678".to_string(),
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

fn sample_company() -> Company {
    Company {
        id: Uuid::new_v4(),
        name: "Studio Bela".to_string(),
        address: "Rua Augusta 120".to_string(),
        phone_number: "+55 11 3333-4444".to_string(),
        category: "barbershop".to_string(),
    }
}

fn sample_rating() -> Rating {
    Rating {
        id: Uuid::new_v4(),
        company_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        stars: 5,
        comment: "Great cut".to_string(),
    }
}

fn sample_service() -> Service {
    Service {
        id: Uuid::new_v4(),
        company_id: Uuid::new_v4(),
        title: "Haircut".to_string(),
        price: 35.5,
        duration_minutes: 45,
    }
}

fn sample_appointment() -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        company_id: Uuid::new_v4(),
        service_id: Uuid::new_v4(),
        scheduled_at: fixed_time(),
        confirmed: true,
    }
}

fn sample_admin() -> Admin {
    Admin {
        id: Uuid::new_v4(),
        company_id: Uuid::new_v4(),
        name: "Carla Lima".to_string(),
        email: "carla@studiobela.com".to_string(),
    }
}

fn sample_entity(kind: EntityKind) -> DecodedEntity {
    match kind {
        EntityKind::Account => sample_account().into_decoded(),
        EntityKind::User => sample_user().into_decoded(),
        EntityKind::Company => sample_company().into_decoded(),
        EntityKind::Rating => sample_rating().into_decoded(),
        EntityKind::Service => sample_service().into_decoded(),
        EntityKind::Appointment => sample_appointment().into_decoded(),
        EntityKind::Admin => sample_admin().into_decoded(),
    }
}

#[test]
fn every_kind_registers_a_nonempty_aligned_field_list() {
    for kind in EntityKind::ALL {
        let fields = kind.fields();
        assert!(!fields.is_empty(), "Expected fields for {kind}");
        assert_eq!(
            sample_entity(kind).into_values().len(),
            fields.len(),
            "Expected one value per registered field for {kind}"
        );
    }
}

fn assert_round_trip<T>(entity: T)
where
    T: CloudEntity + Clone + PartialEq + std::fmt::Debug,
{
    let typed = TypedEntity::encode(&entity).expect("encode should succeed");
    assert_eq!(typed.kind(), T::KIND);

    let decoded = typed.decode().expect("decode should succeed");
    assert_eq!(decoded, entity.into_decoded());

    let record = Record::from_entity(decoded.clone());
    assert_eq!(record.kind(), T::KIND);
    assert_eq!(record.fields().len(), T::FIELDS.len());

    let rebuilt = (T::KIND.descriptor().from_record)(&record);
    assert_eq!(rebuilt, Some(decoded), "Expected {} to round-trip", T::KIND);
}

#[test]
fn every_kind_round_trips_through_payload_and_record() {
    assert_round_trip(sample_account());
    assert_round_trip(sample_user());
    assert_round_trip(sample_company());
    assert_round_trip(sample_rating());
    assert_round_trip(sample_service());
    assert_round_trip(sample_appointment());
    assert_round_trip(sample_admin());
}

#[tokio::test]
async fn create_appends_exactly_one_record() {
    let client = CloudClient::new(ContainerStub::default());
    let account = sample_account();

    let typed = TypedEntity::encode(&account).expect("encode should succeed");
    client.create(typed).await.expect("create should succeed");

    let records = client.store().records.lock().unwrap();
    assert_eq!(records.len(), 1, "Expected exactly one saved record");
    assert_eq!(records[0].kind(), EntityKind::Account);
    assert_eq!(records[0].fields().len(), EntityKind::Account.fields().len());
    assert_eq!(
        records[0].value("email"),
        Some(&RecordValue::String(account.email))
    );
}

#[tokio::test]
async fn create_fails_when_payload_does_not_match_kind() {
    let client = CloudClient::new(ContainerStub::default());

    // Account payload declared as a User.
    let body = serde_json::to_vec(&sample_account()).expect("serialization should succeed");
    let mismatched = TypedEntity::new(EntityKind::User, body);

    let result = client.create(mismatched).await;
    assert!(
        matches!(result, Err(ClientError::Decode { kind: EntityKind::User, .. })),
        "Expected a decode failure, got {result:?}"
    );
    assert_eq!(
        client.store().record_count(),
        0,
        "A failed create must not write a record"
    );
}

#[tokio::test]
async fn read_returns_only_records_of_the_requested_kind() {
    let client = CloudClient::new(ContainerStub::default());
    client.store().one_record_for_each_entity();
    client.store().seed(sample_service().into_decoded());

    let companies = client
        .read(EntityKind::Company)
        .await
        .expect("read should succeed");

    assert_eq!(companies.len(), 1, "Expected exactly one company");
    assert!(matches!(companies[0], DecodedEntity::Company(_)));
}

#[tokio::test]
async fn read_of_service_fixture_touches_one_record() {
    let client = CloudClient::new(ContainerStub::default());
    client.store().one_record_for_each_entity();

    let services = client
        .read(EntityKind::Service)
        .await
        .expect("read should succeed");

    assert_eq!(services.len(), 1, "Expected exactly one service");
    assert_eq!(
        client.store().access_count(),
        1,
        "Only the matching record should be accessed"
    );
}

#[tokio::test]
async fn read_is_all_or_nothing_when_one_record_fails_mapping() {
    let client = CloudClient::new(ContainerStub::default());
    client.store().seed(sample_service().into_decoded());
    client.store().seed(sample_service().into_decoded());

    // A service record missing every field but the id.
    let mut malformed = Record::new(EntityKind::Service);
    malformed.push("id", RecordValue::String(Uuid::new_v4().to_string()));
    client.store().inject(
        EntityKind::Service,
        FetchedRecord {
            id: RecordId("rec-broken".to_string()),
            record: Ok(malformed),
        },
    );

    let result = client.read(EntityKind::Service).await;
    assert!(
        matches!(
            result,
            Err(ClientError::InvalidEntity { kind: EntityKind::Service, .. })
        ),
        "Expected the whole batch to fail, got {result:?}"
    );
}

#[tokio::test]
async fn read_fails_when_a_record_failed_store_decoding() {
    let client = CloudClient::new(ContainerStub::default());
    client.store().seed(sample_service().into_decoded());
    client.store().inject(
        EntityKind::Service,
        FetchedRecord {
            id: RecordId("rec-undecodable".to_string()),
            record: Err(StoreError("record failed to decode".to_string())),
        },
    );

    let result = client.read(EntityKind::Service).await;
    assert!(
        matches!(result, Err(ClientError::Store(_))),
        "Expected the store-layer failure to surface, got {result:?}"
    );
}

#[tokio::test]
async fn read_rejects_records_tagged_with_another_kind() {
    let client = CloudClient::new(ContainerStub::default());
    client.store().inject(
        EntityKind::Service,
        FetchedRecord {
            id: RecordId("rec-misfiled".to_string()),
            record: Ok(Record::from_entity(sample_user().into_decoded())),
        },
    );

    let result = client.read(EntityKind::Service).await;
    assert!(
        matches!(
            result,
            Err(ClientError::InvalidEntity { kind: EntityKind::Service, .. })
        ),
        "Expected a kind-tag mismatch to fail the read, got {result:?}"
    );
}

#[tokio::test]
async fn store_errors_propagate_verbatim() {
    let client = CloudClient::new(FailingStore);

    let typed = TypedEntity::encode(&sample_account()).expect("encode should succeed");
    let create_err = client.create(typed).await.expect_err("create should fail");
    assert_eq!(create_err.to_string(), "store error: network unavailable");

    let read_err = client
        .read(EntityKind::Rating)
        .await
        .expect_err("read should fail");
    assert_eq!(read_err.to_string(), "store error: network unavailable");
}

#[tokio::test]
async fn read_of_an_empty_store_succeeds_with_no_entities() {
    let client = CloudClient::new(ContainerStub::default());

    let appointments = client
        .read(EntityKind::Appointment)
        .await
        .expect("read should succeed");

    assert!(appointments.is_empty());
}
