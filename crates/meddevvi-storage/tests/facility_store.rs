use meddevvi_core::models::facility::{FacilityProfileInput, Medication, PROFILE_VERSION};
use meddevvi_core::models::resource::Resource;
use meddevvi_storage::error::StorageError;
use meddevvi_storage::facility::FacilityStore;
use meddevvi_storage::migrate::{migrate, stored_version};

fn input(name: &str) -> FacilityProfileInput {
    let mut input = FacilityProfileInput {
        name: name.to_string(),
        medications: vec![Medication {
            drug_name: "Ceftriaxone".to_string(),
            in_stock: true,
        }],
        ..Default::default()
    };
    input.set_resource(Resource::Oxygen, true);
    input.set_resource(Resource::MonitorVitals, true);
    input
}

#[tokio::test]
async fn empty_store_has_no_profile() {
    let dir = tempfile::tempdir().unwrap();
    let store = FacilityStore::new(dir.path());
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn upsert_creates_then_updates_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let store = FacilityStore::new(dir.path().join("nested"));

    let created = store.upsert(input("Mbale HC III")).await.unwrap();
    assert_eq!(created.profile_version, PROFILE_VERSION);

    let loaded = store.load().await.unwrap().unwrap();
    assert_eq!(loaded, created);
    assert!(loaded.has_resource(Resource::Oxygen));

    let updated = store
        .upsert(FacilityProfileInput {
            name: "Mbale HC IV".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.name, "Mbale HC IV");
    assert!(updated.medications.is_empty());
    assert!(!updated.has_resource(Resource::Oxygen));

    let reloaded = store.load().await.unwrap().unwrap();
    assert_eq!(reloaded, updated);
}

#[tokio::test]
async fn write_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FacilityStore::new(dir.path());
    store.upsert(input("Clinic")).await.unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["facility.json"]);
}

#[tokio::test]
async fn pre_versioned_profile_is_migrated_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let legacy = serde_json::json!({
        "id": "6f1c1f1e-8a55-4f5e-9d44-0b3c5d7b9a10",
        "name": "Legacy clinic",
        "infrastructure": { "oxygen": true },
        "diagnostics": {},
        "competencies": { "start_iv": true },
        "medications": [{ "drug_name": "ORS", "in_stock": true }],
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    });
    std::fs::write(
        dir.path().join("facility.json"),
        serde_json::to_vec(&legacy).unwrap(),
    )
    .unwrap();

    let store = FacilityStore::new(dir.path());
    let profile = store.load().await.unwrap().unwrap();
    assert_eq!(profile.name, "Legacy clinic");
    assert_eq!(profile.profile_version, 1);
    assert_eq!(profile.medications.len(), 1);
    assert!(profile.has_resource(Resource::Oxygen));
    assert!(profile.has_resource(Resource::StartIv));
    assert!(!profile.has_resource(Resource::Suction));
}

#[tokio::test]
async fn corrupt_profile_is_a_serialization_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("facility.json"), b"{ not json").unwrap();

    let store = FacilityStore::new(dir.path());
    let err = store.load().await.unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[test]
fn newer_version_is_rejected() {
    let json = serde_json::json!({ "profile_version": PROFILE_VERSION + 1 });
    let err = migrate(json.clone(), stored_version(&json).unwrap()).unwrap_err();
    assert!(matches!(err, StorageError::UnsupportedVersion { .. }));
}

#[test]
fn version_beyond_u32_is_rejected_not_truncated() {
    // 2^32 + 1 would truncate to 1.
    let json = serde_json::json!({ "profile_version": 4_294_967_297_u64 });
    let err = stored_version(&json).unwrap_err();
    assert!(matches!(
        err,
        StorageError::UnsupportedVersion { found: 4_294_967_297, .. }
    ));
}

#[test]
fn unversioned_document_is_stamped_current() {
    let json = serde_json::json!({
        "medications": [{ "drug_name": "ORS", "in_stock": true }]
    });
    assert_eq!(stored_version(&json).unwrap(), 0);
    let migrated = migrate(json, 0).unwrap();
    assert_eq!(migrated["profile_version"], 1);
    assert_eq!(migrated["medications"][0]["drug_name"], "ORS");
}

#[tokio::test]
async fn upsert_replaces_an_unreadable_profile() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("facility.json"), b"{ not json").unwrap();

    let store = FacilityStore::new(dir.path());
    let saved = store.upsert(input("Recovered clinic")).await.unwrap();

    let loaded = store.load().await.unwrap().unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.name, "Recovered clinic");
}

#[tokio::test]
async fn upsert_replaces_a_profile_from_a_newer_build() {
    let dir = tempfile::tempdir().unwrap();
    let newer = serde_json::json!({ "profile_version": PROFILE_VERSION + 1 });
    std::fs::write(
        dir.path().join("facility.json"),
        serde_json::to_vec(&newer).unwrap(),
    )
    .unwrap();

    let store = FacilityStore::new(dir.path());
    assert!(store.load().await.is_err());
    store.upsert(input("Clinic")).await.unwrap();
    assert_eq!(
        store.load().await.unwrap().unwrap().profile_version,
        PROFILE_VERSION
    );
}
