use serde_json::json;

use learnbuddy::profile::ProfileInput;
use learnbuddy::storage::RemoteMirror;

use crate::support::{FailingMirror, StoreFixture};

fn alice() -> ProfileInput {
    serde_json::from_value(json!({
        "profile": {"userName": "Alice Johnson", "email": "alice@example.com"}
    }))
    .unwrap()
}

#[test]
fn unavailable_mirror_still_yields_success() {
    let fixture = StoreFixture::new();
    let service = fixture.local_only_service();

    let outcome = service.complete_onboarding("alice-1", &alice()).unwrap();
    assert!(!outcome.is_synced());
    assert!(!outcome.is_partial());

    // The local record is retrievable regardless.
    let record = service.get_user_progress("alice-1").unwrap();
    assert_eq!(record.user_name.as_deref(), Some("Alice Johnson"));
}

#[test]
fn failing_mirror_reports_partial_success_and_keeps_local() {
    let fixture = StoreFixture::new();
    let service = fixture.service_with(Box::new(FailingMirror));

    let outcome = service.complete_onboarding("alice-1", &alice()).unwrap();
    assert!(outcome.is_partial());

    let record = service.get_user_progress("alice-1").unwrap();
    assert_eq!(record.user_name.as_deref(), Some("Alice Johnson"));
    assert!(record.onboarding_complete);
}

#[test]
fn reachable_mirror_receives_the_full_document() {
    let fixture = StoreFixture::new();
    let service = fixture.mirrored_service();

    let outcome = service.complete_onboarding("alice-1", &alice()).unwrap();
    assert!(outcome.is_synced());

    let mirrored = fixture
        .document_mirror()
        .read_profile("alice-1")
        .unwrap()
        .unwrap();
    assert_eq!(mirrored.user_name.as_deref(), Some("Alice Johnson"));
    assert_eq!(mirrored, service.get_user_progress("alice-1").unwrap());
}

#[test]
fn refresh_from_remote_reprimes_the_local_cache() {
    let fixture = StoreFixture::new();
    let service = fixture.mirrored_service();
    service.complete_onboarding("alice-1", &alice()).unwrap();

    // Drop the local copy, then read through the mirror.
    service.store().delete("alice-1").unwrap();
    assert!(service.get_user_progress("alice-1").is_none());

    let fetched = service.refresh_from_remote("alice-1").unwrap().unwrap();
    assert_eq!(fetched.user_name.as_deref(), Some("Alice Johnson"));
    assert_eq!(service.get_user_progress("alice-1").unwrap(), fetched);
}

#[test]
fn refresh_with_no_remote_copy_is_not_found() {
    let fixture = StoreFixture::new();
    let service = fixture.mirrored_service();
    assert!(service.refresh_from_remote("ghost").unwrap().is_none());
}

#[test]
fn force_local_mode_skips_a_configured_mirror() {
    let fixture = StoreFixture::new();
    // The root must never be touched while force_local is set.
    let mut config = learnbuddy::storage::remote::MirrorConfig::rooted("unused-mirror-root");
    config.force_local = true;
    let mirror = learnbuddy::DocumentMirror::new(config);
    assert!(!mirror.is_available());

    let service = fixture.service_with(Box::new(mirror));
    let outcome = service.complete_onboarding("alice-1", &alice()).unwrap();
    assert!(!outcome.is_synced());
    assert!(!outcome.is_partial());
}
