use serde_json::{json, Value};

use learnbuddy::profile::merge::UpdateMap;
use learnbuddy::profile::ProfileInput;
use learnbuddy::storage::RemoteMirror;

use crate::support::{FailingMirror, StoreFixture};

fn onboarded(service: &learnbuddy::ProgressService, user_id: &str) {
    let input: ProfileInput = serde_json::from_value(json!({
        "profile": {"userName": "Updatee", "grade": "O-Level", "targetExamYear": 2026}
    }))
    .unwrap();
    service.complete_onboarding(user_id, &input).unwrap();
}

fn updates(pairs: &[(&str, Value)]) -> UpdateMap {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

#[test]
fn dotted_path_update_reaches_the_nested_block() {
    let fixture = StoreFixture::new();
    let service = fixture.local_only_service();
    onboarded(&service, "upd-1");

    service
        .update_user_data(
            "upd-1",
            &updates(&[
                ("profile.grade", json!("A-Level")),
                ("gamification.points", json!(350)),
            ]),
        )
        .unwrap();

    let record = service.get_user_progress("upd-1").unwrap();
    assert_eq!(record.profile.grade.as_deref(), Some("A-Level"));
    assert_eq!(record.gamification.points, 350);
    // Untouched leaves survive the merge.
    assert_eq!(record.user_name.as_deref(), Some("Updatee"));
    assert_eq!(record.target_exam_year, Some(2026));
}

#[test]
fn update_with_mirror_merges_both_copies() {
    let fixture = StoreFixture::new();
    let service = fixture.mirrored_service();
    onboarded(&service, "upd-2");

    let outcome = service
        .update_user_data("upd-2", &updates(&[("profile.grade", json!("A-Level"))]))
        .unwrap();
    assert!(outcome.is_synced());

    let mirrored = fixture
        .document_mirror()
        .read_profile("upd-2")
        .unwrap()
        .unwrap();
    assert_eq!(mirrored.profile.grade.as_deref(), Some("A-Level"));
    assert_eq!(mirrored, service.get_user_progress("upd-2").unwrap());
}

#[test]
fn failed_remote_update_leaves_local_merge_standing() {
    let fixture = StoreFixture::new();
    let local = fixture.local_only_service();
    onboarded(&local, "upd-3");

    let flaky = fixture.service_with(Box::new(FailingMirror));
    let outcome = flaky
        .update_user_data("upd-3", &updates(&[("profile.grade", json!("A-Level"))]))
        .unwrap();
    assert!(outcome.is_partial());

    let record = flaky.get_user_progress("upd-3").unwrap();
    assert_eq!(record.profile.grade.as_deref(), Some("A-Level"));
}

#[test]
fn update_without_existing_record_starts_from_empty() {
    let fixture = StoreFixture::new();
    let service = fixture.local_only_service();

    service
        .update_user_data("fresh-1", &updates(&[("profile.grade", json!("B"))]))
        .unwrap();

    let raw: Value = service.store().get("fresh-1").unwrap();
    assert_eq!(raw, json!({"profile": {"grade": "B"}}));
}

#[test]
fn save_user_progress_is_merge_not_replace() {
    let fixture = StoreFixture::new();
    let service = fixture.local_only_service();
    onboarded(&service, "upd-4");

    service
        .save_user_progress(
            "upd-4",
            &updates(&[("subjects.math.progress", json!(40))]),
        )
        .unwrap();

    let record = service.get_user_progress("upd-4").unwrap();
    assert_eq!(record.subjects["math"]["progress"], json!(40));
    assert_eq!(record.user_name.as_deref(), Some("Updatee"));
}
