use serde_json::json;

use learnbuddy::profile::ProfileInput;

use crate::support::StoreFixture;

fn input(value: serde_json::Value) -> ProfileInput {
    serde_json::from_value(value).expect("test payload should deserialize")
}

#[test]
fn nested_payload_lands_with_flattened_user_name() {
    let fixture = StoreFixture::new();
    let service = fixture.local_only_service();

    let outcome = service
        .complete_onboarding(
            "alice-1",
            &input(json!({
                "profile": {"userName": "Alice Johnson", "examDate": "15/06/26"}
            })),
        )
        .unwrap();
    assert!(!outcome.is_partial());

    let record = service.get_user_progress("alice-1").unwrap();
    assert_eq!(record.user_name.as_deref(), Some("Alice Johnson"));
    assert_eq!(record.exam_date.as_deref(), Some("15/06/26"));
    assert!(record.onboarding_complete);
    assert!(record.profile.onboarding_complete);
}

#[test]
fn flat_payload_still_persists_for_backward_compat() {
    let fixture = StoreFixture::new();
    let service = fixture.local_only_service();

    service
        .complete_onboarding(
            "flat-1",
            &input(json!({"userName": "Flat User", "email": "flat@example.com"})),
        )
        .unwrap();

    let record = service.get_user_progress("flat-1").unwrap();
    assert_eq!(record.user_name.as_deref(), Some("Flat User"));
    assert_eq!(record.email.as_deref(), Some("flat@example.com"));
    assert_eq!(record.profile.email.as_deref(), Some("flat@example.com"));
}

#[test]
fn onboarding_complete_is_forced_true_even_when_input_says_false() {
    let fixture = StoreFixture::new();
    let service = fixture.local_only_service();

    service
        .complete_onboarding(
            "stubborn-1",
            &input(json!({
                "onboardingComplete": false,
                "profile": {"userName": "Stubborn", "onboardingComplete": false}
            })),
        )
        .unwrap();

    let record = service.get_user_progress("stubborn-1").unwrap();
    assert!(record.onboarding_complete);
}

#[test]
fn missing_user_name_completes_without_error() {
    let fixture = StoreFixture::new();
    let service = fixture.local_only_service();

    service
        .complete_onboarding(
            "anon-1",
            &input(json!({"profile": {"email": "noname@example.com", "grade": "O-Level"}})),
        )
        .unwrap();

    let record = service.get_user_progress("anon-1").unwrap();
    assert_eq!(record.user_name, None);
    assert_eq!(record.email.as_deref(), Some("noname@example.com"));
}

#[test]
fn complex_payload_keeps_every_opaque_sibling() {
    let fixture = StoreFixture::new();
    let service = fixture.local_only_service();

    service
        .complete_onboarding(
            "complex-1",
            &input(json!({
                "profile": {
                    "userName": "Complex User",
                    "email": "complex@example.com",
                    "grade": "O-Level",
                    "targetExamYear": 2026,
                    "examDate": "20/08/26"
                },
                "subjects": {"math": {"topics": {}}, "science": {"topics": {}}},
                "evaluation": {"score": 85},
                "studyPlan": {"weeks": 12},
                "gamification": {"points": 500, "streak": 10, "badges": ["Early Bird"]}
            })),
        )
        .unwrap();

    let record = service.get_user_progress("complex-1").unwrap();
    assert_eq!(record.user_name.as_deref(), Some("Complex User"));
    assert_eq!(record.exam_date.as_deref(), Some("20/08/26"));
    assert_eq!(record.subjects.len(), 2);
    assert_eq!(record.evaluation, Some(json!({"score": 85})));
    assert_eq!(record.study_plan, Some(json!({"weeks": 12})));
    assert_eq!(record.gamification.points, 500);
}

#[test]
fn create_then_complete_preserves_created_at() {
    // Diverges from the legacy behavior on purpose: createdAt used to be
    // overwritten by every write, which made account age meaningless.
    let fixture = StoreFixture::new();
    let early = StoreFixture::clock_time() - chrono::Duration::days(30);

    let first = fixture.service_at(
        Box::new(learnbuddy::storage::NullMirror),
        early,
    );
    first
        .create_user_profile("keeper-1", &input(json!({"userName": "Keeper"})))
        .unwrap();

    let second = fixture.local_only_service();
    second
        .complete_onboarding("keeper-1", &input(json!({"userName": "Keeper"})))
        .unwrap();

    let record = second.get_user_progress("keeper-1").unwrap();
    assert_eq!(record.created_at, early);
    assert_eq!(record.last_active, StoreFixture::clock_time());
}
