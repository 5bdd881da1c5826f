use serde_json::{json, Value};

use learnbuddy::profile::ProfileInput;
use learnbuddy::storage::DEMO_USER_ID;

use crate::support::StoreFixture;

#[test]
fn arbitrary_json_round_trips_deep_equal() {
    let fixture = StoreFixture::new();
    let store = fixture.store();

    let record = json!({
        "userName": "Round Trip",
        "nested": {"deep": {"deeper": [1, 2, {"three": null}]}},
        "unicode": "数学 ✍️",
        "bool": false
    });
    store.put("rt-1", &record).unwrap();
    let loaded: Value = store.get("rt-1").unwrap();
    assert_eq!(loaded, record);
}

#[test]
fn demo_onboarding_shares_the_demo_key() {
    let fixture = StoreFixture::new();
    let service = fixture.local_only_service();

    let input: ProfileInput =
        serde_json::from_value(json!({"userName": "Demo User"})).unwrap();
    service.complete_onboarding(DEMO_USER_ID, &input).unwrap();

    let store = fixture.store();
    assert!(store.key_for(DEMO_USER_ID).ends_with("_demo_progress"));
    assert!(service.get_user_progress(DEMO_USER_ID).is_some());
}

#[test]
fn logout_reset_clears_every_user() {
    let fixture = StoreFixture::new();
    let service = fixture.local_only_service();

    for user in ["u-1", "u-2", DEMO_USER_ID] {
        let input: ProfileInput =
            serde_json::from_value(json!({"userName": user})).unwrap();
        service.complete_onboarding(user, &input).unwrap();
    }

    assert_eq!(service.clear_all_local_data().unwrap(), 3);
    for user in ["u-1", "u-2", DEMO_USER_ID] {
        assert!(service.get_user_progress(user).is_none());
    }
    // Clearing again is still fine.
    assert_eq!(service.clear_all_local_data().unwrap(), 0);
}

#[test]
fn analytics_stub_answers_only_for_known_users() {
    let fixture = StoreFixture::new();
    let service = fixture.local_only_service();

    assert!(service.user_analytics("stranger").is_none());

    let input: ProfileInput =
        serde_json::from_value(json!({"userName": "Known"})).unwrap();
    service.complete_onboarding("known-1", &input).unwrap();

    let analytics = service.user_analytics("known-1").unwrap();
    assert_eq!(analytics.total_study_time, 0);
    assert!(service.topics_for_review("known-1").is_empty());
}
