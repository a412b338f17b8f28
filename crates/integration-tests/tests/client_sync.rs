//! End-to-end tests for the client cache and sync layer against a running
//! server.
//!
//! Run with:
//! `cargo test -p oculog-integration-tests -- --ignored --test-threads=1`

use reqwest::Client;

use oculog_client::{ApiClient, ClientConfig, UsageTracker};
use oculog_core::WearType;
use oculog_integration_tests::{api_base_url, delete_log, post_log};

fn tracker_in(dir: &tempfile::TempDir) -> UsageTracker {
    UsageTracker::new(&ClientConfig {
        api_base_url: api_base_url(),
        data_path: dir.path().join("oculog-data.json"),
    })
}

fn date(year: i32, month: u32, day: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[tokio::test]
#[ignore = "Requires a running oculog-server and PostgreSQL"]
async fn invalid_token_authenticate_is_a_no_op() {
    let dir = tempfile::tempdir().expect("tempdir");
    let tracker = tracker_in(&dir);

    assert!(!tracker.authenticate("ABC123").await);
    assert!(!tracker.is_authenticated());
    assert!(!dir.path().join("oculog-data.json").exists());
}

#[tokio::test]
#[ignore = "Requires a running oculog-server and PostgreSQL"]
async fn authenticate_rebuilds_the_mirror_from_store_rows() {
    let client = Client::new();
    let token = "EYEWEAR21";
    let dates = ["2031-06-01", "2031-06-02"];
    for d in dates {
        delete_log(&client, token, d).await;
    }
    post_log(
        &client,
        &serde_json::json!({
            "token": token, "date": dates[0], "wearType": "lenses",
            "lensUsageDays": 1, "lastLensReplacementDate": dates[0],
        }),
    )
    .await;
    post_log(
        &client,
        &serde_json::json!({
            "token": token, "date": dates[1], "wearType": "glasses",
            "lensUsageDays": 1, "lastLensReplacementDate": dates[0],
        }),
    )
    .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let tracker = tracker_in(&dir);
    assert!(tracker.authenticate(token).await);

    let state = tracker.current_state();
    assert_eq!(state.entry_for(date(2031, 6, 1)), Some(WearType::Lenses));
    assert_eq!(state.entry_for(date(2031, 6, 2)), Some(WearType::Glasses));
    // Counter fields come from the newest row.
    assert_eq!(state.lens_usage_days, 1);
    assert_eq!(state.last_lens_replacement_date, Some(date(2031, 6, 1)));

    for d in dates {
        delete_log(&client, token, d).await;
    }
}

#[tokio::test]
#[ignore = "Requires a running oculog-server and PostgreSQL"]
async fn add_entry_pushes_the_newest_record_with_the_counter() {
    let client = Client::new();
    let token = "OPTICS92Z";
    delete_log(&client, token, "2031-06-10").await;

    let dir = tempfile::tempdir().expect("tempdir");
    let tracker = tracker_in(&dir);
    assert!(tracker.authenticate(token).await);

    tracker.add_entry(date(2031, 6, 10), WearType::Lenses).await;

    let api = ApiClient::new(api_base_url());
    let latest = api
        .get_latest_log(token)
        .await
        .expect("latest")
        .expect("a row exists");
    assert_eq!(latest.date, date(2031, 6, 10));
    assert_eq!(latest.wear_type, WearType::Lenses);
    assert_eq!(latest.lens_usage_days, tracker.current_state().lens_usage_days);

    delete_log(&client, token, "2031-06-10").await;
}

#[tokio::test]
#[ignore = "Requires a running oculog-server and PostgreSQL"]
async fn reset_counter_reaches_the_store_on_the_next_save() {
    let client = Client::new();
    let token = "LENSES73Y";
    delete_log(&client, token, "2031-08-01").await;

    let dir = tempfile::tempdir().expect("tempdir");
    let tracker = tracker_in(&dir);
    assert!(tracker.authenticate(token).await);

    tracker.add_entry(date(2031, 8, 1), WearType::Lenses).await;
    assert!(tracker.current_state().lens_usage_days >= 1);

    tracker.reset_lens_counter().await;

    let api = ApiClient::new(api_base_url());
    let latest = api
        .get_latest_log(token)
        .await
        .expect("latest")
        .expect("a row exists");
    assert_eq!(latest.lens_usage_days, 0);

    delete_log(&client, token, "2031-08-01").await;
}
