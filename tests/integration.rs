#![cfg(test)]

use std::sync::Arc;

use async_trait::async_trait;
use homework_bot::{
    base::{
        config::{Config, ConfigInner},
        types::{PollError, Void},
    },
    poller::{Poller, report::NOTHING_TO_REVIEW},
    service::{GenericNotifier, GenericReviewApi, NotifierClient, ReviewApiClient},
};
use mockall::mock;
use serde_json::{Value, json};

// Mocks.

// Mock review API client for testing.

mock! {
    pub Api {}

    #[async_trait]
    impl GenericReviewApi for Api {
        async fn fetch_updates(&self, from_date: i64) -> Result<Value, PollError>;
    }
}

// Mock notifier client for testing.

mock! {
    pub Notifier {}

    #[async_trait]
    impl GenericNotifier for Notifier {
        async fn send_message(&self, text: &str) -> Void;
    }
}

// Helpers.

/// Build a test configuration with hand-filled credentials.
fn test_config(strict_ack: bool) -> Config {
    Config {
        inner: Arc::new(ConfigInner {
            practicum_token: "practicum-test".to_string(),
            telegram_bot_token: "tg-test".to_string(),
            telegram_chat_id: "42".to_string(),
            endpoint: "https://example.invalid/homework_statuses/".to_string(),
            poll_interval_secs: 600,
            request_timeout_secs: None,
            strict_ack,
        }),
    }
}

/// Wire mocks into a poller.
fn poller_with(api: MockApi, notifier: MockNotifier, strict_ack: bool) -> Poller {
    Poller::new(
        test_config(strict_ack),
        ReviewApiClient::new(Arc::new(api)),
        NotifierClient::new(Arc::new(notifier)),
    )
}

/// Produce a real transport error without touching the network.
async fn transport_error(from_date: i64) -> PollError {
    let source = reqwest::Client::new().get("not a url").send().await.unwrap_err();

    PollError::Request { from_date, source }
}

// Tests.

#[tokio::test]
async fn approved_homework_notifies_and_advances_cursor() {
    let mut api = MockApi::new();
    api.expect_fetch_updates().times(1).returning(|_| {
        Ok(json!({
            "homeworks": [{"homework_name": "proj1", "status": "approved"}],
            "current_date": 1000,
        }))
    });

    let mut notifier = MockNotifier::new();
    notifier
        .expect_send_message()
        .times(1)
        .withf(|text| text.contains("proj1") && text.contains("the reviewer liked everything"))
        .returning(|_| Ok(()));

    let mut poller = poller_with(api, notifier, false);

    poller.cycle().await;

    assert_eq!(poller.cursor(), 1000);
}

#[tokio::test]
async fn empty_homework_list_sends_sentinel_once() {
    let mut api = MockApi::new();
    api.expect_fetch_updates()
        .times(2)
        .returning(|_| Ok(json!({"homeworks": [], "current_date": 2000})));

    let mut notifier = MockNotifier::new();
    notifier
        .expect_send_message()
        .times(1)
        .withf(|text| text == NOTHING_TO_REVIEW)
        .returning(|_| Ok(()));

    let mut poller = poller_with(api, notifier, false);

    // The second identical cycle must be suppressed.
    poller.cycle().await;
    poller.cycle().await;

    assert_eq!(poller.cursor(), 2000);
}

#[tokio::test]
async fn identical_reviewing_cycles_notify_once() {
    let mut api = MockApi::new();
    api.expect_fetch_updates().times(2).returning(|_| {
        Ok(json!({
            "homeworks": [{"homework_name": "proj1", "status": "reviewing"}],
            "current_date": 3000,
        }))
    });

    let mut notifier = MockNotifier::new();
    notifier
        .expect_send_message()
        .times(1)
        .withf(|text| text.contains("taken up for review"))
        .returning(|_| Ok(()));

    let mut poller = poller_with(api, notifier, false);

    poller.cycle().await;
    poller.cycle().await;
}

#[tokio::test]
async fn transport_error_is_swallowed_without_notification() {
    let err = transport_error(0).await;

    let mut api = MockApi::new();
    api.expect_fetch_updates().times(1).return_once(move |_| Err(err));

    let mut notifier = MockNotifier::new();
    notifier.expect_send_message().times(0);

    let mut poller = poller_with(api, notifier, false);
    let cursor_before = poller.cursor();

    poller.cycle().await;

    assert_eq!(poller.cursor(), cursor_before);
    assert!(poller.last_report().is_none());
}

#[tokio::test]
async fn http_status_error_is_swallowed_without_notification() {
    let mut api = MockApi::new();
    api.expect_fetch_updates().times(1).returning(|_| {
        Err(PollError::HttpStatus {
            status: 503,
            reason: "Service Unavailable".to_string(),
            body: "maintenance".to_string(),
        })
    });

    let mut notifier = MockNotifier::new();
    notifier.expect_send_message().times(0);

    let mut poller = poller_with(api, notifier, false);

    poller.cycle().await;

    assert!(poller.last_report().is_none());
}

#[tokio::test]
async fn unknown_status_sends_single_program_failure() {
    let mut api = MockApi::new();
    api.expect_fetch_updates().times(2).returning(|_| {
        Ok(json!({
            "homeworks": [{"homework_name": "proj1", "status": "unknown_status"}],
            "current_date": 4000,
        }))
    });

    let mut notifier = MockNotifier::new();
    notifier
        .expect_send_message()
        .times(1)
        .withf(|text| text.contains("Program failure") && text.contains("unknown_status"))
        .returning(|_| Ok(()));

    let mut poller = poller_with(api, notifier, false);

    // The same failure on the next cycle must not produce a duplicate.
    poller.cycle().await;
    poller.cycle().await;
}

#[tokio::test]
async fn missing_current_date_keeps_cursor_and_skips_notification() {
    let mut api = MockApi::new();
    api.expect_fetch_updates()
        .times(1)
        .returning(|_| Ok(json!({"homeworks": []})));

    let mut notifier = MockNotifier::new();
    notifier.expect_send_message().times(0);

    let mut poller = poller_with(api, notifier, false);
    let cursor_before = poller.cursor();

    poller.cycle().await;

    assert_eq!(poller.cursor(), cursor_before);
}

#[tokio::test]
async fn failed_send_still_counts_as_delivered_by_default() {
    let mut api = MockApi::new();
    api.expect_fetch_updates().times(2).returning(|_| {
        Ok(json!({
            "homeworks": [{"homework_name": "proj1", "status": "approved"}],
            "current_date": 5000,
        }))
    });

    let mut notifier = MockNotifier::new();
    notifier
        .expect_send_message()
        .times(1)
        .returning(|_| Err(anyhow::anyhow!("chat unreachable")));

    let mut poller = poller_with(api, notifier, false);

    // The failed attempt marks the report delivered; no retry next cycle.
    poller.cycle().await;
    poller.cycle().await;

    assert!(poller.last_report().is_some());
}

#[tokio::test]
async fn strict_ack_retries_until_a_send_succeeds() {
    let mut api = MockApi::new();
    api.expect_fetch_updates().times(2).returning(|_| {
        Ok(json!({
            "homeworks": [{"homework_name": "proj1", "status": "approved"}],
            "current_date": 6000,
        }))
    });

    let mut sequence = mockall::Sequence::new();

    let mut notifier = MockNotifier::new();
    notifier
        .expect_send_message()
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_| Err(anyhow::anyhow!("chat unreachable")));
    notifier
        .expect_send_message()
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_| Ok(()));

    let mut poller = poller_with(api, notifier, true);

    poller.cycle().await;
    assert!(poller.last_report().is_none());

    poller.cycle().await;
    assert!(poller.last_report().is_some());
}

#[test]
fn blank_credential_fails_config_load() {
    let dir = std::env::temp_dir().join("homework-bot-config-test");
    std::fs::create_dir_all(&dir).unwrap();

    let path = dir.join("config.toml");
    std::fs::write(
        &path,
        concat!(
            "practicum_token = \"\"\n",
            "telegram_bot_token = \"tg-test\"\n",
            "telegram_chat_id = \"42\"\n",
        ),
    )
    .unwrap();

    let err = Config::load(Some(path.as_path())).unwrap_err();

    assert!(matches!(err.downcast_ref::<PollError>(), Some(PollError::Token("practicum_token"))));
}

#[tokio::test]
async fn status_change_produces_a_second_notification() {
    let mut api = MockApi::new();
    let mut sequence = mockall::Sequence::new();

    api.expect_fetch_updates().times(1).in_sequence(&mut sequence).returning(|_| {
        Ok(json!({
            "homeworks": [{"homework_name": "proj1", "status": "reviewing"}],
            "current_date": 7000,
        }))
    });
    api.expect_fetch_updates().times(1).in_sequence(&mut sequence).returning(|_| {
        Ok(json!({
            "homeworks": [{"homework_name": "proj1", "status": "rejected", "reviewer_comment": "fix the tests"}],
            "current_date": 7100,
        }))
    });

    let mut notifier = MockNotifier::new();
    notifier
        .expect_send_message()
        .times(1)
        .withf(|text| text.contains("taken up for review"))
        .returning(|_| Ok(()));
    notifier
        .expect_send_message()
        .times(1)
        .withf(|text| text.contains("the reviewer has remarks") && text.contains("fix the tests"))
        .returning(|_| Ok(()));

    let mut poller = poller_with(api, notifier, false);

    poller.cycle().await;
    poller.cycle().await;

    assert_eq!(poller.cursor(), 7100);
}
