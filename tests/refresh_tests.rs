mod support;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fortnite_client::SessionClient;
use support::*;

/// Mount init mocks where the token endpoint hands out `first` once and
/// `second` afterwards.
async fn mount_rotating_token_mocks(server: &MockServer, first: &str, second: &str) {
    Mock::given(method("POST"))
        .and(path("/account/api/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response(first)))
        .up_to_n_times(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/account/api/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response(second)))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/content/api/pages/fortnite-game"))
        .respond_with(ResponseTemplate::new(200).set_body_json(basic_data()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fortnite/api/storefront/v2/catalog"))
        .respond_with(ResponseTemplate::new(200).set_body_json(store_catalog()))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!(
            "/fortnite/api/game/v2/profile/{ACCOUNT_ID}/client/QueryProfile"
        )))
        .and(query_param("profileId", "common_public"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common_public_response()))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!(
            "/fortnite/api/game/v2/profile/{ACCOUNT_ID}/client/QueryProfile"
        )))
        .and(query_param("profileId", "common_core"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common_core_response()))
        .mount(server)
        .await;
}

async fn wait_for_calls(communicator: &RecordingCommunicator, count: usize) {
    for _ in 0..200 {
        if communicator.calls.lock().unwrap().len() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "communicator never reached {count} calls: {:?}",
        communicator.calls.lock().unwrap()
    );
}

#[tokio::test]
async fn refresh_event_relogs_in_and_cycles_the_communicator() {
    let server = MockServer::start().await;
    mount_rotating_token_mocks(&server, "eg1~access-1", "eg1~access-2").await;
    // Session kill must fire for the first login only.
    Mock::given(method("DELETE"))
        .and(path("/account/api/oauth/sessions/kill"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let communicator = Arc::new(RecordingCommunicator::default());
    let client = Arc::new(
        SessionClient::new(test_config(&server), StaticExchange::ok())
            .unwrap()
            .with_communicator(communicator.clone()),
    );

    client.init().await.expect("init");
    wait_for_calls(&communicator, 1).await;

    let (tx, rx) = broadcast::channel(4);
    let listener = client.clone().spawn_refresh_listener(rx);

    tx.send(()).unwrap();
    wait_for_calls(&communicator, 3).await;

    let calls = communicator.calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![
            "connect:eg1~access-1".to_string(),
            "disconnect".to_string(),
            "connect:eg1~access-2".to_string(),
        ]
    );
    assert_eq!(
        client.session().await.unwrap().access_token,
        "eg1~access-2"
    );

    client.shutdown();
    tokio::time::timeout(Duration::from_secs(1), listener)
        .await
        .expect("listener exits on shutdown")
        .unwrap();
}

#[tokio::test]
async fn listener_exits_when_the_event_sender_drops() {
    let server = MockServer::start().await;
    let client = test_client(&server);

    let (tx, rx) = broadcast::channel(1);
    let listener = client.spawn_refresh_listener(rx);
    drop(tx);

    tokio::time::timeout(Duration::from_secs(1), listener)
        .await
        .expect("listener exits when channel closes")
        .unwrap();
}

#[tokio::test]
async fn direct_refresh_handler_requires_nothing_but_login_mocks() {
    let server = MockServer::start().await;
    mount_rotating_token_mocks(&server, "eg1~access-1", "eg1~access-2").await;
    Mock::given(method("DELETE"))
        .and(path("/account/api/oauth/sessions/kill"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client
        .handle_access_token_refreshed()
        .await
        .expect("refresh handling");
    assert_eq!(
        client.session().await.unwrap().access_token,
        "eg1~access-1"
    );
}
