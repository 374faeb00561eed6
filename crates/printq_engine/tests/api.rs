use std::time::Duration;

use pretty_assertions::assert_eq;
use printq_engine::{ApiSettings, FailureKind, JobApi, JobSubmission, ReqwestJobApi};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn submission(status: &str, name: &str, message: &str) -> JobSubmission {
    JobSubmission {
        status: status.to_string(),
        name: name.to_string(),
        message: message.to_string(),
    }
}

fn api_for(server: &MockServer) -> ReqwestJobApi {
    ReqwestJobApi::new(&ApiSettings::new(server.uri())).expect("api client")
}

#[tokio::test]
async fn list_returns_records_in_server_key_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/job/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[{"id":1,"status":"queued","name":"a","message":"m"}]"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let jobs = api_for(&server).list_jobs().await.expect("list ok");

    assert_eq!(jobs.len(), 1);
    let keys: Vec<_> = jobs[0].keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["id", "status", "name", "message"]);
    assert_eq!(jobs[0]["name"], json!("a"));
}

#[tokio::test]
async fn list_fails_on_any_status_but_200() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/job/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = api_for(&server).list_jobs().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.kind.http_status(), Some(500));
}

#[tokio::test]
async fn list_treats_other_2xx_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/job/"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let err = api_for(&server).list_jobs().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(204));
}

#[tokio::test]
async fn list_rejects_body_that_is_not_an_array_of_objects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/job/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let err = api_for(&server).list_jobs().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn create_posts_json_and_returns_created_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/job/"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"status": "queued", "name": "x", "message": "y"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(
            json!({"id": 2, "status": "queued", "name": "x", "message": "y"}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let created = api_for(&server)
        .create_job(&submission("queued", "x", "y"))
        .await
        .expect("create ok");

    assert_eq!(created["id"], json!(2));
    assert_eq!(created["message"], json!("y"));
}

#[tokio::test]
async fn create_fails_on_any_status_but_201() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/job/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"name": ["required"]})))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api
        .create_job(&submission("queued", "x", "y"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(400));

    // 200 is not 201 either.
    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/api/job/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3})))
        .mount(&server)
        .await;
    let err = api
        .create_job(&submission("queued", "x", "y"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(200));
}

#[tokio::test]
async fn base_url_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/print/api/job/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let settings = ApiSettings::new(format!("{}/print", server.uri()));
    let api = ReqwestJobApi::new(&settings).expect("api client");

    assert!(api.endpoint().as_str().ends_with("/print/api/job/"));
    assert!(api.list_jobs().await.expect("list ok").is_empty());
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/job/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let settings = ApiSettings {
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::new(server.uri())
    };
    let api = ReqwestJobApi::new(&settings).expect("api client");

    let err = api.list_jobs().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/job/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .set_body_string(r#"[{"id":1},{"id":2}]"#),
        )
        .mount(&server)
        .await;

    let settings = ApiSettings {
        max_bytes: 10,
        ..ApiSettings::new(server.uri())
    };
    let api = ReqwestJobApi::new(&settings).expect("api client");

    let err = api.list_jobs().await.unwrap_err();
    assert!(matches!(
        err.kind,
        FailureKind::TooLarge { max_bytes: 10, .. }
    ));
}

#[tokio::test]
async fn unreachable_server_is_a_network_failure() {
    // Port 1 on loopback is reserved and refuses connections.
    let api = ReqwestJobApi::new(&ApiSettings::new("http://127.0.0.1:1")).expect("api client");

    let err = api.list_jobs().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}
