use mockito::{Matcher, Server};
use serde_json::json;
use yougile_cli::login::login;

#[tokio::test]
async fn test_login_success_uses_first_company() {
    let mut server = Server::new_async().await;

    let companies = server
        .mock("POST", "/api-v2/auth/companies")
        .match_body(Matcher::Json(json!({ "login": "me@example.com", "password": "secret" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"paging":{"count":2,"limit":50,"offset":0,"next":false},
                "content":[{"id":"c-1","name":"Acme","isAdmin":true},
                           {"id":"c-2","name":"Other","isAdmin":false}]}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let keys = server
        .mock("POST", "/api-v2/auth/keys")
        .match_body(Matcher::PartialJson(json!({ "companyId": "c-1" })))
        .with_status(201)
        .with_body(r#"{"key":"k-123"}"#)
        .expect(1)
        .create_async()
        .await;

    let key = login(&server.url(), "me@example.com", "secret", None)
        .await
        .unwrap();

    companies.assert_async().await;
    keys.assert_async().await;
    assert_eq!(key, "k-123");
}

#[tokio::test]
async fn test_login_with_company_id_picks_that_company() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/api-v2/auth/companies")
        .with_status(200)
        .with_body(r#"{"content":[{"id":"c-1","name":"Acme"},{"id":"c-2","name":"Other"}]}"#)
        .create_async()
        .await;

    let keys = server
        .mock("POST", "/api-v2/auth/keys")
        .match_body(Matcher::PartialJson(json!({ "companyId": "c-2" })))
        .with_status(201)
        .with_body(r#"{"key":"k-2"}"#)
        .expect(1)
        .create_async()
        .await;

    let key = login(&server.url(), "me@example.com", "secret", Some("c-2"))
        .await
        .unwrap();

    keys.assert_async().await;
    assert_eq!(key, "k-2");
}

#[tokio::test]
async fn test_login_unknown_company_id() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/api-v2/auth/companies")
        .with_status(200)
        .with_body(r#"{"content":[{"id":"c-1","name":"Acme"}]}"#)
        .create_async()
        .await;

    let keys = server
        .mock("POST", "/api-v2/auth/keys")
        .expect(0)
        .create_async()
        .await;

    let err = login(&server.url(), "me@example.com", "secret", Some("c-9"))
        .await
        .unwrap_err();

    keys.assert_async().await;
    assert!(err.to_string().contains("company c-9 not found"));
}

#[tokio::test]
async fn test_login_companies_unauthorized() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/api-v2/auth/companies")
        .with_status(401)
        .with_body(r#"{"error":"bad credentials"}"#)
        .create_async()
        .await;

    let err = login(&server.url(), "me@example.com", "wrong", None)
        .await
        .unwrap_err();

    let msg = format!("{err:#}");
    assert!(msg.contains("get companies"), "unexpected error: {msg}");
    assert!(msg.contains("401"), "unexpected error: {msg}");
}

#[tokio::test]
async fn test_login_no_companies() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/api-v2/auth/companies")
        .with_status(200)
        .with_body(r#"{"content":[]}"#)
        .create_async()
        .await;

    let err = login(&server.url(), "me@example.com", "secret", None)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("no companies"));
}

#[tokio::test]
async fn test_login_empty_key_in_response() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/api-v2/auth/companies")
        .with_status(200)
        .with_body(r#"{"content":[{"id":"c-1","name":"Acme"}]}"#)
        .create_async()
        .await;

    server
        .mock("POST", "/api-v2/auth/keys")
        .with_status(201)
        .with_body(r#"{"key":""}"#)
        .create_async()
        .await;

    let err = login(&server.url(), "me@example.com", "secret", None)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("empty key"));
}

#[tokio::test]
async fn test_login_create_key_wrong_status() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/api-v2/auth/companies")
        .with_status(200)
        .with_body(r#"{"content":[{"id":"c-1","name":"Acme"}]}"#)
        .create_async()
        .await;

    // The key endpoint answers 201; a plain 200 is treated as a failure.
    server
        .mock("POST", "/api-v2/auth/keys")
        .with_status(200)
        .with_body(r#"{"key":"k-1"}"#)
        .create_async()
        .await;

    let err = login(&server.url(), "me@example.com", "secret", None)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "create key: HTTP 200 OK");
}
