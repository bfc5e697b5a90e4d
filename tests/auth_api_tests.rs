#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use common::{bearer, Seed, Stores, PASSWORD};
use learnbox_server::{config::AdminSeed, repositories::AccountRepository};
use secrecy::SecretString;

#[actix_web::test]
async fn test_token_pair_grants_access() {
    let stores = Stores::new();
    let alice = Seed::new(&stores).member("alice").await;
    let state = stores.app_state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/token")
        .set_json(json!({ "username": "alice", "password": PASSWORD }))
        .to_request();
    let tokens: Value = test::call_and_read_body_json(&app, req).await;
    let access = tokens["access"].as_str().unwrap();
    assert!(tokens["refresh"].as_str().is_some());

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", alice.id))
        .insert_header(("Authorization", format!("Bearer {}", access)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_wrong_credentials_are_unauthorized() {
    let stores = Stores::new();
    Seed::new(&stores).member("alice").await;
    let state = stores.app_state();
    let app = test_app!(state);

    for payload in [
        json!({ "username": "alice", "password": "wrong-password" }),
        json!({ "username": "nobody", "password": PASSWORD }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/token")
            .set_json(&payload)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }
}

#[actix_web::test]
async fn test_refresh_issues_new_pair() {
    let stores = Stores::new();
    let alice = Seed::new(&stores).member("alice").await;
    let state = stores.app_state();
    let app = test_app!(state);

    let refresh = state.jwt_service.create_refresh_token(&alice).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/token/refresh")
        .set_json(json!({ "refresh": refresh }))
        .to_request();
    let tokens: Value = test::call_and_read_body_json(&app, req).await;
    assert!(tokens["access"].as_str().is_some());

    let access = state.jwt_service.create_token(&alice).unwrap();
    let req = test::TestRequest::post()
        .uri("/api/token/refresh")
        .set_json(json!({ "refresh": access }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_token_of_deleted_account_is_rejected() {
    let stores = Stores::new();
    let alice = Seed::new(&stores).member("alice").await;
    let state = stores.app_state();
    let app = test_app!(state);
    let auth = bearer(&state, &alice);

    stores.accounts.delete(alice.id).await.unwrap();

    let req = test::TestRequest::get()
        .uri("/api/sections")
        .insert_header(("Authorization", auth))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_responses_carry_request_id() {
    let stores = Stores::new();
    let state = stores.app_state();
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    assert!(resp.headers().contains_key("x-request-id"));
}

#[actix_web::test]
async fn test_readiness_without_database() {
    let stores = Stores::new();
    let state = stores.app_state();
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/health/ready").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ready");
}

#[actix_web::test]
async fn test_bootstrap_superuser_is_idempotent() {
    let stores = Stores::new();
    let state = stores.app_state();
    let seed = AdminSeed {
        username: "root".to_string(),
        email: "root@example.com".to_string(),
        password: SecretString::from("rootpassword1".to_string()),
    };

    let first = state.account_service.ensure_superuser(&seed).await.unwrap();
    let second = state.account_service.ensure_superuser(&seed).await.unwrap();

    assert!(first.is_superuser);
    assert_eq!(first.id, second.id);
    assert_eq!(stores.accounts.find_all().await.unwrap().len(), 1);
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let stores = Stores::new();
    let alice = Seed::new(&stores).member("alice").await;
    let state = stores.app_state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/sections")
        .insert_header(("Authorization", bearer(&state, &alice)))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 400);
}
