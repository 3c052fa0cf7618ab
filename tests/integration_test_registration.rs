mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{parse_body, TestApp};
use seminar_backend::domain::models::registration::{InsertOutcome, Registration};
use serde_json::json;
use tower::ServiceExt;

async fn seminar_with_capacity(app: &TestApp, capacity: Option<i64>) -> String {
    let auth = app.admin_session().await;
    let mut payload = json!({
        "title": "Kapasite Testi",
        "date": "2026-03-15",
        "time": "14:00",
        "location": "Online"
    });
    if let Some(capacity) = capacity {
        payload["max_capacity"] = json!(capacity);
    }
    let seminar = app.create_seminar(&auth, payload).await;
    seminar["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_registration_success() {
    let app = TestApp::new().await;
    let seminar_id = seminar_with_capacity(&app, None).await;

    let response = app.register(&seminar_id, "Ali Veli", "ali@example.com", "0555 123 45 67").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Kayıt başarıyla tamamlandı!");
    assert_eq!(body["registration"]["full_name"], "Ali Veli");
    assert!(body["registration"]["id"].as_str().is_some());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM registrations WHERE seminar_id = ?")
        .bind(&seminar_id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_registration_capacity_one() {
    let app = TestApp::new().await;
    let seminar_id = seminar_with_capacity(&app, Some(1)).await;

    let first = app.register(&seminar_id, "Ayşe Yılmaz", "ayse@example.com", "05551234567").await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = app.register(&seminar_id, "Mehmet Kaya", "mehmet@example.com", "05559876543").await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(second).await;
    assert_eq!(body["code"], "CAPACITY_FULL");
    assert_eq!(body["error"], "Seminer kapasitesi dolmuştur.");
}

#[tokio::test]
async fn test_registration_duplicate_email_ignores_name_and_phone() {
    let app = TestApp::new().await;
    let seminar_id = seminar_with_capacity(&app, None).await;

    let first = app.register(&seminar_id, "Ali Veli", "ali@example.com", "05551234567").await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = app.register(&seminar_id, "Başka İsim", "ali@example.com", "05320000000").await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(second).await["code"], "DUPLICATE_EMAIL");
}

#[tokio::test]
async fn test_registration_inactive_seminar() {
    let app = TestApp::new().await;
    let auth = app.admin_session().await;
    let seminar = app.create_seminar(&auth, json!({"title": "Pasif", "date": "2026-05-01"})).await;
    let seminar_id = seminar["id"].as_str().unwrap();

    let response = app.request(
        "PUT",
        &format!("/api/v1/seminars/{}", seminar_id),
        Some(json!({"is_active": false})),
        Some(&auth),
    ).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.register(seminar_id, "Ali Veli", "ali@example.com", "05551234567").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(response).await["code"], "EVENT_INACTIVE");
}

#[tokio::test]
async fn test_registration_unknown_seminar() {
    let app = TestApp::new().await;

    let response = app.register("does-not-exist", "Ali Veli", "ali@example.com", "05551234567").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = parse_body(response).await;
    assert_eq!(body["code"], "EVENT_NOT_FOUND");
    assert_eq!(body["error"], "Seminer bulunamadı.");
}

#[tokio::test]
async fn test_registration_field_checks() {
    let app = TestApp::new().await;
    let seminar_id = seminar_with_capacity(&app, None).await;

    let response = app.request(
        "POST",
        "/api/v1/registrations",
        Some(json!({"full_name": "Ali Veli", "email": "ali@example.com", "seminar_id": seminar_id})),
        None,
    ).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(response).await["code"], "MISSING_FIELDS");

    let response = app.register(&seminar_id, "   ", "ali@example.com", "05551234567").await;
    assert_eq!(parse_body(response).await["code"], "MISSING_FIELDS");

    let response = app.register(&seminar_id, "Ali Veli", "bad-email", "05551234567").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(response).await["code"], "INVALID_EMAIL");

    let response = app.register(&seminar_id, "Ali Veli", "ali@example.com", "123").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(response).await["code"], "INVALID_PHONE");
}

#[tokio::test]
async fn test_registration_field_errors_precede_lookup() {
    let app = TestApp::new().await;

    // Unknown seminar, but the bad email is reported first.
    let response = app.register("does-not-exist", "Ali Veli", "bad-email", "05551234567").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(response).await["code"], "INVALID_EMAIL");
}

#[tokio::test]
async fn test_registration_accepts_camel_case_fields() {
    let app = TestApp::new().await;
    let seminar_id = seminar_with_capacity(&app, None).await;

    let response = app.request(
        "POST",
        "/api/v1/registrations",
        Some(json!({
            "fullName": "Zeynep Demir",
            "email": "zeynep@example.com",
            "phone": "5551234567",
            "seminarId": seminar_id,
            "kvkkAccepted": true
        })),
        None,
    ).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_registration_rejects_overlong_name() {
    let app = TestApp::new().await;
    let seminar_id = seminar_with_capacity(&app, None).await;

    let response = app.register(&seminar_id, &"A".repeat(40_000), "long@example.com", "05551234567").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(response).await["code"], "FIELD_TOO_LONG");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM registrations")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_registration_malformed_body_uses_error_envelope() {
    let app = TestApp::new().await;

    let response = app.request(
        "POST",
        "/api/v1/registrations",
        Some(json!({"full_name": "Ali Veli", "phone": 5551234567u64, "email": "ali@example.com", "seminar_id": "x"})),
        None,
    ).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(response).await["error"], "Geçersiz istek gövdesi.");

    let response = app.send(
        Request::builder()
            .method("POST")
            .uri("/api/v1/registrations")
            .body(Body::from("full_name=Ali"))
            .unwrap()
    ).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(parse_body(response).await["error"].is_string());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registrations_respect_capacity() {
    let app = TestApp::new().await;
    let seminar_id = seminar_with_capacity(&app, Some(3)).await;

    let mut handles = Vec::new();
    for i in 0..30 {
        let router = app.router.clone();
        let payload = json!({
            "full_name": format!("Katılımcı {}", i),
            "email": format!("racer{}@example.com", i),
            "phone": "05551234567",
            "seminar_id": seminar_id
        });
        handles.push(tokio::spawn(async move {
            let response = router.oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/registrations")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap()
            ).await.unwrap();
            let status = response.status();
            (status, parse_body(response).await)
        }));
    }

    let mut accepted = 0;
    let mut full = 0;
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        match status {
            StatusCode::OK => accepted += 1,
            StatusCode::BAD_REQUEST => {
                assert_eq!(body["code"], "CAPACITY_FULL");
                full += 1;
            }
            other => panic!("unexpected status {}: {}", other, body),
        }
    }
    assert_eq!(accepted, 3);
    assert_eq!(full, 27);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM registrations WHERE seminar_id = ?")
        .bind(&seminar_id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_store_inserts_respect_capacity() {
    let app = TestApp::new().await;
    let seminar_id = seminar_with_capacity(&app, Some(3)).await;

    let mut handles = Vec::new();
    for i in 0..30 {
        let repo = app.state.registration_repo.clone();
        let registration = Registration::new(
            seminar_id.clone(),
            format!("Katılımcı {}", i),
            "05551234567".to_string(),
            format!("store{}@example.com", i),
        );
        handles.push(tokio::spawn(async move {
            repo.create_if_room(&registration, Some(3)).await
        }));
    }

    let mut inserted = 0;
    let mut full = 0;
    for handle in handles {
        match handle.await.unwrap().unwrap() {
            InsertOutcome::Inserted(_) => inserted += 1,
            InsertOutcome::CapacityFull => full += 1,
            other => panic!("unexpected outcome {:?}", other),
        }
    }
    assert_eq!(inserted, 3);
    assert_eq!(full, 27);
}
