mod common;

use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_user_success() {
    let app = TestApp::spawn().await;

    let response = app.register_user("nicola@example.com", "StrongPass123#").await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], "nicola@example.com");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());
    // The credential never leaves the server
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_user_duplicate_email() {
    let app = TestApp::spawn().await;

    let response = app.register_user("nicola@example.com", "StrongPass123#").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.register_user("nicola@example.com", "OtherPass456!").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_register_user_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app.register_user("not-an-email", "StrongPass123#").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("email"));
}

#[tokio::test]
async fn test_register_user_weak_password() {
    let app = TestApp::spawn().await;

    let cases = [
        ("Weak1#", "at least 12 characters"),
        ("weakpass123#", "uppercase"),
        ("WEAKPASS123#", "lowercase"),
        ("WeakPassword#", "number"),
        ("WeakPassword123", "special character"),
    ];

    for (password, expected) in cases {
        let response = app.register_user("nicola@example.com", password).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert!(
            body["data"]["message"].as_str().unwrap().contains(expected),
            "password {:?} should be rejected with {:?}",
            password,
            expected
        );
    }
}

#[tokio::test]
async fn test_sign_in_success() {
    let app = TestApp::spawn().await;

    let response = app.register_user("nicola@example.com", "StrongPass123#").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.sign_in("nicola@example.com", "StrongPass123#").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = body["data"]["token"].as_str().unwrap();

    // Compact signed-token format: header.claims.signature
    assert_eq!(token.split('.').count(), 3);
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert_eq!(body["data"]["user"]["email"], "nicola@example.com");

    // Expiry is 60 minutes out
    let expires_at = body["data"]["expires_at"].as_i64().unwrap();
    let expected = Utc::now().timestamp() + 3_600;
    assert!((expires_at - expected).abs() <= 60);

    // The token verifies against the signing secret and names the user
    let claims = app.token_codec.verify(token).expect("Token should verify");
    assert_eq!(claims.sub, body["data"]["user"]["id"].as_str().unwrap());
    assert_eq!(claims.exp - claims.iat, 3_600);
}

#[tokio::test]
async fn test_sign_in_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;

    let response = app.register_user("nicola@example.com", "StrongPass123#").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Unknown email
    let unknown = app.sign_in("ghost@example.com", "StrongPass123#").await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown_body: serde_json::Value = unknown.json().await.expect("Failed to parse response");

    // Wrong password for an existing email
    let wrong = app.sign_in("nicola@example.com", "WrongPass123#").await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong_body: serde_json::Value = wrong.json().await.expect("Failed to parse response");

    // Identical outcome: nothing reveals whether the email exists
    assert_eq!(unknown_body, wrong_body);
    assert_eq!(unknown_body["data"]["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = TestApp::spawn().await;

    // No Authorization header
    let response = app
        .post("/api/sign-out")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Authorization header missing");

    // Garbage token
    let response = app
        .post_authenticated("/api/sign-out", "not.a.token")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_sign_out_revokes_token() {
    let app = TestApp::spawn().await;

    let token = app
        .register_and_sign_in("nicola@example.com", "StrongPass123#")
        .await;

    // The token works for a protected operation
    let response = app
        .post_authenticated("/api/sign-out", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    // Signature and expiry alone would still pass; the revocation record is
    // what rejects the token now, with a distinct message.
    let response = app
        .post_authenticated("/api/sign-out", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Token has been invalidated");
}

fn png_image_part() -> reqwest::multipart::Part {
    // Minimal PNG header bytes; the server checks content type, not pixels
    let bytes: Vec<u8> = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    reqwest::multipart::Part::bytes(bytes)
        .file_name("photo.png")
        .mime_str("image/png")
        .expect("Valid mime type")
}

#[tokio::test]
async fn test_create_post_and_list() {
    let app = TestApp::spawn().await;

    let token = app
        .register_and_sign_in("nicola@example.com", "StrongPass123#")
        .await;

    let form = reqwest::multipart::Form::new()
        .text("title", "A day at the beach")
        .text("description", "Sunset over the bay")
        .part("image", png_image_part());

    let response = app
        .post_authenticated("/api/posts", &token)
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["title"], "A day at the beach");
    let image_url = body["data"]["image_url"].as_str().unwrap();
    assert!(image_url.starts_with("/uploads/"));

    // The stored file exists under the random name
    let stored_name = image_url.trim_start_matches("/uploads/");
    assert!(app.uploads_dir.join(stored_name).exists());

    // Listing is public
    let response = app
        .get("/api/posts")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let posts = body["data"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["description"], "Sunset over the bay");
}

#[tokio::test]
async fn test_create_post_requires_authentication() {
    let app = TestApp::spawn().await;

    let form = reqwest::multipart::Form::new()
        .text("title", "A day at the beach")
        .text("description", "Sunset over the bay")
        .part("image", png_image_part());

    let response = app
        .post("/api/posts")
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_post_requires_image() {
    let app = TestApp::spawn().await;

    let token = app
        .register_and_sign_in("nicola@example.com", "StrongPass123#")
        .await;

    let form = reqwest::multipart::Form::new()
        .text("title", "A day at the beach")
        .text("description", "Sunset over the bay");

    let response = app
        .post_authenticated("/api/posts", &token)
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Image file is required");
}

#[tokio::test]
async fn test_create_post_rejects_non_image_upload() {
    let app = TestApp::spawn().await;

    let token = app
        .register_and_sign_in("nicola@example.com", "StrongPass123#")
        .await;

    let part = reqwest::multipart::Part::bytes(b"#!/bin/sh".to_vec())
        .file_name("script.sh")
        .mime_str("application/x-sh")
        .expect("Valid mime type");

    let form = reqwest::multipart::Form::new()
        .text("title", "A day at the beach")
        .text("description", "Sunset over the bay")
        .part("image", part);

    let response = app
        .post_authenticated("/api/posts", &token)
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("Only image files are allowed"));
}
