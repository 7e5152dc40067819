//! READ operation tests (GET /patient/ and GET /patient/{id})

use crate::support::{sample_patient, TestApp};
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn empty_list_is_a_success_with_distinct_message() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let token = app.token().await?;

    let (status, body) = app
        .json(Method::GET, "/patient/", None, Some(&token))
        .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200);
    assert_eq!(body["message"], "Empty list returned");
    // The envelope wraps the (empty) list in a single-element array.
    assert_eq!(body["data"], json!([[]]));

    Ok(())
}

#[tokio::test]
async fn list_returns_created_records() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let token = app.token().await?;

    let first = app.create_patient(&token, sample_patient()).await?;
    let mut other = sample_patient();
    other["first_name"] = json!("Amira");
    let second = app.create_patient(&token, other).await?;

    let (status, body) = app
        .json(Method::GET, "/patient/", None, Some(&token))
        .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Patients data retrieved successfully");

    let list = body["data"][0].as_array().expect("data[0] must be a list");
    assert_eq!(list.len(), 2);
    let ids: Vec<&str> = list.iter().filter_map(|p| p["id"].as_str()).collect();
    assert!(ids.contains(&first["id"].as_str().unwrap()));
    assert!(ids.contains(&second["id"].as_str().unwrap()));

    Ok(())
}

#[tokio::test]
async fn fetch_unknown_id_returns_not_found_envelope() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let token = app.token().await?;

    let unknown = uuid::Uuid::new_v4();
    let (status, body) = app
        .json(
            Method::GET,
            &format!("/patient/{unknown}"),
            None,
            Some(&token),
        )
        .await?;

    // Envelope-level not-found: transport stays 200.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], "An error occurred.");
    assert_eq!(body["code"], 404);
    assert_eq!(body["message"], "Patient doesn't exist.");

    Ok(())
}

#[tokio::test]
async fn fetch_malformed_id_is_not_found_not_fatal() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let token = app.token().await?;
    app.create_patient(&token, sample_patient()).await?;

    let (status, body) = app
        .json(
            Method::GET,
            "/patient/definitely-not-a-uuid",
            None,
            Some(&token),
        )
        .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 404);
    assert_eq!(body["message"], "Patient doesn't exist.");

    Ok(())
}

#[tokio::test]
async fn list_without_token_is_unauthorized() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (status, _body) = app.json(Method::GET, "/patient/", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}
