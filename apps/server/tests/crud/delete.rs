//! DELETE operation tests (DELETE /patient/{id})

use crate::support::{sample_patient, TestApp};
use axum::http::{Method, StatusCode};

#[tokio::test]
async fn delete_returns_confirmation() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let token = app.token().await?;

    let created = app.create_patient(&token, sample_patient()).await?;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .json(Method::DELETE, &format!("/patient/{id}"), None, Some(&token))
        .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200);
    assert_eq!(body["message"], "Patient deleted successfully");
    assert_eq!(
        body["data"][0],
        serde_json::json!(format!("Patient with ID: {id} removed"))
    );

    Ok(())
}

#[tokio::test]
async fn deleted_record_is_gone() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let token = app.token().await?;

    let created = app.create_patient(&token, sample_patient()).await?;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, _body) = app
        .json(Method::DELETE, &format!("/patient/{id}"), None, Some(&token))
        .await?;
    assert_eq!(status, StatusCode::OK);

    // Hard delete: a subsequent fetch is not-found.
    let (status, body) = app
        .json(Method::GET, &format!("/patient/{id}"), None, Some(&token))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 404);
    assert_eq!(body["message"], "Patient doesn't exist.");

    Ok(())
}

#[tokio::test]
async fn delete_unknown_id_returns_404_envelope() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let token = app.token().await?;

    let unknown = uuid::Uuid::new_v4();
    let (status, body) = app
        .json(
            Method::DELETE,
            &format!("/patient/{unknown}"),
            None,
            Some(&token),
        )
        .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], "An error occurred");
    assert_eq!(body["code"], 404);
    assert_eq!(
        body["message"],
        format!("Patient with id {unknown} doesn't exist")
    );

    Ok(())
}

#[tokio::test]
async fn delete_without_token_is_unauthorized() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let unknown = uuid::Uuid::new_v4();
    let (status, _body) = app
        .json(Method::DELETE, &format!("/patient/{unknown}"), None, None)
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}
