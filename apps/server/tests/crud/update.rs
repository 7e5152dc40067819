//! UPDATE operation tests (PUT /patient/{id})
//!
//! Tests cover:
//! - Partial updates touching exactly the supplied fields
//! - The empty payload no-op signal
//! - Not-found and the idempotent update-to-identical-value case
//! - The confirmation-string success payload

use crate::support::{sample_patient, TestApp};
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn update_returns_confirmation_string() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let token = app.token().await?;

    let created = app.create_patient(&token, sample_patient()).await?;
    let id = created["id"].as_str().unwrap();

    let (status, body) = app
        .json(
            Method::PUT,
            &format!("/patient/{id}"),
            Some(json!({"doctor_name": "Dr. Mohamed"})),
            Some(&token),
        )
        .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200);
    assert_eq!(body["message"], "Patient name updated successfully");
    assert_eq!(
        body["data"][0],
        json!(format!("Patient with ID: {id} name update is successful"))
    );

    Ok(())
}

#[tokio::test]
async fn partial_update_changes_exactly_the_supplied_fields() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let token = app.token().await?;

    let input = sample_patient();
    let created = app.create_patient(&token, input.clone()).await?;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, _body) = app
        .json(
            Method::PUT,
            &format!("/patient/{id}"),
            Some(json!({"diagnosis": "Flu", "visit_date": "2024-02-01"})),
            Some(&token),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);

    let (_status, body) = app
        .json(Method::GET, &format!("/patient/{id}"), None, Some(&token))
        .await?;
    let fetched = &body["data"][0];

    assert_eq!(fetched["diagnosis"], "Flu");
    assert_eq!(fetched["visit_date"], "2024-02-01");
    // Every other field is untouched.
    for (field, expected) in input.as_object().unwrap() {
        if field == "diagnosis" || field == "visit_date" {
            continue;
        }
        assert_eq!(
            &fetched[field], expected,
            "field '{field}' must be untouched by the partial update"
        );
    }

    Ok(())
}

#[tokio::test]
async fn empty_payload_is_the_designated_no_op_error() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let token = app.token().await?;

    let created = app.create_patient(&token, sample_patient()).await?;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .json(
            Method::PUT,
            &format!("/patient/{id}"),
            Some(json!({})),
            Some(&token),
        )
        .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], "An error occurred");
    assert_eq!(body["code"], 404);
    assert_eq!(body["message"], "There was an error updating the patient data.");

    // The record is untouched.
    let (_status, body) = app
        .json(Method::GET, &format!("/patient/{id}"), None, Some(&token))
        .await?;
    assert_eq!(body["data"][0]["diagnosis"], "Common Cold");

    Ok(())
}

#[tokio::test]
async fn update_unknown_id_returns_404_envelope() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let token = app.token().await?;

    let unknown = uuid::Uuid::new_v4();
    let (status, body) = app
        .json(
            Method::PUT,
            &format!("/patient/{unknown}"),
            Some(json!({"diagnosis": "Flu"})),
            Some(&token),
        )
        .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 404);
    assert_eq!(body["message"], "There was an error updating the patient data.");

    Ok(())
}

#[tokio::test]
async fn update_to_identical_value_reports_success() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let token = app.token().await?;

    let created = app.create_patient(&token, sample_patient()).await?;
    let id = created["id"].as_str().unwrap().to_string();

    // Same value the record already holds: still an idempotent success.
    let (status, body) = app
        .json(
            Method::PUT,
            &format!("/patient/{id}"),
            Some(json!({"diagnosis": "Common Cold"})),
            Some(&token),
        )
        .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200);
    assert_eq!(body["message"], "Patient name updated successfully");

    Ok(())
}

#[tokio::test]
async fn update_rejects_malformed_email() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let token = app.token().await?;

    let created = app.create_patient(&token, sample_patient()).await?;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, _body) = app
        .json(
            Method::PUT,
            &format!("/patient/{id}"),
            Some(json!({"email": "not-an-email"})),
            Some(&token),
        )
        .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[tokio::test]
async fn update_without_token_is_unauthorized() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let unknown = uuid::Uuid::new_v4();
    let (status, _body) = app
        .json(
            Method::PUT,
            &format!("/patient/{unknown}"),
            Some(json!({"diagnosis": "Flu"})),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}
