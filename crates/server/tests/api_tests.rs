//! Integration tests for the prediction API endpoints
//!
//! The router is rebuilt here against a pipeline trained on a small
//! deterministic corpus, then driven through `tower::ServiceExt::oneshot`.

use std::sync::{Arc, OnceLock};

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use obesity_core::{
    training::{HyperParams, SearchGrid},
    Dataset, ObesityPipeline, PatientRecord, COLUMNS, LABELS,
};
use serde_json::{json, Value};
use tower::ServiceExt;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ObesityPipeline>,
}

async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("invalid JSON body: {rejection}") })),
            );
        }
    };

    let record = match PatientRecord::from_json(&payload) {
        Ok(record) => record,
        Err(validation) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": validation.to_string() })),
            );
        }
    };

    match state.pipeline.predict(&record) {
        Ok(prediction) => (
            StatusCode::OK,
            Json(json!({ "status": 200, "data": { "prediction": prediction } })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("internal error: {e}") })),
        ),
    }
}

async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "pipeline": {
            "params": state.pipeline.metadata.params.to_string(),
            "test_accuracy": state.pipeline.metadata.test_accuracy,
        }
    }))
}

fn create_test_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Deterministic corpus over the real sixteen-column schema
fn training_corpus() -> Dataset {
    let mut rows = Vec::new();
    let mut labels = Vec::new();

    for (class_idx, label) in LABELS.iter().enumerate() {
        for i in 0..10usize {
            let yes_no = |flip: usize| if (i + flip) % 2 == 0 { "yes" } else { "no" };
            let tier4 = ["no", "Sometimes", "Frequently", "Always"][i % 4];
            let transport = [
                "Automobile",
                "Motorbike",
                "Bike",
                "Public_Transportation",
                "Walking",
            ][i % 5];
            let weight = 40.0 + class_idx as f64 * 20.0 + i as f64;

            rows.push(vec![
                if i % 2 == 0 { "Male" } else { "Female" }.to_string(),
                (18 + class_idx * 3 + i).to_string(),
                format!("{:.2}", 1.50 + (i % 5) as f64 * 0.08),
                format!("{weight:.1}"),
                yes_no(0).to_string(),
                yes_no(1).to_string(),
                (1 + i % 3).to_string(),
                (1 + i % 4).to_string(),
                tier4.to_string(),
                yes_no(0).to_string(),
                (1 + i % 3).to_string(),
                yes_no(1).to_string(),
                (i % 4).to_string(),
                (i % 3).to_string(),
                tier4.to_string(),
                transport.to_string(),
            ]);
            labels.push(label.to_string());
        }
    }

    Dataset::new(COLUMNS.iter().map(|c| c.to_string()).collect(), rows, labels)
}

fn test_pipeline() -> Arc<ObesityPipeline> {
    static PIPELINE: OnceLock<Arc<ObesityPipeline>> = OnceLock::new();
    PIPELINE
        .get_or_init(|| {
            let grid = SearchGrid {
                candidates: vec![HyperParams {
                    n_trees: 10,
                    max_depth: Some(10),
                    min_samples_split: 2,
                }],
            };
            let outcome = obesity_core::train_pipeline(&training_corpus(), &grid)
                .expect("training the test pipeline failed");
            Arc::new(outcome.pipeline)
        })
        .clone()
}

fn setup_test_app() -> Router {
    let state = Arc::new(AppState {
        pipeline: test_pipeline(),
    });
    create_test_router(state)
}

fn valid_payload() -> Value {
    json!({
        "Gender": "Female",
        "Age": 21,
        "Height": 1.62,
        "Weight": 64.0,
        "family_history": "yes",
        "FAVC": "yes",
        "FCVC": 2,
        "NCP": 3,
        "CAEC": "Sometimes",
        "SMOKE": "no",
        "CH2O": 2,
        "SCC": "no",
        "FAF": 1,
        "TUE": 1,
        "CALC": "Sometimes",
        "MTRANS": "Public_Transportation"
    })
}

fn predict_request(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_valid_payload_returns_labelled_prediction() {
    let app = setup_test_app();

    let response = app
        .oneshot(predict_request(valid_payload().to_string()))
        .await
        .unwrap();
    let (status, body) = response_json(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 200);
    let prediction = body["data"]["prediction"].as_str().unwrap();
    assert!(
        LABELS.contains(&prediction),
        "unexpected label {prediction}"
    );
}

#[tokio::test]
async fn test_missing_field_is_rejected_with_detail() {
    let app = setup_test_app();
    let mut payload = valid_payload();
    payload.as_object_mut().unwrap().remove("Weight");

    let response = app
        .oneshot(predict_request(payload.to_string()))
        .await
        .unwrap();
    let (status, body) = response_json(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(!error.is_empty());
    assert!(error.contains("Weight"), "detail was {error}");
}

#[tokio::test]
async fn test_wrong_typed_field_is_rejected() {
    let app = setup_test_app();
    let mut payload = valid_payload();
    payload.as_object_mut().unwrap()["Age"] = json!("twenty-one");

    let response = app
        .oneshot(predict_request(payload.to_string()))
        .await
        .unwrap();
    let (status, body) = response_json(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Age"));
}

#[tokio::test]
async fn test_prediction_is_idempotent() {
    let first = {
        let app = setup_test_app();
        let response = app
            .oneshot(predict_request(valid_payload().to_string()))
            .await
            .unwrap();
        response_json(response).await.1["data"]["prediction"].clone()
    };
    let second = {
        let app = setup_test_app();
        let response = app
            .oneshot(predict_request(valid_payload().to_string()))
            .await
            .unwrap();
        response_json(response).await.1["data"]["prediction"].clone()
    };

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_extra_top_level_field_is_ignored() {
    let app = setup_test_app();
    let mut payload = valid_payload();
    payload
        .as_object_mut()
        .unwrap()
        .insert("comment".into(), json!("not part of the schema"));

    let response = app
        .oneshot(predict_request(payload.to_string()))
        .await
        .unwrap();
    let (status, _) = response_json(response).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let app = setup_test_app();

    let response = app
        .oneshot(predict_request("{\"Gender\": ".to_string()))
        .await
        .unwrap();
    let (status, body) = response_json(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_boundary_tier_values_are_accepted() {
    for (fcvc, faf, tue) in [(1, 0, 0), (3, 3, 2)] {
        let app = setup_test_app();
        let mut payload = valid_payload();
        {
            let obj = payload.as_object_mut().unwrap();
            obj["FCVC"] = json!(fcvc);
            obj["FAF"] = json!(faf);
            obj["TUE"] = json!(tue);
        }

        let response = app
            .oneshot(predict_request(payload.to_string()))
            .await
            .unwrap();
        let (status, body) = response_json(response).await;

        assert_eq!(status, StatusCode::OK, "body was {body}");
    }
}

#[tokio::test]
async fn test_out_of_vocabulary_category_is_an_internal_error() {
    let app = setup_test_app();
    let mut payload = valid_payload();
    payload.as_object_mut().unwrap()["MTRANS"] = json!("Teleport");

    let response = app
        .oneshot(predict_request(payload.to_string()))
        .await
        .unwrap();
    let (status, body) = response_json(response).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("internal error"));
}

#[tokio::test]
async fn test_healthz_describes_the_pipeline() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let (status, body) = response_json(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["pipeline"]["params"].as_str().unwrap().contains("n_trees"));
}
