//! HTTP surface: the JSON prediction API and the HTML form.
//!
//! The two prediction paths fail differently. `/predict_api` catches every
//! failure and answers `{"error": ...}` with a 500. `/predict` has no
//! structured handling: failures become a bare framework error page.

use crate::application::ml::InferencePipeline;
use crate::domain::errors::PredictionError;
use crate::domain::ml::{FORM_FIELDS, FeatureRecord, FeatureSchema, FeatureValue};
use crate::interfaces::views::{prediction_text, render_home};
use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, FormRejection};
use axum::extract::{DefaultBodyLimit, Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<InferencePipeline>,
}

impl AppState {
    pub fn new(pipeline: InferencePipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predicted_price: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failure on the JSON path, always reported as a structured 500
#[derive(Debug)]
pub struct ApiError(PredictionError);

impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!("predict_api failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// Failure on the form path. Rendered as a generic error page; the detail
/// only reaches the log.
#[derive(Debug, Error)]
pub enum FormFault {
    #[error("unreadable form body: {0}")]
    Unreadable(String),

    #[error("missing form field '{0}'")]
    MissingField(String),

    #[error("form field {field}: could not convert string to float: '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

impl FormFault {
    fn status(&self) -> StatusCode {
        match self {
            FormFault::Unreadable(_) | FormFault::MissingField(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for FormFault {
    fn into_response(self) -> Response {
        let status = self.status();
        error!("Unhandled fault on /predict ({}): {}", status, self);

        let reason = status.canonical_reason().unwrap_or("Error");
        let body = format!(
            "<!doctype html>\n<title>{code} {reason}</title>\n<h1>{reason}</h1>\n",
            code = status.as_u16(),
        );
        (status, Html(body)).into_response()
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/predict", get(home).post(predict_form))
        .route(
            "/predict_api",
            post(predict_api).layer(DefaultBodyLimit::disable()),
        )
        .with_state(state)
}

async fn home() -> Html<String> {
    Html(render_home(None))
}

async fn predict_api(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let body = body.map_err(|rejection| PredictionError::InvalidPayload {
        reason: rejection.body_text(),
    })?;

    // Content type is not checked; any body is decoded as JSON.
    let payload: serde_json::Value =
        serde_json::from_slice(&body).map_err(|e| PredictionError::InvalidPayload {
            reason: e.to_string(),
        })?;

    let record = FeatureRecord::from_json(payload);
    let predicted_price = state.pipeline.predict(&record, FeatureSchema::Json)?;

    info!("predict_api: predicted_price={}", predicted_price);
    Ok(Json(PredictionResponse { predicted_price }))
}

async fn predict_form(
    State(state): State<AppState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Html<String>, FormFault> {
    let Form(fields) = form.map_err(|rejection| FormFault::Unreadable(rejection.body_text()))?;
    let record = parse_form_fields(&fields)?;
    let prediction = state.pipeline.predict(&record, FeatureSchema::Form)?;

    info!("predict: predicted_price={}", prediction);
    Ok(Html(render_home(Some(&prediction_text(prediction)))))
}

/// Read the form fields into a record. A repeated field keeps its first value.
fn parse_form_fields(fields: &[(String, String)]) -> Result<FeatureRecord, FormFault> {
    let mut record = FeatureRecord::new();
    for &name in FORM_FIELDS {
        let raw = fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
            .ok_or_else(|| FormFault::MissingField(name.to_string()))?;
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| FormFault::InvalidNumber {
                field: name.to_string(),
                value: raw.clone(),
            })?;
        record.insert(name, FeatureValue::Number(value));
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_form_fields_reads_all_fields() {
        let fields = form(&[
            ("MedInc", "5.5"),
            ("HouseAge", "10"),
            ("AveRooms", "6.2"),
            ("AveBedrms", "1.1"),
            ("AveOccup", "3.2"),
            ("Latitude", " 34.05 "),
            ("Longitude", "-118.25"),
            ("Population", "900"),
        ]);

        let record = parse_form_fields(&fields).unwrap();
        assert_eq!(record.len(), 7);
        assert_eq!(record.get("Latitude"), Some(&FeatureValue::Number(34.05)));
        assert!(record.get("Population").is_none());
    }

    #[test]
    fn test_parse_form_fields_missing_field() {
        let fields = form(&[("MedInc", "5.5")]);

        let fault = parse_form_fields(&fields).unwrap_err();
        assert!(matches!(fault, FormFault::MissingField(ref name) if name == "HouseAge"));
        assert_eq!(fault.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_parse_form_fields_invalid_number() {
        let mut fields = form(&[
            ("MedInc", "5.5"),
            ("HouseAge", "old"),
        ]);
        for name in FORM_FIELDS.iter().skip(2) {
            fields.push((name.to_string(), "1".to_string()));
        }

        let fault = parse_form_fields(&fields).unwrap_err();
        assert!(matches!(fault, FormFault::InvalidNumber { ref field, .. } if field == "HouseAge"));
        assert_eq!(fault.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_parse_form_fields_repeated_field_keeps_first() {
        let mut fields = form(&[("MedInc", "2.5"), ("MedInc", "9.0")]);
        for name in FORM_FIELDS.iter().skip(1) {
            fields.push((name.to_string(), "1".to_string()));
        }

        let record = parse_form_fields(&fields).unwrap();
        assert_eq!(record.get("MedInc"), Some(&FeatureValue::Number(2.5)));
    }
}
