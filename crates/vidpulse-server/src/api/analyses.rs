//! POST /api/v1/analyses and GET /api/v1/analyses/:id.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vidpulse_analysis::{run_analysis, AnalysisError};
use vidpulse_core::AnalysisReport;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct SubmitAnalysisRequest {
    pub video_url: String,
}

#[derive(Debug, Serialize)]
pub(super) struct SubmitAnalysisResponse {
    pub id: Uuid,
}

pub(super) async fn submit_analysis(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<SubmitAnalysisRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SubmitAnalysisResponse>>), ApiError> {
    if request.video_url.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "video_url is required",
        ));
    }

    let id = run_analysis(
        &state.youtube,
        &state.classifier,
        &state.pool,
        &request.video_url,
    )
    .await
    .map_err(|e| map_analysis_error(req_id.0.clone(), &e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: SubmitAnalysisResponse { id },
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

pub(super) async fn get_analysis(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AnalysisReport>>, ApiError> {
    let row = vidpulse_db::get_analysis(&state.pool, id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let Some(row) = row else {
        return Err(ApiError::new(req_id.0, "not_found", "analysis not found"));
    };

    let report = row
        .into_report()
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: report,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Translate a pipeline failure into the caller-facing envelope.
///
/// User-correctable classes surface their message verbatim; a rejected
/// classifier credential and everything unexpected surface only generic
/// text, with the detail kept in server logs.
fn map_analysis_error(request_id: String, error: &AnalysisError) -> ApiError {
    match error {
        AnalysisError::InvalidReference(_) => {
            ApiError::new(request_id, "invalid_reference", error.to_string())
        }
        AnalysisError::SourceUnavailable(_) => {
            tracing::warn!(error = %error, "comment fetch failed");
            ApiError::new(request_id, "source_unavailable", error.to_string())
        }
        AnalysisError::EmptyResult { .. } => {
            ApiError::new(request_id, "no_comments", error.to_string())
        }
        AnalysisError::InvalidCredential => {
            tracing::error!(
                "stance classification credential rejected; every submission will fail until an operator rotates it"
            );
            ApiError::new(
                request_id,
                "service_degraded",
                "There's an issue with our stance analysis service. Please try again later or contact support.",
            )
        }
        AnalysisError::NoClassifiedComments | AnalysisError::Store(_) => {
            tracing::error!(error = %error, "analysis run failed");
            ApiError::new(
                request_id,
                "internal_error",
                "An unexpected error occurred during analysis. Please try again.",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_reference_surfaces_verbatim() {
        let error = AnalysisError::InvalidReference("not a url".to_string());
        let api_error = map_analysis_error("req-1".to_string(), &error);
        assert_eq!(api_error.error.code, "invalid_reference");
        assert!(api_error.error.message.contains("not a url"));
    }

    #[test]
    fn empty_result_uses_no_comments_code() {
        let error = AnalysisError::EmptyResult {
            video_id: "ABCDE".to_string(),
        };
        let api_error = map_analysis_error("req-1".to_string(), &error);
        assert_eq!(api_error.error.code, "no_comments");
        assert!(api_error.error.message.contains("ABCDE"));
    }

    #[test]
    fn credential_rejection_never_leaks_provider_detail() {
        let api_error =
            map_analysis_error("req-1".to_string(), &AnalysisError::InvalidCredential);
        assert_eq!(api_error.error.code, "service_degraded");
        assert!(
            !api_error.error.message.to_lowercase().contains("credential"),
            "raw credential error leaked: {}",
            api_error.error.message
        );
        assert!(!api_error.error.message.to_lowercase().contains("key"));
    }

    #[test]
    fn no_surviving_comments_is_a_generic_internal_error() {
        let api_error =
            map_analysis_error("req-1".to_string(), &AnalysisError::NoClassifiedComments);
        assert_eq!(api_error.error.code, "internal_error");
        assert!(!api_error.error.message.contains("survived"));
    }
}
