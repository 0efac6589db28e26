use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Wrapper for API responses that automatically adds success envelope
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub body: Body<T>,
    pub status_code: Option<StatusCode>,
}

#[derive(Debug)]
pub enum Body<T> {
    Data(T),
    Message(String),
}

impl<T: Serialize> ApiResponse<T> {
    /// `{"success": true, "data": ...}` with 200
    pub fn success(data: T) -> Self {
        Self {
            body: Body::Data(data),
            status_code: None,
        }
    }

    pub fn with_status(data: T, status_code: StatusCode) -> Self {
        Self {
            body: Body::Data(data),
            status_code: Some(status_code),
        }
    }

    pub fn created(data: T) -> Self {
        Self::with_status(data, StatusCode::CREATED)
    }
}

impl ApiResponse<()> {
    /// `{"success": true, "message": ...}` for mutations with nothing to return
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            body: Body::Message(message.into()),
            status_code: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        let envelope = match self.body {
            Body::Message(message) => json!({ "success": true, "message": message }),
            Body::Data(data) => match serde_json::to_value(&data) {
                Ok(value) => json!({ "success": true, "data": value }),
                Err(e) => {
                    tracing::error!("Failed to serialize response data: {}", e);
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({
                            "success": false,
                            "errorMessage": "Failed to serialize response data",
                            "code": "INTERNAL_SERVER_ERROR"
                        })),
                    )
                        .into_response();
                }
            },
        };

        (status, Json(envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
