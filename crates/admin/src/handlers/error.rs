use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shopme_core::catalog::CatalogError;
use shopme_core::storage::{repository_error_to_status_code, RepositoryError};

use crate::service::ProductServiceError;

pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        let code = if let Some(e) = self.0.downcast_ref::<ProductServiceError>() {
            e.status_code()
        } else if let Some(e) = self.0.downcast_ref::<RepositoryError>() {
            repository_error_to_status_code(e)
        } else if self.0.downcast_ref::<CatalogError>().is_some() {
            400
        } else if let Some(e) = self.0.downcast_ref::<MultipartError>() {
            e.status().as_u16()
        } else {
            500
        };

        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!(status = %status_code, error = %self.0, "Request failed");
        } else {
            tracing::warn!(status = %status_code, error = %self.0, "Request rejected");
        }

        (status_code, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_status() {
        let error = AppError::from(RepositoryError::ConnectionFailed("down".to_string()));
        assert_eq!(error.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_service_error_status() {
        let error = AppError::from(ProductServiceError::InvalidSubmission(
            CatalogError::MismatchedDetails {
                names: 2,
                values: 1,
            },
        ));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);

        let error = AppError::from(ProductServiceError::Images(std::io::Error::other("disk")));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_unknown_error_status() {
        let error = AppError(anyhow::anyhow!("boom"));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
