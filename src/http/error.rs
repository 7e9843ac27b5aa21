use rouille::Response;
use serde::Serialize;

use crate::storage::error::StorageError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::FavoriteNotFound(id) => {
                ApiError::NotFound(format!("favorite {} not found", id))
            }

            StorageError::AlbumNotFound(id) => {
                ApiError::NotFound(format!("album {} not found", id))
            }

            StorageError::Validation { field } => {
                ApiError::BadRequest(format!("{} is required and must be non-empty", field))
            }

            StorageError::Persistence { .. }
            | StorageError::Malformed { .. }
            | StorageError::CatalogSource { .. }
            | StorageError::Fs(_)
            | StorageError::Internal(_) => {
                log::error!("storage failure: {err}");
                ApiError::Internal("internal server error".into())
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    pub fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) =>
                Response::json(&ErrorBody { error: &msg }).with_status_code(404),

            ApiError::BadRequest(msg) =>
                Response::json(&ErrorBody { error: &msg }).with_status_code(400),

            ApiError::Internal(msg) =>
                Response::json(&ErrorBody { error: &msg }).with_status_code(500),
        }
    }
}
