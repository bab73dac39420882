//! HTTP handlers for the Books module, mounted under `/api/books`.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use library_http::error::AppError;

use super::models::{BookDto, BookId};
use super::service::{BookError, BookService};

pub fn router(service: Arc<BookService>) -> Router {
    Router::new()
        .route("/", post(create_book))
        .route(
            "/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(service)
}

impl From<BookError> for AppError {
    fn from(error: BookError) -> Self {
        match error {
            BookError::DuplicateIsbn => AppError::business(error.to_string()),
            BookError::InvalidArgument(_) | BookError::Repository(_) => {
                AppError::Internal(anyhow::Error::new(error))
            }
        }
    }
}

fn decode(payload: Result<Json<BookDto>, JsonRejection>) -> Result<BookDto, AppError> {
    payload
        .map(|Json(dto)| dto)
        .map_err(|rejection| AppError::validation(vec![rejection.body_text()]))
}

fn book_id(path: Result<Path<BookId>, PathRejection>) -> Result<BookId, AppError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| AppError::validation(vec![rejection.body_text()]))
}

async fn create_book(
    State(service): State<Arc<BookService>>,
    payload: Result<Json<BookDto>, JsonRejection>,
) -> Result<(StatusCode, Json<BookDto>), AppError> {
    let book = decode(payload)?
        .into_new_book()
        .map_err(AppError::validation)?;

    let saved = service.save(book).await?;

    Ok((StatusCode::CREATED, Json(BookDto::from(saved))))
}

async fn get_book(
    State(service): State<Arc<BookService>>,
    id: Result<Path<BookId>, PathRejection>,
) -> Result<Json<BookDto>, AppError> {
    service
        .get_by_id(book_id(id)?)
        .await?
        .map(|book| Json(BookDto::from(book)))
        .ok_or_else(AppError::not_found)
}

// Update merges without validating, unlike create.
async fn update_book(
    State(service): State<Arc<BookService>>,
    id: Result<Path<BookId>, PathRejection>,
    payload: Result<Json<BookDto>, JsonRejection>,
) -> Result<Json<BookDto>, AppError> {
    let Some(book) = service.get_by_id(book_id(id)?).await? else {
        return Err(AppError::not_found());
    };

    let merged = decode(payload)?.merge_into(book);
    let updated = service.update(merged).await?;

    Ok(Json(BookDto::from(updated)))
}

async fn delete_book(
    State(service): State<Arc<BookService>>,
    id: Result<Path<BookId>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Some(book) = service.get_by_id(book_id(id)?).await? else {
        return Err(AppError::not_found());
    };

    service.delete(&book).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::repository::SqliteBookRepository;
    use crate::modules::books::service::DUPLICATE_ISBN_MESSAGE;
    use axum::{
        body::{to_bytes, Body},
        http::Request,
        response::IntoResponse,
    };
    use library_kernel::settings::DatabaseSettings;
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn invalid_argument_is_internal_error() {
        let error = AppError::from(BookError::InvalidArgument("book id must not be null"));
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn duplicate_isbn_is_bad_request_with_message() {
        let response = AppError::from(BookError::DuplicateIsbn).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"errors": [DUPLICATE_ISBN_MESSAGE]})
        );
    }

    #[tokio::test]
    async fn store_failure_is_internal_error() {
        let pool = library_db::connect(&DatabaseSettings::in_memory())
            .await
            .unwrap();
        pool.close().await;
        let service = BookService::new(Arc::new(SqliteBookRepository::new(pool)));

        let response = router(Arc::new(service))
            .oneshot(Request::get("/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
