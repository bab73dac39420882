//! Book use-case service.
//!
//! Enforces ISBN uniqueness on create and the "must carry an id" precondition
//! on update/delete; everything else is delegated to the repository.

use std::sync::Arc;

use super::models::{Book, BookId};
use super::repository::{BookRepository, RepositoryError};

/// Message returned to clients when an ISBN is already registered.
pub const DUPLICATE_ISBN_MESSAGE: &str = "Isbn já cadastrado.";

#[derive(thiserror::Error, Debug)]
pub enum BookError {
    #[error("{}", DUPLICATE_ISBN_MESSAGE)]
    DuplicateIsbn,

    /// Caller broke the service contract (e.g. no id on update/delete).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type BookResult<T> = Result<T, BookError>;

pub struct BookService {
    repository: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }

    /// Persists a new book, rejecting ISBNs that are already stored.
    ///
    /// The existence check is a fast path; a unique-index violation raised by
    /// the store on insert maps to the same [`BookError::DuplicateIsbn`].
    pub async fn save(&self, book: Book) -> BookResult<Book> {
        if self.repository.exists_by_isbn(&book.isbn).await? {
            tracing::info!(isbn = %book.isbn, "rejecting duplicate isbn");
            return Err(BookError::DuplicateIsbn);
        }

        match self.repository.save(book).await {
            Ok(saved) => {
                tracing::info!(book_id = ?saved.id, "book created");
                Ok(saved)
            }
            Err(RepositoryError::UniqueViolation(detail)) => {
                tracing::info!(%detail, "duplicate isbn caught by store");
                Err(BookError::DuplicateIsbn)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn get_by_id(&self, id: BookId) -> BookResult<Option<Book>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Writes back a book that was already persisted.
    ///
    /// The caller merges new field values before calling.
    pub async fn update(&self, book: Book) -> BookResult<Book> {
        if book.id.is_none() {
            return Err(BookError::InvalidArgument("book id must not be null"));
        }

        let updated = self.repository.save(book).await?;
        tracing::info!(book_id = ?updated.id, "book updated");
        Ok(updated)
    }

    pub async fn delete(&self, book: &Book) -> BookResult<()> {
        let Some(id) = book.id else {
            return Err(BookError::InvalidArgument("book id must not be null"));
        };

        self.repository.delete(id).await?;
        tracing::info!(book_id = id, "book deleted");
        Ok(())
    }
}
