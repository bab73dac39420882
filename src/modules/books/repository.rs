use async_trait::async_trait;
use sqlx::SqlitePool;

use super::models::{Book, BookId};

#[derive(thiserror::Error, Debug)]
pub enum RepositoryError {
    /// A store-level unique constraint rejected the write.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(value: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &value {
            if db.is_unique_violation() {
                return Self::UniqueViolation(db.message().to_string());
            }
        }
        Self::Database(value)
    }
}

pub type RepoResult<T> = Result<T, RepositoryError>;

/// Persistence port for books.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// True iff a stored book has exactly this ISBN.
    async fn exists_by_isbn(&self, isbn: &str) -> RepoResult<bool>;
    /// Inserts when `book.id` is `None`, otherwise writes over the row with that id.
    async fn save(&self, book: Book) -> RepoResult<Book>;
    async fn find_by_id(&self, id: BookId) -> RepoResult<Option<Book>>;
    /// Removes the row with this id; absent ids are ignored.
    async fn delete(&self, id: BookId) -> RepoResult<()>;
}

pub struct SqliteBookRepository {
    pool: SqlitePool,
}

impl SqliteBookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    isbn: String,
}

impl From<BookRow> for Book {
    fn from(value: BookRow) -> Self {
        Book {
            id: Some(value.id),
            title: value.title,
            author: value.author,
            isbn: value.isbn,
        }
    }
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    async fn exists_by_isbn(&self, isbn: &str) -> RepoResult<bool> {
        let exists: i64 = sqlx::query_scalar(
            // language=sqlite
            r#"
            SELECT EXISTS (SELECT 1 FROM books WHERE isbn = ?)
            "#,
        )
        .bind(isbn)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists != 0)
    }

    async fn save(&self, book: Book) -> RepoResult<Book> {
        let id: i64 = match book.id {
            None => {
                sqlx::query_scalar(
                    // language=sqlite
                    r#"
                    INSERT INTO books (title, author, isbn)
                    VALUES (?, ?, ?)
                    RETURNING id
                    "#,
                )
                .bind(&book.title)
                .bind(&book.author)
                .bind(&book.isbn)
                .fetch_one(&self.pool)
                .await?
            }
            Some(id) => {
                sqlx::query(
                    // language=sqlite
                    r#"
                    INSERT INTO books (id, title, author, isbn)
                    VALUES (?, ?, ?, ?)
                    ON CONFLICT (id) DO UPDATE
                    SET title = excluded.title, author = excluded.author, isbn = excluded.isbn
                    "#,
                )
                .bind(id)
                .bind(&book.title)
                .bind(&book.author)
                .bind(&book.isbn)
                .execute(&self.pool)
                .await?;
                id
            }
        };

        tracing::debug!(book_id = id, "book persisted");
        Ok(book.with_id(id))
    }

    async fn find_by_id(&self, id: BookId) -> RepoResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=sqlite
            r#"
            SELECT id, title, author, isbn
            FROM books
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Book::from))
    }

    async fn delete(&self, id: BookId) -> RepoResult<()> {
        sqlx::query(
            // language=sqlite
            r#"
            DELETE FROM books
            WHERE id = ?
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
