use serde::{Deserialize, Serialize};

/// Store-assigned book identifier.
pub type BookId = i64;

/// Domain entity for the Books module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Identifier assigned by the store; `None` until first persisted
    pub id: Option<BookId>,
    pub title: String,
    pub author: String,
    /// Catalog identifier, unique across all books
    pub isbn: String,
}

impl Book {
    /// A book that has not been persisted yet.
    pub fn new(title: impl Into<String>, author: impl Into<String>, isbn: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
        }
    }

    pub fn with_id(mut self, id: BookId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Wire representation exchanged over HTTP.
///
/// Every field is optional on input so missing fields surface as validation
/// messages instead of decode failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BookId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
}

impl BookDto {
    /// Validate a create payload and turn it into an unsaved [`Book`].
    ///
    /// Produces one message per missing or empty field, in the order title,
    /// author, isbn. Any client-supplied `id` is discarded.
    pub fn into_new_book(self) -> Result<Book, Vec<String>> {
        let mut errors = Vec::new();
        let title = required("title", self.title, &mut errors);
        let author = required("author", self.author, &mut errors);
        let isbn = required("isbn", self.isbn, &mut errors);

        match (title, author, isbn) {
            (Some(title), Some(author), Some(isbn)) if errors.is_empty() => {
                Ok(Book::new(title, author, isbn))
            }
            _ => Err(errors),
        }
    }

    /// Copy the payload's title and author onto a stored book.
    ///
    /// Fields absent from the payload keep their stored value; id and isbn are
    /// never touched. No validation is applied here.
    pub fn merge_into(self, mut book: Book) -> Book {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
        book
    }
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: Some(book.title),
            author: Some(book.author),
            isbn: Some(book.isbn),
        }
    }
}

fn required(field: &str, value: Option<String>, errors: &mut Vec<String>) -> Option<String> {
    match value {
        Some(value) if !value.is_empty() => Some(value),
        _ => {
            errors.push(format!("{field} must not be empty"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_reports_every_field() {
        let errors = BookDto::default().into_new_book().unwrap_err();
        assert_eq!(
            errors,
            vec![
                "title must not be empty",
                "author must not be empty",
                "isbn must not be empty"
            ]
        );
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let dto = BookDto {
            title: Some("Apocalipse Z".to_string()),
            author: Some(String::new()),
            isbn: Some("001".to_string()),
            ..BookDto::default()
        };
        assert_eq!(dto.into_new_book().unwrap_err(), vec!["author must not be empty"]);
    }

    #[test]
    fn valid_payload_drops_client_id() {
        let dto = BookDto {
            id: Some(42),
            title: Some("Apocalipse Z".to_string()),
            author: Some("Manel Loureiro".to_string()),
            isbn: Some("001".to_string()),
        };
        let book = dto.into_new_book().unwrap();
        assert_eq!(book, Book::new("Apocalipse Z", "Manel Loureiro", "001"));
    }

    #[test]
    fn merge_keeps_identity_and_isbn() {
        let stored = Book::new("Old", "Someone", "123").with_id(7);
        let patch = BookDto {
            id: Some(99),
            title: Some("New".to_string()),
            author: None,
            isbn: Some("999".to_string()),
        };

        let merged = patch.merge_into(stored);
        assert_eq!(merged, Book::new("New", "Someone", "123").with_id(7));
    }

    #[test]
    fn wire_format_matches_contract() {
        let dto = BookDto::from(Book::new("Apocalipse Z", "Manel Loureiro", "001").with_id(1));
        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            serde_json::json!({
                "id": 1,
                "title": "Apocalipse Z",
                "author": "Manel Loureiro",
                "isbn": "001"
            })
        );
    }
}
