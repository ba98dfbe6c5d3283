use std::fmt::{Display, Formatter};

use error_stack::Context;

use crate::entity::{AuthorId, BookId, BookIsbn};
use crate::validation::Violations;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Book,
    Author,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Book => write!(f, "Book"),
            EntityKind::Author => write!(f, "Author"),
        }
    }
}

#[derive(Debug)]
pub enum KernelError {
    NotFound {
        entity: EntityKind,
        field: &'static str,
        key: String,
    },
    Validation(Violations),
    InsufficientStock {
        id: i64,
        requested: i32,
    },
    InvalidAmount {
        requested: i32,
    },
    Concurrency,
    Timeout,
    Internal,
}

impl KernelError {
    pub fn book_not_found(id: &BookId) -> Self {
        Self::NotFound {
            entity: EntityKind::Book,
            field: "id",
            key: id.as_ref().to_string(),
        }
    }

    pub fn isbn_not_found(isbn: &BookIsbn) -> Self {
        Self::NotFound {
            entity: EntityKind::Book,
            field: "isbn",
            key: isbn.as_ref().clone(),
        }
    }

    pub fn author_not_found(id: &AuthorId) -> Self {
        Self::NotFound {
            entity: EntityKind::Author,
            field: "id",
            key: id.as_ref().to_string(),
        }
    }
}

impl Display for KernelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::NotFound { entity, field, key } => {
                write!(f, "{entity} with {field} [{key}] does not exist!")
            }
            KernelError::Validation(violations) => write!(f, "Validation failed: {violations}"),
            KernelError::InsufficientStock { id, requested } => write!(
                f,
                "Book with id [{id}] has less than [{requested}] copies left in stock!"
            ),
            KernelError::InvalidAmount { .. } => write!(f, "Book amount to buy must be positive!"),
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
