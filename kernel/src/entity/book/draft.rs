use destructure::Destructure;
use vodca::References;

use crate::entity::{AuthorId, BookCategory, BookIsbn, BookPrice, BookStock, BookTitle};
use crate::validation::{Rule, Validator};
use crate::KernelError;

pub const BLANK_ISBN: &str = "Book ISBN must not be blank!";
pub const INVALID_ISBN: &str = "ISBN is not valid!";
pub const DUPLICATE_ISBN: &str = "A book with this ISBN already exists in the database!";
pub const BLANK_TITLE: &str = "Book title must not be blank!";
pub const NON_POSITIVE_PRICE: &str = "Book price must not be negative!";
pub const NON_POSITIVE_STOCK: &str = "Book quantity in stock must not be negative!";

const DRAFT_RULES: &[Rule<BookDraft>] = &[
    Rule::new(has_isbn, BLANK_ISBN),
    Rule::new(has_valid_isbn, INVALID_ISBN),
    Rule::new(has_title, BLANK_TITLE),
    Rule::new(has_positive_price, NON_POSITIVE_PRICE),
    Rule::new(has_positive_stock, NON_POSITIVE_STOCK),
];

/// Every field of a book except the id the store assigns.
#[derive(Debug, Clone, PartialEq, References, Destructure)]
pub struct BookDraft {
    isbn: BookIsbn,
    title: BookTitle,
    price: BookPrice,
    stock: BookStock,
    category: BookCategory,
    author_id: AuthorId,
}

impl BookDraft {
    pub fn new(
        isbn: BookIsbn,
        title: BookTitle,
        price: BookPrice,
        stock: BookStock,
        category: BookCategory,
        author_id: AuthorId,
    ) -> Self {
        Self {
            isbn,
            title,
            price,
            stock,
            category,
            author_id,
        }
    }

    /// `isbn_conflict` is the outcome of the uniqueness lookup, which the
    /// draft cannot perform itself.
    pub fn validate(self, isbn_conflict: bool) -> error_stack::Result<Self, KernelError> {
        Validator::new(&self)
            .rules(DRAFT_RULES)
            .ensure(!isbn_conflict, DUPLICATE_ISBN)
            .finish()?;
        Ok(self)
    }
}

fn has_isbn(draft: &BookDraft) -> bool {
    !draft.isbn.is_blank()
}

fn has_valid_isbn(draft: &BookDraft) -> bool {
    draft.isbn.is_valid()
}

fn has_title(draft: &BookDraft) -> bool {
    !draft.title.is_blank()
}

fn has_positive_price(draft: &BookDraft) -> bool {
    *draft.price.as_ref() > 0.0
}

// Creation and replacement both require stock; only buying may drain it to zero.
fn has_positive_stock(draft: &BookDraft) -> bool {
    *draft.stock.as_ref() > 0
}

#[cfg(test)]
mod test {
    use crate::entity::{
        AuthorId, BookCategory, BookDraft, BookIsbn, BookPrice, BookStock, BookTitle,
        BLANK_ISBN, BLANK_TITLE, DUPLICATE_ISBN, INVALID_ISBN, NON_POSITIVE_PRICE,
        NON_POSITIVE_STOCK,
    };
    use crate::validation::Violations;
    use crate::KernelError;

    fn draft(isbn: &str, title: &str, price: f64, stock: i32) -> BookDraft {
        BookDraft::new(
            BookIsbn::new(isbn),
            BookTitle::new(title),
            BookPrice::new(price),
            BookStock::new(stock),
            BookCategory::Fantasy,
            AuthorId::new(3),
        )
    }

    fn violations(result: error_stack::Result<BookDraft, KernelError>) -> Violations {
        match result.unwrap_err().current_context() {
            KernelError::Validation(violations) => violations.clone(),
            other => panic!("unexpected context: {other:?}"),
        }
    }

    #[test]
    fn valid_draft_passes() {
        let silmarillion = draft("6258327656", "Silmarillion", 12.5, 10);
        assert_eq!(silmarillion.clone().validate(false).unwrap(), silmarillion);
    }

    #[test]
    fn blank_isbn_and_title_are_reported_together() {
        let found = violations(draft("", "  ", 12.5, 10).validate(false));
        assert!(found.contains(BLANK_ISBN));
        assert!(found.contains(INVALID_ISBN));
        assert!(found.contains(BLANK_TITLE));
    }

    #[test]
    fn non_positive_numbers_are_reported_together() {
        let found = violations(draft("0306406152", "Title", 0.0, 0).validate(false));
        assert_eq!(
            found,
            Violations::new(vec![
                NON_POSITIVE_PRICE.to_string(),
                NON_POSITIVE_STOCK.to_string(),
            ])
        );
        let found = violations(draft("0306406152", "Title", -1.0, -5).validate(false));
        assert!(found.contains(NON_POSITIVE_PRICE));
        assert!(found.contains(NON_POSITIVE_STOCK));
    }

    #[test]
    fn nan_price_is_rejected() {
        let found = violations(draft("0306406152", "Title", f64::NAN, 1).validate(false));
        assert!(found.contains(NON_POSITIVE_PRICE));
    }

    #[test]
    fn conflict_is_reported_next_to_field_rules() {
        let found = violations(draft("0618260307", "", 9.99, 1).validate(true));
        assert_eq!(
            found,
            Violations::new(vec![BLANK_TITLE.to_string(), DUPLICATE_ISBN.to_string()])
        );
    }
}
