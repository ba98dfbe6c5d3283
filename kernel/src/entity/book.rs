mod category;
mod draft;
mod id;
mod isbn;
mod price;
mod stock;
mod title;

pub use self::{category::*, draft::*, id::*, isbn::*, price::*, stock::*, title::*};
use crate::entity::AuthorId;
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, PartialEq, References, Destructure, Mutation)]
pub struct Book {
    id: BookId,
    isbn: BookIsbn,
    title: BookTitle,
    price: BookPrice,
    stock: BookStock,
    category: BookCategory,
    author_id: AuthorId,
}

impl Book {
    pub fn new(
        id: BookId,
        isbn: BookIsbn,
        title: BookTitle,
        price: BookPrice,
        stock: BookStock,
        category: BookCategory,
        author_id: AuthorId,
    ) -> Self {
        Self {
            id,
            isbn,
            title,
            price,
            stock,
            category,
            author_id,
        }
    }

    pub fn from_draft(id: BookId, draft: BookDraft) -> Self {
        let DestructBookDraft {
            isbn,
            title,
            price,
            stock,
            category,
            author_id,
        } = draft.into_destruct();
        Self::new(id, isbn, title, price, stock, category, author_id)
    }

    /// Overwrites every field except the id.
    pub fn replace(&mut self, draft: BookDraft) {
        let DestructBookDraft {
            isbn,
            title,
            price,
            stock,
            category,
            author_id,
        } = draft.into_destruct();
        self.substitute(|book| {
            *book.isbn = isbn;
            *book.title = title;
            *book.price = price;
            *book.stock = stock;
            *book.category = category;
            *book.author_id = author_id;
        });
    }

    pub fn can_supply(&self, amount: i32) -> bool {
        *self.stock.as_ref() >= amount
    }

    /// Removes `amount` copies if the stock covers them. Returns whether it did.
    pub fn withdraw(&mut self, amount: i32) -> bool {
        if !self.can_supply(amount) {
            return false;
        }
        let remaining = BookStock::new(self.stock.as_ref() - amount);
        self.substitute(|book| *book.stock = remaining);
        true
    }
}

#[cfg(test)]
mod test {
    use crate::entity::{
        AuthorId, Book, BookCategory, BookDraft, BookId, BookIsbn, BookPrice, BookStock,
        BookTitle,
    };

    fn hobbit() -> Book {
        Book::new(
            BookId::new(3),
            BookIsbn::new("0618260307"),
            BookTitle::new("The Hobbit"),
            BookPrice::new(9.99),
            BookStock::new(3),
            BookCategory::Fantasy,
            AuthorId::new(3),
        )
    }

    #[test]
    fn replace_keeps_id_and_overwrites_everything_else() {
        let mut book = hobbit();
        let draft = BookDraft::new(
            BookIsbn::new("6258327656"),
            BookTitle::new("Silmarillion"),
            BookPrice::new(12.5),
            BookStock::new(10),
            BookCategory::Classics,
            AuthorId::new(1),
        );
        book.replace(draft.clone());
        assert_eq!(book, Book::from_draft(BookId::new(3), draft));
    }

    #[test]
    fn can_supply_up_to_the_current_stock() {
        let book = hobbit();
        assert!(book.can_supply(1));
        assert!(book.can_supply(3));
        assert!(!book.can_supply(4));
    }

    #[test]
    fn withdraw_never_drops_below_zero() {
        let mut book = hobbit();
        assert!(!book.withdraw(4));
        assert_eq!(*book.stock().as_ref(), 3);
        assert!(book.withdraw(3));
        assert_eq!(*book.stock().as_ref(), 0);
        assert!(!book.withdraw(1));
    }
}
