use kernel::prelude::entity::{
    AuthorId, Book, BookCategory, BookDraft, BookIsbn, BookPrice, BookSortField, BookStock,
    BookTitle, DestructBook, SortDirection,
};

#[derive(Debug, Clone, PartialEq)]
pub struct BookDto {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub price: f64,
    pub quantity_in_stock: i32,
    pub category: BookCategory,
    pub author_id: i64,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            isbn,
            title,
            price,
            stock,
            category,
            author_id,
        } = value.into_destruct();
        Self {
            id: id.into(),
            isbn: isbn.into(),
            title: title.into(),
            price: price.into(),
            quantity_in_stock: stock.into(),
            category,
            author_id: author_id.into(),
        }
    }
}

pub struct GetBookDto {
    pub id: i64,
}

pub struct GetBookByIsbnDto {
    pub isbn: String,
}

pub struct GetAllBookDto {
    pub category: Option<BookCategory>,
    pub page: i64,
    pub size: i64,
    pub sort_by: BookSortField,
    pub direction: SortDirection,
}

#[derive(Debug, Clone)]
pub struct CreateBookDto {
    pub isbn: String,
    pub title: String,
    pub price: f64,
    pub quantity_in_stock: i32,
    pub category: BookCategory,
    pub author_id: i64,
}

impl From<CreateBookDto> for BookDraft {
    fn from(value: CreateBookDto) -> Self {
        BookDraft::new(
            BookIsbn::new(value.isbn),
            BookTitle::new(value.title),
            BookPrice::new(value.price),
            BookStock::new(value.quantity_in_stock),
            value.category,
            AuthorId::new(value.author_id),
        )
    }
}

#[derive(Debug, Clone)]
pub struct UpdateBookDto {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub price: f64,
    pub quantity_in_stock: i32,
    pub category: BookCategory,
    pub author_id: i64,
}

impl From<UpdateBookDto> for BookDraft {
    fn from(value: UpdateBookDto) -> Self {
        BookDraft::new(
            BookIsbn::new(value.isbn),
            BookTitle::new(value.title),
            BookPrice::new(value.price),
            BookStock::new(value.quantity_in_stock),
            value.category,
            AuthorId::new(value.author_id),
        )
    }
}

pub struct DeleteBookDto {
    pub id: i64,
}

pub struct BuyBookDto {
    pub id: i64,
    pub amount: i32,
}
