use error_stack::Report;
use serde::Deserialize;

use application::transfer::{
    BuyBookDto, CreateBookDto, DeleteBookDto, GetAllBookDto, GetBookByIsbnDto, GetBookDto,
    UpdateBookDto,
};
use kernel::prelude::entity::{BookCategory, BookSortField, PageNumber, PageSize, SortDirection};
use kernel::KernelError;

use crate::controller::{Intake, TryIntake};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    isbn: String,
    title: String,
    price: f64,
    quantity_in_stock: i32,
    category: BookCategory,
    author_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    id: i64,
    isbn: String,
    title: String,
    price: f64,
    quantity_in_stock: i32,
    category: BookCategory,
    author_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct SearchBookRequest {
    isbn: String,
}

#[derive(Debug, Deserialize)]
pub struct BuyBookRequest {
    amount: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAllBookRequest {
    category: Option<BookCategory>,
    #[serde(default)]
    page: PageNumber,
    #[serde(default)]
    size: PageSize,
    #[serde(default)]
    sort_by: BookSortField,
    #[serde(default)]
    sort_direction: SortDirection,
}

#[derive(Debug)]
pub struct GetBookRequest {
    id: i64,
}

impl GetBookRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    id: i64,
}

impl DeleteBookRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

pub struct BookTransformer;

impl Intake<GetBookRequest> for BookTransformer {
    type To = GetBookDto;
    fn emit(&self, input: GetBookRequest) -> Self::To {
        GetBookDto { id: input.id }
    }
}

impl Intake<SearchBookRequest> for BookTransformer {
    type To = GetBookByIsbnDto;
    fn emit(&self, input: SearchBookRequest) -> Self::To {
        GetBookByIsbnDto { isbn: input.isbn }
    }
}

impl Intake<GetAllBookRequest> for BookTransformer {
    type To = GetAllBookDto;
    fn emit(&self, input: GetAllBookRequest) -> Self::To {
        GetAllBookDto {
            category: input.category,
            page: input.page.into(),
            size: input.size.into(),
            sort_by: input.sort_by,
            direction: input.sort_direction,
        }
    }
}

impl Intake<CreateBookRequest> for BookTransformer {
    type To = CreateBookDto;
    fn emit(&self, input: CreateBookRequest) -> Self::To {
        CreateBookDto {
            isbn: input.isbn,
            title: input.title,
            price: input.price,
            quantity_in_stock: input.quantity_in_stock,
            category: input.category,
            author_id: input.author_id,
        }
    }
}

impl Intake<UpdateBookRequest> for BookTransformer {
    type To = UpdateBookDto;
    fn emit(&self, input: UpdateBookRequest) -> Self::To {
        UpdateBookDto {
            id: input.id,
            isbn: input.isbn,
            title: input.title,
            price: input.price,
            quantity_in_stock: input.quantity_in_stock,
            category: input.category,
            author_id: input.author_id,
        }
    }
}

impl Intake<DeleteBookRequest> for BookTransformer {
    type To = DeleteBookDto;
    fn emit(&self, input: DeleteBookRequest) -> Self::To {
        DeleteBookDto { id: input.id }
    }
}

impl TryIntake<(i64, BuyBookRequest)> for BookTransformer {
    type To = BuyBookDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: (i64, BuyBookRequest)) -> Result<Self::To, Self::Error> {
        let (id, BuyBookRequest { amount }) = input;
        if amount <= 0 {
            return Err(Report::new(KernelError::InvalidAmount { requested: amount }));
        }
        Ok(BuyBookDto { id, amount })
    }
}
