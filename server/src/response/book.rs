use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use application::transfer::{BookDto, PageDto};
use kernel::prelude::entity::BookCategory;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    id: i64,
    isbn: String,
    title: String,
    price: f64,
    quantity_in_stock: i32,
    category: BookCategory,
    author_id: i64,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        Self {
            id: value.id,
            isbn: value.isbn,
            title: value.title,
            price: value.price,
            quantity_in_stock: value.quantity_in_stock,
            category: value.category,
            author_id: value.author_id,
        }
    }
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedBookResponse(BookResponse);

impl IntoResponse for CreatedBookResponse {
    fn into_response(self) -> Response {
        let location = format!("/api/books/{}", self.0.id);
        (
            StatusCode::CREATED,
            [(header::LOCATION, location)],
            Json(self.0),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPageResponse {
    content: Vec<BookResponse>,
    number: i64,
    size: i64,
    total_elements: i64,
    total_pages: i64,
    first: bool,
    last: bool,
    number_of_elements: i64,
}

impl IntoResponse for BookPageResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct BookPresenter;

impl Exhaust<BookDto> for BookPresenter {
    type To = BookResponse;
    fn emit(&self, input: BookDto) -> Self::To {
        BookResponse::from(input)
    }
}

impl Exhaust<PageDto<BookDto>> for BookPresenter {
    type To = BookPageResponse;
    fn emit(&self, input: PageDto<BookDto>) -> Self::To {
        BookPageResponse {
            content: input.content.into_iter().map(BookResponse::from).collect(),
            number: input.number,
            size: input.size,
            total_elements: input.total_elements,
            total_pages: input.total_pages,
            first: input.first,
            last: input.last,
            number_of_elements: input.number_of_elements,
        }
    }
}

impl Exhaust<()> for BookPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::OK
    }
}

pub struct CreatedBookPresenter;

impl Exhaust<BookDto> for CreatedBookPresenter {
    type To = CreatedBookResponse;
    fn emit(&self, input: BookDto) -> Self::To {
        CreatedBookResponse(BookResponse::from(input))
    }
}
