use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};

use application::service::{
    BuyBookService, CreateBookService, DeleteBookService, GetBookService, UpdateBookService,
};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, CatalogDatabase};
use crate::request::{
    BookTransformer, BuyBookRequest, CreateBookRequest, DeleteBookRequest, GetAllBookRequest,
    GetBookRequest, SearchBookRequest, UpdateBookRequest,
};
use crate::response::{BookPresenter, CreatedBookPresenter};

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl<D: CatalogDatabase> BookRouter for Router<AppModule<D>> {
    fn route_book(self) -> Self {
        self.route(
            "/api/books",
            get(
                |State(module): State<AppModule<D>>, Query(req): Query<GetAllBookRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.database().get_all_books(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/api/books/search",
            get(
                |State(module): State<AppModule<D>>, Query(req): Query<SearchBookRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.database().get_book_by_isbn(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/api/books/add",
            post(
                |State(module): State<AppModule<D>>,
                 payload: Result<Json<CreateBookRequest>, JsonRejection>| async move {
                    let Json(req) = payload.map_err(ErrorStatus::from)?;
                    Controller::new(BookTransformer, CreatedBookPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.database().create_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/api/books/edit",
            put(
                |State(module): State<AppModule<D>>,
                 payload: Result<Json<UpdateBookRequest>, JsonRejection>| async move {
                    let Json(req) = payload.map_err(ErrorStatus::from)?;
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.database().update_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/api/books/delete/:id",
            delete(
                |State(module): State<AppModule<D>>, Path(id): Path<i64>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(DeleteBookRequest::new(id))
                        .handle(|dto| async move { module.database().delete_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/api/books/:id",
            get(
                |State(module): State<AppModule<D>>, Path(id): Path<i64>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(GetBookRequest::new(id))
                        .handle(|dto| async move { module.database().get_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/api/books/:id/buy",
            post(
                |State(module): State<AppModule<D>>,
                 Path(id): Path<i64>,
                 Query(req): Query<BuyBookRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .try_intake((id, req))
                        .map_err(ErrorStatus::from)?
                        .handle(|dto| async move { module.database().buy_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
