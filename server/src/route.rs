use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler::{AppModule, CatalogDatabase};

pub use self::{author::*, book::*};

mod author;
mod book;

pub fn app<D: CatalogDatabase>(module: AppModule<D>) -> Router {
    Router::<AppModule<D>>::new()
        .route_book()
        .route_author()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new())
        .with_state(module)
}
