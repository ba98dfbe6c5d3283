use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;

use application::service::GetAuthorService;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, CatalogDatabase};
use crate::request::{AuthorTransformer, GetAuthorRequest};
use crate::response::AuthorPresenter;

pub trait AuthorRouter {
    fn route_author(self) -> Self;
}

impl<D: CatalogDatabase> AuthorRouter for Router<AppModule<D>> {
    fn route_author(self) -> Self {
        self.route(
            "/api/authors",
            get(|State(module): State<AppModule<D>>| async move {
                Controller::new((), AuthorPresenter)
                    .bypass(|| async move { module.database().list_authors().await })
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/api/authors/:id",
            get(
                |State(module): State<AppModule<D>>, Path(id): Path<i64>| async move {
                    Controller::new(AuthorTransformer, AuthorPresenter)
                        .intake(GetAuthorRequest::new(id))
                        .handle(|dto| async move { module.database().get_author(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}

#[cfg(test)]
mod test {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use application::service::BootstrapCatalogService;
    use driver::database::InMemoryDatabase;

    use crate::handler::AppModule;
    use crate::route::app;

    #[tokio::test]
    async fn authors_are_listed_and_fetched() {
        let database = InMemoryDatabase::new();
        database.bootstrap_catalog().await.unwrap();
        let router = app(AppModule::with_database(database));

        let request = Request::builder().uri("/api/authors").body(Body::empty()).unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.as_array().map(Vec::len), Some(3));
        assert_eq!(
            body[2],
            json!({ "id": 3, "firstName": "J. R. R.", "lastName": "Tolkien", "country": "England" })
        );

        let request = Request::builder().uri("/api/authors/9").body(Body::empty()).unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
