use std::ops::Deref;
use std::sync::Arc;

use driver::database::PostgresDatabase;
use kernel::interface::query::{DependOnAuthorQuery, DependOnBookQuery};
use kernel::interface::update::{DependOnAuthorModifier, DependOnBookModifier};
use kernel::KernelError;

/// Everything the routes need from a store.
pub trait CatalogDatabase:
    DependOnBookQuery + DependOnBookModifier + DependOnAuthorQuery + DependOnAuthorModifier
{
}

impl<T> CatalogDatabase for T where
    T: DependOnBookQuery + DependOnBookModifier + DependOnAuthorQuery + DependOnAuthorModifier
{
}

pub struct AppModule<D>(Arc<Handler<D>>);

impl<D> Clone for AppModule<D> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl AppModule<PostgresDatabase> {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self::with_database(PostgresDatabase::new().await?))
    }
}

impl<D> AppModule<D> {
    pub fn with_database(database: D) -> Self {
        Self(Arc::new(Handler { database }))
    }
}

impl<D> Deref for AppModule<D> {
    type Target = Handler<D>;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler<D> {
    database: D,
}

impl<D> Handler<D> {
    pub fn database(&self) -> &D {
        &self.database
    }
}
