use kernel::interface::query::AuthorQuery;
use kernel::interface::update::AuthorModifier;
use kernel::prelude::entity::{Author, AuthorCountry, AuthorFirstName, AuthorId, AuthorLastName};
use kernel::KernelError;

use crate::database::memory::InMemoryConnection;

pub struct InMemoryAuthorRepository;

#[async_trait::async_trait]
impl AuthorQuery for InMemoryAuthorRepository {
    type Transaction = InMemoryConnection;

    async fn find_by_id(
        &self,
        con: &mut InMemoryConnection,
        id: &AuthorId,
    ) -> error_stack::Result<Option<Author>, KernelError> {
        Ok(con.working.authors.get(id).cloned())
    }

    async fn find_all(
        &self,
        con: &mut InMemoryConnection,
    ) -> error_stack::Result<Vec<Author>, KernelError> {
        Ok(con.working.authors.values().cloned().collect())
    }
}

#[async_trait::async_trait]
impl AuthorModifier for InMemoryAuthorRepository {
    type Transaction = InMemoryConnection;

    async fn create(
        &self,
        con: &mut InMemoryConnection,
        first_name: AuthorFirstName,
        last_name: AuthorLastName,
        country: AuthorCountry,
    ) -> error_stack::Result<Author, KernelError> {
        let store = &mut con.working;
        let author = Author::new(store.next_author_id(), first_name, last_name, country);
        store.authors.insert(*author.id(), author.clone());
        Ok(author)
    }
}
