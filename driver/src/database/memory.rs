use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use error_stack::Report;
use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnAuthorQuery, DependOnBookQuery};
use kernel::interface::update::{DependOnAuthorModifier, DependOnBookModifier};
use kernel::prelude::entity::{Author, AuthorId, Book, BookId};
use kernel::KernelError;

pub use self::{author::*, book::*};

mod author;
mod book;

const LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Process-local catalog store. Transactions are serialized: each one holds
/// the store lock and edits a private copy that replaces the store on commit.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    store: Arc<Mutex<Store>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Store {
    books: BTreeMap<BookId, Book>,
    authors: BTreeMap<AuthorId, Author>,
    book_seq: i64,
    author_seq: i64,
}

impl Store {
    fn next_book_id(&mut self) -> BookId {
        self.book_seq += 1;
        BookId::new(self.book_seq)
    }

    fn next_author_id(&mut self) -> AuthorId {
        self.author_seq += 1;
        AuthorId::new(self.author_seq)
    }
}

pub struct InMemoryConnection {
    guard: OwnedMutexGuard<Store>,
    working: Store,
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryConnection;
    async fn transact(&self) -> error_stack::Result<InMemoryConnection, KernelError> {
        let guard = tokio::time::timeout(LOCK_TIMEOUT, self.store.clone().lock_owned())
            .await
            .map_err(|error| Report::from(error).change_context(KernelError::Timeout))?;
        let working = guard.clone();
        Ok(InMemoryConnection { guard, working })
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryConnection {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let InMemoryConnection { mut guard, working } = self;
        *guard = working;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

impl DependOnBookQuery for InMemoryDatabase {
    type BookQuery = InMemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &InMemoryBookRepository
    }
}

impl DependOnBookModifier for InMemoryDatabase {
    type BookModifier = InMemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &InMemoryBookRepository
    }
}

impl DependOnAuthorQuery for InMemoryDatabase {
    type AuthorQuery = InMemoryAuthorRepository;
    fn author_query(&self) -> &Self::AuthorQuery {
        &InMemoryAuthorRepository
    }
}

impl DependOnAuthorModifier for InMemoryDatabase {
    type AuthorModifier = InMemoryAuthorRepository;
    fn author_modifier(&self) -> &Self::AuthorModifier {
        &InMemoryAuthorRepository
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::AuthorQuery;
    use kernel::interface::update::AuthorModifier;
    use kernel::prelude::entity::{AuthorCountry, AuthorFirstName, AuthorLastName};
    use kernel::KernelError;

    use crate::database::{InMemoryAuthorRepository, InMemoryDatabase};

    async fn create_author(
        db: &InMemoryDatabase,
        commit: bool,
    ) -> error_stack::Result<(), KernelError> {
        let mut con = db.transact().await?;
        InMemoryAuthorRepository
            .create(
                &mut con,
                AuthorFirstName::new("Dan"),
                AuthorLastName::new("Brown"),
                AuthorCountry::new("USA"),
            )
            .await?;
        if commit {
            con.commit().await
        } else {
            con.roll_back().await
        }
    }

    #[tokio::test]
    async fn only_committed_writes_are_visible() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        create_author(&db, false).await?;
        let mut con = db.transact().await?;
        assert!(InMemoryAuthorRepository.find_all(&mut con).await?.is_empty());
        drop(con);

        create_author(&db, true).await?;
        let mut con = db.transact().await?;
        assert_eq!(InMemoryAuthorRepository.find_all(&mut con).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn dropped_transaction_discards_writes() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        {
            let mut con = db.transact().await?;
            InMemoryAuthorRepository
                .create(
                    &mut con,
                    AuthorFirstName::new("Stephen"),
                    AuthorLastName::new("King"),
                    AuthorCountry::new("USA"),
                )
                .await?;
        }
        let mut con = db.transact().await?;
        assert!(InMemoryAuthorRepository.find_all(&mut con).await?.is_empty());
        Ok(())
    }
}
