use error_stack::Report;

use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{AuthorQuery, DependOnAuthorQuery};
use kernel::prelude::entity::AuthorId;
use kernel::KernelError;

use crate::transfer::{AuthorDto, GetAuthorDto};

#[async_trait::async_trait]
pub trait GetAuthorService: 'static + Sync + Send + DependOnAuthorQuery {
    async fn get_author(&self, dto: GetAuthorDto) -> error_stack::Result<AuthorDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = AuthorId::new(dto.id);
        let author = self
            .author_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| Report::new(KernelError::author_not_found(&id)))?;
        Ok(AuthorDto::from(author))
    }

    async fn list_authors(&self) -> error_stack::Result<Vec<AuthorDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let authors = self.author_query().find_all(&mut connection).await?;
        Ok(authors.into_iter().map(AuthorDto::from).collect())
    }
}

impl<T> GetAuthorService for T where T: DependOnAuthorQuery {}

#[cfg(test)]
mod test {
    use driver::database::InMemoryDatabase;
    use kernel::KernelError;

    use crate::service::{BootstrapCatalogService, GetAuthorService};
    use crate::transfer::GetAuthorDto;

    #[tokio::test]
    async fn authors_are_listed_by_id() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        db.bootstrap_catalog().await?;

        let authors = db.list_authors().await?;
        let names = authors
            .iter()
            .map(|author| author.last_name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Brown", "King", "Tolkien"]);

        let king = db.get_author(GetAuthorDto { id: 2 }).await?;
        assert_eq!(king.first_name, "Stephen");
        Ok(())
    }

    #[tokio::test]
    async fn missing_author_is_not_found() {
        let db = InMemoryDatabase::new();
        let report = db.get_author(GetAuthorDto { id: 7 }).await.unwrap_err();
        assert_eq!(
            report.current_context().to_string(),
            "Author with id [7] does not exist!"
        );
    }
}
