use sqlx::PgConnection;

use kernel::interface::query::AuthorQuery;
use kernel::interface::update::AuthorModifier;
use kernel::prelude::entity::{Author, AuthorCountry, AuthorFirstName, AuthorId, AuthorLastName};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresAuthorRepository;

#[async_trait::async_trait]
impl AuthorQuery for PostgresAuthorRepository {
    type Transaction = PostgresConnection;

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &AuthorId,
    ) -> error_stack::Result<Option<Author>, KernelError> {
        PgAuthorInternal::find_by_id(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresConnection,
    ) -> error_stack::Result<Vec<Author>, KernelError> {
        PgAuthorInternal::find_all(con).await
    }
}

#[async_trait::async_trait]
impl AuthorModifier for PostgresAuthorRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        first_name: AuthorFirstName,
        last_name: AuthorLastName,
        country: AuthorCountry,
    ) -> error_stack::Result<Author, KernelError> {
        PgAuthorInternal::create(con, first_name, last_name, country).await
    }
}

#[derive(sqlx::FromRow)]
struct AuthorRow {
    id: i64,
    first_name: String,
    last_name: String,
    country: String,
}

impl From<AuthorRow> for Author {
    fn from(value: AuthorRow) -> Self {
        Author::new(
            AuthorId::new(value.id),
            AuthorFirstName::new(value.first_name),
            AuthorLastName::new(value.last_name),
            AuthorCountry::new(value.country),
        )
    }
}

pub(in crate::database) struct PgAuthorInternal;

impl PgAuthorInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &AuthorId,
    ) -> error_stack::Result<Option<Author>, KernelError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            // language=postgresql
            r#"
            SELECT id, first_name, last_name, country
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Author::from))
    }

    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Author>, KernelError> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            // language=postgresql
            r#"
            SELECT id, first_name, last_name, country
            FROM authors
            ORDER BY id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Author::from).collect())
    }

    async fn create(
        con: &mut PgConnection,
        first_name: AuthorFirstName,
        last_name: AuthorLastName,
        country: AuthorCountry,
    ) -> error_stack::Result<Author, KernelError> {
        let id = sqlx::query_scalar::<_, i64>(
            // language=postgresql
            r#"
            INSERT INTO authors (first_name, last_name, country)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(first_name.as_ref())
        .bind(last_name.as_ref())
        .bind(country.as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        tracing::debug!(author_id = id, "inserted author row");
        Ok(Author::new(AuthorId::new(id), first_name, last_name, country))
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::AuthorQuery;
    use kernel::interface::update::AuthorModifier;
    use kernel::prelude::entity::{AuthorCountry, AuthorFirstName, AuthorLastName};
    use kernel::KernelError;

    use crate::database::{PostgresAuthorRepository, PostgresDatabase};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        let author = PostgresAuthorRepository
            .create(
                &mut con,
                AuthorFirstName::new("Terry"),
                AuthorLastName::new("Pratchett"),
                AuthorCountry::new("United Kingdom"),
            )
            .await?;
        let found = PostgresAuthorRepository
            .find_by_id(&mut con, author.id())
            .await?;
        assert_eq!(found, Some(author.clone()));

        let all = PostgresAuthorRepository.find_all(&mut con).await?;
        assert!(all.contains(&author));
        Ok(())
    }
}
