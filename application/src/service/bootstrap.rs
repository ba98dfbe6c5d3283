use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{AuthorQuery, DependOnAuthorQuery};
use kernel::interface::update::{
    AuthorModifier, BookModifier, DependOnAuthorModifier, DependOnBookModifier,
};
use kernel::prelude::entity::{
    AuthorCountry, AuthorFirstName, AuthorLastName, BookCategory, BookDraft, BookIsbn, BookPrice,
    BookStock, BookTitle,
};
use kernel::KernelError;

struct SeedBook {
    isbn: &'static str,
    title: &'static str,
    price: f64,
    stock: i32,
    category: BookCategory,
}

struct SeedAuthor {
    first_name: &'static str,
    last_name: &'static str,
    country: &'static str,
    books: &'static [SeedBook],
}

const CATALOG: &[SeedAuthor] = &[
    SeedAuthor {
        first_name: "Dan",
        last_name: "Brown",
        country: "USA",
        books: &[
            SeedBook {
                isbn: "0385504225",
                title: "The Lost Symbol",
                price: 10.50,
                stock: 10,
                category: BookCategory::Thriller,
            },
            SeedBook {
                isbn: "9780385514231",
                title: "Origin",
                price: 11.00,
                stock: 5,
                category: BookCategory::Thriller,
            },
        ],
    },
    SeedAuthor {
        first_name: "Stephen",
        last_name: "King",
        country: "USA",
        books: &[],
    },
    SeedAuthor {
        first_name: "J. R. R.",
        last_name: "Tolkien",
        country: "England",
        books: &[SeedBook {
            isbn: "0618260307",
            title: "The Hobbit",
            price: 9.99,
            stock: 3,
            category: BookCategory::Fantasy,
        }],
    },
];

#[async_trait::async_trait]
pub trait BootstrapCatalogService:
    'static + Sync + Send + DependOnAuthorQuery + DependOnAuthorModifier + DependOnBookModifier
{
    /// Fills an empty catalog with the starter authors and books.
    /// Returns `false` without writing when any author already exists.
    async fn bootstrap_catalog(&self) -> error_stack::Result<bool, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        if !self.author_query().find_all(&mut connection).await?.is_empty() {
            tracing::debug!("catalog already populated, skipping seed");
            return Ok(false);
        }

        for seed in CATALOG {
            let author = self
                .author_modifier()
                .create(
                    &mut connection,
                    AuthorFirstName::new(seed.first_name),
                    AuthorLastName::new(seed.last_name),
                    AuthorCountry::new(seed.country),
                )
                .await?;
            for book in seed.books {
                let draft = BookDraft::new(
                    BookIsbn::new(book.isbn),
                    BookTitle::new(book.title),
                    BookPrice::new(book.price),
                    BookStock::new(book.stock),
                    book.category,
                    *author.id(),
                )
                .validate(false)?;
                self.book_modifier().create(&mut connection, draft).await?;
            }
        }
        connection.commit().await?;

        tracing::info!(authors = CATALOG.len(), "seeded catalog");
        Ok(true)
    }
}

impl<T> BootstrapCatalogService for T where
    T: DependOnAuthorQuery + DependOnAuthorModifier + DependOnBookModifier
{
}

#[cfg(test)]
mod test {
    use driver::database::InMemoryDatabase;
    use kernel::prelude::entity::{BookSortField, SortDirection};
    use kernel::KernelError;

    use crate::service::{BootstrapCatalogService, GetAuthorService, GetBookService};
    use crate::transfer::GetAllBookDto;

    #[tokio::test]
    async fn seeding_runs_once() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        assert!(db.bootstrap_catalog().await?);
        assert!(!db.bootstrap_catalog().await?);

        assert_eq!(db.list_authors().await?.len(), 3);
        let books = db
            .get_all_books(GetAllBookDto {
                category: None,
                page: 0,
                size: 10,
                sort_by: BookSortField::Id,
                direction: SortDirection::Asc,
            })
            .await?;
        let titles = books
            .content
            .iter()
            .map(|book| book.title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["The Lost Symbol", "Origin", "The Hobbit"]);
        Ok(())
    }
}
