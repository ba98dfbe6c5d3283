use sqlx::PgConnection;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{
    AuthorId, Book, BookCategory, BookDraft, BookFilter, BookId, BookIsbn, BookPrice, BookStock,
    BookTitle, Page, PageRequest,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Transaction = PostgresConnection;

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id).await
    }

    async fn find_by_isbn(
        &self,
        con: &mut PostgresConnection,
        isbn: &BookIsbn,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_isbn(con, isbn).await
    }

    async fn exists_by_isbn(
        &self,
        con: &mut PostgresConnection,
        isbn: &BookIsbn,
    ) -> error_stack::Result<bool, KernelError> {
        PgBookInternal::exists_by_isbn(con, isbn).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresConnection,
        filter: &BookFilter,
        page: &PageRequest,
    ) -> error_stack::Result<Page<Book>, KernelError> {
        PgBookInternal::find_all(con, filter, page).await
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        draft: BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        PgBookInternal::create(con, draft).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::update(con, book).await
    }

    async fn delete(
        &self,
        con: &mut PostgresConnection,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::delete(con, book_id).await
    }

    async fn decrease_stock(
        &self,
        con: &mut PostgresConnection,
        book_id: &BookId,
        amount: i32,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::decrease_stock(con, book_id, amount).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    isbn: String,
    title: String,
    price: f64,
    quantity_in_stock: i32,
    category: String,
    author_id: i64,
}

impl TryFrom<BookRow> for Book {
    type Error = error_stack::Report<KernelError>;
    fn try_from(value: BookRow) -> Result<Self, Self::Error> {
        Ok(Book::new(
            BookId::new(value.id),
            BookIsbn::new(value.isbn),
            BookTitle::new(value.title),
            BookPrice::new(value.price),
            BookStock::new(value.quantity_in_stock),
            value.category.parse::<BookCategory>()?,
            AuthorId::new(value.author_id),
        ))
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, isbn, title, price, quantity_in_stock, category, author_id
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Book::try_from).transpose()
    }

    async fn find_by_isbn(
        con: &mut PgConnection,
        isbn: &BookIsbn,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, isbn, title, price, quantity_in_stock, category, author_id
            FROM books
            WHERE isbn = $1
            "#,
        )
        .bind(isbn.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Book::try_from).transpose()
    }

    async fn exists_by_isbn(
        con: &mut PgConnection,
        isbn: &BookIsbn,
    ) -> error_stack::Result<bool, KernelError> {
        sqlx::query_scalar::<_, bool>(
            // language=postgresql
            r#"
            SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1)
            "#,
        )
        .bind(isbn.as_ref())
        .fetch_one(con)
        .await
        .convert_error()
    }

    async fn find_all(
        con: &mut PgConnection,
        filter: &BookFilter,
        page: &PageRequest,
    ) -> error_stack::Result<Page<Book>, KernelError> {
        let category = filter.category().as_ref().map(BookCategory::as_str);
        let total = sqlx::query_scalar::<_, i64>(
            // language=postgresql
            r#"
            SELECT COUNT(*)
            FROM books
            WHERE ($1::TEXT IS NULL OR category = $1)
            "#,
        )
        .bind(category)
        .fetch_one(&mut *con)
        .await
        .convert_error()?;

        // Sort column and direction come from closed enums, never from raw input.
        let sql = format!(
            r#"
            SELECT id, isbn, title, price, quantity_in_stock, category, author_id
            FROM books
            WHERE ($1::TEXT IS NULL OR category = $1)
            ORDER BY {} {}, id ASC
            LIMIT $2 OFFSET $3
            "#,
            page.sort_by().column(),
            page.direction().as_sql(),
        );
        let books = sqlx::query_as::<_, BookRow>(&sql)
            .bind(category)
            .bind(page.size().as_ref())
            .bind(page.offset())
            .fetch_all(con)
            .await
            .convert_error()?
            .into_iter()
            .map(Book::try_from)
            .collect::<Result<Vec<Book>, _>>()?;
        Ok(Page::new(books, page, total))
    }

    async fn create(
        con: &mut PgConnection,
        draft: BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        let id = sqlx::query_scalar::<_, i64>(
            // language=postgresql
            r#"
            INSERT INTO books (isbn, title, price, quantity_in_stock, category, author_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(draft.isbn().as_ref())
        .bind(draft.title().as_ref())
        .bind(draft.price().as_ref())
        .bind(draft.stock().as_ref())
        .bind(draft.category().as_str())
        .bind(draft.author_id().as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        tracing::debug!(book_id = id, "inserted book row");
        Ok(Book::from_draft(BookId::new(id), draft))
    }

    async fn update(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE books
            SET isbn = $2, title = $3, price = $4, quantity_in_stock = $5, category = $6, author_id = $7
            WHERE id = $1
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.isbn().as_ref())
        .bind(book.title().as_ref())
        .bind(book.price().as_ref())
        .bind(book.stock().as_ref())
        .bind(book.category().as_str())
        .bind(book.author_id().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(con: &mut PgConnection, book_id: &BookId) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM books
            WHERE id = $1
            "#,
        )
        .bind(book_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn decrease_stock(
        con: &mut PgConnection,
        book_id: &BookId,
        amount: i32,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            UPDATE books
            SET quantity_in_stock = quantity_in_stock - $2
            WHERE id = $1 AND quantity_in_stock >= $2
            RETURNING id, isbn, title, price, quantity_in_stock, category, author_id
            "#,
        )
        .bind(book_id.as_ref())
        .bind(amount)
        .fetch_optional(con)
        .await
        .convert_error()?;
        if row.is_none() {
            tracing::debug!(book_id = book_id.as_ref(), amount, "stock update matched no row");
        }
        row.map(Book::try_from).transpose()
    }
}
