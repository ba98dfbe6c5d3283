use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    AuthorQuery, BookQuery, DependOnAuthorQuery, DependOnBookQuery,
};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{
    is_isbn_conflict, AuthorId, Book, BookDraft, BookFilter, BookId, BookIsbn, PageNumber,
    PageRequest, PageSize,
};
use kernel::KernelError;

use crate::transfer::{
    BookDto, BuyBookDto, CreateBookDto, DeleteBookDto, GetAllBookDto, GetBookByIsbnDto,
    GetBookDto, PageDto, UpdateBookDto,
};

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let book = self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| Report::new(KernelError::book_not_found(&id)))?;
        Ok(BookDto::from(book))
    }

    async fn get_book_by_isbn(
        &self,
        dto: GetBookByIsbnDto,
    ) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let isbn = BookIsbn::new(dto.isbn);
        let book = self
            .book_query()
            .find_by_isbn(&mut connection, &isbn)
            .await?
            .ok_or_else(|| Report::new(KernelError::isbn_not_found(&isbn)))?;
        Ok(BookDto::from(book))
    }

    async fn get_all_books(
        &self,
        dto: GetAllBookDto,
    ) -> error_stack::Result<PageDto<BookDto>, KernelError> {
        let page = PageRequest::new(
            PageNumber::new(dto.page),
            PageSize::new(dto.size),
            dto.sort_by,
            dto.direction,
        )?;
        let filter = BookFilter::new(dto.category);

        let mut connection = self.database_connection().transact().await?;
        let books = self
            .book_query()
            .find_all(&mut connection, &filter, &page)
            .await?;
        Ok(PageDto::from(books))
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

/// Decides whether `isbn` is taken by a book other than `editing`.
#[async_trait::async_trait]
pub trait IsbnUniquenessService: 'static + Sync + Send + DependOnBookQuery {
    async fn isbn_conflict(
        &self,
        connection: &mut <Self::DatabaseConnection as DatabaseConnection>::Transaction,
        isbn: &BookIsbn,
        editing: Option<&BookId>,
    ) -> error_stack::Result<bool, KernelError> {
        match editing {
            None => self.book_query().exists_by_isbn(connection, isbn).await,
            Some(editing) => {
                let holder = self.book_query().find_by_isbn(connection, isbn).await?;
                Ok(is_isbn_conflict(holder.as_ref().map(Book::id), Some(editing)))
            }
        }
    }
}

impl<T> IsbnUniquenessService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService:
    'static + Sync + Send + IsbnUniquenessService + DependOnBookModifier + DependOnAuthorQuery
{
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let draft = BookDraft::from(dto);
        let conflict = self
            .isbn_conflict(&mut connection, draft.isbn(), None)
            .await?;
        let draft = draft.validate(conflict)?;
        ensure_author(self, &mut connection, draft.author_id()).await?;

        let book = self.book_modifier().create(&mut connection, draft).await?;
        connection.commit().await?;

        tracing::info!(id = book.id().as_ref(), isbn = %book.isbn().as_ref(), "created book");
        Ok(BookDto::from(book))
    }
}

impl<T> CreateBookService for T where
    T: DependOnBookQuery + DependOnBookModifier + DependOnAuthorQuery
{
}

#[async_trait::async_trait]
pub trait UpdateBookService:
    'static + Sync + Send + IsbnUniquenessService + DependOnBookModifier + DependOnAuthorQuery
{
    async fn update_book(&self, dto: UpdateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let mut book = self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| Report::new(KernelError::book_not_found(&id)))?;

        let draft = BookDraft::from(dto);
        let conflict = self
            .isbn_conflict(&mut connection, draft.isbn(), Some(&id))
            .await?;
        let draft = draft.validate(conflict)?;
        ensure_author(self, &mut connection, draft.author_id()).await?;

        book.replace(draft);
        self.book_modifier().update(&mut connection, &book).await?;
        connection.commit().await?;

        tracing::info!(id = book.id().as_ref(), "updated book");
        Ok(BookDto::from(book))
    }
}

impl<T> UpdateBookService for T where
    T: DependOnBookQuery + DependOnBookModifier + DependOnAuthorQuery
{
}

#[async_trait::async_trait]
pub trait DeleteBookService: 'static + Sync + Send + DependOnBookQuery + DependOnBookModifier {
    async fn delete_book(&self, dto: DeleteBookDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        if self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .is_none()
        {
            return Err(Report::new(KernelError::book_not_found(&id)));
        }
        self.book_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;

        tracing::info!(id = id.as_ref(), "deleted book");
        Ok(())
    }
}

impl<T> DeleteBookService for T where T: DependOnBookQuery + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait BuyBookService: 'static + Sync + Send + DependOnBookQuery + DependOnBookModifier {
    async fn buy_book(&self, dto: BuyBookDto) -> error_stack::Result<BookDto, KernelError> {
        let BuyBookDto { id, amount } = dto;
        if amount <= 0 {
            return Err(Report::new(KernelError::InvalidAmount { requested: amount }));
        }
        let mut connection = self.database_connection().transact().await?;

        let book_id = BookId::new(id);
        let book = self
            .book_query()
            .find_by_id(&mut connection, &book_id)
            .await?
            .ok_or_else(|| Report::new(KernelError::book_not_found(&book_id)))?;
        if !book.can_supply(amount) {
            tracing::warn!(id, amount, stock = book.stock().as_ref(), "refused purchase");
            return Err(Report::new(KernelError::InsufficientStock {
                id,
                requested: amount,
            }));
        }

        // The stock may have moved since the read; the store re-checks atomically.
        let book = self
            .book_modifier()
            .decrease_stock(&mut connection, &book_id, amount)
            .await?
            .ok_or_else(|| {
                tracing::warn!(id, amount, "stock drained by a concurrent purchase");
                Report::new(KernelError::InsufficientStock {
                    id,
                    requested: amount,
                })
            })?;
        connection.commit().await?;

        tracing::info!(id, amount, stock = book.stock().as_ref(), "bought book");
        Ok(BookDto::from(book))
    }
}

impl<T> BuyBookService for T where T: DependOnBookQuery + DependOnBookModifier {}

async fn ensure_author<T>(
    this: &T,
    connection: &mut <T::DatabaseConnection as DatabaseConnection>::Transaction,
    author_id: &AuthorId,
) -> error_stack::Result<(), KernelError>
where
    T: DependOnAuthorQuery + ?Sized,
{
    match this.author_query().find_by_id(connection, author_id).await? {
        Some(_) => Ok(()),
        None => Err(Report::new(KernelError::author_not_found(author_id))),
    }
}
