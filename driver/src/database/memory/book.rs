use std::cmp::Ordering;

use error_stack::Report;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{
    Book, BookDraft, BookFilter, BookId, BookIsbn, BookSortField, Page, PageRequest,
    SortDirection,
};
use kernel::KernelError;

use crate::database::memory::InMemoryConnection;

pub struct InMemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery for InMemoryBookRepository {
    type Transaction = InMemoryConnection;

    async fn find_by_id(
        &self,
        con: &mut InMemoryConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con.working.books.get(id).cloned())
    }

    async fn find_by_isbn(
        &self,
        con: &mut InMemoryConnection,
        isbn: &BookIsbn,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con
            .working
            .books
            .values()
            .find(|book| book.isbn() == isbn)
            .cloned())
    }

    async fn exists_by_isbn(
        &self,
        con: &mut InMemoryConnection,
        isbn: &BookIsbn,
    ) -> error_stack::Result<bool, KernelError> {
        Ok(con.working.books.values().any(|book| book.isbn() == isbn))
    }

    async fn find_all(
        &self,
        con: &mut InMemoryConnection,
        filter: &BookFilter,
        page: &PageRequest,
    ) -> error_stack::Result<Page<Book>, KernelError> {
        let mut books = con
            .working
            .books
            .values()
            .filter(|book| filter.matches(book.category()))
            .cloned()
            .collect::<Vec<Book>>();
        books.sort_by(|a, b| order(page.sort_by(), page.direction(), a, b));
        let total = books.len() as i64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(*page.size().as_ref()).unwrap_or(usize::MAX);
        let content = books.into_iter().skip(offset).take(size).collect();
        Ok(Page::new(content, page, total))
    }
}

#[async_trait::async_trait]
impl BookModifier for InMemoryBookRepository {
    type Transaction = InMemoryConnection;

    async fn create(
        &self,
        con: &mut InMemoryConnection,
        draft: BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        let store = &mut con.working;
        if store.books.values().any(|book| book.isbn() == draft.isbn()) {
            return Err(Report::new(KernelError::Concurrency)
                .attach_printable(format!("isbn {} is already stored", draft.isbn().as_ref())));
        }
        let book = Book::from_draft(store.next_book_id(), draft);
        store.books.insert(*book.id(), book.clone());
        Ok(book)
    }

    async fn update(
        &self,
        con: &mut InMemoryConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        let store = &mut con.working;
        if store
            .books
            .values()
            .any(|other| other.id() != book.id() && other.isbn() == book.isbn())
        {
            return Err(Report::new(KernelError::Concurrency)
                .attach_printable(format!("isbn {} is already stored", book.isbn().as_ref())));
        }
        if let Some(stored) = store.books.get_mut(book.id()) {
            *stored = book.clone();
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryConnection,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        con.working.books.remove(book_id);
        Ok(())
    }

    async fn decrease_stock(
        &self,
        con: &mut InMemoryConnection,
        book_id: &BookId,
        amount: i32,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let Some(book) = con.working.books.get_mut(book_id) else {
            return Ok(None);
        };
        Ok(book.withdraw(amount).then(|| book.clone()))
    }
}

fn order(field: &BookSortField, direction: &SortDirection, a: &Book, b: &Book) -> Ordering {
    let by_field = match field {
        BookSortField::Id => a.id().cmp(b.id()),
        BookSortField::Title => a.title().as_ref().cmp(b.title().as_ref()),
        BookSortField::Isbn => a.isbn().as_ref().cmp(b.isbn().as_ref()),
        BookSortField::Price => a.price().as_ref().total_cmp(b.price().as_ref()),
        BookSortField::QuantityInStock => a.stock().as_ref().cmp(b.stock().as_ref()),
        BookSortField::Category => a.category().as_str().cmp(b.category().as_str()),
    };
    let by_field = match direction {
        SortDirection::Asc => by_field,
        SortDirection::Desc => by_field.reverse(),
    };
    by_field.then_with(|| a.id().cmp(b.id()))
}

#[cfg(test)]
mod test {
    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{
        AuthorId, Book, BookCategory, BookDraft, BookFilter, BookIsbn, BookPrice, BookSortField,
        BookStock, BookTitle, Page, PageNumber, PageRequest, PageSize, SortDirection,
    };
    use kernel::KernelError;

    use crate::database::{InMemoryBookRepository, InMemoryConnection, InMemoryDatabase};

    fn draft(isbn: &str, title: &str, price: f64, category: BookCategory) -> BookDraft {
        BookDraft::new(
            BookIsbn::new(isbn),
            BookTitle::new(title),
            BookPrice::new(price),
            BookStock::new(2),
            category,
            AuthorId::new(1),
        )
    }

    async fn seeded() -> error_stack::Result<InMemoryConnection, KernelError> {
        let mut con = InMemoryDatabase::new().transact().await?;
        for draft in [
            draft("0306406152", "Origin", 9.99, BookCategory::Thriller),
            draft("0618260307", "The Hobbit", 9.99, BookCategory::Fantasy),
            draft("6258327656", "Lost Symbol", 20.0, BookCategory::Thriller),
        ] {
            InMemoryBookRepository.create(&mut con, draft).await?;
        }
        Ok(con)
    }

    fn titles(page: &Page<Book>) -> Vec<&str> {
        page.content()
            .iter()
            .map(|book| book.title().as_ref().as_str())
            .collect()
    }

    #[tokio::test]
    async fn ids_are_assigned_in_insertion_order() -> error_stack::Result<(), KernelError> {
        let mut con = seeded().await?;
        let hobbit = InMemoryBookRepository
            .find_by_isbn(&mut con, &BookIsbn::new("0618260307"))
            .await?
            .expect("seeded");
        assert_eq!(*hobbit.id().as_ref(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_isbn_is_refused_by_the_store() -> error_stack::Result<(), KernelError> {
        let mut con = seeded().await?;
        let report = InMemoryBookRepository
            .create(&mut con, draft("0618260307", "Copy", 1.0, BookCategory::Drama))
            .await
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Concurrency));
        Ok(())
    }

    #[tokio::test]
    async fn sorting_breaks_ties_by_id() -> error_stack::Result<(), KernelError> {
        let mut con = seeded().await?;
        let page = PageRequest::new(
            PageNumber::new(0),
            PageSize::new(10),
            BookSortField::Price,
            SortDirection::Desc,
        )?;
        let found = InMemoryBookRepository
            .find_all(&mut con, &BookFilter::default(), &page)
            .await?;
        assert_eq!(titles(&found), vec!["Lost Symbol", "Origin", "The Hobbit"]);
        Ok(())
    }

    #[tokio::test]
    async fn filter_and_paging_are_applied_before_slicing() -> error_stack::Result<(), KernelError>
    {
        let mut con = seeded().await?;
        let page = PageRequest::new(
            PageNumber::new(1),
            PageSize::new(1),
            BookSortField::Title,
            SortDirection::Asc,
        )?;
        let found = InMemoryBookRepository
            .find_all(
                &mut con,
                &BookFilter::new(Some(BookCategory::Thriller)),
                &page,
            )
            .await?;
        assert_eq!(titles(&found), vec!["Origin"]);
        assert_eq!(found.total_elements(), 2);
        assert_eq!(found.total_pages(), 2);
        assert!(found.last());
        Ok(())
    }

    #[tokio::test]
    async fn decrease_stock_refuses_to_oversell() -> error_stack::Result<(), KernelError> {
        let mut con = seeded().await?;
        let hobbit = InMemoryBookRepository
            .find_by_isbn(&mut con, &BookIsbn::new("0618260307"))
            .await?
            .expect("seeded");
        let refused = InMemoryBookRepository
            .decrease_stock(&mut con, hobbit.id(), 3)
            .await?;
        assert!(refused.is_none());
        let sold = InMemoryBookRepository
            .decrease_stock(&mut con, hobbit.id(), 2)
            .await?
            .expect("stock covers the amount");
        assert_eq!(*sold.stock().as_ref(), 0);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_decrements_stop_at_zero() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let book = InMemoryBookRepository
            .create(&mut con, draft("0618260307", "The Hobbit", 9.99, BookCategory::Fantasy))
            .await?;
        con.commit().await?;

        let buyers = (0..6)
            .map(|_| {
                let db = db.clone();
                let id = *book.id();
                tokio::spawn(async move {
                    let mut con = db.transact().await?;
                    let sold = InMemoryBookRepository.decrease_stock(&mut con, &id, 1).await?;
                    con.commit().await?;
                    Ok::<_, error_stack::Report<KernelError>>(sold.is_some())
                })
            })
            .collect::<Vec<_>>();

        let mut sold = 0;
        for buyer in buyers {
            if buyer.await.unwrap()? {
                sold += 1;
            }
        }
        assert_eq!(sold, 2);

        let mut con = db.transact().await?;
        let book = InMemoryBookRepository
            .find_by_id(&mut con, book.id())
            .await?
            .expect("created");
        assert_eq!(*book.stock().as_ref(), 0);
        Ok(())
    }
}
