use std::str::FromStr;

use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln, References};

use crate::entity::BookCategory;
use crate::validation::{Rule, Validator};
use crate::KernelError;

pub const NEGATIVE_PAGE: &str = "Page index must not be negative!";
pub const NON_POSITIVE_PAGE_SIZE: &str = "Page size must be positive!";

// I want to use primitive type(i64) in request fields, but default attribute not supported for literals(https://github.com/serde-rs/serde/issues/368)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct PageNumber(i64);

impl PageNumber {
    pub fn new(value: impl Into<i64>) -> Self {
        PageNumber(value.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct PageSize(i64);

impl PageSize {
    pub fn new(value: impl Into<i64>) -> Self {
        PageSize(value.into())
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::new(10)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!(
                "Invalid value '{s}' for orders given; Has to be either 'desc' or 'asc' (case insensitive)"
            )),
        }
    }
}

impl TryFrom<String> for SortDirection {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookSortField {
    #[default]
    Id,
    Title,
    Isbn,
    Price,
    QuantityInStock,
    Category,
}

impl BookSortField {
    pub fn column(&self) -> &'static str {
        match self {
            BookSortField::Id => "id",
            BookSortField::Title => "title",
            BookSortField::Isbn => "isbn",
            BookSortField::Price => "price",
            BookSortField::QuantityInStock => "quantity_in_stock",
            BookSortField::Category => "category",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, References)]
pub struct BookFilter {
    category: Option<BookCategory>,
}

impl BookFilter {
    pub fn new(category: Option<BookCategory>) -> Self {
        Self { category }
    }

    pub fn matches(&self, category: &BookCategory) -> bool {
        self.category.as_ref().map_or(true, |filter| filter == category)
    }
}

const PAGE_RULES: &[Rule<PageRequest>] = &[
    Rule::new(has_non_negative_number, NEGATIVE_PAGE),
    Rule::new(has_positive_size, NON_POSITIVE_PAGE_SIZE),
];

#[derive(Debug, Default, Clone, PartialEq, Eq, References)]
pub struct PageRequest {
    number: PageNumber,
    size: PageSize,
    sort_by: BookSortField,
    direction: SortDirection,
}

impl PageRequest {
    pub fn new(
        number: PageNumber,
        size: PageSize,
        sort_by: BookSortField,
        direction: SortDirection,
    ) -> error_stack::Result<Self, KernelError> {
        let request = Self {
            number,
            size,
            sort_by,
            direction,
        };
        Validator::new(&request).rules(PAGE_RULES).finish()?;
        Ok(request)
    }

    pub fn offset(&self) -> i64 {
        self.number.0.saturating_mul(self.size.0)
    }
}

fn has_non_negative_number(request: &PageRequest) -> bool {
    request.number.0 >= 0
}

fn has_positive_size(request: &PageRequest) -> bool {
    request.size.0 > 0
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    content: Vec<T>,
    number: i64,
    size: i64,
    total_elements: i64,
    total_pages: i64,
    first: bool,
    last: bool,
    number_of_elements: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        let number = *request.number.as_ref();
        let size = *request.size.as_ref();
        let total_pages = if total_elements <= 0 {
            0
        } else {
            (total_elements - 1) / size + 1
        };
        let number_of_elements = content.len() as i64;
        Self {
            content,
            number,
            size,
            total_elements,
            total_pages,
            first: number == 0,
            last: number.saturating_add(1) >= total_pages,
            number_of_elements,
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn total_elements(&self) -> i64 {
        self.total_elements
    }

    pub fn total_pages(&self) -> i64 {
        self.total_pages
    }

    pub fn first(&self) -> bool {
        self.first
    }

    pub fn last(&self) -> bool {
        self.last
    }

    pub fn number_of_elements(&self) -> i64 {
        self.number_of_elements
    }
}

#[cfg(test)]
mod test {
    use crate::entity::{
        BookCategory, BookFilter, BookSortField, Page, PageNumber, PageRequest, PageSize,
        SortDirection, NEGATIVE_PAGE, NON_POSITIVE_PAGE_SIZE,
    };
    use crate::KernelError;

    fn request(number: i64, size: i64) -> PageRequest {
        PageRequest::new(
            PageNumber::new(number),
            PageSize::new(size),
            BookSortField::Id,
            SortDirection::Asc,
        )
        .unwrap()
    }

    #[test]
    fn first_of_several_pages() {
        let page = Page::new(vec![1, 2], &request(0, 2), 3);
        assert_eq!(page.total_pages(), 2);
        assert!(page.first());
        assert!(!page.last());
        assert_eq!(page.number_of_elements(), 2);
    }

    #[test]
    fn last_partial_page() {
        let page = Page::new(vec![3], &request(1, 2), 3);
        assert!(!page.first());
        assert!(page.last());
        assert_eq!(page.number_of_elements(), 1);
    }

    #[test]
    fn single_page_is_first_and_last() {
        let page = Page::new(vec![1, 2, 3], &request(0, 10), 3);
        assert_eq!(page.total_pages(), 1);
        assert!(page.first());
        assert!(page.last());
    }

    #[test]
    fn empty_result_has_no_pages() {
        let page: Page<i32> = Page::new(vec![], &request(0, 10), 0);
        assert_eq!(page.total_pages(), 0);
        assert!(page.last());
    }

    #[test]
    fn largest_page_size_does_not_overflow() {
        let page = Page::new(vec![1, 2, 3], &request(0, i64::MAX), 3);
        assert_eq!(page.total_pages(), 1);
        assert!(page.first());
        assert!(page.last());
    }

    #[test]
    fn largest_page_number_does_not_overflow() {
        let page: Page<i32> = Page::new(vec![], &request(i64::MAX, 10), 3);
        assert_eq!(page.total_pages(), 1);
        assert!(!page.first());
        assert!(page.last());
        assert_eq!(request(i64::MAX, 10).offset(), i64::MAX);
    }

    #[test]
    fn offset_skips_previous_pages() {
        assert_eq!(request(3, 10).offset(), 30);
    }

    #[test]
    fn invalid_page_bounds_are_reported_together() {
        let report = PageRequest::new(
            PageNumber::new(-1),
            PageSize::new(0),
            BookSortField::Title,
            SortDirection::Desc,
        )
        .unwrap_err();
        let KernelError::Validation(violations) = report.current_context() else {
            panic!("unexpected context: {:?}", report.current_context());
        };
        assert!(violations.contains(NEGATIVE_PAGE));
        assert!(violations.contains(NON_POSITIVE_PAGE_SIZE));
    }

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("DESC".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert_eq!("asc".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert!("up".parse::<SortDirection>().is_err());
    }

    #[test]
    fn filter_without_category_matches_everything() {
        assert!(BookFilter::default().matches(&BookCategory::Drama));
        let fantasy = BookFilter::new(Some(BookCategory::Fantasy));
        assert!(fantasy.matches(&BookCategory::Fantasy));
        assert!(!fantasy.matches(&BookCategory::Thriller));
    }
}
