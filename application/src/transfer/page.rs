use kernel::prelude::entity::Page;

#[derive(Debug, Clone, PartialEq)]
pub struct PageDto<T> {
    pub content: Vec<T>,
    pub number: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
    pub first: bool,
    pub last: bool,
    pub number_of_elements: i64,
}

impl<T, U: From<T>> From<Page<T>> for PageDto<U> {
    fn from(value: Page<T>) -> Self {
        Self {
            number: value.number(),
            size: value.size(),
            total_elements: value.total_elements(),
            total_pages: value.total_pages(),
            first: value.first(),
            last: value.last(),
            number_of_elements: value.number_of_elements(),
            content: value.into_content().into_iter().map(U::from).collect(),
        }
    }
}
