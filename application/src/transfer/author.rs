use kernel::prelude::entity::{Author, DestructAuthor};

#[derive(Debug, Clone, PartialEq)]
pub struct AuthorDto {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub country: String,
}

impl From<Author> for AuthorDto {
    fn from(value: Author) -> Self {
        let DestructAuthor {
            id,
            first_name,
            last_name,
            country,
        } = value.into_destruct();
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            country: country.into(),
        }
    }
}

pub struct GetAuthorDto {
    pub id: i64,
}
