mod country;
mod id;
mod name;

pub use self::{country::*, id::*, name::*};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Destructure, References)]
pub struct Author {
    id: AuthorId,
    first_name: AuthorFirstName,
    last_name: AuthorLastName,
    country: AuthorCountry,
}

impl Author {
    pub fn new(
        id: AuthorId,
        first_name: AuthorFirstName,
        last_name: AuthorLastName,
        country: AuthorCountry,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            country,
        }
    }
}
