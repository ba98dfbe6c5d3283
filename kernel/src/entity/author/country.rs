use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct AuthorCountry(String);

impl AuthorCountry {
    pub fn new(country: impl Into<String>) -> Self {
        Self(country.into())
    }
}
