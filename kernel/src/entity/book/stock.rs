use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Copies of a book left in stock. Never negative once persisted.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookStock(i32);

impl BookStock {
    pub fn new(amount: impl Into<i32>) -> Self {
        Self(amount.into())
    }
}
