pub use self::{author::*, book::*};

mod author;
mod book;
