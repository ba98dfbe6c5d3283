pub use self::{author::*, book::*, page::*};

mod author;
mod book;
mod page;
