pub use self::{author::*, book::*, bootstrap::*};

mod author;
mod book;
mod bootstrap;
