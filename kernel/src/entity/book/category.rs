use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookCategory {
    Novel,
    Thriller,
    History,
    Fantasy,
    Biography,
    Classics,
    Drama,
}

impl BookCategory {
    pub const ALL: [BookCategory; 7] = [
        BookCategory::Novel,
        BookCategory::Thriller,
        BookCategory::History,
        BookCategory::Fantasy,
        BookCategory::Biography,
        BookCategory::Classics,
        BookCategory::Drama,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookCategory::Novel => "NOVEL",
            BookCategory::Thriller => "THRILLER",
            BookCategory::History => "HISTORY",
            BookCategory::Fantasy => "FANTASY",
            BookCategory::Biography => "BIOGRAPHY",
            BookCategory::Classics => "CLASSICS",
            BookCategory::Drama => "DRAMA",
        }
    }
}

impl Display for BookCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookCategory {
    type Err = Report<KernelError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| {
                Report::new(KernelError::Internal)
                    .attach_printable(format!("Unknown book category: {s}"))
            })
    }
}

#[cfg(test)]
mod test {
    use crate::entity::BookCategory;

    #[test]
    fn parses_its_own_names() {
        for category in BookCategory::ALL {
            assert_eq!(category.as_str().parse::<BookCategory>().unwrap(), category);
        }
    }

    #[test]
    fn rejects_unknown_names() {
        assert!("POETRY".parse::<BookCategory>().is_err());
        assert!("fantasy".parse::<BookCategory>().is_err());
    }
}
