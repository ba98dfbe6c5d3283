use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::BookId;

#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookIsbn(String);

impl BookIsbn {
    pub fn new(isbn: impl Into<String>) -> Self {
        Self(isbn.into())
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn is_valid(&self) -> bool {
        is_valid_isbn(&self.0)
    }
}

/// Checks the ISBN-10 or ISBN-13 shape first and only then its check digit.
pub fn is_valid_isbn(isbn: &str) -> bool {
    let digits = isbn.as_bytes();
    match digits.len() {
        10 => is_isbn10_shape(digits) && isbn10_sum(digits) % 11 == 0,
        13 => digits.iter().all(u8::is_ascii_digit) && isbn13_sum(digits) % 10 == 0,
        _ => false,
    }
}

fn is_isbn10_shape(digits: &[u8]) -> bool {
    let (body, check) = digits.split_at(9);
    body.iter().all(u8::is_ascii_digit)
        && check
            .iter()
            .all(|&c| c.is_ascii_digit() || matches!(c, b'X' | b'x'))
}

fn isbn10_sum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .zip(1..)
        .map(|(digit, position)| position * digit_value(*digit))
        .sum()
}

fn isbn13_sum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .enumerate()
        .map(|(index, digit)| {
            let value = digit_value(*digit);
            if index % 2 == 0 {
                value
            } else {
                value * 3
            }
        })
        .sum()
}

fn digit_value(digit: u8) -> u32 {
    match digit {
        b'X' | b'x' => 10,
        _ => u32::from(digit - b'0'),
    }
}

/// Decides whether `holder`, the book currently bearing a candidate ISBN,
/// blocks it. Without an `editing` id every holder conflicts (create);
/// with one, only a different book does (update).
pub fn is_isbn_conflict(holder: Option<&BookId>, editing: Option<&BookId>) -> bool {
    match (holder, editing) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(holder), Some(editing)) => holder != editing,
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use crate::entity::{is_isbn_conflict, is_valid_isbn, BookId, BookIsbn};

    #[rstest]
    #[case::isbn10("0385504225")]
    #[case::isbn10_hobbit("0618260307")]
    #[case::isbn10_upper_x("080442957X")]
    #[case::isbn10_lower_x("080442957x")]
    #[case::isbn13("9780385514231")]
    #[case::isbn13_other("9780553801477")]
    fn accepts_valid_isbns(#[case] isbn: &str) {
        assert!(is_valid_isbn(isbn));
    }

    #[rstest]
    #[case::checksum10("0385504226")]
    #[case::checksum13("9780385514232")]
    #[case::too_short("123456")]
    #[case::eleven_digits("98765432101")]
    #[case::letters("fjkhakjs4567")]
    #[case::fourteen_digits("99999999999999")]
    #[case::words("invalid_isbn")]
    #[case::empty("")]
    #[case::blank("          ")]
    #[case::x_inside("03855X4225")]
    #[case::x_in_isbn13("978038551423X")]
    #[case::hyphenated("0-385-50422-5")]
    fn rejects_invalid_isbns(#[case] isbn: &str) {
        assert!(!is_valid_isbn(isbn));
    }

    #[test]
    fn any_single_digit_change_breaks_an_isbn13() {
        let valid = "9780385514231";
        for position in 0..valid.len() {
            for replacement in b'0'..=b'9' {
                let mut digits = valid.as_bytes().to_vec();
                if digits[position] == replacement {
                    continue;
                }
                digits[position] = replacement;
                let corrupted = String::from_utf8(digits).unwrap();
                assert!(!is_valid_isbn(&corrupted), "{corrupted} passed");
            }
        }
    }

    #[test]
    fn isbn_newtype_delegates_to_the_checksum() {
        assert!(BookIsbn::new("6258327656").is_valid());
        assert!(!BookIsbn::new("6258327657").is_valid());
        assert!(BookIsbn::new("  ").is_blank());
    }

    #[test]
    fn free_isbn_never_conflicts() {
        assert!(!is_isbn_conflict(None, None));
        assert!(!is_isbn_conflict(None, Some(&BookId::new(1))));
    }

    #[test]
    fn held_isbn_conflicts_on_create() {
        assert!(is_isbn_conflict(Some(&BookId::new(1)), None));
    }

    #[test]
    fn held_isbn_conflicts_on_update_only_for_other_books() {
        assert!(!is_isbn_conflict(Some(&BookId::new(1)), Some(&BookId::new(1))));
        assert!(is_isbn_conflict(Some(&BookId::new(2)), Some(&BookId::new(1))));
    }
}
