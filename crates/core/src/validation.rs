//! Checkout form field predicates.
//!
//! Each predicate is pure and total: any string is accepted as input and the
//! answer depends on nothing else.

use std::sync::LazyLock;

use regex::Regex;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]+$").expect("Invalid regex"));

// Words of Latin letters (Latin-1 Supplement through Latin Extended-B),
// separated by a space, hyphen, apostrophe or ". ".
static CITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z\x{0080}-\x{024F}]+(?:\. |-| |'))*[a-zA-Z\x{0080}-\x{024F}]*$")
        .expect("Invalid regex")
});

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("Invalid regex"));

/// First or last name: one or more ASCII letters, nothing else.
#[must_use]
pub fn is_valid_name(value: &str) -> bool {
    NAME_RE.is_match(value)
}

/// Street address: anything non-empty.
#[must_use]
pub const fn is_valid_address(value: &str) -> bool {
    !value.is_empty()
}

/// City name.
///
/// The empty string matches; required-ness is enforced by the form, see
/// [`crate::ContactInfo::validate`].
#[must_use]
pub fn is_valid_city(value: &str) -> bool {
    CITY_RE.is_match(value)
}

/// Basic email shape check: `local@domain.tld` with a single `@`.
///
/// This does not implement RFC 5322 and accepts some malformed addresses
/// (e.g. `a b@c.d`).
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name() {
        assert!(is_valid_name("Jean"));
        assert!(is_valid_name("dupont"));
        assert!(!is_valid_name("Jean-Paul"));
        assert!(!is_valid_name("J3an"));
        assert!(!is_valid_name("Jean Paul"));
        assert!(!is_valid_name("Éloïse"));
        assert!(!is_valid_name(""));
    }

    #[test]
    fn test_address() {
        assert!(is_valid_address("10 quai de la Charente"));
        assert!(is_valid_address(" "));
        assert!(!is_valid_address(""));
    }

    #[test]
    fn test_city() {
        assert!(is_valid_city("Paris"));
        assert!(is_valid_city("Aix-en-Provence"));
        assert!(is_valid_city("L'Haÿ-les-Roses"));
        assert!(is_valid_city("Saint-Étienne"));
        assert!(is_valid_city("St. Louis"));
        assert!(is_valid_city("New York"));
        assert!(!is_valid_city("Paris 15"));
        assert!(!is_valid_city("Paris!"));
        assert!(!is_valid_city("St.Louis"));
        assert!(!is_valid_city("東京"));
    }

    #[test]
    fn test_city_accepts_empty() {
        assert!(is_valid_city(""));
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("jean.dupont@mail.example.fr"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("abc"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("a@b.com@c.fr"));
    }
}
