//! Checkout contact details.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::validation::{is_valid_address, is_valid_city, is_valid_email, is_valid_name};

/// Contact details typed into the checkout form.
///
/// Taken verbatim from the form at submission time and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub email: String,
}

/// A checkout form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    FirstName,
    LastName,
    Address,
    City,
    Email,
}

impl ContactField {
    /// Every field, in form order.
    pub const ALL: [Self; 5] = [
        Self::FirstName,
        Self::LastName,
        Self::Address,
        Self::City,
        Self::Email,
    ];

    /// Form input identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Address => "address",
            Self::City => "city",
            Self::Email => "email",
        }
    }

    /// Message shown next to the field when its value is rejected.
    #[must_use]
    pub const fn error_message(self) -> &'static str {
        match self {
            Self::FirstName => "Invalid format for the first name",
            Self::LastName => "Invalid format for the last name",
            Self::Address => "Invalid format for the address",
            Self::City => "Invalid format for the city",
            Self::Email => "Invalid format for the email address",
        }
    }

    fn accepts(self, value: &str) -> bool {
        match self {
            Self::FirstName | Self::LastName => is_valid_name(value),
            Self::Address => is_valid_address(value),
            // The form marks every field required.
            Self::City => !value.is_empty() && is_valid_city(value),
            Self::Email => is_valid_email(value),
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected form field with its user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: ContactField,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ContactInfo {
    /// Value of a single field.
    #[must_use]
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::Address => &self.address,
            ContactField::City => &self.city,
            ContactField::Email => &self.email,
        }
    }

    /// Check a single field, as done on every keystroke in the form.
    ///
    /// # Errors
    ///
    /// Returns the field's message if its value is rejected.
    pub fn validate_field(&self, field: ContactField) -> Result<(), FieldError> {
        if field.accepts(self.get(field)) {
            Ok(())
        } else {
            Err(FieldError {
                field,
                message: field.error_message(),
            })
        }
    }

    /// Check every field; an empty result means the form may be submitted.
    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        ContactField::ALL
            .into_iter()
            .filter_map(|field| self.validate_field(field).err())
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_contact() -> ContactInfo {
        ContactInfo {
            first_name: "Jean".to_string(),
            last_name: "Dupont".to_string(),
            address: "10 quai de la Charente".to_string(),
            city: "Paris".to_string(),
            email: "jean.dupont@example.com".to_string(),
        }
    }

    #[test]
    fn test_valid_contact_has_no_errors() {
        assert!(valid_contact().validate().is_empty());
    }

    #[test]
    fn test_reports_each_bad_field() {
        let contact = ContactInfo {
            first_name: "J3an".to_string(),
            email: "nope".to_string(),
            ..valid_contact()
        };

        let fields: Vec<_> = contact.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![ContactField::FirstName, ContactField::Email]);
    }

    #[test]
    fn test_empty_city_is_rejected_by_form() {
        let contact = ContactInfo {
            city: String::new(),
            ..valid_contact()
        };

        let err = contact.validate_field(ContactField::City).unwrap_err();
        assert_eq!(err.message, "Invalid format for the city");
    }

    #[test]
    fn test_serializes_with_form_ids() {
        let json = serde_json::to_value(valid_contact()).unwrap();
        for field in ContactField::ALL {
            assert!(json.get(field.as_str()).is_some(), "missing {field}");
        }
    }
}
