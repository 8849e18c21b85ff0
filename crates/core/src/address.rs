//! Delivery Address

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Phone numbers shorter than this are rejected.
const MIN_PHONE_LEN: usize = 11;

/// Validation errors, one per field check, in the order the checks run.
///
/// Validation is fail-fast: the first failing field's error is returned and
/// later fields are not examined, so the user always sees one message at a
/// time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("please enter your name")]
    MissingName,

    #[error("please enter your phone number")]
    MissingPhone,

    #[error("phone number must be at least 11 digits")]
    PhoneTooShort,

    #[error("please select your district")]
    MissingDistrict,

    #[error("please select your sub-district")]
    MissingSubDistrict,

    #[error("please enter your house number")]
    MissingHouseNumber,
}

/// Shipping details collected at checkout. Lives only for the checkout
/// session; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    pub name: String,
    pub phone: String,
    pub district: String,
    pub sub_district: String,
    pub house_number: String,
    /// Street address is optional and carries no validation rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
}

impl DeliveryAddress {
    /// Check the mandatory fields, stopping at the first failure.
    ///
    /// Order: name, phone present, phone length, district, sub-district,
    /// house number.
    ///
    /// # Errors
    ///
    /// Returns the [`AddressError`] for the first field that fails.
    pub fn validate(&self) -> Result<(), AddressError> {
        if self.name.trim().is_empty() {
            return Err(AddressError::MissingName);
        }

        let phone = self.phone.trim();

        if phone.is_empty() {
            return Err(AddressError::MissingPhone);
        }

        if phone.chars().count() < MIN_PHONE_LEN {
            return Err(AddressError::PhoneTooShort);
        }

        if self.district.trim().is_empty() {
            return Err(AddressError::MissingDistrict);
        }

        if self.sub_district.trim().is_empty() {
            return Err(AddressError::MissingSubDistrict);
        }

        if self.house_number.trim().is_empty() {
            return Err(AddressError::MissingHouseNumber);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn valid_address() -> DeliveryAddress {
        DeliveryAddress {
            name: "Farhana Akter".to_string(),
            phone: "01712345678".to_string(),
            district: "Dhaka".to_string(),
            sub_district: "Dhanmondi".to_string(),
            house_number: "12/B".to_string(),
            street: Some("Road 27".to_string()),
        }
    }

    #[test]
    fn valid_address_passes() -> TestResult {
        valid_address().validate()?;

        Ok(())
    }

    #[test]
    fn street_is_optional() -> TestResult {
        let address = DeliveryAddress {
            street: None,
            ..valid_address()
        };

        address.validate()?;

        Ok(())
    }

    #[test]
    fn empty_form_reports_the_name_first() {
        let address = DeliveryAddress::default();

        assert_eq!(address.validate(), Err(AddressError::MissingName));
    }

    #[test]
    fn short_phone_reports_phone_even_when_later_fields_are_valid() {
        // Only the phone is invalid (10 digits); the error must be the
        // phone-specific one, never a later field's.
        let address = DeliveryAddress {
            phone: "0171234567".to_string(),
            ..valid_address()
        };

        assert_eq!(address.validate(), Err(AddressError::PhoneTooShort));
    }

    #[test]
    fn missing_phone_precedes_the_length_check() {
        let address = DeliveryAddress {
            phone: "   ".to_string(),
            ..valid_address()
        };

        assert_eq!(address.validate(), Err(AddressError::MissingPhone));
    }

    #[test]
    fn district_is_checked_after_phone() {
        let address = DeliveryAddress {
            district: String::new(),
            sub_district: String::new(),
            ..valid_address()
        };

        assert_eq!(address.validate(), Err(AddressError::MissingDistrict));
    }

    #[test]
    fn sub_district_is_checked_before_house_number() {
        let address = DeliveryAddress {
            sub_district: String::new(),
            house_number: String::new(),
            ..valid_address()
        };

        assert_eq!(address.validate(), Err(AddressError::MissingSubDistrict));
    }

    #[test]
    fn missing_house_number_is_reported_last() {
        let address = DeliveryAddress {
            house_number: " ".to_string(),
            ..valid_address()
        };

        assert_eq!(address.validate(), Err(AddressError::MissingHouseNumber));
    }
}
