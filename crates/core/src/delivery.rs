//! Delivery locations and the flat tariff

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Where an order ships. Determines the flat delivery charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryLocation {
    /// Inside Dhaka city.
    Dhaka,
    /// Anywhere else in the country.
    Outside,
}

impl DeliveryLocation {
    /// Flat delivery charge in minor units: 100 Tk inside Dhaka, 150 Tk
    /// outside. A fixed tariff, not configuration data.
    #[must_use]
    pub const fn charge(self) -> u64 {
        match self {
            Self::Dhaka => 100_00,
            Self::Outside => 150_00,
        }
    }
}

impl Display for DeliveryLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Dhaka => f.write_str("dhaka"),
            Self::Outside => f.write_str("outside"),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn tariff_is_fixed_per_location() {
        assert_eq!(DeliveryLocation::Dhaka.charge(), 100_00);
        assert_eq!(DeliveryLocation::Outside.charge(), 150_00);
    }

    #[test]
    fn serializes_lowercase() -> TestResult {
        assert_eq!(serde_json::to_string(&DeliveryLocation::Dhaka)?, "\"dhaka\"");

        let back: DeliveryLocation = serde_json::from_str("\"outside\"")?;
        assert_eq!(back, DeliveryLocation::Outside);

        Ok(())
    }
}
