use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Settlement currencies accepted by the relay, with their decimal precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Singapore Dollar (2 decimal places)
    SGD,
    /// Malaysian Ringgit (2 decimal places)
    MYR,
    /// US Dollar (2 decimal places)
    USD,
    /// Indonesian Rupiah (no decimal places)
    IDR,
}

impl Currency {
    /// Returns the decimal scale for this currency
    pub fn scale(&self) -> u32 {
        match self {
            Currency::IDR => 0,
            Currency::SGD | Currency::MYR | Currency::USD => 2,
        }
    }

    /// Converts a decimal amount into the currency's minor units
    /// (e.g. 125.50 MYR -> 12550 sen), rounding half away from zero.
    pub fn to_minor_units(&self, amount: Decimal) -> Result<i64, String> {
        let factor = Decimal::from(10i64.pow(self.scale()));
        amount
            .checked_mul(factor)
            .map(|scaled| {
                scaled.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
            })
            .and_then(|minor| minor.to_i64())
            .ok_or_else(|| format!("{} amount {} is out of range", self, amount))
    }

    /// Formats an amount as the decimal string gateways expect ("125.50"),
    /// rounded the same way as `to_minor_units`.
    pub fn format_amount(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(
            self.scale(),
            rust_decimal::RoundingStrategy::MidpointAwayFromZero,
        );
        format!("{:.width$}", rounded, width = self.scale() as usize)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::SGD => write!(f, "SGD"),
            Currency::MYR => write!(f, "MYR"),
            Currency::USD => write!(f, "USD"),
            Currency::IDR => write!(f, "IDR"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SGD" => Ok(Currency::SGD),
            "MYR" => Ok(Currency::MYR),
            "USD" => Ok(Currency::USD),
            "IDR" => Ok(Currency::IDR),
            _ => Err(format!("Invalid currency: {}", s)),
        }
    }
}
