//! Checkout operation and payment method enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// What the hosted checkout should do with the customer's payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    /// Charge the order amount.
    Purchase,
    /// Verify a card without charging; amount must be zero.
    Verify,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Purchase => "PURCHASE",
            Operation::Verify => "VERIFY",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PURCHASE" => Ok(Operation::Purchase),
            "VERIFY" => Ok(Operation::Verify),
            _ => Err(ValidationError::invalid_format(
                "operation",
                format!("unknown operation '{}'", s),
            )),
        }
    }
}

/// Payment method preselected on the hosted checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    BankTransfer,
    NapasBankTransfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "CARD",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
            PaymentMethod::NapasBankTransfer => "NAPAS_BANK_TRANSFER",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CARD" => Ok(PaymentMethod::Card),
            "BANK_TRANSFER" => Ok(PaymentMethod::BankTransfer),
            "NAPAS_BANK_TRANSFER" => Ok(PaymentMethod::NapasBankTransfer),
            _ => Err(ValidationError::invalid_format(
                "payment_method",
                format!("unknown payment method '{}'", s),
            )),
        }
    }
}
