//! Self-validating value objects.
//!
//! Construction is the only way to obtain an instance, and every constructor
//! checks the type's rule. Deserialisation goes through the same constructors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a value object rejects its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("Email is required")]
    EmptyEmail,

    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(i64),

    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    /// Money of different currencies was combined.
    #[error("Currency mismatch: cannot combine {left} with {right}")]
    CurrencyMismatch { left: String, right: String },

    #[error("Amount overflow")]
    Overflow,

    #[error("Unknown priority: {0}")]
    UnknownPriority(String),

    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

const MAX_EMAIL_LENGTH: usize = 254;
const MAX_LOCAL_PART_LENGTH: usize = 64;
const MAX_LABEL_LENGTH: usize = 63;

/// An email address, stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Parses and normalises an email address.
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValueError::EmptyEmail);
        }
        let invalid = || ValueError::InvalidEmail(raw.to_string());

        if raw.len() > MAX_EMAIL_LENGTH {
            return Err(invalid());
        }
        let (local, domain) = raw.split_once('@').ok_or_else(invalid)?;
        if domain.contains('@') || !is_valid_local_part(local) || !is_valid_domain(domain) {
            return Err(invalid());
        }

        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the part after the `@`.
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, d)| d).unwrap_or_default()
    }
}

fn is_valid_local_part(local: &str) -> bool {
    const SPECIALS: &str = ".!#$%&'*+/=?^_`{|}~-";

    !local.is_empty()
        && local.len() <= MAX_LOCAL_PART_LENGTH
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || SPECIALS.contains(c))
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LENGTH
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    let tld = labels[labels.len() - 1];
    labels_ok && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

impl TryFrom<String> for Email {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// ISO-4217 style three-letter currency code, upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        let code = raw.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValueError::InvalidCurrency(raw.to_string()));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Currency {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.0
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A non-negative amount of money in minor units (e.g. cents) of one currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMoney")]
pub struct Money {
    amount: i64,
    currency: Currency,
}

#[derive(Deserialize)]
struct RawMoney {
    amount: i64,
    currency: String,
}

impl TryFrom<RawMoney> for Money {
    type Error = ValueError;

    fn try_from(raw: RawMoney) -> Result<Self, Self::Error> {
        Money::new(raw.amount, &raw.currency)
    }
}

impl Money {
    /// Creates money from an amount in minor units and a currency code.
    pub fn new(amount: i64, currency: &str) -> Result<Self, ValueError> {
        let currency = Currency::parse(currency)?;
        if amount < 0 {
            return Err(ValueError::NegativeAmount(amount));
        }
        Ok(Self { amount, currency })
    }

    /// Zero in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: 0,
            currency,
        }
    }

    /// Amount in minor units.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    pub fn same_currency(&self, other: &Money) -> bool {
        self.currency == other.currency
    }

    /// Sums two amounts of the same currency.
    ///
    /// Differing currencies are rejected; there is no implicit conversion.
    pub fn add(&self, other: &Money) -> Result<Money, ValueError> {
        if !self.same_currency(other) {
            return Err(ValueError::CurrencyMismatch {
                left: self.currency.to_string(),
                right: other.currency.to_string(),
            });
        }
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(ValueError::Overflow)?;
        Ok(Money {
            amount,
            currency: self.currency.clone(),
        })
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{:02} {}",
            self.amount / 100,
            self.amount % 100,
            self.currency
        )
    }
}

/// Task priority. Variants are ordered from least to most urgent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            _ => Err(ValueError::UnknownPriority(s.to_string())),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_lowercased() {
        let email = Email::parse("  Ada.Lovelace@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "ada.lovelace@example.com");
        assert_eq!(email.domain(), "example.com");
    }

    #[test]
    fn email_equality_is_by_value() {
        assert_eq!(
            Email::parse("bob@example.org").unwrap(),
            Email::parse("BOB@example.org").unwrap()
        );
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for raw in [
            "plainaddress",
            "@example.com",
            "user@",
            "user@localhost",
            "user@@example.com",
            "user@exa mple.com",
            ".user@example.com",
            "us..er@example.com",
            "user@-example.com",
            "user@example.c0m",
            "user@example.c",
        ] {
            assert!(
                matches!(Email::parse(raw), Err(ValueError::InvalidEmail(_))),
                "{raw} should be rejected"
            );
        }
        assert_eq!(Email::parse("   "), Err(ValueError::EmptyEmail));
    }

    #[test]
    fn email_deserialization_validates() {
        let ok: Email = serde_json::from_str("\"X@Y.io\"").unwrap();
        assert_eq!(ok.as_str(), "x@y.io");
        assert!(serde_json::from_str::<Email>("\"nope\"").is_err());
    }

    #[test]
    fn currency_is_normalized() {
        assert_eq!(Currency::parse("usd").unwrap().as_str(), "USD");
        assert!(Currency::parse("US").is_err());
        assert!(Currency::parse("U5D").is_err());
        assert!(Currency::parse("EURO").is_err());
    }

    #[test]
    fn money_rejects_negative_amounts() {
        assert_eq!(Money::new(-1, "USD"), Err(ValueError::NegativeAmount(-1)));
        assert!(Money::new(0, "USD").unwrap().is_zero());
    }

    #[test]
    fn money_add_same_currency() {
        let a = Money::new(1250, "EUR").unwrap();
        let b = Money::new(750, "eur").unwrap();
        assert_eq!(a.add(&b).unwrap().amount(), 2000);
    }

    #[test]
    fn money_add_different_currency_fails() {
        let a = Money::new(100, "USD").unwrap();
        let b = Money::new(100, "EUR").unwrap();
        assert_eq!(
            a.add(&b),
            Err(ValueError::CurrencyMismatch {
                left: "USD".into(),
                right: "EUR".into()
            })
        );
    }

    #[test]
    fn money_add_overflow_fails() {
        let a = Money::new(i64::MAX, "USD").unwrap();
        let b = Money::new(1, "USD").unwrap();
        assert_eq!(a.add(&b), Err(ValueError::Overflow));
    }

    #[test]
    fn money_display() {
        assert_eq!(Money::new(123456, "USD").unwrap().to_string(), "1234.56 USD");
        assert_eq!(Money::new(5, "GBP").unwrap().to_string(), "0.05 GBP");
    }

    #[test]
    fn money_deserialization_validates() {
        let ok: Money = serde_json::from_str(r#"{"amount":10,"currency":"jpy"}"#).unwrap();
        assert_eq!(ok.currency().as_str(), "JPY");
        assert!(serde_json::from_str::<Money>(r#"{"amount":-10,"currency":"JPY"}"#).is_err());
    }

    #[test]
    fn priority_is_ordered() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert!(Priority::High < Priority::Critical);
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
    }
}
