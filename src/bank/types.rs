//! Types used throughout the banking system.
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, de};

/// Account ID type, representing the unique identifier of an account.
pub type AccountId = String;

/// Money type, representing an exact decimal monetary value.
pub type Money = Decimal;

/// Custom deserializer for monetary values. Amounts are parsed from their
/// textual form so no floating-point conversion ever takes place, and values
/// that would need rounding to fit are rejected.
pub(crate) fn deserialize_money<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
where
    D: de::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => Money::from_str_exact(raw).map(Some).map_err(de::Error::custom),
    }
}

/// Serializes a monetary value as its exact decimal string.
pub(crate) fn serialize_money<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    money.to_string().serialize(serializer)
}
