//! Errors surfaced by account management and transfers.
use thiserror::Error;

use crate::bank::AccountId;

pub const AMOUNT_NOT_SPECIFIED: &str = "Amount not specified.";
pub const AMOUNT_INVALID: &str = "Amount specified is invalid.";
pub const INSUFFICIENT_BALANCE: &str = "Insufficient balance.";
pub const ACCOUNT_ID_EMPTY: &str = "Account id must not be empty.";

/// Errors that can occur while managing accounts or transferring money.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    /// The request is malformed or cannot be honoured as given.
    #[error("{0}")]
    Validation(String),
    /// No account is stored under the given id.
    #[error("{0} Account not found.")]
    NotFound(AccountId),
    /// An account with the given id already exists.
    #[error("Account id {0} already exists!")]
    DuplicateAccount(AccountId),
    /// Raised by `Account::debit` when the balance would go negative.
    #[error("Insufficient funds for debit")]
    InsufficientBalance,
    /// The resulting balance is outside the decimal range.
    #[error("Balance exceeds the representable range")]
    BalanceOverflow,
    /// The resulting balance cannot be represented without rounding.
    #[error("Balance cannot hold the amount without rounding")]
    PrecisionLoss,
}

impl BankError {
    pub(crate) fn validation(message: &str) -> Self {
        BankError::Validation(message.to_owned())
    }
}
