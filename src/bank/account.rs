//! Account entity and the balance operations that keep it non-negative.
use serde::Serialize;

use crate::bank::{
    AMOUNT_INVALID, BankError,
    types::{AccountId, Money, serialize_money},
};

/// Represents a monetary account.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// The unique identifier for the account.
    #[serde(rename = "account")]
    id: AccountId,

    /// The current balance. Never negative.
    #[serde(serialize_with = "serialize_money")]
    balance: Money,
}

impl Account {
    /// Creates a new account with a zero balance.
    pub fn new(id: impl Into<AccountId>) -> Self {
        Account {
            id: id.into(),
            balance: Money::ZERO,
        }
    }

    /// Creates a new account with an opening balance. Returns an error if the balance is negative.
    pub fn with_balance(id: impl Into<AccountId>, balance: Money) -> Result<Self, BankError> {
        if balance < Money::ZERO {
            return Err(BankError::validation(AMOUNT_INVALID));
        }
        Ok(Account {
            id: id.into(),
            balance,
        })
    }

    /// Gets the account ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Gets the current balance.
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Removes the specified amount from the balance.
    /// Returns an error if the amount is negative, if the balance would drop below zero,
    /// or if the new balance would have to be rounded. The balance is untouched on error.
    pub fn debit(&mut self, amount: Money) -> Result<(), BankError> {
        if amount < Money::ZERO {
            return Err(BankError::validation(AMOUNT_INVALID));
        }
        if self.balance < amount {
            return Err(BankError::InsufficientBalance);
        }
        let balance = self
            .balance
            .checked_sub(amount)
            .ok_or(BankError::BalanceOverflow)?;
        if !is_exact(balance, self.balance, amount)
            || balance.checked_add(amount) != Some(self.balance)
        {
            return Err(BankError::PrecisionLoss);
        }
        self.balance = balance;
        Ok(())
    }

    /// Adds the specified amount to the balance.
    /// Returns an error if the amount is negative or if the new balance would overflow or be rounded.
    pub fn credit(&mut self, amount: Money) -> Result<(), BankError> {
        if amount < Money::ZERO {
            return Err(BankError::validation(AMOUNT_INVALID));
        }
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or(BankError::BalanceOverflow)?;
        if !is_exact(balance, self.balance, amount)
            || balance.checked_sub(amount) != Some(self.balance)
        {
            return Err(BankError::PrecisionLoss);
        }
        self.balance = balance;
        Ok(())
    }
}

/// `Decimal` arithmetic keeps the larger operand scale unless it had to round digits away.
fn is_exact(result: Money, lhs: Money, rhs: Money) -> bool {
    result.scale() >= lhs.scale().max(rhs.scale())
}
