//! Batch operations read from CSV input and applied to the accounts service.
use serde::Deserialize;

use crate::bank::{
    Account, AccountId, AccountStore, AccountsService, BankError, NotificationSink,
    TransferRequest,
    types::{Money, deserialize_money},
};

/// Enum representing the kind of operation.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Create,
    Transfer,
}

/// Represents one row of batch input.
#[derive(Deserialize, Debug, Clone)]
pub struct Operation {
    #[serde(rename = "type")]
    op_type: OperationType,

    /// The account being created, or the sender of a transfer.
    account: AccountId,

    /// The recipient of a transfer. Unused for `create`.
    #[serde(default)]
    counterparty: Option<AccountId>,

    /// Opening balance for `create`, transferred amount for `transfer`.
    #[serde(default, deserialize_with = "deserialize_money")]
    amount: Option<Money>,
}

impl Operation {
    /// Gets the type of the operation.
    pub fn get_type(&self) -> OperationType {
        self.op_type
    }

    /// Gets the account being created, or the sender of a transfer.
    pub fn get_account(&self) -> &str {
        &self.account
    }

    /// Applies the operation to the service.
    pub fn apply<S, N>(self, service: &AccountsService<S, N>) -> Result<(), BankError>
    where
        S: AccountStore,
        N: NotificationSink,
    {
        match self.op_type {
            OperationType::Create => {
                let account = match self.amount {
                    Some(balance) => Account::with_balance(self.account, balance)?,
                    None => Account::new(self.account),
                };
                service.create_account(account)
            }
            OperationType::Transfer => {
                let request = TransferRequest::new(
                    self.amount,
                    self.account,
                    self.counterparty.unwrap_or_default(),
                );
                service.transfer(&request)
            }
        }
    }
}
