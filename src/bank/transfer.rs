//! Transfer requests and their validation.
use crate::bank::{
    AMOUNT_INVALID, AMOUNT_NOT_SPECIFIED, Account, AccountId, BankError, INSUFFICIENT_BALANCE,
    types::Money,
};

/// A request to move money from one account to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    /// The amount to move. `None` means the caller never specified one.
    pub amount: Option<Money>,
    pub sender_account_id: AccountId,
    pub recipient_account_id: AccountId,
}

impl TransferRequest {
    pub fn new(
        amount: Option<Money>,
        sender_account_id: impl Into<AccountId>,
        recipient_account_id: impl Into<AccountId>,
    ) -> Self {
        TransferRequest {
            amount,
            sender_account_id: sender_account_id.into(),
            recipient_account_id: recipient_account_id.into(),
        }
    }

    /// Checks the request against the resolved accounts and hands them back with the amount to move.
    /// The first failing rule wins: sender, recipient, amount presence, sign, then balance.
    /// A zero amount passes.
    pub(crate) fn validate(
        &self,
        sender: Option<Account>,
        recipient: Option<Account>,
    ) -> Result<(Account, Account, Money), BankError> {
        let sender = sender.ok_or_else(|| BankError::NotFound(self.sender_account_id.clone()))?;
        let recipient =
            recipient.ok_or_else(|| BankError::NotFound(self.recipient_account_id.clone()))?;
        let amount = self
            .amount
            .ok_or_else(|| BankError::validation(AMOUNT_NOT_SPECIFIED))?;
        if amount < Money::ZERO {
            return Err(BankError::validation(AMOUNT_INVALID));
        }
        if sender.balance() < amount {
            return Err(BankError::validation(INSUFFICIENT_BALANCE));
        }
        Ok((sender, recipient, amount))
    }

    /// Message sent to the sender once the transfer is committed.
    pub(crate) fn sender_message(&self, amount: Money) -> String {
        format!(
            "{amount} amount transferred to account ID: {}",
            self.recipient_account_id
        )
    }

    /// Message sent to the recipient once the transfer is committed.
    pub(crate) fn recipient_message(&self, amount: Money) -> String {
        format!(
            "{amount} amount received from account ID: {}",
            self.sender_account_id
        )
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::TransferRequest;
    use crate::bank::{Account, BankError};

    fn amount_of(
        request: &TransferRequest,
        sender: Option<&Account>,
        recipient: Option<&Account>,
    ) -> Result<Decimal, BankError> {
        request
            .validate(sender.cloned(), recipient.cloned())
            .map(|(_, _, amount)| amount)
    }

    fn accounts() -> (Account, Account) {
        (
            Account::with_balance("Id-123", Decimal::from(1000)).unwrap(),
            Account::with_balance("Id-124", Decimal::from(20)).unwrap(),
        )
    }

    #[test]
    fn test_valid_request() {
        let (sender, recipient) = accounts();
        let request = TransferRequest::new(Some(Decimal::from(30)), "Id-123", "Id-124");
        assert_eq!(
            amount_of(&request, Some(&sender), Some(&recipient)),
            Ok(Decimal::from(30))
        );
    }

    #[test]
    fn test_zero_amount_is_accepted() {
        let (sender, recipient) = accounts();
        let request = TransferRequest::new(Some(Decimal::ZERO), "Id-123", "Id-124");
        assert_eq!(
            amount_of(&request, Some(&sender), Some(&recipient)),
            Ok(Decimal::ZERO)
        );
    }

    #[test]
    fn test_sender_checked_before_recipient() {
        let request = TransferRequest::new(Some(Decimal::from(30)), "Id-1", "Id-2");
        let err = amount_of(&request, None, None).unwrap_err();
        assert_eq!(err, BankError::NotFound("Id-1".into()));
        assert_eq!(err.to_string(), "Id-1 Account not found.");
    }

    #[test]
    fn test_missing_recipient() {
        let (sender, _) = accounts();
        let request = TransferRequest::new(Some(Decimal::from(30)), "Id-123", "Id-2");
        assert_eq!(
            amount_of(&request, Some(&sender), None),
            Err(BankError::NotFound("Id-2".into()))
        );
    }

    #[test]
    fn test_accounts_checked_before_amount() {
        let request = TransferRequest::new(None, "Id-1", "Id-2");
        assert!(matches!(
            amount_of(&request, None, None),
            Err(BankError::NotFound(_))
        ));
    }

    #[test]
    fn test_missing_amount() {
        let (sender, recipient) = accounts();
        let request = TransferRequest::new(None, "Id-123", "Id-124");
        assert_eq!(
            amount_of(&request, Some(&sender), Some(&recipient)),
            Err(BankError::Validation("Amount not specified.".into()))
        );
    }

    #[test]
    fn test_negative_amount() {
        let (sender, recipient) = accounts();
        let request = TransferRequest::new(Some(Decimal::from(-30)), "Id-123", "Id-124");
        assert_eq!(
            amount_of(&request, Some(&sender), Some(&recipient)),
            Err(BankError::Validation("Amount specified is invalid.".into()))
        );
    }

    #[test]
    fn test_insufficient_balance() {
        let (sender, recipient) = accounts();
        let request = TransferRequest::new(Some(Decimal::from(2_000_000)), "Id-124", "Id-123");
        assert_eq!(
            amount_of(&request, Some(&recipient), Some(&sender)),
            Err(BankError::Validation("Insufficient balance.".into()))
        );
    }

    #[test]
    fn test_messages() {
        let request = TransferRequest::new(Some(Decimal::new(3050, 2)), "Id-123", "Id-124");
        let amount = request.amount.unwrap();
        assert_eq!(
            request.sender_message(amount),
            "30.50 amount transferred to account ID: Id-124"
        );
        assert_eq!(
            request.recipient_message(amount),
            "30.50 amount received from account ID: Id-123"
        );
    }
}
