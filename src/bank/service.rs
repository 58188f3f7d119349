//! The accounts service: account management and the money transfer engine.
use std::sync::{Mutex, PoisonError};

use tracing::{debug, info, warn};

use crate::bank::{
    ACCOUNT_ID_EMPTY, Account, AccountStore, BankError, Money, NotificationSink, TransferRequest,
};

/// Owns the account store and the notification sink, and serializes transfers.
pub struct AccountsService<S, N> {
    store: S,
    notifier: N,
    /// Held for the resolve, validate, mutate and persist phase of every transfer.
    transfer_lock: Mutex<()>,
}

impl<S: AccountStore, N: NotificationSink> AccountsService<S, N> {
    pub fn new(store: S, notifier: N) -> Self {
        AccountsService {
            store,
            notifier,
            transfer_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Registers a new account. Fails if the id is empty or already in use.
    pub fn create_account(&self, account: Account) -> Result<(), BankError> {
        if account.id().is_empty() {
            return Err(BankError::validation(ACCOUNT_ID_EMPTY));
        }
        self.store.create(account)
    }

    /// Fetches a snapshot of an account.
    pub fn get_account(&self, id: &str) -> Result<Account, BankError> {
        self.store
            .get(id)
            .ok_or_else(|| BankError::NotFound(id.to_owned()))
    }

    /// Moves `request.amount` from the sender to the recipient.
    ///
    /// Both balances change together or not at all. Notifications are sent
    /// once the transfer is committed and the lock is released; their
    /// failure never affects the result.
    pub fn transfer(&self, request: &TransferRequest) -> Result<(), BankError> {
        let (sender, recipient, amount) = {
            let _guard = self
                .transfer_lock
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            self.apply(request)?
        };

        info!(
            sender = sender.id(),
            recipient = recipient.id(),
            %amount,
            "transfer committed"
        );
        self.notifier
            .notify(&sender, &request.sender_message(amount));
        self.notifier
            .notify(&recipient, &request.recipient_message(amount));
        Ok(())
    }

    /// Runs under the transfer lock. Nothing is persisted unless both legs succeed.
    fn apply(&self, request: &TransferRequest) -> Result<(Account, Account, Money), BankError> {
        let (mut sender, mut recipient, amount) = request
            .validate(
                self.store.get(&request.sender_account_id),
                self.store.get(&request.recipient_account_id),
            )
            .inspect_err(|err| debug!(%err, "transfer rejected"))?;

        if sender.id() == recipient.id() {
            // Same record on both sides: the debit and credit cancel out.
            sender.debit(amount)?;
            sender.credit(amount)?;
            self.store.update(sender.clone());
            return Ok((sender.clone(), sender, amount));
        }

        sender.debit(amount).inspect_err(|err| {
            warn!(%err, sender = sender.id(), "debit guard tripped after validation");
        })?;
        recipient.credit(amount)?;

        self.store.update(sender.clone());
        self.store.update(recipient.clone());
        Ok((sender, recipient, amount))
    }
}
