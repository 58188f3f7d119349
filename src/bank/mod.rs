//! Banking module for handling accounts, storage, transfers and notifications.
mod account;
mod error;
mod notification;
mod operation;
mod service;
mod store;
mod transfer;
mod types;

pub use account::*;
pub use error::*;
pub use notification::*;
pub use operation::*;
pub use service::*;
pub use store::*;
pub use transfer::*;
pub use types::*;
