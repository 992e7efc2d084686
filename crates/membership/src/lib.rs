//! Membership service: registered users, token issuance and the wallet ledger.
//!
//! The wallet is the only balance-bearing state in the platform. Every balance
//! change is recorded as an append-only [`Transaction`] written in the same
//! atomic step as the mutation it documents, and debits never take a balance
//! below zero.

pub mod auth;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod service;
pub mod store;
pub mod user;
pub mod wallet;

pub use auth::{Claims, TokenIssuer};
pub use error::{MembershipError, Result};
pub use memory::InMemoryMembershipStore;
pub use postgres::PostgresMembershipStore;
pub use service::{AuthPayload, MembershipService, RegisterUser};
pub use store::MembershipStore;
pub use user::{Credentials, ProfileUpdate, User};
pub use wallet::{Transaction, TransactionKind, WalletAccount, WalletReceipt};
