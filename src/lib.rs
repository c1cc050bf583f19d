//! Rust client for the GoCardless Bank Account Data (formerly Nordigen) REST API.
//! Covers accounts, institutions and requisitions over an injectable,
//! already authenticated transport, decoding responses into typed models.

pub mod client;
pub mod error;
pub mod models;
pub mod request;
pub mod transport;

pub use client::Client;
pub use error::{ApiError, BoxError, NordigenError};
pub use models::{
    AccountBalance, AccountBalances, AccountDescriptor, AccountDetails, AccountMetadata,
    AccountTransactions, Amount, BookedTransaction, CounterpartyAccount, Institution,
    NewRequisition, PendingTransaction, Requisition, Requisitions, TransactionList,
};
pub use request::ApiRequest;
pub use transport::{BASE_URL, HttpTransport, ResponseBody, Transport, TransportResponse};
