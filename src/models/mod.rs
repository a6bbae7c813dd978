//! Data Models
//!
//! Entity rows, API projections, and request/response payloads.

pub mod admin;
pub mod auth;
pub mod customer;
pub mod pagination;
pub mod requests;
pub mod transaction;

pub use admin::{Admin, AdminProfile};
pub use auth::{AdminContext, Claims, LoginResponse};
pub use customer::{
    CustomerDetail, CustomerListItem, CustomerRecord, Device, DeviceStatus, PendingVerification,
};
pub use pagination::{PageParams, Pagination, ResolvedPage, MAX_PAGE_LIMIT};
pub use transaction::{
    Transaction, TransactionDetail, TransactionListItem, TransactionStats, TransactionStatus,
    TransactionType, TypeTotals,
};
