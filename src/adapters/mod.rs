//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `email` - Transactional email delivery (Resend)
//! - `http` - REST API (Axum)
//! - `memory` - In-memory implementations for tests and local development
//! - `postgres` - PostgreSQL persistence (sqlx)
//! - `razorpay` - Payment gateway client
//! - `storage` - Attachment blob storage

pub mod email;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod razorpay;
pub mod storage;
