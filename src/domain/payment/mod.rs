//! Payment reconciliation: the ledger record and signature verification.

mod record;
mod signature;

pub use record::{PaymentRecord, PaymentRecordStatus};
pub use signature::PaymentSignatureVerifier;
