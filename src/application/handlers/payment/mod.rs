//! Payment handlers.
//!
//! ## Commands
//! - Create a gateway order for an appointment
//! - Verify a payment callback and reconcile the appointment

mod create_order;
mod verify_payment;

pub use create_order::{CreateOrderCommand, CreateOrderHandler, CreateOrderResult};
pub use verify_payment::{VerifyPaymentCommand, VerifyPaymentHandler, VerifyPaymentResult};
