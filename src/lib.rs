//! CounselHub - Appointment booking and lifecycle engine for an online
//! counseling marketplace.
//!
//! Clients book time slots with counselors against a weekly availability
//! template; counselors drive each appointment through its status
//! lifecycle; payment reconciliation confirms bookings once the gateway's
//! signed callback checks out.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
