//! Arena Server Library
//!
//! Competition engine for the arena booking platform. The booking, payment
//! and HTTP layers call into `competition` and persist what it returns.

pub mod competition;
pub mod config;
