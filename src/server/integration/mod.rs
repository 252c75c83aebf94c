//! Clients for third-party services.
//!
//! Each integration sits behind a trait so services and tests can swap the HTTP-backed
//! client for an in-process implementation.

pub mod firebase;
pub mod razorpay;
pub mod sms;
