//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing core business rules and validation
//! - **Orchestration**: Coordinating multiple repository calls and external services
//! - **Domain Models**: Working with domain models rather than DTOs or entity models

pub mod admin;
pub mod auth;
pub mod batch;
pub mod booking;
pub mod catalog;
pub mod center;
pub mod content;
pub mod location;
pub mod otp;
pub mod participant;
pub mod payment;
pub mod token;
pub mod user;

#[cfg(test)]
pub(crate) mod test;
