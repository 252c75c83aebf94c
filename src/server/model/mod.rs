//! Server-side domain models and operation parameters.
//!
//! Domain models are built from entities at the repository boundary (`from_entity`)
//! and turned into wire DTOs by controllers (`into_dto`). Parameter types carry
//! validated input from controllers into services.

pub mod admin;
pub mod auth;
pub mod batch;
pub mod booking;
pub mod catalog;
pub mod center;
pub mod content;
pub mod fee;
pub mod pagination;
pub mod participant;
pub mod payment;
pub mod permission;
pub mod user;
