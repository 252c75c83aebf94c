//! Wire DTOs shared by every controller.
//!
//! These types are the JSON contract of the `/api/v1` surface. Controllers convert
//! them into server-side parameter models and convert domain models back into them.

pub mod admin;
pub mod api;
pub mod auth;
pub mod batch;
pub mod booking;
pub mod catalog;
pub mod center;
pub mod content;
pub mod participant;
pub mod user;
