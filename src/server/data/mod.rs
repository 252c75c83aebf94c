//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to maintain separation between the data layer and business logic layer.
//! All database queries, inserts, updates, and deletes are performed through these repositories.

pub mod admin_role;
pub mod banner;
pub mod batch;
pub mod booking;
pub mod center;
pub mod cms_page;
pub mod facility;
pub mod location;
pub mod notification;
pub mod participant;
pub mod refresh_token;
pub mod sport;
pub mod transaction;
pub mod user;

#[cfg(test)]
mod test;
