//! Database entities for the coaching marketplace.
//!
//! One module per table. Shared string-backed enums live in `sea_orm_active_enums`
//! and the `prelude` re-exports every `Entity` under its table name.

pub mod prelude;

pub mod admin_role;
pub mod banner;
pub mod batch;
pub mod booking;
pub mod booking_participant;
pub mod center_sport;
pub mod city;
pub mod cms_page;
pub mod coaching_center;
pub mod country;
pub mod facility;
pub mod notification;
pub mod participant;
pub mod payment_transaction;
pub mod refresh_token;
pub mod sea_orm_active_enums;
pub mod sport;
pub mod state;
pub mod user;
