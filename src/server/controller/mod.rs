pub mod admin;
pub mod auth;
pub mod batch;
pub mod booking;
pub mod catalog;
pub mod center;
pub mod content;
pub mod location;
pub mod participant;
pub mod payment;
pub mod user;
