mod booking;
mod center;
mod content;
mod participant;
mod refresh_token;
mod transaction;
mod user;
