use crate::server::data::refresh_token::RefreshTokenRepository;
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod purge_before;
mod revoke_for_device;
