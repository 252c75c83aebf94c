use crate::server::{
    data::{banner::BannerRepository, notification::NotificationRepository},
    model::{
        content::{BannerParams, NotificationParams},
        pagination::PageRequest,
    },
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod banner;
mod notification;
