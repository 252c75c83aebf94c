use crate::server::{
    data::user::UserRepository,
    model::{
        auth::Contact,
        pagination::PageRequest,
        user::{CreateUserParams, UpdateProfileParams},
    },
};
use entity::sea_orm_active_enums::{UserRole, UserType};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod find_by_contact;
mod get_paginated;
mod set_verified_contact;
mod update_profile;
