use crate::server::{
    data::center::CenterRepository,
    error::AppError,
    model::{
        center::{CenterFilter, CenterProfile, CenterSport},
        pagination::PageRequest,
    },
};
use entity::sea_orm_active_enums::{CenterStatus, UserRole};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_paginated;
mod update;

fn profile_with_sport(sport_id: i32) -> CenterProfile {
    CenterProfile {
        name: "Smash Academy".to_string(),
        sports: vec![CenterSport {
            sport_id,
            description: None,
            images: vec!["https://cdn.example.com/a.jpg".to_string()],
            videos: Vec::new(),
        }],
        ..Default::default()
    }
}
