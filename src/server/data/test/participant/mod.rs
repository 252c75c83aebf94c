use crate::server::data::participant::ParticipantRepository;
use entity::sea_orm_active_enums::ParticipantRelation;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod count_self;
mod find_many_for_user;
