use sea_orm::entity::prelude::*;

use crate::sea_orm_active_enums::{Gender, ParticipantRelation};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "participant")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Date,
    pub gender: Gender,
    pub relation: ParticipantRelation,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::booking_participant::Entity")]
    BookingParticipant,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::booking_participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingParticipant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
