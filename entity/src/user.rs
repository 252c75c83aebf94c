use sea_orm::entity::prelude::*;

use crate::sea_orm_active_enums::{UserRole, UserType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub role: UserRole,
    pub user_type: Option<UserType>,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: Option<String>,
    #[sea_orm(unique)]
    pub mobile: Option<String>,
    pub password_hash: Option<String>,
    pub is_email_verified: bool,
    pub is_mobile_verified: bool,
    #[sea_orm(unique)]
    pub firebase_uid: Option<String>,
    pub admin_role_id: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::admin_role::Entity",
        from = "Column::AdminRoleId",
        to = "super::admin_role::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    AdminRole,
    #[sea_orm(has_many = "super::refresh_token::Entity")]
    RefreshToken,
    #[sea_orm(has_many = "super::participant::Entity")]
    Participant,
    #[sea_orm(has_many = "super::coaching_center::Entity")]
    CoachingCenter,
    #[sea_orm(has_many = "super::booking::Entity")]
    Booking,
}

impl Related<super::admin_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdminRole.def()
    }
}

impl Related<super::refresh_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RefreshToken.def()
    }
}

impl Related<super::participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participant.def()
    }
}

impl Related<super::coaching_center::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CoachingCenter.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
