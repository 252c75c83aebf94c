use sea_orm::entity::prelude::*;

use crate::sea_orm_active_enums::FeeType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "batch")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub center_id: i32,
    pub sport_id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Weekday short names (`mon`..`sun`).
    #[sea_orm(column_type = "Json")]
    pub schedule_days: Json,
    pub start_time: Time,
    pub end_time: Time,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub capacity: i32,
    pub age_min: i32,
    pub age_max: i32,
    pub fee_type: FeeType,
    #[sea_orm(column_type = "Json")]
    pub fee_configuration: Json,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::coaching_center::Entity",
        from = "Column::CenterId",
        to = "super::coaching_center::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    CoachingCenter,
    #[sea_orm(
        belongs_to = "super::sport::Entity",
        from = "Column::SportId",
        to = "super::sport::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Sport,
    #[sea_orm(has_many = "super::booking::Entity")]
    Booking,
}

impl Related<super::coaching_center::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CoachingCenter.def()
    }
}

impl Related<super::sport::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sport.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
