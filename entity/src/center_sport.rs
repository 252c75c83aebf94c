use sea_orm::entity::prelude::*;

/// Sport offered by a coaching center together with its sport-specific media.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "center_sport")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub center_id: i32,
    pub sport_id: i32,
    pub description: Option<String>,
    #[sea_orm(column_type = "Json")]
    pub images: Json,
    #[sea_orm(column_type = "Json")]
    pub videos: Json,
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
        on_delete = "Cascade"
    )]
    Sport,
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

impl ActiveModelBehavior for ActiveModel {}
