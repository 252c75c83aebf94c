use sea_orm::entity::prelude::*;

use crate::sea_orm_active_enums::{BookingStatus, PaymentStatus};

/// Booking of one or more participants on a batch.
///
/// The `payment_*` and `gateway_*` columns form the payment sub-document.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "booking")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub booking_ref: String,
    pub user_id: i32,
    pub batch_id: i32,
    pub center_id: i32,
    pub quantity: i32,
    pub amount: i64,
    pub currency: String,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    #[sea_orm(unique)]
    pub gateway_order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub gateway_signature: Option<String>,
    pub failure_reason: Option<String>,
    pub paid_at: Option<DateTimeUtc>,
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
    #[sea_orm(
        belongs_to = "super::batch::Entity",
        from = "Column::BatchId",
        to = "super::batch::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Batch,
    #[sea_orm(
        belongs_to = "super::coaching_center::Entity",
        from = "Column::CenterId",
        to = "super::coaching_center::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    CoachingCenter,
    #[sea_orm(has_many = "super::booking_participant::Entity")]
    BookingParticipant,
    #[sea_orm(has_many = "super::payment_transaction::Entity")]
    PaymentTransaction,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::batch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Batch.def()
    }
}

impl Related<super::coaching_center::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CoachingCenter.def()
    }
}

impl Related<super::booking_participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingParticipant.def()
    }
}

impl Related<super::payment_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentTransaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
