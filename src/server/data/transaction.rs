//! Payment ledger repository. Entries are append-only.

use chrono::Utc;
use entity::sea_orm_active_enums::{TransactionKind, TransactionStatus};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, ExprTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::server::model::{
    pagination::{PageRequest, Paginated},
    payment::{NewTransaction, Transaction},
};

pub struct TransactionRepository<'a, C: ConnectionTrait = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TransactionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, tx: NewTransaction) -> Result<Transaction, DbErr> {
        let entity = entity::payment_transaction::ActiveModel {
            booking_id: ActiveValue::Set(tx.booking_id),
            user_id: ActiveValue::Set(tx.user_id),
            kind: ActiveValue::Set(tx.kind),
            status: ActiveValue::Set(tx.status),
            amount: ActiveValue::Set(tx.amount),
            currency: ActiveValue::Set(tx.currency),
            gateway_order_id: ActiveValue::Set(tx.gateway_order_id),
            gateway_payment_id: ActiveValue::Set(tx.gateway_payment_id),
            gateway_refund_id: ActiveValue::Set(tx.gateway_refund_id),
            note: ActiveValue::Set(tx.note),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Transaction::from_entity(entity))
    }

    /// Lists entries newest first, optionally for one user.
    pub async fn get_paginated(
        &self,
        user_id: Option<i32>,
        page: PageRequest,
    ) -> Result<Paginated<Transaction>, DbErr> {
        let mut query = entity::prelude::PaymentTransaction::find();
        if let Some(user_id) = user_id {
            query = query.filter(entity::payment_transaction::Column::UserId.eq(user_id));
        }

        let paginator = query
            .order_by_desc(entity::payment_transaction::Column::CreatedAt)
            .order_by_desc(entity::payment_transaction::Column::Id)
            .paginate(self.db, page.per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.page).await?;

        Ok(Paginated::new(
            entities.into_iter().map(Transaction::from_entity).collect(),
            total,
            page,
        ))
    }

    pub async fn get_for_booking(&self, booking_id: i32) -> Result<Vec<Transaction>, DbErr> {
        let entities = entity::prelude::PaymentTransaction::find()
            .filter(entity::payment_transaction::Column::BookingId.eq(booking_id))
            .order_by_asc(entity::payment_transaction::Column::Id)
            .all(self.db)
            .await?;
        Ok(entities.into_iter().map(Transaction::from_entity).collect())
    }

    /// Whether a successful payment entry exists for the gateway payment id.
    pub async fn has_successful_payment(&self, payment_id: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::PaymentTransaction::find()
            .filter(entity::payment_transaction::Column::Kind.eq(TransactionKind::Payment))
            .filter(entity::payment_transaction::Column::Status.eq(TransactionStatus::Success))
            .filter(entity::payment_transaction::Column::GatewayPaymentId.eq(payment_id))
            .count(self.db)
            .await?;
        Ok(count > 0)
    }

    async fn successful_sum(&self, kind: TransactionKind) -> Result<i64, DbErr> {
        let sum: Option<Option<i64>> = entity::prelude::PaymentTransaction::find()
            .select_only()
            .column_as(
                Expr::col(entity::payment_transaction::Column::Amount).sum(),
                "total",
            )
            .filter(entity::payment_transaction::Column::Kind.eq(kind))
            .filter(entity::payment_transaction::Column::Status.eq(TransactionStatus::Success))
            .into_tuple()
            .one(self.db)
            .await?;
        Ok(sum.flatten().unwrap_or(0))
    }

    /// Successful payments minus successful refunds, in minor units.
    pub async fn net_revenue(&self) -> Result<i64, DbErr> {
        let paid = self.successful_sum(TransactionKind::Payment).await?;
        let refunded = self.successful_sum(TransactionKind::Refund).await?;
        Ok(paid - refunded)
    }
}
