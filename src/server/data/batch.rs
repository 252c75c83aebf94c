//! Batch repository.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::batch::{Batch, BatchParams},
};

pub struct BatchRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BatchRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an active batch under a center.
    ///
    /// # Returns
    /// - `Ok(Batch)` - Created batch
    /// - `Err(AppError::DbErr)` - Database error during insert
    pub async fn create(&self, center_id: i32, params: BatchParams) -> Result<Batch, AppError> {
        let now = Utc::now();
        let entity = entity::batch::ActiveModel {
            center_id: ActiveValue::Set(center_id),
            sport_id: ActiveValue::Set(params.sport_id),
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            schedule_days: ActiveValue::Set(params.schedule.days_json()),
            start_time: ActiveValue::Set(params.schedule.start_time),
            end_time: ActiveValue::Set(params.schedule.end_time),
            start_date: ActiveValue::Set(params.start_date),
            end_date: ActiveValue::Set(params.end_date),
            capacity: ActiveValue::Set(params.capacity),
            age_min: ActiveValue::Set(params.age_min),
            age_max: ActiveValue::Set(params.age_max),
            fee_type: ActiveValue::Set(params.fee.fee_type()),
            fee_configuration: ActiveValue::Set(params.fee.to_json()),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Batch::from_entity(entity)?)
    }

    /// Replaces every editable field of a batch.
    ///
    /// # Returns
    /// - `Ok(Some(Batch))` - Updated batch
    /// - `Ok(None)` - No batch with that id
    pub async fn update(&self, id: i32, params: BatchParams) -> Result<Option<Batch>, AppError> {
        let Some(existing) = entity::prelude::Batch::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::batch::ActiveModel = existing.into();
        active.sport_id = ActiveValue::Set(params.sport_id);
        active.name = ActiveValue::Set(params.name);
        active.description = ActiveValue::Set(params.description);
        active.schedule_days = ActiveValue::Set(params.schedule.days_json());
        active.start_time = ActiveValue::Set(params.schedule.start_time);
        active.end_time = ActiveValue::Set(params.schedule.end_time);
        active.start_date = ActiveValue::Set(params.start_date);
        active.end_date = ActiveValue::Set(params.end_date);
        active.capacity = ActiveValue::Set(params.capacity);
        active.age_min = ActiveValue::Set(params.age_min);
        active.age_max = ActiveValue::Set(params.age_max);
        active.fee_type = ActiveValue::Set(params.fee.fee_type());
        active.fee_configuration = ActiveValue::Set(params.fee.to_json());
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;
        Ok(Some(Batch::from_entity(entity)?))
    }

    pub async fn set_active(&self, id: i32, is_active: bool) -> Result<(), DbErr> {
        entity::prelude::Batch::update_many()
            .filter(entity::batch::Column::Id.eq(id))
            .col_expr(entity::batch::Column::IsActive, Expr::value(is_active))
            .col_expr(entity::batch::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Batch>, AppError> {
        let entity = entity::prelude::Batch::find_by_id(id).one(self.db).await?;
        Ok(entity.map(Batch::from_entity).transpose()?)
    }

    /// Batches of a center ordered by start date.
    pub async fn get_by_center(
        &self,
        center_id: i32,
        active_only: bool,
    ) -> Result<Vec<Batch>, AppError> {
        let mut query =
            entity::prelude::Batch::find().filter(entity::batch::Column::CenterId.eq(center_id));
        if active_only {
            query = query.filter(entity::batch::Column::IsActive.eq(true));
        }
        let entities = query
            .order_by_asc(entity::batch::Column::StartDate)
            .order_by_asc(entity::batch::Column::Id)
            .all(self.db)
            .await?;

        entities
            .into_iter()
            .map(|e| Batch::from_entity(e).map_err(AppError::from))
            .collect()
    }

    /// Whether any active batch of the center still teaches `sport_id`.
    pub async fn center_uses_sport(&self, center_id: i32, sport_id: i32) -> Result<bool, DbErr> {
        let found = entity::prelude::Batch::find()
            .filter(entity::batch::Column::CenterId.eq(center_id))
            .filter(entity::batch::Column::SportId.eq(sport_id))
            .filter(entity::batch::Column::IsActive.eq(true))
            .one(self.db)
            .await?;
        Ok(found.is_some())
    }
}
