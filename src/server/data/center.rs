//! Coaching center repository.
//!
//! A center is stored as one `coaching_center` row plus one `center_sport` row per
//! offered sport. Every read reassembles both into a [`Center`].

use std::collections::HashMap;

use chrono::Utc;
use entity::sea_orm_active_enums::CenterStatus;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, Iterable, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{
    error::AppError,
    model::{
        center::{Center, CenterFilter, CenterProfile},
        pagination::{PageRequest, Paginated},
    },
};

pub struct CenterRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CenterRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a draft center owned by `owner_id`.
    ///
    /// # Returns
    /// - `Ok(Center)` - The created center with its sports
    /// - `Err(AppError::DbErr)` - Database error during insert
    pub async fn create(&self, owner_id: i32, profile: CenterProfile) -> Result<Center, AppError> {
        let now = Utc::now();
        let entity = entity::coaching_center::ActiveModel {
            owner_id: ActiveValue::Set(owner_id),
            name: ActiveValue::Set(profile.name.clone()),
            description: ActiveValue::Set(profile.description.clone()),
            email: ActiveValue::Set(profile.email.clone()),
            mobile: ActiveValue::Set(profile.mobile.clone()),
            address_line1: ActiveValue::Set(profile.address.line1.clone()),
            address_line2: ActiveValue::Set(profile.address.line2.clone()),
            city_id: ActiveValue::Set(profile.address.city_id),
            pincode: ActiveValue::Set(profile.address.pincode.clone()),
            latitude: ActiveValue::Set(profile.address.latitude),
            longitude: ActiveValue::Set(profile.address.longitude),
            facility_ids: ActiveValue::Set(profile.facility_ids_json()),
            operational_timing: ActiveValue::Set(profile.timing_json()),
            bank_info: ActiveValue::Set(profile.bank_info_json()),
            status: ActiveValue::Set(CenterStatus::Draft),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let sports = self.replace_sports(entity.id, &profile).await?;
        Ok(Center::from_entity(entity, sports)?)
    }

    /// Replaces the whole profile of a center, keeping its owner and status.
    ///
    /// # Returns
    /// - `Ok(Some(Center))` - Updated center
    /// - `Ok(None)` - No center with that id
    pub async fn update(
        &self,
        id: i32,
        profile: CenterProfile,
    ) -> Result<Option<Center>, AppError> {
        let Some(existing) = entity::prelude::CoachingCenter::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::coaching_center::ActiveModel = existing.into();
        active.name = ActiveValue::Set(profile.name.clone());
        active.description = ActiveValue::Set(profile.description.clone());
        active.email = ActiveValue::Set(profile.email.clone());
        active.mobile = ActiveValue::Set(profile.mobile.clone());
        active.address_line1 = ActiveValue::Set(profile.address.line1.clone());
        active.address_line2 = ActiveValue::Set(profile.address.line2.clone());
        active.city_id = ActiveValue::Set(profile.address.city_id);
        active.pincode = ActiveValue::Set(profile.address.pincode.clone());
        active.latitude = ActiveValue::Set(profile.address.latitude);
        active.longitude = ActiveValue::Set(profile.address.longitude);
        active.facility_ids = ActiveValue::Set(profile.facility_ids_json());
        active.operational_timing = ActiveValue::Set(profile.timing_json());
        active.bank_info = ActiveValue::Set(profile.bank_info_json());
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;
        let sports = self.replace_sports(id, &profile).await?;
        Ok(Some(Center::from_entity(entity, sports)?))
    }

    async fn replace_sports(
        &self,
        center_id: i32,
        profile: &CenterProfile,
    ) -> Result<Vec<entity::center_sport::Model>, DbErr> {
        entity::prelude::CenterSport::delete_many()
            .filter(entity::center_sport::Column::CenterId.eq(center_id))
            .exec(self.db)
            .await?;

        let mut rows = Vec::with_capacity(profile.sports.len());
        for sport in &profile.sports {
            let row = entity::center_sport::ActiveModel {
                center_id: ActiveValue::Set(center_id),
                sport_id: ActiveValue::Set(sport.sport_id),
                description: ActiveValue::Set(sport.description.clone()),
                images: ActiveValue::Set(serde_json::json!(sport.images)),
                videos: ActiveValue::Set(serde_json::json!(sport.videos)),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
            rows.push(row);
        }
        Ok(rows)
    }

    pub async fn set_status(&self, id: i32, status: CenterStatus) -> Result<(), DbErr> {
        entity::prelude::CoachingCenter::update_many()
            .filter(entity::coaching_center::Column::Id.eq(id))
            .col_expr(entity::coaching_center::Column::Status, Expr::value(status))
            .col_expr(
                entity::coaching_center::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Center>, AppError> {
        let Some(entity) = entity::prelude::CoachingCenter::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let sports = entity::prelude::CenterSport::find()
            .filter(entity::center_sport::Column::CenterId.eq(id))
            .order_by_asc(entity::center_sport::Column::Id)
            .all(self.db)
            .await?;

        Ok(Some(Center::from_entity(entity, sports)?))
    }

    pub async fn get_by_owner(&self, owner_id: i32) -> Result<Vec<Center>, AppError> {
        let entities = entity::prelude::CoachingCenter::find()
            .filter(entity::coaching_center::Column::OwnerId.eq(owner_id))
            .order_by_desc(entity::coaching_center::Column::CreatedAt)
            .all(self.db)
            .await?;

        self.with_sports(entities).await
    }

    /// Lists centers newest first matching `filter`.
    ///
    /// The sport filter matches centers offering that sport.
    pub async fn get_paginated(
        &self,
        filter: CenterFilter,
        page: PageRequest,
    ) -> Result<Paginated<Center>, AppError> {
        let mut query = entity::prelude::CoachingCenter::find();
        if let Some(status) = filter.status {
            query = query.filter(entity::coaching_center::Column::Status.eq(status));
        }
        if let Some(city_id) = filter.city_id {
            query = query.filter(entity::coaching_center::Column::CityId.eq(city_id));
        }
        if let Some(sport_id) = filter.sport_id {
            let center_ids: Vec<i32> = entity::prelude::CenterSport::find()
                .select_only()
                .column(entity::center_sport::Column::CenterId)
                .filter(entity::center_sport::Column::SportId.eq(sport_id))
                .into_tuple()
                .all(self.db)
                .await?;
            query = query.filter(entity::coaching_center::Column::Id.is_in(center_ids));
        }

        let paginator = query
            .order_by_desc(entity::coaching_center::Column::CreatedAt)
            .order_by_desc(entity::coaching_center::Column::Id)
            .paginate(self.db, page.per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.page).await?;
        let centers = self.with_sports(entities).await?;

        Ok(Paginated::new(centers, total, page))
    }

    async fn with_sports(
        &self,
        entities: Vec<entity::coaching_center::Model>,
    ) -> Result<Vec<Center>, AppError> {
        let ids: Vec<i32> = entities.iter().map(|e| e.id).collect();
        let mut sports_by_center: HashMap<i32, Vec<entity::center_sport::Model>> = HashMap::new();
        if !ids.is_empty() {
            let rows = entity::prelude::CenterSport::find()
                .filter(entity::center_sport::Column::CenterId.is_in(ids))
                .order_by_asc(entity::center_sport::Column::Id)
                .all(self.db)
                .await?;
            for row in rows {
                sports_by_center.entry(row.center_id).or_default().push(row);
            }
        }

        entities
            .into_iter()
            .map(|entity| {
                let sports = sports_by_center.remove(&entity.id).unwrap_or_default();
                Center::from_entity(entity, sports).map_err(AppError::from)
            })
            .collect()
    }

    /// Deletes a center and its sport rows.
    ///
    /// # Returns
    /// - `Ok(true)` - Center deleted
    /// - `Ok(false)` - No center with that id
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        entity::prelude::CenterSport::delete_many()
            .filter(entity::center_sport::Column::CenterId.eq(id))
            .exec(self.db)
            .await?;
        entity::prelude::Batch::delete_many()
            .filter(entity::batch::Column::CenterId.eq(id))
            .exec(self.db)
            .await?;
        let result = entity::prelude::CoachingCenter::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count_by_status(&self) -> Result<Vec<(CenterStatus, u64)>, DbErr> {
        let mut counts = Vec::new();
        for status in CenterStatus::iter() {
            let count = entity::prelude::CoachingCenter::find()
                .filter(entity::coaching_center::Column::Status.eq(status))
                .count(self.db)
                .await?;
            counts.push((status, count));
        }
        Ok(counts)
    }
}
