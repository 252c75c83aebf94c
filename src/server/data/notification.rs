//! Notification repository.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    content::{Notification, NotificationParams},
    pagination::{PageRequest, Paginated},
};

pub struct NotificationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: NotificationParams) -> Result<Notification, DbErr> {
        let entity = entity::notification::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            title: ActiveValue::Set(params.title),
            body: ActiveValue::Set(params.body),
            read_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Notification::from_entity(entity))
    }

    /// The user's own notifications plus broadcasts, newest first.
    pub async fn get_for_user(
        &self,
        user_id: i32,
        page: PageRequest,
    ) -> Result<Paginated<Notification>, DbErr> {
        let paginator = entity::prelude::Notification::find()
            .filter(
                Condition::any()
                    .add(entity::notification::Column::UserId.eq(user_id))
                    .add(entity::notification::Column::UserId.is_null()),
            )
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_desc(entity::notification::Column::Id)
            .paginate(self.db, page.per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.page).await?;

        Ok(Paginated::new(
            entities.into_iter().map(Notification::from_entity).collect(),
            total,
            page,
        ))
    }

    /// Marks a notification addressed to `user_id` as read.
    ///
    /// # Returns
    /// - `Ok(Some(Notification))` - The notification, read
    /// - `Ok(None)` - Not found or not addressed to the user
    pub async fn mark_read(&self, user_id: i32, id: i32) -> Result<Option<Notification>, DbErr> {
        let Some(existing) = entity::prelude::Notification::find_by_id(id)
            .filter(entity::notification::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        if existing.read_at.is_some() {
            return Ok(Some(Notification::from_entity(existing)));
        }

        entity::prelude::Notification::update_many()
            .filter(entity::notification::Column::Id.eq(id))
            .col_expr(entity::notification::Column::ReadAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        let entity = entity::prelude::Notification::find_by_id(id).one(self.db).await?;
        Ok(entity.map(Notification::from_entity))
    }
}
