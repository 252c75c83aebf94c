//! Participant factory.

use crate::factory::helpers::next_id;
use chrono::{Duration, NaiveDate, Utc};
use entity::sea_orm_active_enums::{Gender, ParticipantRelation};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for participants. Defaults to a ten year old child.
pub struct ParticipantFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    date_of_birth: NaiveDate,
    relation: ParticipantRelation,
}

impl<'a> ParticipantFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            date_of_birth: (Utc::now() - Duration::days(365 * 10 + 3)).date_naive(),
            relation: ParticipantRelation::Child,
        }
    }

    pub fn date_of_birth(mut self, date_of_birth: NaiveDate) -> Self {
        self.date_of_birth = date_of_birth;
        self
    }

    /// Sets the date of birth so the participant is `years` old today.
    pub fn age(mut self, years: i64) -> Self {
        self.date_of_birth = (Utc::now() - Duration::days(365 * years + years / 4 + 3)).date_naive();
        self
    }

    pub fn relation(mut self, relation: ParticipantRelation) -> Self {
        self.relation = relation;
        self
    }

    pub async fn build(self) -> Result<entity::participant::Model, DbErr> {
        let now = Utc::now();
        let id = next_id();
        entity::participant::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            first_name: ActiveValue::Set(format!("Kid{}", id)),
            last_name: ActiveValue::Set("Sharma".to_string()),
            date_of_birth: ActiveValue::Set(self.date_of_birth),
            gender: ActiveValue::Set(Gender::Other),
            relation: ActiveValue::Set(self.relation),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a ten year old child participant for `user_id`.
pub async fn create_participant(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::participant::Model, DbErr> {
    ParticipantFactory::new(db, user_id).build().await
}
