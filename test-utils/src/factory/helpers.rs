//! Shared helper utilities for factory methods.
//!
//! Provides unique value generation and convenience methods for creating entities
//! together with the rows they depend on.

use entity::sea_orm_active_enums::UserRole;
use sea_orm::{DatabaseConnection, DbErr};

use crate::factory::{
    batch::create_batch, catalog::create_sport, center::CoachingCenterFactory,
    user::UserFactory,
};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates an academy user, a published center offering one sport, and an active batch.
///
/// # Returns
/// - `Ok((academy, center, sport, batch))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_batch_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::coaching_center::Model,
        entity::sport::Model,
        entity::batch::Model,
    ),
    DbErr,
> {
    let academy = UserFactory::new(db).role(UserRole::Academy).build().await?;
    let sport = create_sport(db).await?;
    let center = CoachingCenterFactory::new(db, academy.id)
        .published()
        .sport(sport.id)
        .build()
        .await?;
    let batch = create_batch(db, center.id, sport.id).await?;

    Ok((academy, center, sport, batch))
}
