use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Add entity tables in dependency order (referenced tables first), then call `build()`.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, Participant};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Participant)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the tables needed for authentication: AdminRole, User and RefreshToken.
    pub fn with_identity_tables(self) -> Self {
        self.with_table(AdminRole)
            .with_table(User)
            .with_table(RefreshToken)
    }

    /// Adds the catalog and location tables on top of the identity tables.
    pub fn with_catalog_tables(self) -> Self {
        self.with_identity_tables()
            .with_table(Sport)
            .with_table(Facility)
            .with_table(Country)
            .with_table(State)
            .with_table(City)
    }

    /// Adds coaching center, center sport and batch tables on top of the catalog tables.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let test = TestBuilder::new()
    ///     .with_center_tables()
    ///     .build()
    ///     .await?;
    /// ```
    pub fn with_center_tables(self) -> Self {
        self.with_catalog_tables()
            .with_table(CoachingCenter)
            .with_table(CenterSport)
            .with_table(Batch)
    }

    /// Adds every table needed to create bookings and record payments.
    pub fn with_booking_tables(self) -> Self {
        self.with_center_tables()
            .with_table(Participant)
            .with_table(Booking)
            .with_table(BookingParticipant)
            .with_table(PaymentTransaction)
    }

    /// Adds CMS page, banner and notification tables on top of the identity tables.
    pub fn with_content_tables(self) -> Self {
        self.with_identity_tables()
            .with_table(CmsPage)
            .with_table(Banner)
            .with_table(Notification)
    }

    /// Builds the test context, creating every configured table.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized test context with tables ready
    /// - `Err(TestError::Database)` - Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
