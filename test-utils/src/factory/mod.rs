//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation. Factories never
//! create their parents implicitly; use `helpers` for whole dependency chains.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let user = factory::user::create_user(&db).await?;
//!     let (academy, center, sport, batch) =
//!         factory::helpers::create_batch_with_dependencies(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let academy = factory::user::UserFactory::new(&db)
//!     .role(UserRole::Academy)
//!     .email("coach@example.com")
//!     .build()
//!     .await?;
//! ```

pub mod admin_role;
pub mod batch;
pub mod booking;
pub mod catalog;
pub mod center;
pub mod helpers;
pub mod location;
pub mod participant;
pub mod user;

pub use admin_role::create_admin_role;
pub use batch::create_batch;
pub use booking::create_booking;
pub use catalog::{create_facility, create_sport};
pub use center::{create_center, create_center_sport};
pub use location::create_city;
pub use participant::create_participant;
pub use user::create_user;
