pub use super::admin_role::Entity as AdminRole;
pub use super::banner::Entity as Banner;
pub use super::batch::Entity as Batch;
pub use super::booking::Entity as Booking;
pub use super::booking_participant::Entity as BookingParticipant;
pub use super::center_sport::Entity as CenterSport;
pub use super::city::Entity as City;
pub use super::cms_page::Entity as CmsPage;
pub use super::coaching_center::Entity as CoachingCenter;
pub use super::country::Entity as Country;
pub use super::facility::Entity as Facility;
pub use super::notification::Entity as Notification;
pub use super::participant::Entity as Participant;
pub use super::payment_transaction::Entity as PaymentTransaction;
pub use super::refresh_token::Entity as RefreshToken;
pub use super::sport::Entity as Sport;
pub use super::state::Entity as State;
pub use super::user::Entity as User;
