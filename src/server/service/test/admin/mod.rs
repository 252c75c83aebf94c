use entity::sea_orm_active_enums::{
    BookingStatus, PaymentStatus, TransactionKind, TransactionStatus, UserRole, UserType,
};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    config::SuperAdminConfig,
    data::{refresh_token::RefreshTokenRepository, transaction::TransactionRepository},
    error::AppError,
    model::{
        admin::{CreateAdminParams, RoleParams},
        pagination::PageRequest,
        payment::NewTransaction,
        permission::{Action, PermissionMatrix, Section},
        user::User,
    },
    service::{admin::AdminService, token::hash_token},
};

mod dashboard;
mod roles;
mod users;

fn role(name: &str) -> RoleParams {
    let mut permissions = PermissionMatrix::default();
    permissions.grant(Section::Bookings, Action::View);
    RoleParams {
        name: name.to_string(),
        description: None,
        permissions,
    }
}
