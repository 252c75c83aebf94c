use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PermissionEntryDto {
    pub section: String,
    pub actions: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RoleDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub permissions: Vec<PermissionEntryDto>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpsertRoleDto {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<PermissionEntryDto>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AdminLoginDto {
    pub email: Option<String>,
    pub password: Option<String>,
    pub device_id: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct CreateAdminDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role_id: Option<i32>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AssignRoleDto {
    pub role_id: Option<i32>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct UserStatusDto {
    pub is_active: Option<bool>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct AdminUserQueryDto {
    pub role: Option<String>,
    #[serde(default)]
    pub page: u64,
    pub per_page: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct DashboardDto {
    pub users_by_role: BTreeMap<String, u64>,
    pub students: u64,
    pub guardians: u64,
    pub centers_by_status: BTreeMap<String, u64>,
    pub bookings_by_status: BTreeMap<String, u64>,
    pub payments_by_status: BTreeMap<String, u64>,
    pub revenue: i64,
    pub bookings_last_30_days: u64,
}
