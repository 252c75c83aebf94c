//! Admin panel permission matrix.
//!
//! A role grants a set of actions per panel section. `super_admin` users bypass the
//! matrix entirely; `admin` users are limited to what their role grants.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    model::admin::PermissionEntryDto,
    server::error::validation::ValidationError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Dashboard,
    Users,
    Centers,
    Batches,
    Bookings,
    Transactions,
    Catalog,
    Roles,
    Cms,
    Banners,
    Notifications,
}

impl Section {
    pub const ALL: [Section; 11] = [
        Section::Dashboard,
        Section::Users,
        Section::Centers,
        Section::Batches,
        Section::Bookings,
        Section::Transactions,
        Section::Catalog,
        Section::Roles,
        Section::Cms,
        Section::Banners,
        Section::Notifications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Users => "users",
            Section::Centers => "centers",
            Section::Batches => "batches",
            Section::Bookings => "bookings",
            Section::Transactions => "transactions",
            Section::Catalog => "catalog",
            Section::Roles => "roles",
            Section::Cms => "cms",
            Section::Banners => "banners",
            Section::Notifications => "notifications",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    View,
    Create,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::View, Action::Create, Action::Update, Action::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == value)
    }
}

/// Section → granted actions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PermissionMatrix(BTreeMap<Section, BTreeSet<Action>>);

impl PermissionMatrix {
    pub fn allows(&self, section: Section, action: Action) -> bool {
        self.0
            .get(&section)
            .is_some_and(|actions| actions.contains(&action))
    }

    pub fn grant(&mut self, section: Section, action: Action) {
        self.0.entry(section).or_default().insert(action);
    }

    /// Validates client-supplied entries. Unknown sections or actions are rejected and
    /// repeated sections are merged.
    pub fn from_dto(entries: &[PermissionEntryDto]) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();
        let mut matrix = Self::default();

        for (i, entry) in entries.iter().enumerate() {
            let Some(section) = Section::parse(entry.section.trim()) else {
                errors.add(
                    format!("permissions[{}].section", i),
                    format!("unknown section '{}'", entry.section),
                );
                continue;
            };

            for action in &entry.actions {
                match Action::parse(action.trim()) {
                    Some(action) => matrix.grant(section, action),
                    None => errors.add(
                        format!("permissions[{}].actions", i),
                        format!("unknown action '{}'", action),
                    ),
                }
            }
        }

        errors.into_result()?;
        Ok(matrix)
    }

    /// Reads the stored JSON column. Entries that no longer parse are skipped.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let entries: Vec<PermissionEntryDto> =
            serde_json::from_value(value.clone()).unwrap_or_default();
        let mut matrix = Self::default();

        for entry in entries {
            if let Some(section) = Section::parse(&entry.section) {
                for action in entry.actions.iter().filter_map(|a| Action::parse(a)) {
                    matrix.grant(section, action);
                }
            }
        }

        matrix
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.to_dto()).unwrap_or(serde_json::Value::Array(Vec::new()))
    }

    pub fn to_dto(&self) -> Vec<PermissionEntryDto> {
        self.0
            .iter()
            .filter(|(_, actions)| !actions.is_empty())
            .map(|(section, actions)| PermissionEntryDto {
                section: section.as_str().to_string(),
                actions: actions.iter().map(|a| a.as_str().to_string()).collect(),
            })
            .collect()
    }
}
