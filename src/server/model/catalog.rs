//! Catalog models: sports, facilities and locations.

use crate::{
    model::catalog::{
        CityDto, CountryDto, CreateCountryDto, CreateRegionDto, FacilityDto, SportDto, StateDto,
        UpsertFacilityDto, UpsertSportDto,
    },
    server::{
        error::validation::ValidationError,
        util::validation::{is_valid_url, non_blank},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Sport {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub icon_url: Option<String>,
    pub is_active: bool,
}

impl Sport {
    pub fn from_entity(entity: entity::sport::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            icon_url: entity.icon_url,
            is_active: entity.is_active,
        }
    }

    pub fn into_dto(self) -> SportDto {
        SportDto {
            id: self.id,
            name: self.name,
            slug: self.slug,
            icon_url: self.icon_url,
            is_active: self.is_active,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Facility {
    pub id: i32,
    pub name: String,
    pub icon_url: Option<String>,
    pub is_active: bool,
}

impl Facility {
    pub fn from_entity(entity: entity::facility::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            icon_url: entity.icon_url,
            is_active: entity.is_active,
        }
    }

    pub fn into_dto(self) -> FacilityDto {
        FacilityDto {
            id: self.id,
            name: self.name,
            icon_url: self.icon_url,
            is_active: self.is_active,
        }
    }
}

/// Validated name/icon/active triple shared by sports and facilities.
#[derive(Debug, Clone)]
pub struct CatalogItemParams {
    pub name: String,
    pub icon_url: Option<String>,
    pub is_active: bool,
}

impl CatalogItemParams {
    fn validate(
        name: Option<String>,
        icon_url: Option<String>,
        is_active: Option<bool>,
    ) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();
        let name = non_blank(name);
        if name.is_none() {
            errors.add("name", "name is required");
        }
        let icon_url = non_blank(icon_url);
        if icon_url.as_deref().is_some_and(|u| !is_valid_url(u)) {
            errors.add("icon_url", "must be an http(s) URL");
        }
        errors.into_result()?;

        Ok(Self {
            name: name.unwrap_or_default(),
            icon_url,
            is_active: is_active.unwrap_or(true),
        })
    }

    pub fn from_sport_dto(dto: UpsertSportDto) -> Result<Self, ValidationError> {
        Self::validate(dto.name, dto.icon_url, dto.is_active)
    }

    pub fn from_facility_dto(dto: UpsertFacilityDto) -> Result<Self, ValidationError> {
        Self::validate(dto.name, dto.icon_url, dto.is_active)
    }
}

/// URL slug derived from a name: lowercase alphanumerics separated by single dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub id: i32,
    pub name: String,
    pub code: String,
}

impl Country {
    pub fn from_entity(entity: entity::country::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            code: entity.code,
        }
    }

    pub fn into_dto(self) -> CountryDto {
        CountryDto {
            id: self.id,
            name: self.name,
            code: self.code,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateCountryParams {
    pub name: String,
    pub code: String,
}

impl CreateCountryParams {
    /// Requires a name and a two-letter ISO code, stored uppercase.
    pub fn from_dto(dto: CreateCountryDto) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();
        let name = non_blank(dto.name);
        if name.is_none() {
            errors.add("name", "name is required");
        }
        let code = non_blank(dto.code).map(|c| c.to_uppercase());
        match code.as_deref() {
            None => errors.add("code", "code is required"),
            Some(c) if c.len() != 2 || !c.chars().all(|ch| ch.is_ascii_alphabetic()) => {
                errors.add("code", "must be a two-letter ISO code")
            }
            Some(_) => {}
        }
        errors.into_result()?;

        Ok(Self {
            name: name.unwrap_or_default(),
            code: code.unwrap_or_default(),
        })
    }
}

/// Name of a new state or city.
pub fn region_name(dto: CreateRegionDto) -> Result<String, ValidationError> {
    non_blank(dto.name).ok_or_else(|| ValidationError::field("name", "name is required"))
}

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub id: i32,
    pub country_id: i32,
    pub name: String,
}

impl State {
    pub fn from_entity(entity: entity::state::Model) -> Self {
        Self {
            id: entity.id,
            country_id: entity.country_id,
            name: entity.name,
        }
    }

    pub fn into_dto(self) -> StateDto {
        StateDto {
            id: self.id,
            country_id: self.country_id,
            name: self.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub id: i32,
    pub state_id: i32,
    pub name: String,
}

impl City {
    pub fn from_entity(entity: entity::city::Model) -> Self {
        Self {
            id: entity.id,
            state_id: entity.state_id,
            name: entity.name,
        }
    }

    pub fn into_dto(self) -> CityDto {
        CityDto {
            id: self.id,
            state_id: self.state_id,
            name: self.name,
        }
    }
}
