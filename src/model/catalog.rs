use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SportDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub icon_url: Option<String>,
    pub is_active: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpsertSportDto {
    pub name: Option<String>,
    pub icon_url: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FacilityDto {
    pub id: i32,
    pub name: String,
    pub icon_url: Option<String>,
    pub is_active: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpsertFacilityDto {
    pub name: Option<String>,
    pub icon_url: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CountryDto {
    pub id: i32,
    pub name: String,
    pub code: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StateDto {
    pub id: i32,
    pub country_id: i32,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CityDto {
    pub id: i32,
    pub state_id: i32,
    pub name: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CreateCountryDto {
    pub name: Option<String>,
    pub code: Option<String>,
}

/// Body for creating a state or a city under its parent.
#[derive(Deserialize, Debug, Clone)]
pub struct CreateRegionDto {
    pub name: Option<String>,
}
