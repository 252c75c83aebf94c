//! Coaching center domain model, profile validation and publish checks.

use std::collections::HashSet;

use chrono::{DateTime, NaiveTime, Utc, Weekday};
use entity::sea_orm_active_enums::CenterStatus;
use serde::{Deserialize, Serialize};

use crate::{
    model::center::{
        AddressDto, BankInfoDto, CenterDto, CenterQueryDto, CenterSportDto, TimingDto,
        UpsertCenterDto,
    },
    server::{
        error::{internal::InternalError, validation::ValidationError},
        model::pagination::PageRequest,
        util::{
            parse::{enum_str, format_hhmm, parse_enum, parse_hhmm, parse_weekday, weekday_code},
            validation::{
                is_valid_ifsc, is_valid_pincode, is_valid_url, non_blank, normalize_email,
                normalize_mobile,
            },
        },
    },
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Address {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city_id: Option<i32>,
    pub pincode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A sport offered at a center with its sport-specific media URLs.
#[derive(Debug, Clone, PartialEq)]
pub struct CenterSport {
    pub sport_id: i32,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub videos: Vec<String>,
}

impl CenterSport {
    pub fn from_entity(entity: entity::center_sport::Model) -> Result<Self, InternalError> {
        let decode = |column: &'static str, value: serde_json::Value| {
            serde_json::from_value::<Vec<String>>(value).map_err(|source| {
                InternalError::CorruptJsonColumn {
                    table: "center_sport",
                    column,
                    id: entity.id,
                    source,
                }
            })
        };

        Ok(Self {
            sport_id: entity.sport_id,
            description: entity.description.clone(),
            images: decode("images", entity.images.clone())?,
            videos: decode("videos", entity.videos.clone())?,
        })
    }

    fn into_dto(self) -> CenterSportDto {
        CenterSportDto {
            sport_id: self.sport_id,
            description: self.description,
            images: self.images,
            videos: self.videos,
        }
    }
}

/// Opening hours for one weekday.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingHours {
    pub day: Weekday,
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl OperatingHours {
    fn into_dto(self) -> TimingDto {
        TimingDto {
            day: weekday_code(self.day).to_string(),
            open: format_hhmm(self.open),
            close: format_hhmm(self.close),
        }
    }
}

/// Payout account details, stored as a JSON column.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BankInfo {
    pub account_holder: Option<String>,
    pub account_number: Option<String>,
    pub ifsc: Option<String>,
    pub bank_name: Option<String>,
}

impl BankInfo {
    fn from_dto(dto: BankInfoDto) -> Self {
        Self {
            account_holder: non_blank(dto.account_holder),
            account_number: non_blank(dto.account_number).map(|n| n.replace(' ', "")),
            ifsc: non_blank(dto.ifsc).map(|i| i.to_uppercase()),
            bank_name: non_blank(dto.bank_name),
        }
    }

    fn into_dto(self) -> BankInfoDto {
        BankInfoDto {
            account_holder: self.account_holder,
            account_number: self.account_number,
            ifsc: self.ifsc,
            bank_name: self.bank_name,
        }
    }
}

/// Everything an academy edits about its center.
///
/// Drafts may be incomplete; `validate_publishable` decides whether the profile may be
/// shown publicly.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CenterProfile {
    pub name: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub address: Address,
    pub facility_ids: Vec<i32>,
    pub sports: Vec<CenterSport>,
    pub operational_timing: Vec<OperatingHours>,
    pub bank_info: Option<BankInfo>,
}

impl CenterProfile {
    /// Validates the format of every supplied field. Completeness is only enforced on publish.
    ///
    /// # Returns
    /// - `Ok(CenterProfile)` - Normalized profile (emails lowercased, mobiles in E.164,
    ///   IFSC uppercased, duplicate facility ids dropped)
    /// - `Err(ValidationError)` - Every malformed field, keyed by its request path
    pub fn from_dto(dto: UpsertCenterDto) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();

        let name = non_blank(dto.name);
        if name.is_none() {
            errors.add("name", "name is required");
        }

        let email = match non_blank(dto.email) {
            Some(raw) => match normalize_email(&raw) {
                Some(email) => Some(email),
                None => {
                    errors.add("email", "invalid email address");
                    None
                }
            },
            None => None,
        };

        let mobile = match non_blank(dto.mobile) {
            Some(raw) => match normalize_mobile(&raw) {
                Some(mobile) => Some(mobile),
                None => {
                    errors.add("mobile", "invalid mobile number");
                    None
                }
            },
            None => None,
        };

        let address = Self::parse_address(dto.address, &mut errors);

        let mut seen_facilities = HashSet::new();
        let facility_ids = dto
            .facility_ids
            .into_iter()
            .filter(|id| seen_facilities.insert(*id))
            .collect();

        let sports = Self::parse_sports(dto.sports, &mut errors);
        let operational_timing = Self::parse_timing(dto.operational_timing, &mut errors);

        let bank_info = dto.bank_info.map(BankInfo::from_dto);
        if let Some(ifsc) = bank_info.as_ref().and_then(|b| b.ifsc.as_deref()) {
            if !is_valid_ifsc(ifsc) {
                errors.add("bank_info.ifsc", "invalid IFSC code");
            }
        }
        if let Some(number) = bank_info.as_ref().and_then(|b| b.account_number.as_deref()) {
            if !(9..=18).contains(&number.len()) || !number.chars().all(|c| c.is_ascii_digit()) {
                errors.add("bank_info.account_number", "must be 9 to 18 digits");
            }
        }

        errors.into_result()?;

        Ok(Self {
            name: name.unwrap_or_default(),
            description: non_blank(dto.description),
            email,
            mobile,
            address,
            facility_ids,
            sports,
            operational_timing,
            bank_info,
        })
    }

    fn parse_address(dto: AddressDto, errors: &mut ValidationError) -> Address {
        let pincode = non_blank(dto.pincode);
        if pincode.as_deref().is_some_and(|p| !is_valid_pincode(p)) {
            errors.add("address.pincode", "must be a 6-digit pincode");
        }
        if dto.latitude.is_some_and(|lat| !(-90.0..=90.0).contains(&lat)) {
            errors.add("address.latitude", "must be between -90 and 90");
        }
        if dto
            .longitude
            .is_some_and(|lng| !(-180.0..=180.0).contains(&lng))
        {
            errors.add("address.longitude", "must be between -180 and 180");
        }

        Address {
            line1: non_blank(dto.line1),
            line2: non_blank(dto.line2),
            city_id: dto.city_id,
            pincode,
            latitude: dto.latitude,
            longitude: dto.longitude,
        }
    }

    fn parse_sports(dtos: Vec<CenterSportDto>, errors: &mut ValidationError) -> Vec<CenterSport> {
        let mut seen = HashSet::new();
        let mut sports = Vec::with_capacity(dtos.len());

        for (i, dto) in dtos.into_iter().enumerate() {
            if !seen.insert(dto.sport_id) {
                errors.add(format!("sports[{i}].sport_id"), "sport listed twice");
                continue;
            }
            for (j, url) in dto.images.iter().enumerate() {
                if !is_valid_url(url) {
                    errors.add(format!("sports[{i}].images[{j}]"), "must be an http(s) URL");
                }
            }
            for (j, url) in dto.videos.iter().enumerate() {
                if !is_valid_url(url) {
                    errors.add(format!("sports[{i}].videos[{j}]"), "must be an http(s) URL");
                }
            }
            sports.push(CenterSport {
                sport_id: dto.sport_id,
                description: non_blank(dto.description),
                images: dto.images,
                videos: dto.videos,
            });
        }

        sports
    }

    fn parse_timing(dtos: Vec<TimingDto>, errors: &mut ValidationError) -> Vec<OperatingHours> {
        let mut seen = HashSet::new();
        let mut timing = Vec::with_capacity(dtos.len());

        for (i, dto) in dtos.into_iter().enumerate() {
            let field = format!("operational_timing[{i}]");
            let day = parse_weekday(&dto.day);
            let open = parse_hhmm(&dto.open);
            let close = parse_hhmm(&dto.close);

            if day.is_none() {
                errors.add(format!("{field}.day"), "must be one of mon..sun");
            }
            if open.is_none() {
                errors.add(format!("{field}.open"), "must be HH:MM");
            }
            if close.is_none() {
                errors.add(format!("{field}.close"), "must be HH:MM");
            }

            let (Some(day), Some(open), Some(close)) = (day, open, close) else {
                continue;
            };
            if open >= close {
                errors.add(format!("{field}.close"), "must be after open");
            }
            if !seen.insert(day) {
                errors.add(format!("{field}.day"), "day listed twice");
            }
            timing.push(OperatingHours { day, open, close });
        }

        timing
    }

    /// Checks that the profile carries every field a published center needs.
    ///
    /// # Returns
    /// - `Ok(())` - Profile can be published
    /// - `Err(ValidationError)` - One entry per missing or incomplete field
    pub fn validate_publishable(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();

        if self.name.trim().is_empty() {
            errors.add("name", "name is required");
        }
        errors.require_str("description", self.description.as_deref());
        if self.email.is_none() && self.mobile.is_none() {
            errors.add("contact", "email or mobile is required");
        }

        errors.require_str("address.line1", self.address.line1.as_deref());
        errors.require("address.city_id", &self.address.city_id);
        match self.address.pincode.as_deref() {
            Some(p) if is_valid_pincode(p) => {}
            _ => errors.add("address.pincode", "a 6-digit pincode is required"),
        }

        if self.sports.is_empty() {
            errors.add("sports", "at least one sport is required");
        }
        for (i, sport) in self.sports.iter().enumerate() {
            if sport.images.is_empty() {
                errors.add(format!("sports[{i}].images"), "at least one image is required");
            }
        }

        if self.operational_timing.is_empty() {
            errors.add("operational_timing", "at least one day is required");
        }

        match &self.bank_info {
            None => errors.add("bank_info", "bank info is required"),
            Some(bank) => {
                errors.require_str("bank_info.account_holder", bank.account_holder.as_deref());
                errors.require_str("bank_info.account_number", bank.account_number.as_deref());
                errors.require_str("bank_info.bank_name", bank.bank_name.as_deref());
                match bank.ifsc.as_deref() {
                    Some(ifsc) if is_valid_ifsc(ifsc) => {}
                    _ => errors.add("bank_info.ifsc", "a valid IFSC code is required"),
                }
            }
        }

        errors.into_result()
    }

    pub fn timing_json(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.operational_timing
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "day": weekday_code(t.day),
                        "open": format_hhmm(t.open),
                        "close": format_hhmm(t.close),
                    })
                })
                .collect(),
        )
    }

    pub fn facility_ids_json(&self) -> serde_json::Value {
        serde_json::json!(self.facility_ids)
    }

    pub fn bank_info_json(&self) -> Option<serde_json::Value> {
        self.bank_info
            .as_ref()
            .map(|b| serde_json::to_value(b).unwrap_or(serde_json::Value::Null))
    }

    pub fn sport_ids(&self) -> Vec<i32> {
        self.sports.iter().map(|s| s.sport_id).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Center {
    pub id: i32,
    pub owner_id: i32,
    pub profile: CenterProfile,
    pub status: CenterStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct StoredTiming {
    day: String,
    open: String,
    close: String,
}

impl Center {
    /// Builds a center from its row and its `center_sport` rows.
    ///
    /// # Returns
    /// - `Ok(Center)` - Decoded center
    /// - `Err(InternalError::CorruptJsonColumn)` - A JSON column does not match its shape
    pub fn from_entity(
        entity: entity::coaching_center::Model,
        sports: Vec<entity::center_sport::Model>,
    ) -> Result<Self, InternalError> {
        let id = entity.id;
        let corrupt = |column: &'static str| {
            move |source: serde_json::Error| InternalError::CorruptJsonColumn {
                table: "coaching_center",
                column,
                id,
                source,
            }
        };

        let facility_ids: Vec<i32> =
            serde_json::from_value(entity.facility_ids).map_err(corrupt("facility_ids"))?;
        let stored_timing: Vec<StoredTiming> = serde_json::from_value(entity.operational_timing)
            .map_err(corrupt("operational_timing"))?;
        let operational_timing = stored_timing
            .into_iter()
            .filter_map(|t| {
                Some(OperatingHours {
                    day: parse_weekday(&t.day)?,
                    open: parse_hhmm(&t.open)?,
                    close: parse_hhmm(&t.close)?,
                })
            })
            .collect();
        let bank_info = match entity.bank_info {
            Some(serde_json::Value::Null) | None => None,
            Some(value) => Some(
                serde_json::from_value::<BankInfo>(value).map_err(corrupt("bank_info"))?,
            ),
        };
        let sports = sports
            .into_iter()
            .map(CenterSport::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id,
            owner_id: entity.owner_id,
            profile: CenterProfile {
                name: entity.name,
                description: entity.description,
                email: entity.email,
                mobile: entity.mobile,
                address: Address {
                    line1: entity.address_line1,
                    line2: entity.address_line2,
                    city_id: entity.city_id,
                    pincode: entity.pincode,
                    latitude: entity.latitude,
                    longitude: entity.longitude,
                },
                facility_ids,
                sports,
                operational_timing,
                bank_info,
            },
            status: entity.status,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn is_published(&self) -> bool {
        self.status == CenterStatus::Published
    }

    pub fn offers_sport(&self, sport_id: i32) -> bool {
        self.profile.sports.iter().any(|s| s.sport_id == sport_id)
    }

    /// API representation. Bank details are only included for the owner and admins.
    pub fn into_dto(self, include_bank_info: bool) -> CenterDto {
        let profile = self.profile;
        CenterDto {
            id: self.id,
            owner_id: self.owner_id,
            name: profile.name,
            description: profile.description,
            email: profile.email,
            mobile: profile.mobile,
            address: AddressDto {
                line1: profile.address.line1,
                line2: profile.address.line2,
                city_id: profile.address.city_id,
                pincode: profile.address.pincode,
                latitude: profile.address.latitude,
                longitude: profile.address.longitude,
            },
            facility_ids: profile.facility_ids,
            sports: profile.sports.into_iter().map(CenterSport::into_dto).collect(),
            operational_timing: profile
                .operational_timing
                .into_iter()
                .map(OperatingHours::into_dto)
                .collect(),
            bank_info: if include_bank_info {
                profile.bank_info.map(BankInfo::into_dto)
            } else {
                None
            },
            status: enum_str(&self.status),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Filters for center listings.
#[derive(Debug, Clone, Default)]
pub struct CenterFilter {
    pub sport_id: Option<i32>,
    pub city_id: Option<i32>,
    pub status: Option<CenterStatus>,
}

impl CenterFilter {
    /// Builds the filter and page from `?sport_id=&city_id=&status=&page=&per_page=`.
    pub fn from_query(dto: CenterQueryDto) -> Result<(Self, PageRequest), ValidationError> {
        let status = non_blank(dto.status)
            .map(|raw| parse_enum::<CenterStatus>("status", &raw))
            .transpose()?;

        Ok((
            Self {
                sport_id: dto.sport_id,
                city_id: dto.city_id,
                status,
            },
            PageRequest::new(dto.page, dto.per_page),
        ))
    }
}
