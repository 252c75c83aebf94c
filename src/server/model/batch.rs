//! Batch domain model and parameters.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use entity::sea_orm_active_enums::FeeType;

use crate::{
    model::batch::{BatchDto, QuoteRequestDto, ScheduleDto, UpsertBatchDto},
    server::{
        error::{internal::InternalError, validation::ValidationError},
        model::fee::{FeeStructure, MAX_QUOTE_QUANTITY},
        util::{
            parse::{enum_str, format_hhmm, parse_enum, parse_hhmm, parse_weekday, weekday_code},
            validation::non_blank,
        },
    },
};

pub const MAX_AGE: i32 = 100;

/// Weekly recurring session slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub days: Vec<Weekday>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl Schedule {
    pub fn session_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    pub fn days_json(&self) -> serde_json::Value {
        serde_json::json!(self
            .days
            .iter()
            .map(|d| weekday_code(*d))
            .collect::<Vec<_>>())
    }

    fn into_dto(self) -> ScheduleDto {
        ScheduleDto {
            days: self.days.iter().map(|d| weekday_code(*d).to_string()).collect(),
            start_time: Some(format_hhmm(self.start_time)),
            end_time: Some(format_hhmm(self.end_time)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub id: i32,
    pub center_id: i32,
    pub sport_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub schedule: Schedule,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub capacity: i32,
    pub age_min: i32,
    pub age_max: i32,
    pub fee: FeeStructure,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Batch {
    /// Converts an entity model to a batch domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Batch)` - Decoded batch
    /// - `Err(InternalError::CorruptJsonColumn)` - Stored schedule or fee configuration
    ///   does not match its shape
    pub fn from_entity(entity: entity::batch::Model) -> Result<Self, InternalError> {
        let id = entity.id;
        let codes: Vec<String> = serde_json::from_value(entity.schedule_days).map_err(|source| {
            InternalError::CorruptJsonColumn {
                table: "batch",
                column: "schedule_days",
                id,
                source,
            }
        })?;
        let fee = FeeStructure::from_json(entity.fee_type, entity.fee_configuration).map_err(
            |source| InternalError::CorruptJsonColumn {
                table: "batch",
                column: "fee_configuration",
                id,
                source,
            },
        )?;

        Ok(Self {
            id,
            center_id: entity.center_id,
            sport_id: entity.sport_id,
            name: entity.name,
            description: entity.description,
            schedule: Schedule {
                days: codes.iter().filter_map(|c| parse_weekday(c)).collect(),
                start_time: entity.start_time,
                end_time: entity.end_time,
            },
            start_date: entity.start_date,
            end_date: entity.end_date,
            capacity: entity.capacity,
            age_min: entity.age_min,
            age_max: entity.age_max,
            fee,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> BatchDto {
        BatchDto {
            id: self.id,
            center_id: self.center_id,
            sport_id: self.sport_id,
            name: self.name,
            description: self.description,
            schedule: self.schedule.into_dto(),
            start_date: self.start_date,
            end_date: self.end_date,
            capacity: self.capacity,
            age_min: self.age_min,
            age_max: self.age_max,
            fee_type: enum_str(&self.fee.fee_type()),
            fee_configuration: self.fee.to_json(),
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Active and not yet past its end date.
    pub fn is_bookable(&self, today: NaiveDate) -> bool {
        self.is_active && self.end_date.is_none_or(|end| end >= today)
    }

    /// Date on which participant ages are measured: the batch start, or today once the
    /// batch is running.
    pub fn age_reference_date(&self, today: NaiveDate) -> NaiveDate {
        self.start_date.max(today)
    }

    pub fn accepts_age(&self, age: i32) -> bool {
        (self.age_min..=self.age_max).contains(&age)
    }
}

/// Validated create/replace input for a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchParams {
    pub sport_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub schedule: Schedule,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub capacity: i32,
    pub age_min: i32,
    pub age_max: i32,
    pub fee: FeeStructure,
}

impl BatchParams {
    /// Validates a batch body.
    ///
    /// # Returns
    /// - `Ok(BatchParams)` - Every field present and consistent
    /// - `Err(ValidationError)` - All missing or invalid fields
    pub fn from_dto(dto: UpsertBatchDto) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();

        errors.require("sport_id", &dto.sport_id);
        let name = non_blank(dto.name);
        if name.is_none() {
            errors.add("name", "name is required");
        }

        let schedule = parse_schedule(dto.schedule, &mut errors);

        errors.require("start_date", &dto.start_date);
        if let (Some(start), Some(end)) = (dto.start_date, dto.end_date) {
            if end < start {
                errors.add("end_date", "must not be before start_date");
            }
        }

        match dto.capacity {
            None => errors.add("capacity", "capacity is required"),
            Some(c) if c <= 0 => errors.add("capacity", "must be greater than 0"),
            Some(_) => {}
        }

        errors.require("age_min", &dto.age_min);
        errors.require("age_max", &dto.age_max);
        for (field, value) in [("age_min", dto.age_min), ("age_max", dto.age_max)] {
            if value.is_some_and(|age| !(0..=MAX_AGE).contains(&age)) {
                errors.add(field, format!("must be between 0 and {MAX_AGE}"));
            }
        }
        if let (Some(min), Some(max)) = (dto.age_min, dto.age_max) {
            if min > max {
                errors.add("age_max", "must not be below age_min");
            }
        }

        let fee_type = match non_blank(dto.fee_type) {
            None => {
                errors.add("fee_type", "fee_type is required");
                None
            }
            Some(raw) => match parse_enum::<FeeType>("fee_type", &raw) {
                Ok(fee_type) => Some(fee_type),
                Err(e) => {
                    errors.merge(e);
                    None
                }
            },
        };
        errors.require("fee_configuration", &dto.fee_configuration);

        let fee = match (fee_type, dto.fee_configuration) {
            (Some(fee_type), Some(config)) => match FeeStructure::parse(
                fee_type,
                config,
                dto.age_min.unwrap_or(0),
                dto.age_max.unwrap_or(MAX_AGE),
            ) {
                Ok(fee) => Some(fee),
                Err(e) => {
                    errors.merge(e);
                    None
                }
            },
            _ => None,
        };

        errors.into_result()?;

        match (
            dto.sport_id,
            name,
            schedule,
            dto.start_date,
            dto.capacity,
            dto.age_min,
            dto.age_max,
            fee,
        ) {
            (
                Some(sport_id),
                Some(name),
                Some(schedule),
                Some(start_date),
                Some(capacity),
                Some(age_min),
                Some(age_max),
                Some(fee),
            ) => Ok(Self {
                sport_id,
                name,
                description: non_blank(dto.description),
                schedule,
                start_date,
                end_date: dto.end_date,
                capacity,
                age_min,
                age_max,
                fee,
            }),
            _ => Err(ValidationError::field("body", "incomplete batch")),
        }
    }
}

fn parse_schedule(dto: ScheduleDto, errors: &mut ValidationError) -> Option<Schedule> {
    let mut valid = true;

    if dto.days.is_empty() {
        errors.add("schedule.days", "at least one day is required");
        valid = false;
    }
    let mut seen = HashSet::new();
    let mut days = Vec::with_capacity(dto.days.len());
    for (i, code) in dto.days.iter().enumerate() {
        match parse_weekday(code) {
            Some(day) if seen.insert(day) => days.push(day),
            Some(_) => {
                errors.add(format!("schedule.days[{i}]"), "day listed twice");
                valid = false;
            }
            None => {
                errors.add(format!("schedule.days[{i}]"), "must be one of mon..sun");
                valid = false;
            }
        }
    }

    let mut time = |field: &str, value: Option<String>| match value.as_deref().map(parse_hhmm) {
        Some(Some(t)) => Some(t),
        Some(None) => {
            errors.add(format!("schedule.{field}"), "must be HH:MM");
            None
        }
        None => {
            errors.add(format!("schedule.{field}"), format!("{field} is required"));
            None
        }
    };
    let start_time = time("start_time", dto.start_time);
    let end_time = time("end_time", dto.end_time);

    let (Some(start_time), Some(end_time)) = (start_time, end_time) else {
        return None;
    };
    if start_time >= end_time {
        errors.add("schedule.end_time", "must be after start_time");
        return None;
    }

    valid.then_some(Schedule {
        days,
        start_time,
        end_time,
    })
}

/// Participants and quantity to price against a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteParams {
    pub participant_ids: Vec<i32>,
    pub quantity: i32,
}

impl QuoteParams {
    /// Quantity defaults to one unit.
    pub fn from_dto(dto: QuoteRequestDto) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();
        if dto.participant_ids.is_empty() {
            errors.add("participant_ids", "at least one participant is required");
        }
        let mut seen = HashSet::new();
        if !dto.participant_ids.iter().all(|id| seen.insert(*id)) {
            errors.add("participant_ids", "participants must be unique");
        }
        let quantity = dto.quantity.unwrap_or(1);
        if !(1..=MAX_QUOTE_QUANTITY).contains(&quantity) {
            errors.add(
                "quantity",
                format!("must be between 1 and {MAX_QUOTE_QUANTITY}"),
            );
        }
        errors.into_result()?;

        Ok(Self {
            participant_ids: dto.participant_ids,
            quantity,
        })
    }
}
