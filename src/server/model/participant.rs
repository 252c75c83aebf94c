//! Participant (dependent profile) domain model.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use entity::sea_orm_active_enums::{Gender, ParticipantRelation};

use crate::{
    model::participant::{ParticipantDto, UpsertParticipantDto},
    server::{
        error::validation::ValidationError,
        util::{
            parse::{enum_str, parse_enum},
            validation::non_blank,
        },
    },
};

/// Parses the wire spelling of a relation (`self`, `child`, `ward`, `other`).
pub fn parse_relation(raw: &str) -> Result<ParticipantRelation, ValidationError> {
    match raw.trim().to_lowercase().as_str() {
        "self" => Ok(ParticipantRelation::Myself),
        "child" => Ok(ParticipantRelation::Child),
        "ward" => Ok(ParticipantRelation::Ward),
        "other" => Ok(ParticipantRelation::Other),
        _ => Err(ValidationError::field(
            "relation",
            "must be one of: self, child, ward, other",
        )),
    }
}

/// Wire spelling of a relation. `Myself` is stored as `myself` but sent as `self`.
pub fn relation_str(relation: ParticipantRelation) -> String {
    match relation {
        ParticipantRelation::Myself => "self".to_string(),
        other => enum_str(&other),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: i32,
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub relation: ParticipantRelation,
    pub created_at: DateTime<Utc>,
}

impl Participant {
    pub fn from_entity(entity: entity::participant::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            date_of_birth: entity.date_of_birth,
            gender: entity.gender,
            relation: entity.relation,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> ParticipantDto {
        ParticipantDto {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            gender: enum_str(&self.gender),
            relation: relation_str(self.relation),
            created_at: self.created_at,
        }
    }

    pub fn age_on(&self, date: NaiveDate) -> i32 {
        age_on(self.date_of_birth, date)
    }
}

/// Completed years between `date_of_birth` and `date`.
pub fn age_on(date_of_birth: NaiveDate, date: NaiveDate) -> i32 {
    let mut age = date.year() - date_of_birth.year();
    if (date.month(), date.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age.max(0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantParams {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub relation: ParticipantRelation,
}

impl ParticipantParams {
    /// Validates a participant body; the date of birth may not lie after `today`.
    pub fn from_dto(dto: UpsertParticipantDto, today: NaiveDate) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();

        let first_name = non_blank(dto.first_name);
        let last_name = non_blank(dto.last_name);
        errors.require_str("first_name", first_name.as_deref());
        errors.require_str("last_name", last_name.as_deref());

        match dto.date_of_birth {
            None => errors.add("date_of_birth", "date_of_birth is required"),
            Some(dob) if dob > today => errors.add("date_of_birth", "cannot be in the future"),
            Some(_) => {}
        }

        let gender = match non_blank(dto.gender) {
            None => {
                errors.add("gender", "gender is required");
                None
            }
            Some(raw) => parse_enum::<Gender>("gender", &raw)
                .map_err(|e| errors.merge(e))
                .ok(),
        };
        let relation = match non_blank(dto.relation) {
            None => {
                errors.add("relation", "relation is required");
                None
            }
            Some(raw) => parse_relation(&raw)
                .map_err(|e| errors.merge(e))
                .ok(),
        };

        errors.into_result()?;

        match (first_name, last_name, dto.date_of_birth, gender, relation) {
            (Some(first_name), Some(last_name), Some(date_of_birth), Some(gender), Some(relation)) => {
                Ok(Self {
                    first_name,
                    last_name,
                    date_of_birth,
                    gender,
                    relation,
                })
            }
            _ => Err(ValidationError::field("body", "incomplete participant")),
        }
    }
}
