//! Fee structures and quotes.
//!
//! A batch stores its `fee_type` next to a JSON `fee_configuration` whose shape depends on
//! the type. All amounts are integers in minor currency units (paise).

use entity::sea_orm_active_enums::FeeType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    model::batch::{QuoteDto, QuoteLineDto},
    server::{error::validation::ValidationError, util::parse::enum_str},
};

const FIELD: &str = "fee_configuration";

/// Largest quantity (months, sessions or packages) a single quote may cover.
pub const MAX_QUOTE_QUANTITY: i32 = 12;

/// Largest amount or hourly rate a fee configuration may carry (one crore rupees).
pub const MAX_FEE_AMOUNT: i64 = 1_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgeTier {
    pub min_age: i32,
    pub max_age: i32,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeeStructure {
    /// Per participant per month.
    Monthly { amount: i64 },
    /// Per participant per session.
    PerSession { amount: i64 },
    /// Per participant per hour of session time.
    Hourly { rate: i64 },
    /// Per participant per package of `sessions` valid for `validity_days`.
    Package {
        sessions: i32,
        amount: i64,
        validity_days: i32,
    },
    /// Monthly amount chosen by the participant's age.
    AgeBased { tiers: Vec<AgeTier> },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AmountConfig {
    amount: i64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RateConfig {
    rate: i64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PackageConfig {
    sessions: i32,
    amount: i64,
    validity_days: i32,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AgeBasedConfig {
    tiers: Vec<AgeTier>,
}

impl FeeStructure {
    /// Decodes a stored configuration without business validation.
    pub fn from_json(fee_type: FeeType, value: Value) -> Result<Self, serde_json::Error> {
        Ok(match fee_type {
            FeeType::Monthly => {
                let AmountConfig { amount } = serde_json::from_value(value)?;
                Self::Monthly { amount }
            }
            FeeType::PerSession => {
                let AmountConfig { amount } = serde_json::from_value(value)?;
                Self::PerSession { amount }
            }
            FeeType::Hourly => {
                let RateConfig { rate } = serde_json::from_value(value)?;
                Self::Hourly { rate }
            }
            FeeType::Package => {
                let PackageConfig {
                    sessions,
                    amount,
                    validity_days,
                } = serde_json::from_value(value)?;
                Self::Package {
                    sessions,
                    amount,
                    validity_days,
                }
            }
            FeeType::AgeBased => {
                let AgeBasedConfig { tiers } = serde_json::from_value(value)?;
                Self::AgeBased { tiers }
            }
        })
    }

    /// Parses and validates a configuration supplied by an academy for a batch whose ages
    /// span `age_min..=age_max`.
    ///
    /// # Returns
    /// - `Ok(FeeStructure)` - Well-formed structure with positive amounts
    /// - `Err(ValidationError)` - Shape mismatch, non-positive amount, or age tiers that
    ///   overlap or leave part of the batch age range uncovered
    pub fn parse(
        fee_type: FeeType,
        value: Value,
        age_min: i32,
        age_max: i32,
    ) -> Result<Self, ValidationError> {
        let structure = Self::from_json(fee_type, value).map_err(|e| {
            ValidationError::field(
                FIELD,
                format!(
                    "does not match the {} fee shape: {e}",
                    enum_str(&fee_type)
                ),
            )
        })?;

        let mut errors = ValidationError::new();
        match &structure {
            Self::Monthly { amount } | Self::PerSession { amount } => {
                check_amount(&mut errors, format!("{FIELD}.amount"), *amount);
            }
            Self::Hourly { rate } => check_amount(&mut errors, format!("{FIELD}.rate"), *rate),
            Self::Package {
                sessions,
                amount,
                validity_days,
            } => {
                if *sessions <= 0 {
                    errors.add(format!("{FIELD}.sessions"), "must be greater than 0");
                }
                check_amount(&mut errors, format!("{FIELD}.amount"), *amount);
                if *validity_days <= 0 {
                    errors.add(format!("{FIELD}.validity_days"), "must be greater than 0");
                }
            }
            Self::AgeBased { tiers } => validate_tiers(tiers, age_min, age_max, &mut errors),
        }
        errors.into_result()?;

        Ok(structure)
    }

    pub fn fee_type(&self) -> FeeType {
        match self {
            Self::Monthly { .. } => FeeType::Monthly,
            Self::PerSession { .. } => FeeType::PerSession,
            Self::Hourly { .. } => FeeType::Hourly,
            Self::Package { .. } => FeeType::Package,
            Self::AgeBased { .. } => FeeType::AgeBased,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Monthly { amount } | Self::PerSession { amount } => {
                serde_json::json!({ "amount": amount })
            }
            Self::Hourly { rate } => serde_json::json!({ "rate": rate }),
            Self::Package {
                sessions,
                amount,
                validity_days,
            } => serde_json::json!({
                "sessions": sessions,
                "amount": amount,
                "validity_days": validity_days,
            }),
            Self::AgeBased { tiers } => serde_json::json!({ "tiers": tiers }),
        }
    }

    /// Price of one unit for a participant of `age`.
    ///
    /// Hourly rates are prorated over `session_minutes`, rounding half up to the nearest
    /// paisa.
    ///
    /// # Returns
    /// - `Ok(Some(i64))` - Unit price
    /// - `Ok(None)` - No age tier covers `age`
    /// - `Err(ValidationError)` - The prorated hourly price does not fit in an `i64`
    pub fn unit_amount(
        &self,
        age: i32,
        session_minutes: i64,
    ) -> Result<Option<i64>, ValidationError> {
        Ok(match self {
            Self::Monthly { amount } | Self::PerSession { amount } => Some(*amount),
            Self::Package { amount, .. } => Some(*amount),
            Self::Hourly { rate } => Some(
                rate.checked_mul(session_minutes)
                    .and_then(|m| m.checked_add(30))
                    .ok_or_else(amount_overflow)?
                    / 60,
            ),
            Self::AgeBased { tiers } => tiers
                .iter()
                .find(|t| (t.min_age..=t.max_age).contains(&age))
                .map(|t| t.amount),
        })
    }

    /// Prices `quantity` units for each participant.
    ///
    /// # Arguments
    /// - `participants` - `(participant_id, age)` pairs
    /// - `quantity` - Months, sessions or packages depending on the fee type
    /// - `session_minutes` - Length of one scheduled session, used by hourly fees
    ///
    /// # Returns
    /// - `Ok(Quote)` - One line per participant and the total
    /// - `Err(ValidationError)` - Quantity outside `1..=12`, an age without a tier, or a
    ///   total too large to represent
    pub fn quote(
        &self,
        participants: &[(i32, i32)],
        quantity: i32,
        session_minutes: i64,
    ) -> Result<Quote, ValidationError> {
        let mut errors = ValidationError::new();
        if !(1..=MAX_QUOTE_QUANTITY).contains(&quantity) {
            errors.add(
                "quantity",
                format!("must be between 1 and {MAX_QUOTE_QUANTITY}"),
            );
        }
        if participants.is_empty() {
            errors.add("participant_ids", "at least one participant is required");
        }

        let mut lines = Vec::with_capacity(participants.len());
        for &(participant_id, age) in participants {
            match self.unit_amount(age, session_minutes)? {
                Some(unit_amount) => lines.push(QuoteLine {
                    participant_id,
                    age,
                    unit_amount,
                    amount: unit_amount
                        .checked_mul(i64::from(quantity))
                        .ok_or_else(amount_overflow)?,
                }),
                None => errors.add(
                    "participant_ids",
                    format!("no fee tier covers participant {participant_id} aged {age}"),
                ),
            }
        }
        errors.into_result()?;

        let total = lines
            .iter()
            .try_fold(0i64, |acc, l| acc.checked_add(l.amount))
            .ok_or_else(amount_overflow)?;
        Ok(Quote {
            fee_type: self.fee_type(),
            quantity,
            lines,
            total,
        })
    }
}

fn check_amount(errors: &mut ValidationError, field: String, value: i64) {
    if value <= 0 {
        errors.add(field, "must be greater than 0");
    } else if value > MAX_FEE_AMOUNT {
        errors.add(field, format!("must not exceed {MAX_FEE_AMOUNT}"));
    }
}

fn amount_overflow() -> ValidationError {
    ValidationError::field("amount", "quote total is too large")
}

fn validate_tiers(tiers: &[AgeTier], age_min: i32, age_max: i32, errors: &mut ValidationError) {
    if tiers.is_empty() {
        errors.add(format!("{FIELD}.tiers"), "at least one tier is required");
        return;
    }

    for (i, tier) in tiers.iter().enumerate() {
        if tier.min_age > tier.max_age {
            errors.add(
                format!("{FIELD}.tiers[{i}].max_age"),
                "must not be below min_age",
            );
        }
        check_amount(errors, format!("{FIELD}.tiers[{i}].amount"), tier.amount);
    }

    let mut sorted: Vec<&AgeTier> = tiers.iter().collect();
    sorted.sort_by_key(|t| t.min_age);
    if sorted.windows(2).any(|w| w[1].min_age <= w[0].max_age) {
        errors.add(format!("{FIELD}.tiers"), "age tiers overlap");
    }

    let uncovered: Vec<i32> = (age_min..=age_max)
        .filter(|age| !tiers.iter().any(|t| (t.min_age..=t.max_age).contains(age)))
        .collect();
    if let (Some(first), Some(last)) = (uncovered.first(), uncovered.last()) {
        errors.add(
            format!("{FIELD}.tiers"),
            format!("ages {first}..={last} of the batch are not covered by any tier"),
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteLine {
    pub participant_id: i32,
    pub age: i32,
    pub unit_amount: i64,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub fee_type: FeeType,
    pub quantity: i32,
    pub lines: Vec<QuoteLine>,
    pub total: i64,
}

impl Quote {
    pub fn into_dto(self, batch_id: i32, currency: String) -> QuoteDto {
        QuoteDto {
            batch_id,
            fee_type: enum_str(&self.fee_type),
            quantity: self.quantity,
            currency,
            lines: self
                .lines
                .into_iter()
                .map(|l| QuoteLineDto {
                    participant_id: l.participant_id,
                    age: l.age,
                    unit_amount: l.unit_amount,
                    amount: l.amount,
                })
                .collect(),
            total: self.total,
        }
    }
}
