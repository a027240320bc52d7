//! Serde shapes of the schedule-detail payload and their conversion into the
//! domain snapshot.
//!
//! The backend is loose about ids (numbers or strings) and frequently sends
//! partial entity data inside the matrix, so every optional field defaults.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use super::{
    Assignment, CaddieAssignment, EntityId, Field, MatrixRow, MatrixSlot, Part, PartId,
    PartMatrix, ScheduleId, ScheduleSnapshot, SlotId, SpecialGroupAssignment,
};
use crate::utils::time::parse_clock_time;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("field_number must be 1 or greater")]
    InvalidFieldNumber,
    #[error("part_number must be 1 or greater")]
    InvalidPartNumber,
    #[error("part {part_number} has an unreadable {bound} time '{value}'")]
    InvalidPartTime {
        part_number: u32,
        bound: &'static str,
        value: String,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

fn optional_opaque_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    }))
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleDetailDto {
    #[serde(default, deserialize_with = "optional_opaque_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub golf_course_name: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDto>,
    #[serde(default)]
    pub parts: Vec<PartDto>,
    #[serde(default)]
    pub available_caddies: Vec<CaddieDto>,
    #[serde(default)]
    pub available_special_groups: Vec<SpecialGroupDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldDto {
    pub field_number: u32,
    #[serde(default, alias = "display_name")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PartDto {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    pub part_number: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub schedule_matrix: Vec<MatrixRowDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatrixRowDto {
    pub time: String,
    #[serde(default)]
    pub slots: Vec<MatrixSlotDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatrixSlotDto {
    pub field_number: u32,
    #[serde(alias = "slot_id", deserialize_with = "opaque_id")]
    pub work_slot_id: String,
    #[serde(default)]
    pub caddie: Option<CaddieDto>,
    #[serde(default)]
    pub special_group: Option<SpecialGroupDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaddieDto {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "group")]
    pub group_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub special_team: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpecialGroupDto {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub member_count: u32,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl From<CaddieDto> for CaddieAssignment {
    fn from(dto: CaddieDto) -> Self {
        Self {
            id: EntityId::new(dto.id),
            name: dto.name,
            group_badge: dto.group_name.filter(|badge| !badge.trim().is_empty()),
            status: dto.status.unwrap_or_default(),
            special_badge: dto.special_team.filter(|badge| !badge.trim().is_empty()),
        }
    }
}

impl From<SpecialGroupDto> for SpecialGroupAssignment {
    fn from(dto: SpecialGroupDto) -> Self {
        Self {
            id: EntityId::new(dto.id),
            name: dto.name,
            member_count: dto.member_count,
            color: dto.color,
            is_active: dto.is_active,
        }
    }
}

impl MatrixSlotDto {
    fn into_slot(self) -> Result<MatrixSlot, WireError> {
        if self.field_number == 0 {
            return Err(WireError::InvalidFieldNumber);
        }

        let assignment = match (self.special_group, self.caddie) {
            (Some(group), Some(caddie)) => {
                log::warn!(
                    "Slot {} carries both special group {} and caddie {}; keeping the special group",
                    self.work_slot_id,
                    group.id,
                    caddie.id
                );
                Some(Assignment::SpecialGroup(group.into()))
            }
            (Some(group), None) => Some(Assignment::SpecialGroup(group.into())),
            (None, Some(caddie)) => Some(Assignment::Caddie(caddie.into())),
            (None, None) => None,
        };

        Ok(MatrixSlot {
            field_number: self.field_number,
            slot_id: SlotId::new(self.work_slot_id),
            assignment,
        })
    }
}

impl PartDto {
    fn into_matrix(self) -> Result<PartMatrix, WireError> {
        if self.part_number == 0 {
            return Err(WireError::InvalidPartNumber);
        }
        let part_number = self.part_number;

        let parse_bound = |bound: &'static str, value: Option<String>| match value {
            None => Ok(None),
            Some(value) if value.trim().is_empty() => Ok(None),
            Some(value) => parse_clock_time(&value).map(Some).ok_or(WireError::InvalidPartTime {
                part_number,
                bound,
                value,
            }),
        };

        let start_time = parse_bound("start", self.start_time)?;
        let end_time = parse_bound("end", self.end_time)?;

        let rows = self
            .schedule_matrix
            .into_iter()
            .map(|row| {
                let slots = row
                    .slots
                    .into_iter()
                    .map(MatrixSlotDto::into_slot)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(MatrixRow {
                    time: row.time,
                    slots,
                })
            })
            .collect::<Result<Vec<_>, WireError>>()?;

        Ok(PartMatrix {
            part: Part {
                id: PartId::new(self.id),
                part_number,
                name: self
                    .name
                    .unwrap_or_else(|| format!("Part {}", part_number)),
                start_time,
                end_time,
            },
            rows,
        })
    }
}

impl ScheduleDetailDto {
    /// Convert into the domain snapshot. `requested` fills in a missing id.
    pub fn into_snapshot(self, requested: &ScheduleId) -> Result<ScheduleSnapshot, WireError> {
        let mut fields = self
            .fields
            .into_iter()
            .map(|field| {
                if field.field_number == 0 {
                    return Err(WireError::InvalidFieldNumber);
                }
                let index = field.field_number as usize - 1;
                Ok(Field {
                    index,
                    display_name: field
                        .name
                        .unwrap_or_else(|| format!("Field {}", field.field_number)),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        fields.sort_by_key(|field| field.index);

        let mut parts = self
            .parts
            .into_iter()
            .map(PartDto::into_matrix)
            .collect::<Result<Vec<_>, _>>()?;
        parts.sort_by_key(|matrix| matrix.part.part_number);

        Ok(ScheduleSnapshot {
            schedule_id: self
                .id
                .map(ScheduleId::new)
                .unwrap_or_else(|| requested.clone()),
            date: self.date,
            golf_course_name: self.golf_course_name,
            fields,
            parts,
            available_caddies: self
                .available_caddies
                .into_iter()
                .map(CaddieAssignment::from)
                .collect(),
            available_special_groups: self
                .available_special_groups
                .into_iter()
                .map(SpecialGroupAssignment::from)
                .collect(),
        })
    }
}
