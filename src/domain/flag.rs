use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagReason {
    Inappropriate,
    IncorrectInfo,
    Duplicate,
    Closed,
    Other,
}

impl FlagReason {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "inappropriate" => Some(Self::Inappropriate),
            "incorrect_info" => Some(Self::IncorrectInfo),
            "duplicate" => Some(Self::Duplicate),
            "closed" => Some(Self::Closed),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagStatus {
    Pending,
    Resolved,
    Dismissed,
}

/// A public report filed against an already-published activity.
///
/// Resolution fields are reserved for out-of-band moderation tooling; no
/// endpoint writes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flag {
    #[serde(rename = "activityId")]
    pub activity_id: String,
    #[serde(rename = "activityName")]
    pub activity_name: String,
    pub reason: FlagReason,
    #[serde(default)]
    pub details: String,
    pub status: FlagStatus,
    #[serde(rename = "flaggedAt", with = "time::serde::rfc3339")]
    pub flagged_at: OffsetDateTime,
    #[serde(
        rename = "resolvedAt",
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub resolved_at: Option<OffsetDateTime>,
    #[serde(rename = "resolutionNotes", default, skip_serializing_if = "Option::is_none")]
    pub resolution_notes: Option<String>,
}
