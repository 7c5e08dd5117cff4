use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::activity::{Activity, CostCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// A user-submitted activity awaiting (or past) moderation.
///
/// Activity fields carry serde defaults so that records written by older
/// submission forms still deserialize; the validator guarantees the required
/// fields on everything written going forward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub location: String,
    pub description: String,
    pub price: String,
    #[serde(default)]
    pub cost: CostCategory,
    #[serde(default)]
    pub weather: Vec<String>,
    #[serde(default)]
    pub dog_friendly: bool,
    #[serde(default)]
    pub accessible: bool,
    #[serde(rename = "ageRange", default, skip_serializing_if = "Option::is_none")]
    pub age_range: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facilities: Option<Vec<String>>,
    #[serde(rename = "submittedBy", default)]
    pub submitted_by: String,
    #[serde(rename = "submitterEmail", default)]
    pub submitter_email: String,
    #[serde(rename = "submitterPhone", default, skip_serializing_if = "Option::is_none")]
    pub submitter_phone: Option<String>,
    #[serde(rename = "submitterMessage", default, skip_serializing_if = "Option::is_none")]
    pub submitter_message: Option<String>,
    pub status: SubmissionStatus,
    #[serde(rename = "submittedAt", with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
    #[serde(
        rename = "approvedAt",
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub approved_at: Option<OffsetDateTime>,
    #[serde(
        rename = "rejectedAt",
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub rejected_at: Option<OffsetDateTime>,
    #[serde(rename = "rejectionReason", default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl Submission {
    /// Re-maps an approved submission into the published Activity shape.
    ///
    /// The id is prefixed so merged entries can never collide with ids from
    /// the static catalog asset.
    pub fn into_activity(self, submission_id: &str) -> Activity {
        Activity {
            id: format!("submission-{}", submission_id),
            name: self.name,
            location: self.location,
            description: self.description,
            price: self.price,
            cost: self.cost,
            weather: self.weather,
            dog_friendly: self.dog_friendly,
            accessible: self.accessible,
            age_range: self.age_range,
            tags: self.tags,
            opening_hours: self.opening_hours,
            website: self.website,
            lat: self.lat,
            lng: self.lng,
            facilities: self.facilities,
        }
    }
}
