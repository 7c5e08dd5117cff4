use serde::{Deserialize, Serialize};

/// A published activity as served by the public catalog.
///
/// Optional fields are omitted from the JSON output entirely rather than
/// serialized as null, matching the static catalog asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub location: String,
    pub description: String,
    pub price: String,
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
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostCategory {
    #[default]
    Free,
    Paid,
    Mixed,
}

impl CostCategory {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "free" => Some(Self::Free),
            "paid" => Some(Self::Paid),
            "mixed" => Some(Self::Mixed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Paid => "paid",
            Self::Mixed => "mixed",
        }
    }
}
