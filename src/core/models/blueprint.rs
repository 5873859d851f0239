//! Blueprint models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who can see a blueprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlueprintVisibility {
    /// Listed for everyone
    Public,
    /// Owner only
    #[default]
    Private,
}

impl BlueprintVisibility {
    /// Storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            BlueprintVisibility::Public => "PUBLIC",
            BlueprintVisibility::Private => "PRIVATE",
        }
    }
}

impl std::str::FromStr for BlueprintVisibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PUBLIC" => Ok(BlueprintVisibility::Public),
            "PRIVATE" => Ok(BlueprintVisibility::Private),
            _ => Err(format!("Invalid blueprint visibility: {}", s)),
        }
    }
}

/// Blueprint metadata without the config file body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlueprintSummary {
    /// Blueprint id
    pub id: Uuid,
    /// Owner id
    pub user_id: Uuid,
    /// Human-readable name
    pub name: String,
    /// URL slug derived from the name
    pub slug: String,
    /// Short description, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Visibility
    pub visibility: BlueprintVisibility,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

/// Full blueprint including the config file body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlueprintDetail {
    /// Metadata
    #[serde(flatten)]
    pub summary: BlueprintSummary,
    /// The configuration file content itself
    pub content: String,
}

/// Derive a URL slug from a blueprint name
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
