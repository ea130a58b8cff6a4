//! Hotel record.

use serde::{Deserialize, Serialize};

/// One managed property. Name and location never change after seeding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub hotel_id: String,
    pub name: String,
    pub location: String,
    pub image_url: String,
}
