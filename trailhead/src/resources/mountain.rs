//! Mountains

use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::client::Resource;
use crate::listing::{FieldValue, Record, RecordId, ResourceDescriptor};

wire_enum! {
    /// Safety status shown on the mountains table
    pub enum MountainStatus {
        Safe => "SAFE",
        Warning => "WARNING",
        Dangerous => "DANGEROUS",
    }
}

/// A mountain as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mountain {
    pub id: i64,
    pub name: String,
    pub location: String,
    /// Metres above sea level
    pub elevation: u32,
    pub status: MountainStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of a mountain create/update; the image travels as an attachment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountainPayload {
    pub name: String,
    pub location: String,
    pub elevation: u32,
    pub status: MountainStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Mountain> for MountainPayload {
    fn from(mountain: &Mountain) -> Self {
        Self {
            name: mountain.name.clone(),
            location: mountain.location.clone(),
            elevation: mountain.elevation,
            status: mountain.status,
            description: mountain.description.clone(),
        }
    }
}

impl Record for Mountain {
    fn id(&self) -> RecordId {
        self.id.into()
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(self.id.into()),
            "name" => Some((&self.name).into()),
            "location" => Some((&self.location).into()),
            "elevation" => Some(self.elevation.into()),
            "status" => Some(self.status.into()),
            "description" => Some(self.description.as_ref().into()),
            "imageUrl" => Some(self.image_url.as_ref().into()),
            "createdAt" => Some(
                self.created_at
                    .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
                    .into(),
            ),
            _ => None,
        }
    }
}

static DESCRIPTOR: LazyLock<ResourceDescriptor> = LazyLock::new(|| {
    ResourceDescriptor::builder(Mountains::PATH)
        .name("Mountain")
        .searchable(["name", "location"])
        .filterable(["status"])
        .sortable(["name", "location", "elevation", "status", "createdAt"])
        .build()
});

/// `/mountains`
#[derive(Debug, Clone, Copy)]
pub struct Mountains;

impl Resource for Mountains {
    const PATH: &'static str = "mountains";
    type Record = Mountain;
    type Payload = MountainPayload;

    fn descriptor() -> &'static ResourceDescriptor {
        &DESCRIPTOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{engine, ListQuery, SortOrder};
    use serde_json::json;

    fn mountain(id: i64, name: &str, location: &str, elevation: u32, status: MountainStatus) -> Mountain {
        Mountain {
            id,
            name: name.to_string(),
            location: location.to_string(),
            elevation,
            status,
            description: None,
            image_url: None,
            created_at: None,
        }
    }

    fn catalogue() -> Vec<Mountain> {
        vec![
            mountain(1, "Fansipan", "Lao Cai", 3147, MountainStatus::Warning),
            mountain(2, "Pu Si Lung", "Lai Chau", 3083, MountainStatus::Dangerous),
            mountain(3, "Ta Xua", "Son La", 2865, MountainStatus::Safe),
            mountain(4, "Lang Biang", "Lam Dong", 2167, MountainStatus::Safe),
            mountain(5, "Ba Den", "Tay Ninh", 986, MountainStatus::Dangerous),
        ]
    }

    #[test]
    fn test_decodes_backend_record() {
        let record: Mountain = serde_json::from_value(json!({
            "id": 7,
            "name": "Bach Moc Luong Tu",
            "location": "Lao Cai",
            "elevation": 3046,
            "status": "WARNING",
            "imageUrl": "https://cdn.trail.vn/bmlt.jpg",
            "createdAt": "2024-03-01T08:30:00Z"
        }))
        .unwrap();
        assert_eq!(record.status, MountainStatus::Warning);
        assert_eq!(record.image_url.as_deref(), Some("https://cdn.trail.vn/bmlt.jpg"));
        assert_eq!(
            record.field("createdAt"),
            Some(FieldValue::owned("2024-03-01T08:30:00Z"))
        );
    }

    #[test]
    fn test_search_and_status_filter_are_anded() {
        let records = catalogue();
        let query = ListQuery::new()
            .with_search("danger")
            .with_filter("status", MountainStatus::Dangerous);
        let page = engine::run(&records, Mountains::descriptor(), &query);
        assert!(page.is_empty());
        assert_eq!(page.paging.total_elements, 0);
    }

    #[test]
    fn test_status_filter() {
        let records = catalogue();
        let query = ListQuery::new().with_filter("status", MountainStatus::Dangerous);
        let page = engine::run(&records, Mountains::descriptor(), &query);
        let ids: Vec<i64> = page.items.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 5]);
    }

    #[test]
    fn test_sort_by_elevation() {
        let records = catalogue();
        let query = ListQuery::new()
            .with_sort("elevation")
            .with_order(SortOrder::Desc)
            .with_page_size(2);
        let page = engine::run(&records, Mountains::descriptor(), &query);
        let names: Vec<&str> = page.items.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Fansipan", "Pu Si Lung"]);
        assert_eq!(page.paging.total_pages, 3);
    }

    #[test]
    fn test_payload_wire_format() {
        let payload = MountainPayload::from(&catalogue()[2]);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "name": "Ta Xua", "location": "Son La", "elevation": 2865, "status": "SAFE" })
        );
    }

    #[test]
    fn test_status_enum() {
        assert_eq!(MountainStatus::ALL.len(), 3);
        assert_eq!(MountainStatus::Dangerous.to_string(), "DANGEROUS");
        let status: MountainStatus = serde_json::from_str("\"SAFE\"").unwrap();
        assert_eq!(status, MountainStatus::Safe);
    }
}
