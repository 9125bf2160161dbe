//! Rangers

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::client::Resource;
use crate::listing::{FieldValue, Record, RecordId, ResourceDescriptor};

wire_enum! {
    pub enum RangerStatus {
        Active => "ACTIVE",
        OnLeave => "ON_LEAVE",
        Inactive => "INACTIVE",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ranger {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Mountain the ranger is assigned to
    #[serde(default)]
    pub mountain_id: Option<i64>,
    #[serde(default)]
    pub mountain_name: Option<String>,
    pub status: RangerStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangerPayload {
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mountain_id: Option<i64>,
    pub status: RangerStatus,
}

impl Record for Ranger {
    fn id(&self) -> RecordId {
        self.id.into()
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(self.id.into()),
            "fullName" => Some((&self.full_name).into()),
            "email" => Some((&self.email).into()),
            "phone" => Some(self.phone.as_ref().into()),
            "mountainId" => Some(self.mountain_id.into()),
            "mountainName" => Some(self.mountain_name.as_ref().into()),
            "status" => Some(self.status.into()),
            _ => None,
        }
    }
}

static DESCRIPTOR: LazyLock<ResourceDescriptor> = LazyLock::new(|| {
    ResourceDescriptor::builder(Rangers::PATH)
        .name("Ranger")
        .searchable(["fullName", "email", "phone", "mountainName"])
        .filterable(["status", "mountainId"])
        .sortable(["fullName", "email", "mountainName", "status"])
        .build()
});

/// `/rangers`
#[derive(Debug, Clone, Copy)]
pub struct Rangers;

impl Resource for Rangers {
    const PATH: &'static str = "rangers";
    type Record = Ranger;
    type Payload = RangerPayload;

    fn descriptor() -> &'static ResourceDescriptor {
        &DESCRIPTOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{ListQuery, ListView};
    use serde_json::json;

    fn rangers() -> Vec<Ranger> {
        serde_json::from_value(json!([
            { "id": 1, "fullName": "Tran Minh", "email": "minh@trail.vn", "mountainId": 1, "status": "ACTIVE" },
            { "id": 2, "fullName": "Le Hoa", "email": "hoa@trail.vn", "phone": "0901234567", "mountainId": 2, "status": "ON_LEAVE" },
            { "id": 3, "fullName": "Pham An", "email": "an@park.vn", "status": "ACTIVE" }
        ]))
        .unwrap()
    }

    #[test]
    fn test_filter_by_assigned_mountain() {
        let view = ListView::new(Rangers::descriptor().clone()).with_records(rangers());
        let query = view.filter(&view.query(), "mountainId", 2_i64);
        let page = view.page(&query);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].full_name, "Le Hoa");
    }

    #[test]
    fn test_unassigned_ranger_has_null_mountain() {
        let rangers = rangers();
        assert_eq!(rangers[2].field("mountainId"), Some(FieldValue::Null));
        assert_eq!(rangers[2].field("unknown"), None);
    }

    #[test]
    fn test_search_matches_phone() {
        let view = ListView::new(Rangers::descriptor().clone()).with_records(rangers());
        let page = view.page(&view.search(&view.query(), "0901"));
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, 2);
    }

    #[test]
    fn test_status_filter_on_query() {
        let query = ListQuery::new().with_filter("status", RangerStatus::OnLeave);
        let pairs = query.to_query_pairs();
        assert!(pairs.contains(&("status".to_string(), "ON_LEAVE".to_string())));
    }

    #[test]
    fn test_payload_omits_missing_optionals() {
        let payload = RangerPayload {
            full_name: "Vo Thanh".to_string(),
            email: "thanh@trail.vn".to_string(),
            phone: None,
            mountain_id: Some(4),
            status: RangerStatus::Active,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "fullName": "Vo Thanh", "email": "thanh@trail.vn", "mountainId": 4, "status": "ACTIVE" })
        );
    }
}
