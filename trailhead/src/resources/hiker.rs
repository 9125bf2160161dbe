//! Hiker profiles

use std::sync::LazyLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::Resource;
use crate::listing::{FieldValue, Record, RecordId, ResourceDescriptor};

wire_enum! {
    pub enum ExperienceLevel {
        Beginner => "BEGINNER",
        Intermediate => "INTERMEDIATE",
        Advanced => "ADVANCED",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hiker {
    pub id: i64,
    /// Owning user account
    #[serde(default)]
    pub user_id: Option<i64>,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub nationality: Option<String>,
    pub experience_level: ExperienceLevel,
}

impl Hiker {
    /// Age in whole years on `today`, if the birth date is known
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        self.date_of_birth.and_then(|dob| today.years_since(dob))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HikerPayload {
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    pub experience_level: ExperienceLevel,
}

impl Record for Hiker {
    fn id(&self) -> RecordId {
        self.id.into()
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(self.id.into()),
            "userId" => Some(self.user_id.into()),
            "fullName" => Some((&self.full_name).into()),
            "email" => Some((&self.email).into()),
            "phone" => Some(self.phone.as_ref().into()),
            "dateOfBirth" => Some(self.date_of_birth.map(|d| d.to_string()).into()),
            "nationality" => Some(self.nationality.as_ref().into()),
            "experienceLevel" => Some(self.experience_level.into()),
            _ => None,
        }
    }
}

static DESCRIPTOR: LazyLock<ResourceDescriptor> = LazyLock::new(|| {
    ResourceDescriptor::builder(Hikers::PATH)
        .name("Hiker")
        .searchable(["fullName", "email", "phone", "nationality"])
        .filterable(["experienceLevel", "nationality"])
        .sortable(["fullName", "dateOfBirth", "experienceLevel"])
        .build()
});

/// `/hikers`
#[derive(Debug, Clone, Copy)]
pub struct Hikers;

impl Resource for Hikers {
    const PATH: &'static str = "hikers";
    type Record = Hiker;
    type Payload = HikerPayload;

    fn descriptor() -> &'static ResourceDescriptor {
        &DESCRIPTOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{engine, ListQuery, SortOrder};
    use serde_json::json;

    fn hikers() -> Vec<Hiker> {
        serde_json::from_value(json!([
            { "id": 1, "fullName": "Anna Schmidt", "email": "anna@mail.de", "dateOfBirth": "1990-06-15", "nationality": "Germany", "experienceLevel": "ADVANCED" },
            { "id": 2, "fullName": "Bui Khanh", "email": "khanh@trail.vn", "nationality": "Vietnam", "experienceLevel": "BEGINNER" },
            { "id": 3, "fullName": "Chris Lee", "email": "chris@mail.sg", "dateOfBirth": "1985-01-02", "experienceLevel": "INTERMEDIATE" }
        ]))
        .unwrap()
    }

    #[test]
    fn test_sort_by_birth_date_puts_unknown_last() {
        let records = hikers();
        let query = ListQuery::new().with_sort("dateOfBirth").with_order(SortOrder::Asc);
        let page = engine::run(&records, Hikers::descriptor(), &query);
        let ids: Vec<i64> = page.items.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_age() {
        let hikers = hikers();
        let today = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        assert_eq!(hikers[0].age_on(today), Some(33));
        assert_eq!(hikers[1].age_on(today), None);
    }

    #[test]
    fn test_nationality_search() {
        let records = hikers();
        let page = engine::run(&records, Hikers::descriptor(), &ListQuery::new().with_search("viet"));
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].experience_level, ExperienceLevel::Beginner);
    }
}
