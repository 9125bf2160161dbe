//! Hiking routes

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::client::Resource;
use crate::listing::{FieldValue, Record, RecordId, ResourceDescriptor};

wire_enum! {
    pub enum Difficulty {
        Easy => "EASY",
        Moderate => "MODERATE",
        Hard => "HARD",
        Extreme => "EXTREME",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub difficulty: Difficulty,
    pub distance_km: f64,
    /// Typical walking time, in hours
    pub estimated_hours: f64,
    /// Price per hiker, in VND
    #[serde(default)]
    pub price: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub difficulty: Difficulty,
    pub distance_km: f64,
    pub estimated_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
}

impl Record for Route {
    fn id(&self) -> RecordId {
        self.id.into()
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(self.id.into()),
            "name" => Some((&self.name).into()),
            "description" => Some(self.description.as_ref().into()),
            "difficulty" => Some(self.difficulty.into()),
            "distanceKm" => Some(self.distance_km.into()),
            "estimatedHours" => Some(self.estimated_hours.into()),
            "price" => Some(self.price.into()),
            _ => None,
        }
    }
}

static DESCRIPTOR: LazyLock<ResourceDescriptor> = LazyLock::new(|| {
    ResourceDescriptor::builder(Routes::PATH)
        .name("Route")
        .searchable(["name", "description"])
        .filterable(["difficulty"])
        .sortable(["name", "difficulty", "distanceKm", "estimatedHours", "price"])
        .build()
});

/// `/routes`
#[derive(Debug, Clone, Copy)]
pub struct Routes;

impl Resource for Routes {
    const PATH: &'static str = "routes";
    type Record = Route;
    type Payload = RoutePayload;

    fn descriptor() -> &'static ResourceDescriptor {
        &DESCRIPTOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{engine, ListQuery, SortOrder};
    use serde_json::json;

    fn routes() -> Vec<Route> {
        serde_json::from_value(json!([
            { "id": 1, "name": "Sin Chai trail", "difficulty": "HARD", "distanceKm": 11.5, "estimatedHours": 14.0, "price": 2500000 },
            { "id": 2, "name": "Tram Ton trail", "difficulty": "MODERATE", "distanceKm": 9.0, "estimatedHours": 10.0 },
            { "id": 3, "name": "Cat Cat loop", "description": "Family walk", "difficulty": "EASY", "distanceKm": 3.2, "estimatedHours": 2.5, "price": 150000 }
        ]))
        .unwrap()
    }

    #[test]
    fn test_sort_by_distance_is_numeric() {
        let records = routes();
        let query = ListQuery::new().with_sort("distanceKm").with_order(SortOrder::Asc);
        let page = engine::run(&records, Routes::descriptor(), &query);
        let ids: Vec<i64> = page.items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_routes_without_price_sort_last() {
        let records = routes();
        let query = ListQuery::new().with_sort("price").with_order(SortOrder::Asc);
        let page = engine::run(&records, Routes::descriptor(), &query);
        assert_eq!(page.items.last().map(|r| r.id), Some(2));
    }

    #[test]
    fn test_difficulty_filter_is_case_insensitive() {
        let records = routes();
        let query = ListQuery::new().with_filter("difficulty", "easy");
        let page = engine::run(&records, Routes::descriptor(), &query);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_search_covers_description() {
        let records = routes();
        let query = ListQuery::new().with_search("family");
        let page = engine::run(&records, Routes::descriptor(), &query);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, 3);
    }
}
