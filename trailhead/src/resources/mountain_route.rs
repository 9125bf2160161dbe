//! Links between mountains and the routes that climb them

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::client::Resource;
use crate::listing::{FieldValue, Record, RecordId, ResourceDescriptor};

/// A route offered on a mountain
///
/// The backend denormalizes the mountain and route names into the link so
/// the table can show them without extra calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountainRoute {
    pub id: i64,
    pub mountain_id: i64,
    pub route_id: i64,
    #[serde(default)]
    pub mountain_name: Option<String>,
    #[serde(default)]
    pub route_name: Option<String>,
    /// Whether bookings are open on this route
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountainRoutePayload {
    pub mountain_id: i64,
    pub route_id: i64,
    pub active: bool,
}

impl Record for MountainRoute {
    fn id(&self) -> RecordId {
        self.id.into()
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(self.id.into()),
            "mountainId" => Some(self.mountain_id.into()),
            "routeId" => Some(self.route_id.into()),
            "mountainName" => Some(self.mountain_name.as_ref().into()),
            "routeName" => Some(self.route_name.as_ref().into()),
            "active" => Some(self.active.into()),
            _ => None,
        }
    }
}

static DESCRIPTOR: LazyLock<ResourceDescriptor> = LazyLock::new(|| {
    ResourceDescriptor::builder(MountainRoutes::PATH)
        .name("Mountain route")
        .searchable(["mountainName", "routeName"])
        .filterable(["mountainId", "routeId", "active"])
        .sortable(["mountainName", "routeName", "active"])
        .build()
});

/// `/mountain-routes`
#[derive(Debug, Clone, Copy)]
pub struct MountainRoutes;

impl Resource for MountainRoutes {
    const PATH: &'static str = "mountain-routes";
    type Record = MountainRoute;
    type Payload = MountainRoutePayload;

    fn descriptor() -> &'static ResourceDescriptor {
        &DESCRIPTOR
    }
}
