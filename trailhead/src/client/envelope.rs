//! The backend's response envelope
//!
//! ```json
//! { "status": 200, "data": [...], "paging": { "page": 1, "totalPages": 3, ... } }
//! { "status": 404, "message": "Mountain not found" }
//! ```
//!
//! Bodies are validated here, at the transport boundary: a call either gets
//! the typed payload it asked for or a decode failure.

use serde::Deserialize;

use crate::listing::Paging;

/// Envelope statuses in this range are success
const SUCCESS_STATUS: std::ops::RangeInclusive<u16> = 200..=299;

/// Typed response envelope
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Envelope<T> {
    /// Business status, mirrors HTTP semantics
    pub status: u16,
    /// Payload: a list, a single record, or absent
    pub data: Option<T>,
    /// Present on list responses
    #[serde(default)]
    pub paging: Option<Paging>,
    /// Backend-supplied message, mostly on failures
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        SUCCESS_STATUS.contains(&self.status)
    }

    /// The payload of a detail/create/update response
    pub fn require_data(self) -> Result<T, String> {
        self.data
            .ok_or_else(|| "response envelope has no data".to_string())
    }

    /// The payload and paging block of a list response
    pub fn require_listing(self) -> Result<(T, Paging), String> {
        match (self.data, self.paging) {
            (Some(data), Some(paging)) => Ok((data, paging)),
            (None, _) => Err("list response envelope has no data".to_string()),
            (Some(_), None) => Err("list response envelope has no paging block".to_string()),
        }
    }
}

/// The parts of an envelope that matter before the payload is decoded
///
/// Decoded leniently so that a failing envelope is recognised even when its
/// `data` does not match the record type.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct StatusProbe {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
}

impl StatusProbe {
    pub(crate) fn read(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// A status field that is present and outside the success range
    pub(crate) fn failing_status(&self) -> Option<u16> {
        self.status.filter(|s| !SUCCESS_STATUS.contains(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_list_envelope() {
        let body = json!({
            "status": 200,
            "data": [{ "id": 1 }],
            "paging": { "page": 2, "totalPages": 5, "totalElements": 42, "hasNext": true, "hasPrevious": true }
        });
        let envelope: Envelope<Vec<Value>> = serde_json::from_value(body).unwrap();
        assert!(envelope.is_success());
        let (data, paging) = envelope.require_listing().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(paging.total_elements, 42);
        assert!(paging.has_next);
    }

    #[test]
    fn test_list_without_paging_is_rejected() {
        let envelope: Envelope<Vec<Value>> =
            serde_json::from_value(json!({ "status": 200, "data": [] })).unwrap();
        let err = envelope.require_listing().unwrap_err();
        assert!(err.contains("paging"));
    }

    #[test]
    fn test_missing_data() {
        let envelope: Envelope<Value> = serde_json::from_value(json!({ "status": 201 })).unwrap();
        assert!(envelope.is_success());
        assert!(envelope.require_data().is_err());
    }

    #[test]
    fn test_null_data_is_absent() {
        let envelope: Envelope<Value> =
            serde_json::from_value(json!({ "status": 200, "data": null })).unwrap();
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_status_probe() {
        let failing = StatusProbe::read(br#"{"status":409,"message":"Name taken","data":"x"}"#);
        assert_eq!(failing.failing_status(), Some(409));
        assert_eq!(failing.message.as_deref(), Some("Name taken"));

        let ok = StatusProbe::read(br#"{"status":204}"#);
        assert_eq!(ok.failing_status(), None);

        let garbage = StatusProbe::read(b"<html>");
        assert!(garbage.status.is_none());
        assert!(garbage.message.is_none());
    }
}
