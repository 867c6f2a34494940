//! Data models for hospitalinfo.
//!
//! Records are republished exactly as the static host serves them, so they are
//! kept as raw [`serde_json::Value`] objects. The only typed shapes here are the
//! resource categories and the query parameters each category understands.

use serde::Deserialize;

/// A single JSON object from one of the four datasets.
///
/// Records are never validated, created, or modified. Bloodbank records carry
/// `name`/`loc`/`add`, donor records carry `id`/`location`/`bloodgroup`/`available`,
/// and camp and event records carry `id`/`location`.
pub type Record = serde_json::Value;

/// The resource categories served by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Blood banks (`/bloodbank`).
    Bloodbank,
    /// Registered blood donors (`/donor`).
    Donor,
    /// Donation camps (`/camps`).
    Camps,
    /// Donation drives and other events (`/events`).
    Events,
}

impl Resource {
    /// Every resource, in routing order.
    pub const ALL: [Resource; 4] = [
        Resource::Bloodbank,
        Resource::Donor,
        Resource::Camps,
        Resource::Events,
    ];

    /// Resolve the first path segment of a request to a resource.
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|resource| resource.segment() == segment)
    }

    /// The path segment that selects this resource.
    pub fn segment(&self) -> &'static str {
        match self {
            Resource::Bloodbank => "bloodbank",
            Resource::Donor => "donor",
            Resource::Camps => "camps",
            Resource::Events => "events",
        }
    }

    /// The file name of this resource's dataset on the static host.
    pub fn dataset_file(&self) -> &'static str {
        match self {
            Resource::Bloodbank => "bloodbank.json",
            Resource::Donor => "donorinfo.json",
            Resource::Camps => "camps.json",
            Resource::Events => "events.json",
        }
    }
}

/// Query parameters for `GET /bloodbank`.
#[derive(Debug, Default, Deserialize)]
pub struct BloodbankQuery {
    /// Substring of the blood bank name.
    pub name: Option<String>,
    /// Substring of the blood bank locality.
    pub loc: Option<String>,
    /// Substring of the blood bank street address.
    pub add: Option<String>,
}

/// Query parameters for `GET /donor`.
#[derive(Debug, Default, Deserialize)]
pub struct DonorQuery {
    /// Exact donor identifier.
    pub id: Option<String>,
    /// Substring of the donor location.
    pub location: Option<String>,
    /// Exact blood group, e.g. `O+` or `AB-`.
    pub bloodgroup: Option<String>,
}

/// Query parameters for `GET /camps` and `GET /events`.
#[derive(Debug, Default, Deserialize)]
pub struct LocationQuery {
    /// Substring of the camp or event location.
    pub location: Option<String>,
}
