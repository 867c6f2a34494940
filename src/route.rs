//! Path parsing for the request dispatcher.

use std::borrow::Cow;

use crate::model::Resource;

/// Where a request path leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`: the HTML description of the API.
    Index,
    /// `/{resource}`: the (filtered) collection.
    Collection(Resource),
    /// `/{resource}/{id}`: a single record.
    Record(Resource, String),
    /// Anything else.
    Unknown,
}

impl Route {
    /// Parse a request path.
    ///
    /// Empty segments are skipped, so `//donor/` is the same as `/donor`.
    /// Segments after the identifier are ignored.
    pub fn parse(path: &str) -> Self {
        let mut segments = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(decode_segment);

        let Some(base) = segments.next() else {
            return Route::Index;
        };
        let Some(resource) = Resource::from_segment(&base) else {
            return Route::Unknown;
        };

        match segments.next() {
            Some(id) => Route::Record(resource, id.into_owned()),
            None => Route::Collection(resource),
        }
    }
}

fn decode_segment(segment: &str) -> Cow<'_, str> {
    // Invalid escapes are left as-is rather than rejected.
    urlencoding::decode(segment).unwrap_or(Cow::Borrowed(segment))
}
