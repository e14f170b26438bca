//! Resource paths on the drug-information API.

use std::fmt;

/// Drug-record collections that support search, detail and subresource
/// lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    DispensableDrugs,
    DispensableGenerics,
    PackagedDrugs,
    PrescribableDrugs,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::DispensableDrugs,
        Collection::DispensableGenerics,
        Collection::PackagedDrugs,
        Collection::PrescribableDrugs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Collection::DispensableDrugs => "DispensableDrugs",
            Collection::DispensableGenerics => "DispensableGenerics",
            Collection::PackagedDrugs => "PackagedDrugs",
            Collection::PrescribableDrugs => "PrescribableDrugs",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-record views below `{collection}/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subresource {
    Interactions,
    DoseRecords,
    Contraindications,
    RxNormConcepts,
}

impl Subresource {
    pub fn as_str(self) -> &'static str {
        match self {
            Subresource::Interactions => "interactions",
            Subresource::DoseRecords => "doserecords",
            Subresource::Contraindications => "contraindications",
            Subresource::RxNormConcepts => "RxNormConcepts",
        }
    }
}

impl fmt::Display for Subresource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, non-empty path segments below the API root.
///
/// Segments are used verbatim; the builder never encodes them, so a caller
/// passing a pre-encoded id is not double-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    /// Split `path` on `/`, dropping empty segments.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split('/')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Take each segment as given, dropping only empty ones.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            segments: segments
                .into_iter()
                .map(|s| s.as_ref().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// `{collection}/search`
    pub fn search(collection: Collection) -> Self {
        Self::from_segments([collection.as_str(), "search"])
    }

    /// `{collection}/{id}`
    pub fn record(collection: Collection, id: &str) -> Self {
        Self::from_segments([collection.as_str(), id])
    }

    /// `{collection}/{id}/{subresource}`
    pub fn subresource(collection: Collection, id: &str, subresource: Subresource) -> Self {
        Self::from_segments([collection.as_str(), id, subresource.as_str()])
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl From<&str> for ResourcePath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}
