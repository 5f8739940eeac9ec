//! Dimension - A reusable way of slicing indicator results
//!
//! Dimension is an Entity. It carries two identities:
//! - `DimensionId`, a storage-assigned integer (absent until first save)
//! - `DimensionUuid`, a stable global identifier that never changes once set
//!
//! Retiring a dimension hides it from default listings. It stays in storage
//! until it is purged.

/// Storage-assigned primary identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DimensionId(i32);

impl DimensionId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl core::fmt::Display for DimensionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Globally unique identifier, immutable once assigned
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DimensionUuid(String);

impl DimensionUuid {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self(uuid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for DimensionUuid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a dimension has been through storage yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    /// Never saved; the next save inserts it
    Transient,
    /// Saved at least once under this id
    Persisted(DimensionId),
}

/// Dimension entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    /// Assigned by the persister on first save
    id: Option<DimensionId>,
    /// Assigned by the caller or, failing that, by the persister on insert
    uuid: Option<DimensionUuid>,
    name: String,
    description: Option<String>,
    retired: bool,
    retire_reason: Option<String>,
}

impl Dimension {
    /// Create a new, unsaved Dimension
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            uuid: None,
            name: name.into(),
            description: None,
            retired: false,
            retire_reason: None,
        }
    }

    /// Builder: use a caller-chosen uuid instead of a generated one
    pub fn with_uuid(mut self, uuid: DimensionUuid) -> Self {
        self.uuid = Some(uuid);
        self
    }

    /// Builder: set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Rebuild a dimension that already lives in storage.
    ///
    /// Only persister implementations should call this.
    pub fn rehydrate(id: DimensionId, uuid: DimensionUuid, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            uuid: Some(uuid),
            ..Self::new(name)
        }
    }

    /// Restore the retired flag and reason exactly as stored.
    ///
    /// Only persister implementations should call this.
    pub fn restore_retirement(&mut self, retired: bool, retire_reason: Option<String>) {
        self.retired = retired;
        self.retire_reason = retire_reason;
    }

    /// Stamp the storage identity onto this dimension after an insert.
    ///
    /// Only persister implementations should call this.
    pub fn assign_identity(&mut self, id: DimensionId, uuid: DimensionUuid) {
        self.id = Some(id);
        self.uuid = Some(uuid);
    }

    // ========== Getters ==========

    pub fn id(&self) -> Option<DimensionId> {
        self.id
    }

    pub fn uuid(&self) -> Option<&DimensionUuid> {
        self.uuid.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_retired(&self) -> bool {
        self.retired
    }

    pub fn retire_reason(&self) -> Option<&str> {
        self.retire_reason.as_deref()
    }

    pub fn identity(&self) -> Identity {
        match self.id {
            Some(id) => Identity::Persisted(id),
            None => Identity::Transient,
        }
    }

    // ========== Mutation ==========

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Mark as retired. Storage is untouched until the next save.
    pub fn retire(&mut self, reason: impl Into<String>) {
        self.retired = true;
        self.retire_reason = Some(reason.into());
    }

    /// Clear the retired flag and its reason
    pub fn unretire(&mut self) {
        self.retired = false;
        self.retire_reason = None;
    }

    /// Case-insensitive name match, either whole-name or substring
    pub fn matches_name(&self, query: &str, exact_match_only: bool) -> bool {
        let name = self.name.to_lowercase();
        let query = query.to_lowercase();
        if exact_match_only {
            name == query
        } else {
            name.contains(&query)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_dimension_is_transient() {
        let dimension = Dimension::new("Gender");

        assert_eq!(dimension.identity(), Identity::Transient);
        assert!(dimension.id().is_none());
        assert!(dimension.uuid().is_none());
        assert!(!dimension.is_retired());
    }

    #[test]
    fn test_assign_identity() {
        let mut dimension = Dimension::new("Age group");
        dimension.assign_identity(DimensionId::new(7), DimensionUuid::new("abc"));

        assert_eq!(dimension.identity(), Identity::Persisted(DimensionId::new(7)));
        assert_eq!(dimension.uuid().map(|u| u.as_str()), Some("abc"));
    }

    #[test]
    fn test_retire_and_unretire() {
        let mut dimension = Dimension::new("Location");

        dimension.retire("replaced by Facility");
        assert!(dimension.is_retired());
        assert_eq!(dimension.retire_reason(), Some("replaced by Facility"));

        dimension.unretire();
        assert!(!dimension.is_retired());
        assert!(dimension.retire_reason().is_none());
    }

    #[test]
    fn test_restore_retirement_keeps_missing_reason() {
        let mut dimension =
            Dimension::rehydrate(DimensionId::new(1), DimensionUuid::new("u"), "Location");
        dimension.restore_retirement(true, None);

        assert!(dimension.is_retired());
        assert!(dimension.retire_reason().is_none());
    }

    #[test]
    fn test_matches_name() {
        let dimension = Dimension::new("Age Group");

        assert!(dimension.matches_name("age", false));
        assert!(dimension.matches_name("GROUP", false));
        assert!(!dimension.matches_name("age", true));
        assert!(dimension.matches_name("age group", true));
        assert!(!dimension.matches_name("gender", false));
    }
}
