//! Data Definitions - Column descriptors for the reporting engine
//!
//! A data definition says what a report column is called and what kind of
//! value it produces. Evaluating it against actual records is the reporting
//! engine's job, not ours.

/// Type tag of the values a data definition produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Integer,
    Decimal,
    Text,
    Boolean,
    Date,
}

impl DataType {
    pub fn display_name(&self) -> &'static str {
        match self {
            DataType::Integer => "Integer",
            DataType::Decimal => "Decimal",
            DataType::Text => "Text",
            DataType::Boolean => "Boolean",
            DataType::Date => "Date",
        }
    }
}

impl core::fmt::Display for DataType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Metadata every column descriptor exposes
pub trait DataDefinition: Send + Sync {
    /// Display name, if one was given at construction
    fn name(&self) -> Option<&str>;

    fn description(&self) -> Option<&str> {
        None
    }

    /// Type of the value produced for each evaluated record
    fn data_type(&self) -> DataType;

    /// Message key the reporting UI uses to label this kind of definition
    fn localization_key(&self) -> &'static str;
}

/// Marker for definitions evaluated against persons
pub trait PersonDataDefinition: DataDefinition {}

/// Person ID column
///
/// Produces each person's integer identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonIdDataDefinition {
    name: Option<String>,
}

impl PersonIdDataDefinition {
    pub const LOCALIZATION_KEY: &'static str = "reporting.PersonIdDataDefinition";

    /// Unnamed column
    pub fn new() -> Self {
        Self::default()
    }

    /// Column with a display name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

impl DataDefinition for PersonIdDataDefinition {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn data_type(&self) -> DataType {
        DataType::Integer
    }

    fn localization_key(&self) -> &'static str {
        Self::LOCALIZATION_KEY
    }
}

impl PersonDataDefinition for PersonIdDataDefinition {}
