//! Property value types for ontology resources and auxiliary entities
//!
//! A property is the unit of serialization: a predicate name, a typed value
//! and an optional language tag. Property sets deduplicate on structural
//! equality at insert time, preserving first-occurrence order.

use serde::{Deserialize, Serialize};

use crate::error::{GnossError, GnossResult};

/// All-zero token a pre-normalized date property carries when the source
/// date was absent. Date strings are normalized by an external collaborator;
/// the serializer only ever compares against this sentinel.
pub const EMPTY_DATE_TOKEN: &str = "00000000000000";

/// Closed union of serializable property values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// Single string value
    Text(String),
    /// Ordered list of string values
    TextList(Vec<String>),
    /// Boolean value, emitted as literal `true`/`false`
    Boolean(bool),
}

impl PropertyValue {
    /// Get the variant name as a string
    pub fn kind_name(&self) -> &'static str {
        match self {
            PropertyValue::Text(_) => "Text",
            PropertyValue::TextList(_) => "TextList",
            PropertyValue::Boolean(_) => "Boolean",
        }
    }

    /// Whether the value carries data the serializer would emit.
    ///
    /// Text counts as empty when it is whitespace or equal to the all-zero
    /// date token; a list counts as empty when no element is non-blank.
    /// Booleans always carry data.
    pub fn has_data(&self) -> bool {
        match self {
            PropertyValue::Text(s) => {
                let trimmed = s.trim();
                !trimmed.is_empty() && trimmed != EMPTY_DATE_TOKEN
            }
            PropertyValue::TextList(values) => values.iter().any(|v| !v.trim().is_empty()),
            PropertyValue::Boolean(_) => true,
        }
    }
}

// Convenience conversions
impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(values: Vec<String>) -> Self {
        PropertyValue::TextList(values)
    }
}

impl From<Vec<&str>> for PropertyValue {
    fn from(values: Vec<&str>) -> Self {
        PropertyValue::TextList(values.into_iter().map(String::from).collect())
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

/// One predicate/value pair on a resource or auxiliary entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyProperty {
    /// Prefixed predicate name, e.g. `dc:title`
    pub name: String,
    /// Property value
    pub value: PropertyValue,
    language: Option<String>,
    /// Marks a value holding an image filename, rewritten through the
    /// image-path collaborator before emission
    pub is_image: bool,
}

impl OntologyProperty {
    /// Create a property with no language tag
    pub fn new(name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            language: None,
            is_image: false,
        }
    }

    /// Create an image property; its value is rewritten through the
    /// [`ImagePathRewriter`](crate::ontology::ImagePathRewriter) collaborator
    /// when the owning entity is serialized
    pub fn image(name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self {
            is_image: true,
            ..Self::new(name, value)
        }
    }

    /// Current language tag, if any
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Set the language tag.
    ///
    /// The two-letter validation inspects the *stored* tag, so an invalid
    /// tag is only reported on the set call after the one that stored it.
    /// This mirrors long-standing platform behavior that downstream callers
    /// rely on; see DESIGN.md.
    pub fn set_language(&mut self, language: impl Into<String>) -> GnossResult<()> {
        if let Some(stored) = &self.language {
            if !is_two_letter_tag(stored) {
                return Err(GnossError::InvalidLanguageTag(stored.clone()));
            }
        }
        self.language = Some(language.into());
        Ok(())
    }

    /// Clear the language tag
    pub fn clear_language(&mut self) {
        self.language = None;
    }
}

fn is_two_letter_tag(tag: &str) -> bool {
    tag.len() == 2 && tag.chars().all(|c| c.is_ascii_alphabetic())
}

/// Insertion-ordered property collection, deduplicated on structural
/// equality (variant kind, name, value, language). First occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySet {
    items: Vec<OntologyProperty>,
}

impl PropertySet {
    /// Create an empty property set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property. Returns false (and drops the property) when a
    /// structurally equal one is already present.
    pub fn add(&mut self, property: OntologyProperty) -> bool {
        if self.items.contains(&property) {
            return false;
        }
        self.items.push(property);
        true
    }

    /// Replace every property with the given name by the new value.
    /// Properties are immutable once added; mutation is whole-value
    /// replacement only.
    pub fn replace(&mut self, property: OntologyProperty) {
        self.items.retain(|p| p.name != property.name);
        self.items.push(property);
    }

    /// Iterate properties in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &OntologyProperty> {
        self.items.iter()
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether any property in the set carries emittable data
    pub fn has_data(&self) -> bool {
        self.items.iter().any(|p| p.value.has_data())
    }
}

impl<'a> IntoIterator for &'a PropertySet {
    type Item = &'a OntologyProperty;
    type IntoIter = std::slice::Iter<'a, OntologyProperty>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversions() {
        let text: PropertyValue = "hello".into();
        assert_eq!(text, PropertyValue::Text("hello".to_string()));

        let list: PropertyValue = vec!["a", "b"].into();
        assert_eq!(list.kind_name(), "TextList");

        let flag: PropertyValue = true.into();
        assert_eq!(flag, PropertyValue::Boolean(true));
    }

    #[test]
    fn test_has_data() {
        assert!(PropertyValue::Text("x".to_string()).has_data());
        assert!(!PropertyValue::Text("   ".to_string()).has_data());
        assert!(!PropertyValue::Text(EMPTY_DATE_TOKEN.to_string()).has_data());
        assert!(PropertyValue::Text("20240101120000".to_string()).has_data());
        assert!(!PropertyValue::TextList(vec!["".to_string(), " ".to_string()]).has_data());
        assert!(PropertyValue::TextList(vec!["".to_string(), "x".to_string()]).has_data());
        assert!(PropertyValue::Boolean(false).has_data());
    }

    #[test]
    fn test_set_dedup_preserves_first_occurrence() {
        let mut set = PropertySet::new();
        assert!(set.add(OntologyProperty::new("dc:title", "A")));
        assert!(set.add(OntologyProperty::new("dc:creator", "B")));
        assert!(!set.add(OntologyProperty::new("dc:title", "A")));
        assert!(set.add(OntologyProperty::new("dc:title", "C")));

        let names: Vec<_> = set.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["dc:title", "dc:creator", "dc:title"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_dedup_considers_language() {
        let mut set = PropertySet::new();
        let mut tagged = OntologyProperty::new("dc:title", "A");
        tagged.set_language("en").unwrap();

        assert!(set.add(OntologyProperty::new("dc:title", "A")));
        assert!(set.add(tagged));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_language_check_fires_on_stored_tag() {
        let mut prop = OntologyProperty::new("dc:title", "A");

        // First set is accepted even when invalid: the check looks at the
        // stored field, which is still empty here.
        prop.set_language("english").unwrap();

        // The invalid stored tag is reported on the next set.
        let err = prop.set_language("en").unwrap_err();
        assert!(matches!(err, GnossError::InvalidLanguageTag(t) if t == "english"));
    }

    #[test]
    fn test_valid_language_roundtrip() {
        let mut prop = OntologyProperty::new("dc:title", "A");
        prop.set_language("en").unwrap();
        prop.set_language("es").unwrap();
        assert_eq!(prop.language(), Some("es"));
    }

    #[test]
    fn test_replace_is_whole_value() {
        let mut set = PropertySet::new();
        set.add(OntologyProperty::new("dc:title", "A"));
        set.add(OntologyProperty::new("dc:creator", "B"));
        set.replace(OntologyProperty::new("dc:title", "C"));

        assert_eq!(set.len(), 2);
        let titles: Vec<_> = set
            .iter()
            .filter(|p| p.name == "dc:title")
            .map(|p| &p.value)
            .collect();
        assert_eq!(titles, [&PropertyValue::Text("C".to_string())]);
    }
}
