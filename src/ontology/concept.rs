//! SKOS concept nodes for taxonomy ontologies
//!
//! A [`ConceptNode`] is the hierarchical analogue of an auxiliary entity,
//! used only by [`TaxonomyOntology`](crate::ontology::TaxonomyOntology).
//! It carries parent/child links and a depth level instead of a generated
//! identity key; its type and label are the fixed SKOS Concept IRI.

use serde::{Deserialize, Serialize};

use crate::ontology::property::PropertySet;

/// Fixed `rdf:type` and `rdfs:label` of every concept node
pub const SKOS_CONCEPT: &str = "http://www.w3.org/2004/02/skos/core#Concept";

/// One node of a taxonomy forest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptNode {
    level: u32,
    parent_name: Option<String>,
    own_name: String,
    /// Narrower concepts
    pub children: Vec<ConceptNode>,
    /// Deduplicated property set
    pub properties: PropertySet,
}

impl ConceptNode {
    /// Create a concept. Dots in `own_name` are replaced by underscores so
    /// the name can be embedded in an item URI. `level` 0 is a forest root
    /// and is immutable afterwards.
    pub fn new(own_name: impl Into<String>, level: u32, parent_name: Option<String>) -> Self {
        Self {
            level,
            parent_name,
            own_name: own_name.into().replace('.', "_"),
            children: Vec::new(),
            properties: PropertySet::new(),
        }
    }

    /// Fixed `rdf:type` of the concept
    pub fn rdf_type(&self) -> &'static str {
        SKOS_CONCEPT
    }

    /// Fixed `rdfs:label` of the concept (same value as the type)
    pub fn rdfs_label(&self) -> &'static str {
        SKOS_CONCEPT
    }

    /// Depth level, 0 = forest root
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Name of this concept within the taxonomy
    pub fn own_name(&self) -> &str {
        &self.own_name
    }

    /// Name of the broader concept, when this is not a forest root
    pub fn parent_name(&self) -> Option<&str> {
        self.parent_name.as_deref()
    }

    /// Whether this concept has no broader concept
    pub fn is_forest_root(&self) -> bool {
        self.parent_name.is_none()
    }

    /// Identifier under a taxonomy root name: the two are joined by `_`
    /// unless the root name already ends with one
    pub fn assembled_identifier(&self, root_name: &str) -> String {
        assemble(root_name, &self.own_name)
    }

    /// Subject URI of this concept:
    /// `{graphs_url}items/{assembled_identifier}`
    pub fn gnoss_id(&self, graphs_url: &str, root_name: &str) -> String {
        format!("{}items/{}", graphs_url, self.assembled_identifier(root_name))
    }

    /// Subject URI of the broader concept, when one is set
    pub fn parent_gnoss_id(&self, graphs_url: &str, root_name: &str) -> Option<String> {
        self.parent_name
            .as_deref()
            .map(|parent| format!("{}items/{}", graphs_url, assemble(root_name, parent)))
    }

    /// Whether any property on this node carries emittable data. Taxonomy
    /// pruning checks this node only, never its descendants.
    pub fn has_any_data(&self) -> bool {
        self.properties.has_data()
    }
}

fn assemble(root_name: &str, own_name: &str) -> String {
    if root_name.ends_with('_') {
        format!("{}{}", root_name, own_name)
    } else {
        format!("{}_{}", root_name, own_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::property::OntologyProperty;

    #[test]
    fn test_dots_replaced_at_construction() {
        let concept = ConceptNode::new("v1.2.3", 0, None);
        assert_eq!(concept.own_name(), "v1_2_3");
    }

    #[test]
    fn test_assembled_identifier_joining() {
        let concept = ConceptNode::new("music", 1, Some("arts".to_string()));
        assert_eq!(concept.assembled_identifier("thesaurus"), "thesaurus_music");
        assert_eq!(concept.assembled_identifier("thesaurus_"), "thesaurus_music");
    }

    #[test]
    fn test_gnoss_ids() {
        let concept = ConceptNode::new("music", 1, Some("arts".to_string()));
        assert_eq!(
            concept.gnoss_id("http://graphs.example.org/", "thesaurus"),
            "http://graphs.example.org/items/thesaurus_music"
        );
        assert_eq!(
            concept
                .parent_gnoss_id("http://graphs.example.org/", "thesaurus")
                .unwrap(),
            "http://graphs.example.org/items/thesaurus_arts"
        );

        let root = ConceptNode::new("arts", 0, None);
        assert!(root.parent_gnoss_id("http://graphs.example.org/", "thesaurus").is_none());
    }

    #[test]
    fn test_has_any_data_ignores_children() {
        let mut parent = ConceptNode::new("arts", 0, None);
        let mut child = ConceptNode::new("music", 1, Some("arts".to_string()));
        child
            .properties
            .add(OntologyProperty::new("skos:prefLabel", "Music"));
        parent.children.push(child);

        assert!(!parent.has_any_data());
        assert!(parent.children[0].has_any_data());
    }
}
