//! Auxiliary entity subgraphs attached to an ontology resource
//!
//! An [`EntityNode`] is a nestable subgraph with a required type/label pair,
//! a deduplicated property set and child entities. [`FlatEntity`] is the
//! flat analogue identified by an external string instead of a generated
//! key, and never nests.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{GnossError, GnossResult};
use crate::ontology::property::PropertySet;

/// Substring of an `rdf:type` IRI after the last `#` or `/`; the whole
/// string when neither occurs. Used to build item URIs.
pub fn type_tail(rdf_type: &str) -> &str {
    match rdf_type.rfind(&['#', '/'][..]) {
        Some(pos) => &rdf_type[pos + 1..],
        None => rdf_type,
    }
}

fn require_non_empty(value: &str, field: &'static str, subject: &str) -> GnossResult<()> {
    if value.trim().is_empty() {
        return Err(GnossError::MissingRequiredField {
            field,
            subject: subject.to_string(),
        });
    }
    Ok(())
}

/// A nestable auxiliary entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityNode {
    rdf_type: String,
    rdfs_label: String,
    /// Predicate linking the owning block to this entity
    pub owner_predicate: String,
    /// Deduplicated property set
    pub properties: PropertySet,
    /// Child entities
    pub children: Vec<EntityNode>,
    identity_key: Uuid,
}

impl EntityNode {
    /// Create an entity. Fails with [`GnossError::MissingRequiredField`]
    /// when `rdf_type` or `rdfs_label` is empty; the identity key is
    /// generated here and never changes.
    pub fn new(
        rdf_type: impl Into<String>,
        rdfs_label: impl Into<String>,
        owner_predicate: impl Into<String>,
    ) -> GnossResult<Self> {
        let rdf_type = rdf_type.into();
        let rdfs_label = rdfs_label.into();
        require_non_empty(&rdf_type, "rdf:type", "auxiliary entity")?;
        require_non_empty(&rdfs_label, "rdfs:label", &format!("entity <{}>", rdf_type))?;
        Ok(Self {
            rdf_type,
            rdfs_label,
            owner_predicate: owner_predicate.into(),
            properties: PropertySet::new(),
            children: Vec::new(),
            identity_key: Uuid::new_v4(),
        })
    }

    /// The entity's `rdf:type` IRI
    pub fn rdf_type(&self) -> &str {
        &self.rdf_type
    }

    /// Replace the `rdf:type`; the same non-empty validation as at
    /// construction applies
    pub fn set_rdf_type(&mut self, rdf_type: impl Into<String>) -> GnossResult<()> {
        let rdf_type = rdf_type.into();
        require_non_empty(&rdf_type, "rdf:type", "auxiliary entity")?;
        self.rdf_type = rdf_type;
        Ok(())
    }

    /// The entity's `rdfs:label`
    pub fn rdfs_label(&self) -> &str {
        &self.rdfs_label
    }

    /// Replace the `rdfs:label`; validated non-empty
    pub fn set_rdfs_label(&mut self, rdfs_label: impl Into<String>) -> GnossResult<()> {
        let rdfs_label = rdfs_label.into();
        require_non_empty(
            &rdfs_label,
            "rdfs:label",
            &format!("entity <{}>", self.rdf_type),
        )?;
        self.rdfs_label = rdfs_label;
        Ok(())
    }

    /// Stable key generated at construction
    pub fn identity_key(&self) -> Uuid {
        self.identity_key
    }

    /// Type tail used in this entity's item URI
    pub fn type_tail(&self) -> &str {
        type_tail(&self.rdf_type)
    }

    /// Item URI for this entity:
    /// `{graphs_url}items/{type_tail}_{outer_resource_id}_{identity_key}`.
    /// The outer resource id is reused at every nesting depth.
    pub fn item_uri(&self, graphs_url: &str, outer_resource_id: &str) -> String {
        format!(
            "{}items/{}_{}_{}",
            graphs_url,
            self.type_tail(),
            outer_resource_id,
            self.identity_key
        )
    }

    /// Whether any property on this node carries emittable data. Children
    /// are not consulted.
    pub fn has_any_data(&self) -> bool {
        self.properties.has_data()
    }

    /// Emission gate: a subgraph is written only when this node or some
    /// descendant carries data. Gated-out subgraphs leave no trace in the
    /// output, valid type/label notwithstanding.
    pub fn has_output(&self) -> bool {
        self.has_any_data() || self.children.iter().any(EntityNode::has_output)
    }
}

/// First-seen-wins dictionary over entities, keyed by identity key.
/// Iteration order is insertion order, so repeated serializations of the
/// same tree stay byte-identical. Duplicate keys are dropped, not merged.
pub fn entity_dictionary(entities: &[EntityNode]) -> IndexMap<Uuid, &EntityNode> {
    let mut dictionary = IndexMap::new();
    for entity in entities {
        dictionary.entry(entity.identity_key).or_insert(entity);
    }
    dictionary
}

/// Flat auxiliary entity identified by an external string; never nests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatEntity {
    rdf_type: String,
    rdfs_label: String,
    /// Predicate linking the root block to this entity
    pub owner_predicate: String,
    /// Caller-supplied identifier embedded in the item URI
    pub external_identifier: String,
    /// Deduplicated property set
    pub properties: PropertySet,
}

impl FlatEntity {
    /// Create a flat entity; `rdf_type` and `rdfs_label` are validated
    /// non-empty
    pub fn new(
        rdf_type: impl Into<String>,
        rdfs_label: impl Into<String>,
        owner_predicate: impl Into<String>,
        external_identifier: impl Into<String>,
    ) -> GnossResult<Self> {
        let rdf_type = rdf_type.into();
        let rdfs_label = rdfs_label.into();
        require_non_empty(&rdf_type, "rdf:type", "flat entity")?;
        require_non_empty(&rdfs_label, "rdfs:label", &format!("entity <{}>", rdf_type))?;
        Ok(Self {
            rdf_type,
            rdfs_label,
            owner_predicate: owner_predicate.into(),
            external_identifier: external_identifier.into(),
            properties: PropertySet::new(),
        })
    }

    /// The entity's `rdf:type` IRI
    pub fn rdf_type(&self) -> &str {
        &self.rdf_type
    }

    /// The entity's `rdfs:label`
    pub fn rdfs_label(&self) -> &str {
        &self.rdfs_label
    }

    /// Item URI: `{graphs_url}items/{type_tail}_{external_identifier}`
    pub fn item_uri(&self, graphs_url: &str) -> String {
        format!(
            "{}items/{}_{}",
            graphs_url,
            type_tail(&self.rdf_type),
            self.external_identifier
        )
    }

    /// Whether any property carries emittable data
    pub fn has_any_data(&self) -> bool {
        self.properties.has_data()
    }
}

/// First-seen-wins dictionary over flat entities, keyed by external
/// identifier, in insertion order
pub fn flat_entity_dictionary(entities: &[FlatEntity]) -> IndexMap<&str, &FlatEntity> {
    let mut dictionary = IndexMap::new();
    for entity in entities {
        dictionary
            .entry(entity.external_identifier.as_str())
            .or_insert(entity);
    }
    dictionary
}
