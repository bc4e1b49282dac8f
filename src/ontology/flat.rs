//! Root ontology anchored at an external identifier
//!
//! A [`FlatRootOntology`] serializes a flat list of [`FlatEntity`] values.
//! Each entity is independently gated and written with the same
//! reference/body split as a nested entity, but never recurses.

use crate::error::{GnossError, GnossResult};
use crate::ontology::entity::{flat_entity_dictionary, FlatEntity};
use crate::ontology::property::PropertySet;
use crate::ontology::serializer::{OntologySerializer, WriteContext};
use crate::ontology::writer::RdfXmlWriter;

/// Root-of-document state with a flat entity list
pub struct FlatRootOntology {
    graphs_url: String,
    ontology_url: String,
    rdf_type: String,
    rdfs_label: String,
    identifier: String,
    /// `xmlns:p="uri"` declarations, emitted in declared order
    pub declared_prefixes: Vec<String>,
    /// Root-level properties, written only in the root context
    pub properties: PropertySet,
    /// Flat entities, independently gated
    pub flat_entities: Vec<FlatEntity>,
}

impl FlatRootOntology {
    /// Create a flat-root ontology around an externally supplied root
    /// identifier. `rdf_type` and `rdfs_label` are validated non-empty.
    pub fn new(
        graphs_url: impl Into<String>,
        ontology_url: impl Into<String>,
        rdf_type: impl Into<String>,
        rdfs_label: impl Into<String>,
        identifier: impl Into<String>,
    ) -> GnossResult<Self> {
        let rdf_type = rdf_type.into();
        let rdfs_label = rdfs_label.into();
        if rdf_type.trim().is_empty() {
            return Err(GnossError::MissingRequiredField {
                field: "rdf:type",
                subject: "flat-root ontology".to_string(),
            });
        }
        if rdfs_label.trim().is_empty() {
            return Err(GnossError::MissingRequiredField {
                field: "rdfs:label",
                subject: format!("flat-root ontology <{}>", rdf_type),
            });
        }
        let mut graphs_url = graphs_url.into();
        if !graphs_url.ends_with('/') {
            graphs_url.push('/');
        }
        Ok(Self {
            graphs_url,
            ontology_url: ontology_url.into(),
            rdf_type,
            rdfs_label,
            identifier: identifier.into(),
            declared_prefixes: Vec::new(),
            properties: PropertySet::new(),
            flat_entities: Vec::new(),
        })
    }
}

impl OntologySerializer for FlatRootOntology {
    fn graphs_url(&self) -> &str {
        &self.graphs_url
    }

    fn ontology_url(&self) -> &str {
        &self.ontology_url
    }

    fn rdf_type(&self) -> &str {
        &self.rdf_type
    }

    fn rdfs_label(&self) -> &str {
        &self.rdfs_label
    }

    fn declared_prefixes(&self) -> &[String] {
        &self.declared_prefixes
    }

    fn identifier(&self) -> String {
        self.identifier.clone()
    }

    fn item_resource_id(&self) -> String {
        self.identifier.clone()
    }

    // Root properties belong to the externally identified subject; an
    // outer document embedding this one already carries them.
    fn write_root_properties(
        &self,
        writer: &mut RdfXmlWriter,
        context: WriteContext,
    ) -> GnossResult<()> {
        if context != WriteContext::Root {
            return Ok(());
        }
        for property in &self.properties {
            writer.write_any(property);
        }
        Ok(())
    }

    fn write_root_references(&self, writer: &mut RdfXmlWriter) -> GnossResult<()> {
        let dictionary = flat_entity_dictionary(&self.flat_entities);
        for entity in dictionary.values().copied() {
            if !entity.has_any_data() {
                continue;
            }
            writer.write_reference(&entity.owner_predicate, &entity.item_uri(&self.graphs_url));
        }
        Ok(())
    }

    fn write_description_bodies(&self, writer: &mut RdfXmlWriter) -> GnossResult<()> {
        let dictionary = flat_entity_dictionary(&self.flat_entities);
        for entity in dictionary.values().copied() {
            if !entity.has_any_data() {
                continue;
            }
            writer.open_description(&entity.item_uri(&self.graphs_url));
            writer.write_reference("rdf:type", entity.rdf_type());
            writer.write_string("rdfs:label", entity.rdfs_label(), None);
            for property in &entity.properties {
                writer.write_any(property);
            }
            writer.close_description();
        }
        Ok(())
    }
}
