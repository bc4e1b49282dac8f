//! SKOS taxonomy documents
//!
//! A [`TaxonomyOntology`] serializes a [`ConceptNode`] forest as a SKOS
//! collection under a fixed namespace set. Forest roots hang off the
//! collection via `skos:member`; every other concept is referenced from its
//! broader concept's block via `skos:narrower`.

use crate::error::{GnossError, GnossResult};
use crate::ontology::concept::ConceptNode;
use crate::ontology::property::PropertySet;
use crate::ontology::serializer::{OntologySerializer, WriteContext, MAX_ENTITY_DEPTH};
use crate::ontology::writer::RdfXmlWriter;

/// Fixed `rdf:type` and `rdfs:label` of the taxonomy root
pub const SKOS_COLLECTION: &str = "http://www.w3.org/2004/02/skos/core#Collection";

fn fixed_prefixes() -> Vec<String> {
    [
        "xmlns:dc=\"http://purl.org/dc/elements/1.1/\"",
        "xmlns:rdfs=\"http://www.w3.org/2000/01/rdf-schema#\"",
        "xmlns:owl=\"http://www.w3.org/2002/07/owl#\"",
        "xmlns:xsd=\"http://www.w3.org/2001/XMLSchema#\"",
        "xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\"",
        "xmlns:taxo=\"http://www.gnoss.com/taxo#\"",
        "xmlns:skos=\"http://www.w3.org/2004/02/skos/core#\"",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// A taxonomy document over one concept forest
pub struct TaxonomyOntology {
    graphs_url: String,
    ontology_url: String,
    root_name: String,
    source: String,
    scope_note: String,
    declared_prefixes: Vec<String>,
    /// Extra root-level properties, written only in the root context
    pub properties: PropertySet,
    /// Forest roots
    pub concepts: Vec<ConceptNode>,
}

impl TaxonomyOntology {
    /// Create a taxonomy. `root_name` anchors every concept identifier;
    /// `source` and `scope_note` become the mandatory `dc:source` and
    /// `skos:scopeNote` root properties.
    pub fn new(
        graphs_url: impl Into<String>,
        ontology_url: impl Into<String>,
        root_name: impl Into<String>,
        source: impl Into<String>,
        scope_note: impl Into<String>,
    ) -> Self {
        let mut graphs_url = graphs_url.into();
        if !graphs_url.ends_with('/') {
            graphs_url.push('/');
        }
        Self {
            graphs_url,
            ontology_url: ontology_url.into(),
            root_name: root_name.into(),
            source: source.into(),
            scope_note: scope_note.into(),
            declared_prefixes: fixed_prefixes(),
            properties: PropertySet::new(),
            concepts: Vec::new(),
        }
    }

    /// Name anchoring every assembled concept identifier
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    fn write_concept_body(
        &self,
        writer: &mut RdfXmlWriter,
        concept: &ConceptNode,
        depth: usize,
    ) -> GnossResult<()> {
        if depth >= MAX_ENTITY_DEPTH {
            return Err(GnossError::DepthLimitExceeded {
                limit: MAX_ENTITY_DEPTH,
            });
        }

        writer.open_description(&concept.gnoss_id(&self.graphs_url, &self.root_name));
        writer.write_reference("rdf:type", concept.rdf_type());
        writer.write_string("rdfs:label", concept.rdfs_label(), None);
        for property in &concept.properties {
            writer.write_any(property);
        }
        writer.write_string("skos:symbol", &concept.level().to_string(), None);
        if let Some(parent_id) = concept.parent_gnoss_id(&self.graphs_url, &self.root_name) {
            writer.write_reference("skos:broader", &parent_id);
        }

        // Pruning checks each node's own data only; an empty child is
        // dropped together with its entire subtree.
        for child in &concept.children {
            if !child.has_any_data() {
                continue;
            }
            writer.write_reference(
                "skos:narrower",
                &child.gnoss_id(&self.graphs_url, &self.root_name),
            );
        }
        writer.close_description();

        for child in &concept.children {
            if !child.has_any_data() {
                continue;
            }
            self.write_concept_body(writer, child, depth + 1)?;
        }
        Ok(())
    }
}

impl OntologySerializer for TaxonomyOntology {
    fn graphs_url(&self) -> &str {
        &self.graphs_url
    }

    fn ontology_url(&self) -> &str {
        &self.ontology_url
    }

    fn rdf_type(&self) -> &str {
        SKOS_COLLECTION
    }

    fn rdfs_label(&self) -> &str {
        SKOS_COLLECTION
    }

    fn declared_prefixes(&self) -> &[String] {
        &self.declared_prefixes
    }

    fn identifier(&self) -> String {
        format!("{}items/{}", self.graphs_url, self.root_name)
    }

    fn item_resource_id(&self) -> String {
        self.root_name.clone()
    }

    fn write_root_properties(
        &self,
        writer: &mut RdfXmlWriter,
        context: WriteContext,
    ) -> GnossResult<()> {
        if context != WriteContext::Root {
            return Ok(());
        }
        writer.write_string("dc:source", &self.source, None);
        writer.write_string("skos:scopeNote", &self.scope_note, None);
        for property in &self.properties {
            writer.write_any(property);
        }
        Ok(())
    }

    fn write_root_references(&self, writer: &mut RdfXmlWriter) -> GnossResult<()> {
        for concept in &self.concepts {
            if !concept.has_any_data() {
                continue;
            }
            writer.write_reference(
                "skos:member",
                &concept.gnoss_id(&self.graphs_url, &self.root_name),
            );
        }
        Ok(())
    }

    fn write_description_bodies(&self, writer: &mut RdfXmlWriter) -> GnossResult<()> {
        for concept in &self.concepts {
            if !concept.has_any_data() {
                continue;
            }
            self.write_concept_body(writer, concept, 0)?;
        }
        Ok(())
    }
}
