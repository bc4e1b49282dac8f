//! Root ontology for a platform resource
//!
//! A [`ResourceOntology`] derives its subject URI from two GUID parts: the
//! resource id and the secondary (article) id. Both are generated when not
//! supplied, and the identifier is recomputed from the current `rdf:type`
//! whenever it is read.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{GnossError, GnossResult};
use crate::ontology::entity::{type_tail, EntityNode};
use crate::ontology::image::ImagePathRewriter;
use crate::ontology::property::PropertySet;
use crate::ontology::serializer::{OntologySerializer, WriteContext};
use crate::ontology::writer::RdfXmlWriter;

/// Serializable root state of one resource
pub struct ResourceOntology {
    graphs_url: String,
    ontology_url: String,
    rdf_type: String,
    rdfs_label: String,
    /// `xmlns:p="uri"` declarations, emitted in declared order
    pub declared_prefixes: Vec<String>,
    /// Root-level properties
    pub properties: PropertySet,
    /// Auxiliary entity trees
    pub entities: Vec<EntityNode>,
    resource_id: Uuid,
    secondary_id: Uuid,
    image_rewriter: Option<Arc<dyn ImagePathRewriter + Send + Sync>>,
}

impl std::fmt::Debug for ResourceOntology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceOntology")
            .field("graphs_url", &self.graphs_url)
            .field("ontology_url", &self.ontology_url)
            .field("rdf_type", &self.rdf_type)
            .field("rdfs_label", &self.rdfs_label)
            .field("declared_prefixes", &self.declared_prefixes)
            .field("properties", &self.properties)
            .field("entities", &self.entities)
            .field("resource_id", &self.resource_id)
            .field("secondary_id", &self.secondary_id)
            .field("image_rewriter", &self.image_rewriter.as_ref().map(|_| ".."))
            .finish()
    }
}

impl ResourceOntology {
    /// Create a resource ontology with freshly generated ids. `rdf_type`
    /// and `rdfs_label` are validated non-empty; a missing trailing slash
    /// on `graphs_url` is added.
    pub fn new(
        graphs_url: impl Into<String>,
        ontology_url: impl Into<String>,
        rdf_type: impl Into<String>,
        rdfs_label: impl Into<String>,
    ) -> GnossResult<Self> {
        Self::with_ids(
            graphs_url,
            ontology_url,
            rdf_type,
            rdfs_label,
            Uuid::new_v4(),
            Uuid::new_v4(),
        )
    }

    /// Create a resource ontology with explicit ids. A nil id is replaced
    /// by a freshly generated one.
    pub fn with_ids(
        graphs_url: impl Into<String>,
        ontology_url: impl Into<String>,
        rdf_type: impl Into<String>,
        rdfs_label: impl Into<String>,
        resource_id: Uuid,
        secondary_id: Uuid,
    ) -> GnossResult<Self> {
        let rdf_type = rdf_type.into();
        let rdfs_label = rdfs_label.into();
        if rdf_type.trim().is_empty() {
            return Err(GnossError::MissingRequiredField {
                field: "rdf:type",
                subject: "resource ontology".to_string(),
            });
        }
        if rdfs_label.trim().is_empty() {
            return Err(GnossError::MissingRequiredField {
                field: "rdfs:label",
                subject: format!("resource ontology <{}>", rdf_type),
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
            declared_prefixes: Vec::new(),
            properties: PropertySet::new(),
            entities: Vec::new(),
            resource_id: ensure_id(resource_id),
            secondary_id: ensure_id(secondary_id),
            image_rewriter: None,
        })
    }

    /// The resource id (first identifier part)
    pub fn resource_id(&self) -> Uuid {
        self.resource_id
    }

    /// The secondary id (second identifier part)
    pub fn secondary_id(&self) -> Uuid {
        self.secondary_id
    }

    /// Assign the resource id; nil generates a fresh one
    pub fn set_resource_id(&mut self, resource_id: Uuid) {
        self.resource_id = ensure_id(resource_id);
    }

    /// Assign the secondary id; nil generates a fresh one
    pub fn set_secondary_id(&mut self, secondary_id: Uuid) {
        self.secondary_id = ensure_id(secondary_id);
    }

    /// Replace the root `rdf:type`; validated non-empty. The identifier
    /// picks up the new type tail on its next read.
    pub fn set_rdf_type(&mut self, rdf_type: impl Into<String>) -> GnossResult<()> {
        let rdf_type = rdf_type.into();
        if rdf_type.trim().is_empty() {
            return Err(GnossError::MissingRequiredField {
                field: "rdf:type",
                subject: "resource ontology".to_string(),
            });
        }
        self.rdf_type = rdf_type;
        Ok(())
    }

    /// Replace the root `rdfs:label`; validated non-empty
    pub fn set_rdfs_label(&mut self, rdfs_label: impl Into<String>) -> GnossResult<()> {
        let rdfs_label = rdfs_label.into();
        if rdfs_label.trim().is_empty() {
            return Err(GnossError::MissingRequiredField {
                field: "rdfs:label",
                subject: format!("resource ontology <{}>", self.rdf_type),
            });
        }
        self.rdfs_label = rdfs_label;
        Ok(())
    }

    /// Attach the image-path collaborator used to rewrite image properties
    pub fn set_image_rewriter(&mut self, rewriter: Arc<dyn ImagePathRewriter + Send + Sync>) {
        self.image_rewriter = Some(rewriter);
    }
}

fn ensure_id(id: Uuid) -> Uuid {
    if id.is_nil() {
        Uuid::new_v4()
    } else {
        id
    }
}

impl OntologySerializer for ResourceOntology {
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

    /// `{graphs_url}items/{type_tail}_{resource_id}_{secondary_id}`,
    /// recomputed from the current `rdf:type` on every read
    fn identifier(&self) -> String {
        format!(
            "{}items/{}_{}_{}",
            self.graphs_url,
            type_tail(&self.rdf_type),
            self.resource_id,
            self.secondary_id
        )
    }

    fn item_resource_id(&self) -> String {
        self.resource_id.to_string()
    }

    fn entities(&self) -> &[EntityNode] {
        &self.entities
    }

    fn image_rewriter(&self) -> Option<&dyn ImagePathRewriter> {
        self.image_rewriter
            .as_deref()
            .map(|r| r as &dyn ImagePathRewriter)
    }

    // Root properties are written in every context.
    fn write_root_properties(
        &self,
        writer: &mut RdfXmlWriter,
        _context: WriteContext,
    ) -> GnossResult<()> {
        for property in &self.properties {
            writer.write_any(property);
        }
        Ok(())
    }
}
