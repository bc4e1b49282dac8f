//! Two-pass RDF/XML emission protocol shared by the ontology variants
//!
//! A document is emitted in two passes: the root description block first
//! references every auxiliary entity that survives the data gate, then each
//! surviving entity gets its own description block, recursively. Emission
//! order follows insertion-ordered entity dictionaries, so an unmodified
//! tree serializes byte-identically on every call.

use tracing::{debug, trace};

use crate::error::{GnossError, GnossResult};
use crate::ontology::entity::{entity_dictionary, EntityNode};
use crate::ontology::image::{strip_image_prefix, ImagePathRewriter};
use crate::ontology::property::PropertyValue;
use crate::ontology::writer::RdfXmlWriter;

/// Maximum auxiliary-entity nesting depth. The tree is caller-supplied;
/// exceeding this almost always means a cycle was built into it.
pub const MAX_ENTITY_DEPTH: usize = 64;

/// Whether a document is being generated standalone or embedded in an
/// outer document. Variants use this to decide when root-level properties
/// are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteContext {
    /// Standalone document; the root block is the subject being published
    Root,
    /// Embedded in an outer document that already carries the root subject
    Nested,
}

/// Shared serialization protocol. Variants supply root state and the
/// root-property hook; `generate` owns the envelope, the two-pass entity
/// traversal and the output buffer.
pub trait OntologySerializer {
    /// Base URL under which resource graphs live (with trailing slash)
    fn graphs_url(&self) -> &str;

    /// URL of the ontology, bound to the `gnossonto` prefix
    fn ontology_url(&self) -> &str;

    /// `rdf:type` of the root subject
    fn rdf_type(&self) -> &str;

    /// `rdfs:label` of the root subject
    fn rdfs_label(&self) -> &str;

    /// Additional `xmlns:p="uri"` declarations, emitted in declared order,
    /// never sorted
    fn declared_prefixes(&self) -> &[String];

    /// Subject URI of the root description block
    fn identifier(&self) -> String;

    /// Resource id embedded in every item URI, at every nesting depth
    fn item_resource_id(&self) -> String;

    /// Direct auxiliary entities of the root
    fn entities(&self) -> &[EntityNode] {
        &[]
    }

    /// Collaborator rewriting image property values, when one is attached
    fn image_rewriter(&self) -> Option<&dyn ImagePathRewriter> {
        None
    }

    /// Write root-level properties. Called once per document with the
    /// context the document is generated in.
    fn write_root_properties(
        &self,
        writer: &mut RdfXmlWriter,
        context: WriteContext,
    ) -> GnossResult<()>;

    /// Reference pass: one line per direct entity surviving the data gate,
    /// inside the still-open root block
    fn write_root_references(&self, writer: &mut RdfXmlWriter) -> GnossResult<()> {
        let resource_id = self.item_resource_id();
        let dictionary = entity_dictionary(self.entities());
        for entity in dictionary.values().copied() {
            if !entity.has_output() {
                continue;
            }
            writer.write_reference(
                &entity.owner_predicate,
                &entity.item_uri(self.graphs_url(), &resource_id),
            );
        }
        Ok(())
    }

    /// Body pass: full description blocks for every surviving entity,
    /// recursively
    fn write_description_bodies(&self, writer: &mut RdfXmlWriter) -> GnossResult<()> {
        let resource_id = self.item_resource_id();
        let dictionary = entity_dictionary(self.entities());
        for entity in dictionary.values().copied() {
            if !entity.has_output() {
                continue;
            }
            write_entity_body(
                writer,
                entity,
                self.graphs_url(),
                &resource_id,
                self.image_rewriter(),
                0,
            )?;
        }
        Ok(())
    }

    /// Serialize the current state to an RDF/XML byte buffer. Pure read of
    /// the tree: identical state produces byte-identical output, and errors
    /// never leave a partial buffer behind.
    fn generate(&self) -> GnossResult<Vec<u8>> {
        self.generate_in(WriteContext::Root)
    }

    /// Serialize in an explicit context. [`WriteContext::Nested`] lets an
    /// outer document embed this one without repeating root properties.
    fn generate_in(&self, context: WriteContext) -> GnossResult<Vec<u8>> {
        let rdf_type = self.rdf_type();
        if rdf_type.trim().is_empty() {
            return Err(GnossError::MissingRequiredField {
                field: "rdf:type",
                subject: "ontology root".to_string(),
            });
        }
        let rdfs_label = self.rdfs_label();
        if rdfs_label.trim().is_empty() {
            return Err(GnossError::MissingRequiredField {
                field: "rdfs:label",
                subject: format!("ontology root <{}>", rdf_type),
            });
        }

        let identifier = self.identifier();
        debug!(identifier = %identifier, "generating RDF/XML document");

        let mut writer = RdfXmlWriter::new();
        writer.open_envelope(self.ontology_url(), self.declared_prefixes());
        writer.open_description(&identifier);
        writer.write_reference("rdf:type", rdf_type);
        writer.write_string("rdfs:label", rdfs_label, None);
        self.write_root_properties(&mut writer, context)?;
        self.write_root_references(&mut writer)?;
        writer.close_description();
        self.write_description_bodies(&mut writer)?;
        writer.close_envelope();

        debug!(bytes = writer.as_str().len(), "document generated");
        Ok(writer.into_bytes())
    }

    /// Serialize and decode the buffer as UTF-8 text
    fn generate_as_text(&self) -> GnossResult<String> {
        Ok(String::from_utf8(self.generate()?)?)
    }
}

/// Write the full description block of one entity, then its surviving
/// children's blocks
pub(crate) fn write_entity_body(
    writer: &mut RdfXmlWriter,
    entity: &EntityNode,
    graphs_url: &str,
    outer_resource_id: &str,
    rewriter: Option<&dyn ImagePathRewriter>,
    depth: usize,
) -> GnossResult<()> {
    if depth >= MAX_ENTITY_DEPTH {
        return Err(GnossError::DepthLimitExceeded {
            limit: MAX_ENTITY_DEPTH,
        });
    }
    if entity.rdf_type().trim().is_empty() {
        return Err(GnossError::MissingRequiredField {
            field: "rdf:type",
            subject: "auxiliary entity".to_string(),
        });
    }
    if entity.rdfs_label().trim().is_empty() {
        return Err(GnossError::MissingRequiredField {
            field: "rdfs:label",
            subject: format!("entity <{}>", entity.rdf_type()),
        });
    }

    trace!(entity = %entity.identity_key(), depth, "writing entity description");

    writer.open_description(&entity.item_uri(graphs_url, outer_resource_id));
    writer.write_reference("rdf:type", entity.rdf_type());
    writer.write_string("rdfs:label", entity.rdfs_label(), None);

    for property in &entity.properties {
        if property.is_image {
            write_image_property(writer, property, outer_resource_id, rewriter);
        } else {
            writer.write_any(property);
        }
    }

    let children = entity_dictionary(&entity.children);
    for child in children.values().copied() {
        if !child.has_output() {
            continue;
        }
        writer.write_reference(
            &child.owner_predicate,
            &child.item_uri(graphs_url, outer_resource_id),
        );
    }
    writer.close_description();

    for child in children.values().copied() {
        if !child.has_output() {
            continue;
        }
        write_entity_body(writer, child, graphs_url, outer_resource_id, rewriter, depth + 1)?;
    }
    Ok(())
}

fn write_image_property(
    writer: &mut RdfXmlWriter,
    property: &crate::ontology::property::OntologyProperty,
    resource_id: &str,
    rewriter: Option<&dyn ImagePathRewriter>,
) {
    let Some(rewriter) = rewriter else {
        writer.write_any(property);
        return;
    };
    if property.name.is_empty() {
        return;
    }
    match &property.value {
        PropertyValue::Text(value) => {
            let filename = if rewriter.is_image_root_prefix(value) {
                strip_image_prefix(value)
            } else {
                value.as_str()
            };
            let path = rewriter.rewrite_image_path(resource_id, filename);
            writer.write_string(&property.name, &path, property.language());
        }
        // Only single string values are image paths; lists and booleans
        // pass through untouched.
        _ => writer.write_any(property),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::property::{OntologyProperty, PropertySet};

    struct TestOntology {
        graphs_url: String,
        ontology_url: String,
        rdf_type: String,
        rdfs_label: String,
        prefixes: Vec<String>,
        properties: PropertySet,
        entities: Vec<EntityNode>,
    }

    impl TestOntology {
        fn new() -> Self {
            Self {
                graphs_url: "http://graphs.example.org/".to_string(),
                ontology_url: "http://example.org/onto#".to_string(),
                rdf_type: "http://example.org/onto#Article".to_string(),
                rdfs_label: "Article".to_string(),
                prefixes: vec!["xmlns:dc=\"http://purl.org/dc/elements/1.1/\"".to_string()],
                properties: PropertySet::new(),
                entities: Vec::new(),
            }
        }
    }

    impl OntologySerializer for TestOntology {
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
            &self.prefixes
        }
        fn identifier(&self) -> String {
            format!("{}items/Article_R_S", self.graphs_url)
        }
        fn item_resource_id(&self) -> String {
            "R".to_string()
        }
        fn entities(&self) -> &[EntityNode] {
            &self.entities
        }
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

    #[test]
    fn test_envelope_and_root_block() {
        let mut ontology = TestOntology::new();
        ontology
            .properties
            .add(OntologyProperty::new("dc:title", "T"));

        let text = ontology.generate_as_text().unwrap();
        assert!(text.starts_with(
            "<rdf:RDF xmlns:gnossonto=\"http://example.org/onto#\" xmlns:dc=\"http://purl.org/dc/elements/1.1/\">\n"
        ));
        assert!(text.contains(
            "<rdf:Description rdf:about=\"http://graphs.example.org/items/Article_R_S\">"
        ));
        assert!(text.contains("<rdf:type>http://example.org/onto#Article</rdf:type>"));
        assert!(text.contains("<rdfs:label>Article</rdfs:label>"));
        assert!(text.contains("<dc:title>T</dc:title>"));
        assert!(text.ends_with("</rdf:RDF>\n"));
    }

    #[test]
    fn test_reference_pass_precedes_body_pass() {
        let mut ontology = TestOntology::new();
        let mut entity =
            EntityNode::new("http://example.org/onto#Address", "Address", "gnossonto:address")
                .unwrap();
        entity
            .properties
            .add(OntologyProperty::new("gnossonto:street", "Main st"));
        let entity_uri = entity.item_uri(&ontology.graphs_url, "R");
        ontology.entities.push(entity);

        let text = ontology.generate_as_text().unwrap();
        let reference = format!("<gnossonto:address>{}</gnossonto:address>", entity_uri);
        let body = format!("<rdf:Description rdf:about=\"{}\">", entity_uri);
        let reference_pos = text.find(&reference).unwrap();
        let body_pos = text.find(&body).unwrap();
        let root_close = text.find("</rdf:Description>").unwrap();

        assert!(reference_pos < root_close);
        assert!(root_close < body_pos);
    }

    #[test]
    fn test_empty_entity_leaves_no_trace() {
        let mut ontology = TestOntology::new();
        let entity =
            EntityNode::new("http://example.org/onto#Address", "Address", "gnossonto:address")
                .unwrap();
        let key = entity.identity_key().to_string();
        ontology.entities.push(entity);

        let text = ontology.generate_as_text().unwrap();
        assert!(!text.contains("gnossonto:address"));
        assert!(!text.contains(&key));
    }

    #[test]
    fn test_empty_parent_with_populated_child_is_written() {
        let mut ontology = TestOntology::new();
        let mut parent =
            EntityNode::new("http://example.org/onto#A", "A", "gnossonto:a").unwrap();
        let mut child = EntityNode::new("http://example.org/onto#B", "B", "gnossonto:b").unwrap();
        child.properties.add(OntologyProperty::new("dc:title", "T"));
        parent.children.push(child);
        ontology.entities.push(parent);

        let text = ontology.generate_as_text().unwrap();
        assert!(text.contains("gnossonto:a"));
        assert!(text.contains("gnossonto:b"));
        assert!(text.contains("<dc:title>T</dc:title>"));
    }

    #[test]
    fn test_depth_limit() {
        let mut ontology = TestOntology::new();
        let mut node = EntityNode::new("http://example.org/onto#N", "N", "gnossonto:n").unwrap();
        node.properties.add(OntologyProperty::new("dc:title", "leaf"));
        for _ in 0..MAX_ENTITY_DEPTH {
            let mut parent =
                EntityNode::new("http://example.org/onto#N", "N", "gnossonto:n").unwrap();
            parent.children.push(node);
            node = parent;
        }
        ontology.entities.push(node);

        let err = ontology.generate().unwrap_err();
        assert!(matches!(err, GnossError::DepthLimitExceeded { .. }));
    }

    #[test]
    fn test_repeated_generate_is_byte_identical() {
        let mut ontology = TestOntology::new();
        let mut entity =
            EntityNode::new("http://example.org/onto#Address", "Address", "gnossonto:address")
                .unwrap();
        entity
            .properties
            .add(OntologyProperty::new("gnossonto:street", "Main st"));
        ontology.entities.push(entity);

        assert_eq!(ontology.generate().unwrap(), ontology.generate().unwrap());
    }

    #[test]
    fn test_missing_root_type_fails_before_output() {
        let mut ontology = TestOntology::new();
        ontology.rdf_type = String::new();
        let err = ontology.generate().unwrap_err();
        assert!(matches!(
            err,
            GnossError::MissingRequiredField { field: "rdf:type", .. }
        ));
    }

    #[test]
    fn test_image_property_rewritten_through_collaborator() {
        struct Rewriter;
        impl ImagePathRewriter for Rewriter {
            fn rewrite_image_path(&self, resource_id: &str, filename: &str) -> String {
                format!("/images/{}/{}", resource_id, filename)
            }
            fn is_image_root_prefix(&self, value: &str) -> bool {
                value.starts_with(crate::ontology::image::MAIN_IMAGE_PREFIX)
            }
        }

        struct WithRewriter {
            inner: TestOntology,
            rewriter: Rewriter,
        }
        impl OntologySerializer for WithRewriter {
            fn graphs_url(&self) -> &str {
                self.inner.graphs_url()
            }
            fn ontology_url(&self) -> &str {
                self.inner.ontology_url()
            }
            fn rdf_type(&self) -> &str {
                self.inner.rdf_type()
            }
            fn rdfs_label(&self) -> &str {
                self.inner.rdfs_label()
            }
            fn declared_prefixes(&self) -> &[String] {
                self.inner.declared_prefixes()
            }
            fn identifier(&self) -> String {
                self.inner.identifier()
            }
            fn item_resource_id(&self) -> String {
                self.inner.item_resource_id()
            }
            fn entities(&self) -> &[EntityNode] {
                self.inner.entities()
            }
            fn image_rewriter(&self) -> Option<&dyn ImagePathRewriter> {
                Some(&self.rewriter)
            }
            fn write_root_properties(
                &self,
                writer: &mut RdfXmlWriter,
                context: WriteContext,
            ) -> GnossResult<()> {
                self.inner.write_root_properties(writer, context)
            }
        }

        let mut inner = TestOntology::new();
        let mut entity =
            EntityNode::new("http://example.org/onto#Photo", "Photo", "gnossonto:photo").unwrap();
        entity.properties.add(OntologyProperty::image(
            "gnossonto:image",
            "[IMGPrincipal][240,]img-7.jpg",
        ));
        inner.entities.push(entity);
        let ontology = WithRewriter {
            inner,
            rewriter: Rewriter,
        };

        let text = ontology.generate_as_text().unwrap();
        assert!(text.contains("<gnossonto:image>/images/R/img-7.jpg</gnossonto:image>"));
    }
}
