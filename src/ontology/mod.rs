//! Ontology graph model and RDF/XML serialization
//!
//! This module implements the write-only serialization engine: callers
//! build a root ontology, a property set and a tree of auxiliary entities
//! in memory, then call [`OntologySerializer::generate`] to obtain an
//! RDF/XML byte buffer encoding the platform's identifier, escaping and
//! taxonomy conventions.
//!
//! # Example
//!
//! ```rust
//! use gnoss_sdk::ontology::{OntologyProperty, OntologySerializer, ResourceOntology};
//!
//! let mut resource = ResourceOntology::new(
//!     "http://graphs.example.org/",
//!     "http://example.org/onto#",
//!     "http://example.org/onto#Article",
//!     "Article",
//! ).unwrap();
//! resource.properties.add(OntologyProperty::new("dc:title", "A & B"));
//!
//! let rdf = resource.generate_as_text().unwrap();
//! assert!(rdf.contains("<dc:title><![CDATA[A & B]]></dc:title>"));
//! ```

mod concept;
mod entity;
mod flat;
mod image;
mod property;
mod resource;
mod serializer;
mod taxonomy;
mod writer;

pub use concept::{ConceptNode, SKOS_CONCEPT};
pub use entity::{entity_dictionary, flat_entity_dictionary, type_tail, EntityNode, FlatEntity};
pub use flat::FlatRootOntology;
pub use image::{main_image_value, strip_image_prefix, ImagePathRewriter, MAIN_IMAGE_PREFIX};
pub use property::{OntologyProperty, PropertySet, PropertyValue, EMPTY_DATE_TOKEN};
pub use resource::ResourceOntology;
pub use serializer::{OntologySerializer, WriteContext, MAX_ENTITY_DEPTH};
pub use taxonomy::{TaxonomyOntology, SKOS_COLLECTION};
pub use writer::{RdfXmlWriter, LINE_BREAK_TOKEN};
