//! GNOSS SDK
//!
//! Client SDK for the GNOSS semantic content platform. The core of the
//! crate is the ontology-to-RDF/XML serialization engine: an in-memory
//! graph of a resource, its properties and its nested auxiliary entities
//! is turned into a well-formed RDF/XML byte stream encoding the
//! platform's identifier, escaping and taxonomy conventions.
//!
//! # Components
//!
//! - [`ontology`] — the graph model ([`ontology::EntityNode`],
//!   [`ontology::FlatEntity`], [`ontology::ConceptNode`], property sets)
//!   and the three document variants: [`ontology::ResourceOntology`],
//!   [`ontology::FlatRootOntology`] and [`ontology::TaxonomyOntology`],
//!   all serialized through the shared [`ontology::OntologySerializer`]
//!   protocol.
//! - [`config`] — endpoint and graph configuration, loadable from YAML.
//! - [`client`] — interfaces the excluded transport and bulk-load layers
//!   implement to consume generated documents.
//! - [`error`] — the [`error::GnossError`] enum shared across the crate.
//!
//! Serialization is synchronous, CPU-bound and free of shared state: every
//! `generate()` call allocates a fresh buffer and either returns it whole
//! or fails without producing bytes. Repeated calls on an unmodified tree
//! are byte-identical.
//!
//! # Example
//!
//! ```rust
//! use gnoss_sdk::{EntityNode, OntologyProperty, OntologySerializer, ResourceOntology};
//!
//! let mut article = ResourceOntology::new(
//!     "http://graphs.example.org/",
//!     "http://example.org/onto#",
//!     "http://example.org/onto#Article",
//!     "Article",
//! ).unwrap();
//! article.properties.add(OntologyProperty::new("dc:title", "Hello"));
//!
//! let mut address = EntityNode::new(
//!     "http://example.org/onto#Address",
//!     "Address",
//!     "gnossonto:address",
//! ).unwrap();
//! address.properties.add(OntologyProperty::new("gnossonto:street", "Main st"));
//! article.entities.push(address);
//!
//! let rdf = article.generate().unwrap();
//! assert!(!rdf.is_empty());
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod ontology;

pub use client::{ResourceUploader, TripleFileSink, TRIPLE_FILE_SUFFIX};
pub use config::SdkConfig;
pub use error::{GnossError, GnossResult};
pub use ontology::{
    ConceptNode, EntityNode, FlatEntity, FlatRootOntology, ImagePathRewriter, OntologyProperty,
    OntologySerializer, PropertySet, PropertyValue, RdfXmlWriter, ResourceOntology,
    TaxonomyOntology, WriteContext,
};
