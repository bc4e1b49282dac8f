//! Interfaces to the layers that consume generated RDF
//!
//! Transport, request signing and bulk file packaging live outside this
//! crate. These traits are the seams they plug into: the serializer hands
//! ownership of the finished buffer to one of them and is done.

use crate::error::GnossResult;

/// Suffix of the flat files the bulk loader appends emitted triples to
pub const TRIPLE_FILE_SUFFIX: &str = ".nq";

/// Uploads a generated RDF/XML document to the platform. Implemented by
/// the HTTP/OAuth transport layer; retry policy, if any, lives there too.
pub trait ResourceUploader {
    /// Publish a new resource document into a graph
    fn upload_resource(&self, graph: &str, rdf: &[u8]) -> GnossResult<()>;

    /// Replace the document of an existing resource
    fn modify_resource(&self, graph: &str, resource_id: &str, rdf: &[u8]) -> GnossResult<()>;

    /// Delete a resource from a graph
    fn delete_resource(&self, graph: &str, resource_id: &str) -> GnossResult<()>;
}

/// Appends emitted triples to flat files for massive loads. Implemented by
/// the bulk file-packaging layer; files carry the [`TRIPLE_FILE_SUFFIX`].
pub trait TripleFileSink {
    /// Append a document's triples to the file identified by `file_stem`
    fn append(&self, file_stem: &str, rdf: &str) -> GnossResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::{OntologyProperty, OntologySerializer, ResourceOntology};
    use std::cell::RefCell;

    struct MemorySink {
        files: RefCell<Vec<(String, String)>>,
    }

    impl TripleFileSink for MemorySink {
        fn append(&self, file_stem: &str, rdf: &str) -> GnossResult<()> {
            self.files
                .borrow_mut()
                .push((format!("{}{}", file_stem, TRIPLE_FILE_SUFFIX), rdf.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_generated_document_feeds_a_sink() {
        let mut resource = ResourceOntology::new(
            "http://graphs.example.org/",
            "http://ex.org/onto#",
            "http://ex.org/onto#Article",
            "Article",
        )
        .unwrap();
        resource.properties.add(OntologyProperty::new("dc:title", "T"));

        let sink = MemorySink {
            files: RefCell::new(Vec::new()),
        };
        let rdf = resource.generate_as_text().unwrap();
        sink.append("articles", &rdf).unwrap();

        let files = sink.files.borrow();
        assert_eq!(files[0].0, "articles.nq");
        assert!(files[0].1.contains("<dc:title>T</dc:title>"));
    }
}
