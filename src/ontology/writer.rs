//! RDF/XML writing primitives with GNOSS escaping conventions
//!
//! The writer is a plain builder value threaded through the emission
//! protocol; it owns the output buffer and nothing else. Escaping follows
//! the platform conventions downstream consumers depend on byte-for-byte:
//! line breaks become `<br />`, and any value containing `&`, `<` or `>`
//! is wrapped in a CDATA section.

use crate::ontology::property::{OntologyProperty, PropertyValue};

/// Token substituted for `\r\n` and `\n` in string values
pub const LINE_BREAK_TOKEN: &str = "<br />";

/// Characters that force a value into a CDATA section
const CDATA_TRIGGERS: [char; 3] = ['&', '<', '>'];

/// Builder for one RDF/XML document
#[derive(Debug, Default)]
pub struct RdfXmlWriter {
    buffer: String,
}

impl RdfXmlWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a string value: strip trailing NUL, then replace line
    /// breaks with [`LINE_BREAK_TOKEN`]. Idempotent.
    pub fn normalize(value: &str) -> String {
        value
            .trim_end_matches('\0')
            .replace("\r\n", LINE_BREAK_TOKEN)
            .replace('\n', LINE_BREAK_TOKEN)
    }

    /// Open the `<rdf:RDF>` envelope. `declared_prefixes` are complete
    /// `xmlns:p="uri"` attribute strings, emitted in declared order.
    pub fn open_envelope(&mut self, ontology_url: &str, declared_prefixes: &[String]) {
        self.buffer
            .push_str(&format!("<rdf:RDF xmlns:gnossonto=\"{}\"", ontology_url));
        for prefix in declared_prefixes {
            self.buffer.push(' ');
            self.buffer.push_str(prefix);
        }
        self.buffer.push_str(">\n");
    }

    /// Close the `<rdf:RDF>` envelope
    pub fn close_envelope(&mut self) {
        self.buffer.push_str("</rdf:RDF>\n");
    }

    /// Open an `<rdf:Description>` block for one subject URI
    pub fn open_description(&mut self, about: &str) {
        self.buffer
            .push_str(&format!("<rdf:Description rdf:about=\"{}\">\n", about));
    }

    /// Close the current `<rdf:Description>` block
    pub fn close_description(&mut self) {
        self.buffer.push_str("</rdf:Description>\n");
    }

    /// Emit one reference line: an element whose text content is a URI.
    /// URIs are emitted verbatim, never CDATA-wrapped.
    pub fn write_reference(&mut self, predicate: &str, uri: &str) {
        self.buffer
            .push_str(&format!("<{0}>{1}</{0}>\n", predicate, uri));
    }

    /// Emit a string property. Nothing is written when the normalized value
    /// is empty or whitespace.
    pub fn write_string(&mut self, label: &str, value: &str, language: Option<&str>) {
        let normalized = Self::normalize(value);
        if normalized.trim().is_empty() {
            return;
        }
        self.write_text_element(label, &normalized, language);
    }

    /// Emit a list property: one element per value, original order, with a
    /// per-call first-seen dedup of normalized values.
    pub fn write_string_list(&mut self, label: &str, values: &[String], language: Option<&str>) {
        let mut emitted: Vec<String> = Vec::new();
        for value in values {
            let normalized = Self::normalize(value);
            if normalized.trim().is_empty() {
                continue;
            }
            if emitted.iter().any(|e| e == &normalized) {
                continue;
            }
            self.write_text_element(label, &normalized, language);
            emitted.push(normalized);
        }
    }

    /// Emit a boolean property as literal `true`/`false`, never CDATA
    pub fn write_bool(&mut self, label: &str, value: bool) {
        self.buffer
            .push_str(&format!("<{0}>{1}</{0}>\n", label, value));
    }

    /// Dispatch a property to the matching writer by its value variant.
    /// Properties with an empty name are skipped.
    pub fn write_any(&mut self, property: &OntologyProperty) {
        if property.name.is_empty() {
            return;
        }
        match &property.value {
            PropertyValue::Text(s) => self.write_string(&property.name, s, property.language()),
            PropertyValue::TextList(values) => {
                self.write_string_list(&property.name, values, property.language())
            }
            PropertyValue::Boolean(b) => self.write_bool(&property.name, *b),
        }
    }

    fn write_text_element(&mut self, label: &str, normalized: &str, language: Option<&str>) {
        match language {
            Some(lang) => self
                .buffer
                .push_str(&format!("<{} xml:lang=\"{}\">", label, lang)),
            None => self.buffer.push_str(&format!("<{}>", label)),
        }
        if normalized.contains(&CDATA_TRIGGERS[..]) {
            self.buffer.push_str("<![CDATA[");
            self.buffer.push_str(normalized);
            self.buffer.push_str("]]>");
        } else {
            self.buffer.push_str(normalized);
        }
        self.buffer.push_str(&format!("</{}>\n", label));
    }

    /// View of the buffer built so far
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Consume the writer, returning the byte buffer
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer.into_bytes()
    }
}
