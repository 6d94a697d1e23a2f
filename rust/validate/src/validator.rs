// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structural schema validation
//!
//! Streams both inputs through the XML event reader. Declarations are
//! harvested from the schema's `xs:element` nodes; the document is then
//! checked for well-formedness and for elements the schema never
//! declares. Every finding is recorded in the report with a 1-based
//! line and column; nothing past the argument checks is raised as an
//! error. Full XSD semantics (types, facets, occurrence constraints)
//! are out of scope.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::error::{Error, Result};
use crate::report::{IssueSource, ValidationIssue, ValidationReport};

/// Element names harvested from a schema.
#[derive(Debug, Default)]
struct SchemaIndex {
    /// Elements declared directly under the schema root; legal
    /// document roots.
    roots: FxHashSet<String>,
    /// Every declared element name, at any nesting depth.
    declared: FxHashSet<String>,
}

/// Validates XML documents against a structural subset of an XML schema.
#[derive(Debug, Default, Clone)]
pub struct SchemaValidator;

impl SchemaValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validates `document` against `schema`.
    ///
    /// # Errors
    ///
    /// Only for empty arguments. Validation findings, including an
    /// unreadable schema, are entries in the returned report.
    pub fn validate(&self, document: &str, schema: &str) -> Result<ValidationReport> {
        if document.is_empty() {
            return Err(Error::EmptyDocument);
        }
        if schema.is_empty() {
            return Err(Error::EmptySchema);
        }

        let mut report = ValidationReport::new();
        let index = harvest_declarations(schema, &mut report);
        debug!(
            roots = index.roots.len(),
            declared = index.declared.len(),
            "schema declarations harvested"
        );
        scan_document(document, &index, &mut report);
        Ok(report)
    }
}

/// Collects `xs:element` declarations from the schema, reporting reader
/// failures as schema-sourced issues.
fn harvest_declarations(schema: &str, report: &mut ValidationReport) -> SchemaIndex {
    let mut index = SchemaIndex::default();
    let mut reader = Reader::from_str(schema);
    let mut depth: u64 = 0;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                record_declaration(&start, depth, &mut index);
                depth += 1;
            }
            Ok(Event::Empty(start)) => {
                record_declaration(&start, depth, &mut index);
            }
            Ok(Event::End(_)) => {
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                push_issue(
                    report,
                    IssueSource::Schema,
                    schema,
                    reader.buffer_position(),
                    format!("schema is not well-formed: {err}"),
                );
                break;
            }
        }
    }

    index
}

fn record_declaration(start: &BytesStart<'_>, depth: u64, index: &mut SchemaIndex) {
    if start.local_name().as_ref() != b"element" {
        return;
    }
    for attr in start.attributes().flatten() {
        if attr.key.as_ref() == b"name" {
            let name = String::from_utf8_lossy(&attr.value).into_owned();
            // Depth 1 is directly under the xs:schema root
            if depth == 1 {
                index.roots.insert(name.clone());
            }
            index.declared.insert(name);
        }
    }
}

/// Streams the document, recording well-formedness failures and
/// undeclared elements.
fn scan_document(document: &str, index: &SchemaIndex, report: &mut ValidationReport) {
    let mut reader = Reader::from_str(document);
    let mut saw_root = false;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => {
                push_issue(
                    report,
                    IssueSource::Document,
                    document,
                    reader.buffer_position(),
                    format!("document is not well-formed: {err}"),
                );
                break;
            }
        };

        match event {
            Event::Start(ref start) | Event::Empty(ref start) => {
                let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                if !saw_root {
                    saw_root = true;
                    if !index.roots.is_empty() && !index.roots.contains(&name) {
                        push_issue(
                            report,
                            IssueSource::Document,
                            document,
                            reader.buffer_position(),
                            format!("element '{name}' is not declared as a root element"),
                        );
                        continue;
                    }
                }
                if !index.declared.is_empty() && !index.declared.contains(&name) {
                    push_issue(
                        report,
                        IssueSource::Document,
                        document,
                        reader.buffer_position(),
                        format!("element '{name}' is not declared in the schema"),
                    );
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        push_issue(
            report,
            IssueSource::Document,
            document,
            0,
            "document contains no root element".to_owned(),
        );
    }
}

fn push_issue(
    report: &mut ValidationReport,
    source: IssueSource,
    input: &str,
    byte_offset: u64,
    message: String,
) {
    let (line, column) = line_and_column(input, byte_offset);
    report.push(ValidationIssue {
        message,
        source,
        line,
        column,
    });
}

/// Maps a byte offset to a 1-based line and column.
fn line_and_column(input: &str, byte_offset: u64) -> (u64, u64) {
    let offset = (byte_offset as usize).min(input.len());
    let prefix = &input.as_bytes()[..offset];
    let line = prefix.iter().filter(|&&b| b == b'\n').count() as u64 + 1;
    let column = prefix
        .iter()
        .rev()
        .take_while(|&&b| b != b'\n')
        .count() as u64
        + 1;
    (line, column)
}
