// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Typeseal Validate
//!
//! Structural XML schema validation with positioned, non-throwing
//! error reports.
//!
//! The validator streams both the schema and the document through
//! [quick-xml](https://docs.rs/quick-xml) and returns a single
//! [`ValidationReport`]: schema read failures, well-formedness
//! violations, and undeclared elements all land in the same ordered
//! issue list with 1-based line/column positions. Only empty arguments
//! are rejected as errors.
//!
//! ```rust
//! use typeseal_validate::SchemaValidator;
//!
//! let schema = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
//!   <xs:element name="note"/>
//! </xs:schema>"#;
//!
//! let validator = SchemaValidator::new();
//! let report = validator.validate("<note/>", schema).unwrap();
//! assert!(report.is_valid());
//! ```

pub mod error;
pub mod report;
pub mod validator;

pub use error::{Error, Result};
pub use report::{IssueSource, ValidationIssue, ValidationReport};
pub use validator::SchemaValidator;
