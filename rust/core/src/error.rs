// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding or decoding documents
#[derive(Error, Debug)]
pub enum Error {
    /// Input text was empty. Decoding requires a non-empty document.
    #[error("input text must not be empty")]
    EmptyInput,

    /// The runtime type of the value has no registry entry, so its name
    /// cannot be recorded in an envelope.
    #[error("type `{0}` is not registered; sealed serialization requires a registry entry")]
    UnregisteredType(&'static str),

    /// An envelope named a type the registry does not know. This is a
    /// configuration problem (the type was never registered), not a
    /// transient fault.
    #[error("recorded type name `{0}` cannot be resolved by the registry")]
    UnresolvedTypeName(String),

    /// A name or type was registered twice.
    #[error("`{0}` is already registered")]
    DuplicateRegistration(String),

    /// The dynamic decode path was asked to recover a type from a document
    /// that carries no envelope.
    #[error("document does not carry type information")]
    MissingTypeInfo,

    /// The document contained an envelope shape whose seal field does not
    /// match the expected sentinel.
    #[error("envelope seal does not match the sentinel")]
    SealMismatch,

    /// A sealed value failed to downcast to the registered concrete type.
    #[error("sealed value is not a `{expected}`")]
    ValueTypeMismatch {
        /// Type the registry entry was created for.
        expected: &'static str,
    },

    #[error("JSON codec error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML read error: {0}")]
    XmlRead(#[from] quick_xml::DeError),

    #[error("XML write error: {0}")]
    XmlWrite(#[from] quick_xml::SeError),
}
