// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Type-envelope protocol
//!
//! A sealed document wraps the payload together with the name of its
//! runtime type so the concrete type can be recovered when the value was
//! handled through an erased slot. Whether a document is sealed is
//! decided from the raw text alone, before any parse, by scanning for a
//! fixed sentinel that legitimate user data will not produce.

use serde::{Deserialize, Serialize};

/// Sentinel recorded in the `seal` field of every envelope.
///
/// Opaque GUID-tagged token. It appears in serialized text if and only
/// if the envelope shape was used, which keeps the pre-parse detection
/// free of false positives.
pub const ENVELOPE_SEAL: &str = "typeseal:v1:9f8a6c2e4b7d41d38a52c0e6f1b3d9a4";

/// Wire wrapper pairing a value with the name of its runtime type.
///
/// Lives only for the duration of a single encode or decode call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeEnvelope<T> {
    /// Always [`ENVELOPE_SEAL`]; verified on decode.
    pub seal: String,
    /// Registered name of the value's runtime type.
    pub type_name: String,
    /// The payload itself.
    pub value: T,
}

impl<T> TypeEnvelope<T> {
    /// Wraps a value. Pure construction; the caller has already decided
    /// that sealing applies (a present value with a registered type).
    pub fn new(type_name: impl Into<String>, value: T) -> Self {
        Self {
            seal: ENVELOPE_SEAL.to_owned(),
            type_name: type_name.into(),
            value,
        }
    }

    /// Consumes the envelope, returning the payload.
    pub fn into_value(self) -> T {
        self.value
    }

    /// True when the seal field carries the expected sentinel.
    pub fn seal_is_valid(&self) -> bool {
        self.seal == ENVELOPE_SEAL
    }
}

/// Probe shape for the first decode pass: reads the seal and recorded
/// type name while ignoring the payload entirely.
#[derive(Debug, Deserialize)]
pub struct EnvelopeHeader {
    pub seal: String,
    pub type_name: String,
}

impl EnvelopeHeader {
    /// True when the seal field carries the expected sentinel.
    pub fn seal_is_valid(&self) -> bool {
        self.seal == ENVELOPE_SEAL
    }
}

/// Scans raw serialized text for the envelope sentinel.
///
/// Substring check only; runs before any deserialization pass and never
/// fails on malformed input.
pub fn contains_envelope_marker(text: &str) -> bool {
    text.contains(ENVELOPE_SEAL)
}
