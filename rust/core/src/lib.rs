// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Typeseal Core
//!
//! Type-preserving XML/JSON serialization façade built on [serde](https://docs.rs/serde).
//!
//! ## Overview
//!
//! This crate provides the core codec functionality for Typeseal:
//!
//! - **Serialization façade**: one [`TextCodec`] per wire format (XML via
//!   [quick-xml](https://docs.rs/quick-xml), JSON via [serde_json](https://docs.rs/serde_json))
//! - **Type envelopes**: values serialized through an erased slot carry
//!   their runtime type name inside a sealed wrapper, detectable from the
//!   raw text before any parse
//! - **Type registry**: explicit startup-populated mapping from wire names
//!   to codec closures, no runtime reflection
//! - **Encoding-aware transcoding**: per-call or per-codec byte encodings
//!   via [encoding_rs](https://docs.rs/encoding_rs)
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use serde::{Deserialize, Serialize};
//! use typeseal_core::{TextCodec, TypeRegistry};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Waypoint {
//!     name: String,
//!     lat: f64,
//!     lon: f64,
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<Waypoint>("waypoint").unwrap();
//! let codec = TextCodec::json(Arc::new(registry));
//!
//! let wp = Waypoint { name: "Cham".into(), lat: 47.18, lon: 8.46 };
//!
//! // Plain round-trip
//! let text = codec.serialize(&wp).unwrap();
//! let back: Waypoint = codec.deserialize(&text).unwrap();
//! assert_eq!(back, wp);
//!
//! // Sealed round-trip: the document alone names the concrete type
//! let sealed = codec.serialize_sealed(&wp, None).unwrap();
//! let recovered = codec.deserialize_sealed(&sealed, None).unwrap();
//! assert_eq!(recovered.downcast::<Waypoint>().unwrap(), wp);
//! ```
//!
//! ## Concurrency
//!
//! A codec is a stateless pipeline per call. The registry is frozen
//! behind an `Arc` after startup and the default encoding is fixed at
//! construction, so sharing a codec across threads is safe.

pub mod codec;
pub mod encoding;
pub mod envelope;
pub mod error;
pub mod registry;
pub mod wire;

pub use codec::TextCodec;
pub use encoding::TextEncoding;
pub use envelope::{contains_envelope_marker, EnvelopeHeader, TypeEnvelope, ENVELOPE_SEAL};
pub use error::{Error, Result};
pub use registry::{BoxedValue, Sealed, TypeEntry, TypeRegistry};
pub use wire::Format;
