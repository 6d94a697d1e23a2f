// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serialization façade
//!
//! [`TextCodec`] is a stateless pipeline per call: every operation
//! either fully succeeds or fully fails, and nothing is shared between
//! calls except the frozen registry and the default encoding fixed at
//! construction. Construct one codec per wire format and pass it where
//! it is needed; there is no ambient singleton.

use std::any::{type_name, Any};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::encoding::TextEncoding;
use crate::envelope::{contains_envelope_marker, EnvelopeHeader, TypeEnvelope};
use crate::error::{Error, Result};
use crate::registry::{Sealed, TypeRegistry};
use crate::wire::{self, Format};

/// States of the sealed decode pipeline.
///
/// The concrete type behind a sealed document cannot be known before
/// reading it, so decoding is two passes with distinct failure modes:
/// the probe reads only the header, the resolve pass re-reads the full
/// document with the concrete type the header named.
enum DecodeState {
    ProbeForType,
    ResolveConcrete(EnvelopeHeader),
}

/// Text serialization façade over one wire format.
///
/// Cheap to clone; the registry is shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct TextCodec {
    format: Format,
    registry: Arc<TypeRegistry>,
    default_encoding: TextEncoding,
}

impl TextCodec {
    /// XML codec over the given registry, default encoding UTF-8.
    pub fn xml(registry: Arc<TypeRegistry>) -> Self {
        Self::new(Format::Xml, registry)
    }

    /// JSON codec over the given registry, default encoding UTF-8.
    pub fn json(registry: Arc<TypeRegistry>) -> Self {
        Self::new(Format::Json, registry)
    }

    fn new(format: Format, registry: Arc<TypeRegistry>) -> Self {
        Self {
            format,
            registry,
            default_encoding: TextEncoding::utf8(),
        }
    }

    /// Sets the default encoding. Builder-style, intended for startup;
    /// the default is immutable once the codec is in use. Per-call
    /// overrides remain available on every operation.
    pub fn with_default_encoding(mut self, encoding: TextEncoding) -> Self {
        self.default_encoding = encoding;
        self
    }

    /// Wire format of this codec.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Default encoding used when a call passes `None`.
    pub fn default_encoding(&self) -> TextEncoding {
        self.default_encoding
    }

    /// The shared type registry.
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    fn effective(&self, encoding: Option<TextEncoding>) -> TextEncoding {
        encoding.unwrap_or(self.default_encoding)
    }

    /// Serializes a value directly, no envelope.
    pub fn serialize<T: Serialize>(&self, value: &T) -> Result<String> {
        self.serialize_with(value, None)
    }

    /// Serializes a value directly with an explicit encoding.
    pub fn serialize_with<T: Serialize>(
        &self,
        value: &T,
        encoding: Option<TextEncoding>,
    ) -> Result<String> {
        wire::encode_document(self.format, value, self.effective(encoding))
    }

    /// Serializes a value into an indented document, no envelope.
    pub fn serialize_pretty<T: Serialize>(
        &self,
        value: &T,
        encoding: Option<TextEncoding>,
    ) -> Result<String> {
        wire::encode_document_pretty(self.format, value, self.effective(encoding))
    }

    /// Serializes a value wrapped in a type envelope so the concrete
    /// type can be recovered from the document alone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnregisteredType`] when `T` has no registry
    /// entry. Sealing never degrades silently: a type that cannot be
    /// named on the wire is reported at serialize time.
    pub fn serialize_sealed<T>(&self, value: &T, encoding: Option<TextEncoding>) -> Result<String>
    where
        T: Serialize + Any,
    {
        let name = self
            .registry
            .name_of::<T>()
            .ok_or(Error::UnregisteredType(type_name::<T>()))?;
        let envelope = TypeEnvelope::new(name, value);
        debug!(format = self.format.name(), type_name = name, "sealing value");
        wire::encode_document(self.format, &envelope, self.effective(encoding))
    }

    /// Serializes a type-erased value wrapped in a type envelope,
    /// dispatching on its runtime type.
    ///
    /// This is the path for values held behind an erased slot, where
    /// the static type is unknown at the call site.
    pub fn serialize_sealed_dyn(
        &self,
        value: &(dyn Any + Send + Sync),
        encoding: Option<TextEncoding>,
    ) -> Result<String> {
        let entry = self
            .registry
            .entry_for_id(value.type_id())
            .ok_or(Error::UnregisteredType("<erased>"))?;
        debug!(
            format = self.format.name(),
            type_name = entry.type_name(),
            "sealing erased value"
        );
        entry.encode_sealed(self.format, value, self.effective(encoding))
    }

    /// Serializes an optional value. An absent value has no runtime
    /// type to record, so sealing is forced off and the format's null
    /// literal is emitted.
    pub fn serialize_opt<T>(
        &self,
        value: Option<&T>,
        seal: bool,
        encoding: Option<TextEncoding>,
    ) -> Result<String>
    where
        T: Serialize + Any,
    {
        match value {
            None => {
                if seal {
                    debug!(
                        format = self.format.name(),
                        "absent value, sealing forced off"
                    );
                }
                Ok(wire::encode_null(self.format, self.effective(encoding)))
            }
            Some(v) if seal => self.serialize_sealed(v, encoding),
            Some(v) => self.serialize_with(v, encoding),
        }
    }

    /// Deserializes a document into a concrete type.
    ///
    /// Sealed documents are handled transparently: when the envelope
    /// marker is present the payload is unwrapped in a single pass,
    /// since a concrete target needs no second pass to resolve.
    pub fn deserialize<T: DeserializeOwned>(&self, text: &str) -> Result<T> {
        self.deserialize_with(text, None)
    }

    /// Deserializes a document with an explicit encoding.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`] for empty text; parse failures from the
    /// underlying serializer are propagated unchanged.
    pub fn deserialize_with<T: DeserializeOwned>(
        &self,
        text: &str,
        encoding: Option<TextEncoding>,
    ) -> Result<T> {
        if text.is_empty() {
            return Err(Error::EmptyInput);
        }
        let encoding = self.effective(encoding);
        if contains_envelope_marker(text) {
            debug!(format = self.format.name(), "envelope marker detected");
            let envelope: TypeEnvelope<T> = wire::decode_document(self.format, text, encoding)?;
            if !envelope.seal_is_valid() {
                return Err(Error::SealMismatch);
            }
            return Ok(envelope.into_value());
        }
        wire::decode_document(self.format, text, encoding)
    }

    /// Deserializes a document that may stand for an absent value.
    pub fn deserialize_opt<T: DeserializeOwned>(
        &self,
        text: &str,
        encoding: Option<TextEncoding>,
    ) -> Result<Option<T>> {
        if text.is_empty() {
            return Err(Error::EmptyInput);
        }
        if wire::is_null_document(self.format, text) {
            return Ok(None);
        }
        self.deserialize_with(text, encoding).map(Some)
    }

    /// Recovers a value whose concrete type is known only to the
    /// document, via the two-pass sealed decode.
    ///
    /// # Errors
    ///
    /// [`Error::MissingTypeInfo`] when the document carries no envelope
    /// marker; [`Error::UnresolvedTypeName`] when the recorded name has
    /// no registry entry.
    pub fn deserialize_sealed(
        &self,
        text: &str,
        encoding: Option<TextEncoding>,
    ) -> Result<Sealed> {
        if text.is_empty() {
            return Err(Error::EmptyInput);
        }
        if !contains_envelope_marker(text) {
            return Err(Error::MissingTypeInfo);
        }
        let encoding = self.effective(encoding);

        let mut state = DecodeState::ProbeForType;
        loop {
            state = match state {
                DecodeState::ProbeForType => {
                    let header = wire::probe_header(self.format, text, encoding)?;
                    debug!(
                        format = self.format.name(),
                        type_name = %header.type_name,
                        "probe pass read envelope header"
                    );
                    DecodeState::ResolveConcrete(header)
                }
                DecodeState::ResolveConcrete(header) => {
                    let entry = self.registry.resolve(&header.type_name)?;
                    debug!(
                        format = self.format.name(),
                        type_name = entry.type_name(),
                        "resolve pass decoding with concrete type"
                    );
                    let value = entry.decode_sealed(self.format, text, encoding)?;
                    return Ok(Sealed::new(header.type_name, value));
                }
            };
        }
    }
}
