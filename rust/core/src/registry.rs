// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Type registry
//!
//! Explicit mapping from stable type names to monomorphized codec
//! closures, populated at startup. This replaces the reflection-driven
//! type lookup of runtimes that can resolve a type from a string: here
//! every type that may travel inside an envelope is registered once,
//! and the recorded name is the only thing the wire needs to carry.
//!
//! The registry is mutable only while it is being populated. Freeze it
//! behind an `Arc` before handing it to codecs; reads are then safe
//! from any thread.

use std::any::{type_name, Any, TypeId};
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::encoding::TextEncoding;
use crate::envelope::TypeEnvelope;
use crate::error::{Error, Result};
use crate::wire::{self, Format};

/// Owned, type-erased payload recovered from a sealed document.
pub type BoxedValue = Box<dyn Any + Send + Sync>;

type EncodeSealedFn =
    dyn Fn(Format, &(dyn Any + Send + Sync), TextEncoding) -> Result<String> + Send + Sync;
type DecodeSealedFn = dyn Fn(Format, &str, TextEncoding) -> Result<BoxedValue> + Send + Sync;

/// Codec closures and identity for one registered type.
pub struct TypeEntry {
    type_name: String,
    type_id: TypeId,
    rust_name: &'static str,
    encode_sealed: Box<EncodeSealedFn>,
    decode_sealed: Box<DecodeSealedFn>,
}

impl TypeEntry {
    /// Registered wire name of the type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// `TypeId` of the registered concrete type.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Rust path of the registered type, for diagnostics only.
    pub fn rust_name(&self) -> &'static str {
        self.rust_name
    }

    /// Serializes an erased value of this type into a sealed document.
    pub(crate) fn encode_sealed(
        &self,
        format: Format,
        value: &(dyn Any + Send + Sync),
        encoding: TextEncoding,
    ) -> Result<String> {
        (self.encode_sealed)(format, value, encoding)
    }

    /// Decodes a sealed document into an erased value of this type.
    pub(crate) fn decode_sealed(
        &self,
        format: Format,
        text: &str,
        encoding: TextEncoding,
    ) -> Result<BoxedValue> {
        (self.decode_sealed)(format, text, encoding)
    }
}

impl std::fmt::Debug for TypeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeEntry")
            .field("type_name", &self.type_name)
            .field("rust_name", &self.rust_name)
            .finish()
    }
}

/// Startup-populated registry of envelope-capable types.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    by_name: FxHashMap<String, Arc<TypeEntry>>,
    by_id: FxHashMap<TypeId, Arc<TypeEntry>>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a concrete type under a stable wire name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateRegistration`] if the name or the type
    /// is already registered.
    pub fn register<T>(&mut self, name: &str) -> Result<()>
    where
        T: Serialize + DeserializeOwned + Any + Send + Sync,
    {
        if self.by_name.contains_key(name) {
            return Err(Error::DuplicateRegistration(name.to_owned()));
        }
        if self.by_id.contains_key(&TypeId::of::<T>()) {
            return Err(Error::DuplicateRegistration(type_name::<T>().to_owned()));
        }

        let wire_name = name.to_owned();
        let encode_name = wire_name.clone();
        let entry = Arc::new(TypeEntry {
            type_name: wire_name.clone(),
            type_id: TypeId::of::<T>(),
            rust_name: type_name::<T>(),
            encode_sealed: Box::new(move |format, value, encoding| {
                let concrete = value
                    .downcast_ref::<T>()
                    .ok_or(Error::ValueTypeMismatch {
                        expected: type_name::<T>(),
                    })?;
                let envelope = TypeEnvelope::new(encode_name.clone(), concrete);
                wire::encode_document(format, &envelope, encoding)
            }),
            decode_sealed: Box::new(move |format, text, encoding| {
                let envelope: TypeEnvelope<T> = wire::decode_document(format, text, encoding)?;
                if !envelope.seal_is_valid() {
                    return Err(Error::SealMismatch);
                }
                Ok(Box::new(envelope.into_value()) as BoxedValue)
            }),
        });

        self.by_name.insert(wire_name, entry.clone());
        self.by_id.insert(TypeId::of::<T>(), entry);
        tracing::debug!(name, rust_type = type_name::<T>(), "registered sealed type");
        Ok(())
    }

    /// Resolves an entry by the wire name recorded in an envelope.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedTypeName`] for unknown names; a
    /// deployment problem, never retried.
    pub fn resolve(&self, name: &str) -> Result<&Arc<TypeEntry>> {
        self.by_name
            .get(name)
            .ok_or_else(|| Error::UnresolvedTypeName(name.to_owned()))
    }

    /// Looks up the entry for a runtime `TypeId`, if registered.
    pub fn entry_for_id(&self, id: TypeId) -> Option<&Arc<TypeEntry>> {
        self.by_id.get(&id)
    }

    /// Registered wire name for a concrete type, if any.
    pub fn name_of<T: Any>(&self) -> Option<&str> {
        self.by_id
            .get(&TypeId::of::<T>())
            .map(|entry| entry.type_name())
    }

    /// True when the concrete type has an entry.
    pub fn is_registered<T: Any>(&self) -> bool {
        self.by_id.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Recorded type name plus the recovered payload of a sealed decode.
pub struct Sealed {
    type_name: String,
    value: BoxedValue,
}

impl Sealed {
    pub(crate) fn new(type_name: String, value: BoxedValue) -> Self {
        Self { type_name, value }
    }

    /// Wire name the envelope recorded for the payload.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Borrows the payload as a concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Consumes the payload into a concrete type; returns `self` back
    /// unchanged when the type does not match.
    pub fn downcast<T: Any>(self) -> std::result::Result<T, Sealed> {
        match self.value.downcast::<T>() {
            Ok(boxed) => Ok(*boxed),
            Err(value) => Err(Sealed {
                type_name: self.type_name,
                value,
            }),
        }
    }
}

impl std::fmt::Debug for Sealed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sealed")
            .field("type_name", &self.type_name)
            .finish()
    }
}
