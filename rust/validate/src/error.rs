// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for validation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Argument errors raised at call entry.
///
/// Validation findings themselves never surface here; they are
/// collected in the report so callers see one uniform result shape
/// regardless of failure mode.
#[derive(Error, Debug)]
pub enum Error {
    #[error("document text must not be empty")]
    EmptyDocument,

    #[error("schema text must not be empty")]
    EmptySchema,
}
