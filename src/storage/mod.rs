// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod json_archive;

// Re-export main types for convenience
pub use json_archive::{to_pretty_json, JsonArchive, StorageError};
