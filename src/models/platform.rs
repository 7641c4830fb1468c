// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing or renaming a platform.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlatformError {
    #[error("platform name must not be empty")]
    EmptyName,
}

/// A distribution platform interactions arrive from.
///
/// The name is trimmed and must be non-empty; the numeric id is assigned by
/// the registry once the platform is first registered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    name: String,
    id: Option<u32>,
}

impl Platform {
    /// Create a platform with a validated, trimmed name and no id yet.
    pub fn new(name: &str) -> Result<Self, PlatformError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(PlatformError::EmptyName);
        }
        Ok(Self {
            name: trimmed.to_string(),
            id: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<u32> {
        self.id
    }

    pub fn set_id(&mut self, id: u32) {
        self.id = Some(id);
    }

    /// Rename the platform; the same validation as construction applies.
    pub fn rename(&mut self, name: &str) -> Result<(), PlatformError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(PlatformError::EmptyName);
        }
        self.name = trimmed.to_string();
        Ok(())
    }
}

impl PartialEq for Platform {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Platform {}

impl Hash for Platform {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Platform {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Platform {
    /// Platforms with registry ids sort by id; otherwise by name.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => self.name.cmp(&other.name),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
