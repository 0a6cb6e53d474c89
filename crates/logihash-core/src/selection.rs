//! Property selection.
//!
//! Resolves which properties of a type take part in its logical hash, and
//! in which order. Order matters: a property's position in the selection is
//! the index of the salt it is multiplied by.
//!
//! ## Rules
//!
//! - If the include list is non-empty, a property is selected iff it is
//!   included and not excluded.
//! - Otherwise a property is selected iff it is not excluded.
//! - Properties are collected walking from the most-derived type up through
//!   its ancestors, keeping the first occurrence of each name. Most-derived
//!   properties therefore occupy the lowest salt positions.
//!
//! ## Declaration sites
//!
//! A single `SelectionConfig` may carry an include list or an exclude list,
//! never both. Several sites may be merged for one type (for instance the
//! type's own declaration plus a shared canonical one); the merged
//! `Selection` may then hold both lists, which reads as "include, then
//! exclude".

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::{LogiHashError, Result};

/// Include/exclude lists from one declaration site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionConfig {
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
}

impl SelectionConfig {
    /// Site that only lists included properties
    pub fn including<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            includes: names.into_iter().map(Into::into).collect(),
            excludes: Vec::new(),
        }
    }

    /// Site that only lists excluded properties
    pub fn excluding<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            includes: Vec::new(),
            excludes: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }

    /// Reject a site that declares both lists.
    ///
    /// # Errors
    ///
    /// Returns `ConflictingSelection` if both lists are non-empty.
    pub fn validate(&self, type_name: &str) -> Result<()> {
        if !self.includes.is_empty() && !self.excludes.is_empty() {
            return Err(LogiHashError::ConflictingSelection {
                type_name: type_name.to_string(),
                includes: self.includes.clone(),
                excludes: self.excludes.clone(),
            });
        }
        Ok(())
    }

    /// Parse a site from JSON (`{"includes": [...]}` or `{"excludes": [...]}`)
    ///
    /// # Errors
    ///
    /// Returns `Serialization` for malformed input.
    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Parse a site from TOML
    ///
    /// # Errors
    ///
    /// Returns `Serialization` for malformed input.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }
}

/// Merged include-then-exclude composition for one type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    includes: Vec<String>,
    excludes: Vec<String>,
}

impl Selection {
    /// Selection that admits every declared property
    pub fn all() -> Self {
        Self::default()
    }

    /// Merge declaration sites, earliest site first.
    ///
    /// Each list is taken from the first site that declares it non-empty,
    /// so a type's own declaration wins over sites listed after it.
    ///
    /// # Errors
    ///
    /// Returns `ConflictingSelection` for the first site declaring both lists.
    pub fn merge(type_name: &str, sites: &[SelectionConfig]) -> Result<Self> {
        let mut merged = Self::default();
        for site in sites {
            site.validate(type_name)?;
            if merged.includes.is_empty() && !site.includes.is_empty() {
                merged.includes = site.includes.clone();
            }
            if merged.excludes.is_empty() && !site.excludes.is_empty() {
                merged.excludes = site.excludes.clone();
            }
        }
        Ok(merged)
    }

    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }

    /// Whether `name` passes the include/exclude rule
    pub fn admits(&self, name: &str) -> bool {
        let included = self.includes.is_empty() || self.includes.iter().any(|n| n == name);
        included && !self.excludes.iter().any(|n| n == name)
    }

    /// Filter an ordered property list, preserving order
    pub fn apply<'a, I>(&self, declared: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        declared
            .into_iter()
            .filter(|name| self.admits(name))
            .map(str::to_string)
            .collect()
    }
}

/// A type's own property declarations plus a link to its parent type.
///
/// A declaration without a parent sits directly below the universal root
/// type, which declares no properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    name: String,
    properties: Vec<String>,
    parent: Option<Arc<TypeDecl>>,
}

impl TypeDecl {
    pub fn new<I, S>(name: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            properties: properties.into_iter().map(Into::into).collect(),
            parent: None,
        }
    }

    /// Attach the parent declaration
    pub fn extends(mut self, parent: Arc<TypeDecl>) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Properties declared directly on this type
    pub fn own_properties(&self) -> &[String] {
        &self.properties
    }

    pub fn parent(&self) -> Option<&TypeDecl> {
        self.parent.as_deref()
    }

    /// This type followed by its ancestors, nearest first
    pub fn ancestry(&self) -> impl Iterator<Item = &TypeDecl> {
        std::iter::successors(Some(self), |decl| decl.parent())
    }

    /// Every property visible on this type, most-derived first, each name once
    pub fn declared_properties(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.ancestry()
            .flat_map(|decl| decl.properties.iter().map(String::as_str))
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

/// Ordered property selection for `decl` under `selection`.
pub fn select_properties(decl: &TypeDecl, selection: &Selection) -> Vec<String> {
    selection.apply(decl.declared_properties())
}
