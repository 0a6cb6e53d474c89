//! Registered hashing metadata for one type.

use std::fmt;
use std::sync::Arc;

use crate::errors::{LogiHashError, Result};
use crate::notifier::ChangeCallback;
use crate::scalar::type_name_hash;
use crate::selection::{select_properties, Selection, SelectionConfig, TypeDecl};

/// A type opted in to logical hashing.
///
/// Holds the merged include/exclude lists, the resolved property order, the
/// fallback digest used when every property contributes zero, and the
/// optional callback shared by all instances of the type.
pub struct LogicalType {
    name: String,
    selection: Selection,
    properties: Vec<String>,
    fallback_hash: i32,
    on_change: Option<Arc<dyn ChangeCallback>>,
}

impl LogicalType {
    pub fn builder(decl: TypeDecl) -> LogicalTypeBuilder {
        LogicalTypeBuilder {
            decl,
            sites: Vec::new(),
            on_change: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Merged include list
    pub fn includes(&self) -> &[String] {
        self.selection.includes()
    }

    /// Merged exclude list
    pub fn excludes(&self) -> &[String] {
        self.selection.excludes()
    }

    /// Selected properties in salt-position order
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    /// Salt position of `property`, if selected
    pub fn position_of(&self, property: &str) -> Option<usize> {
        self.properties.iter().position(|p| p == property)
    }

    /// Digest returned when no property contributes
    pub fn fallback_hash(&self) -> i32 {
        self.fallback_hash
    }

    pub fn change_callback(&self) -> Option<&dyn ChangeCallback> {
        self.on_change.as_deref()
    }
}

impl fmt::Debug for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogicalType")
            .field("name", &self.name)
            .field("includes", &self.includes())
            .field("excludes", &self.excludes())
            .field("properties", &self.properties)
            .field("has_change_callback", &self.on_change.is_some())
            .finish()
    }
}

/// Collects declaration sites and the change callback for a type.
pub struct LogicalTypeBuilder {
    decl: TypeDecl,
    sites: Vec<SelectionConfig>,
    on_change: Option<Arc<dyn ChangeCallback>>,
}

impl LogicalTypeBuilder {
    /// Add a declaration site. Sites added first take precedence.
    pub fn declare(mut self, site: SelectionConfig) -> Self {
        self.sites.push(site);
        self
    }

    /// Shorthand for declaring an include-only site
    pub fn includes<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declare(SelectionConfig::including(names))
    }

    /// Shorthand for declaring an exclude-only site
    pub fn excludes<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declare(SelectionConfig::excluding(names))
    }

    pub fn on_change(mut self, callback: impl ChangeCallback + 'static) -> Self {
        self.on_change = Some(Arc::new(callback));
        self
    }

    /// Use a callback already shared with other types
    pub fn on_change_shared(mut self, callback: Arc<dyn ChangeCallback>) -> Self {
        self.on_change = Some(callback);
        self
    }

    pub fn type_name(&self) -> &str {
        self.decl.name()
    }

    /// Validate the declaration sites and resolve the property order.
    ///
    /// # Errors
    ///
    /// - `InvalidTypeName` if the type name is blank
    /// - `ConflictingSelection` if any single site declares both lists
    pub fn build(self) -> Result<LogicalType> {
        let name = self.decl.name();
        if name.trim().is_empty() {
            return Err(LogiHashError::InvalidTypeName {
                reason: "Type name cannot be empty or whitespace-only".to_string(),
            });
        }

        let selection = Selection::merge(name, &self.sites)?;
        let properties = select_properties(&self.decl, &selection);

        Ok(LogicalType {
            name: name.to_string(),
            fallback_hash: type_name_hash(name),
            selection,
            properties,
            on_change: self.on_change,
        })
    }
}
