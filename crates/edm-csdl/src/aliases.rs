//! Namespace alias resolution
//!
//! Aliases come from two places: each schema's own `$Alias`, and the
//! `$Include` entries of the document's resolved references. The table
//! is built once per document; every type name is rewritten through it
//! before lookup.

use crate::{Error, Result};
use std::collections::HashMap;
use tracing::trace;

/// Alias → namespace table for one document
#[derive(Debug, Clone, Default)]
pub struct AliasMap {
    map: HashMap<String, String>,
}

impl AliasMap {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an alias. Re-registering the same mapping is a no-op;
    /// mapping an existing alias to a different namespace is fatal.
    pub fn insert(&mut self, alias: impl Into<String>, namespace: impl Into<String>) -> Result<()> {
        let alias = alias.into();
        let namespace = namespace.into();
        if let Some(existing) = self.map.get(&alias) {
            if *existing != namespace {
                return Err(Error::AliasCollision {
                    alias,
                    existing: existing.clone(),
                    duplicate: namespace,
                });
            }
            return Ok(());
        }
        trace!(alias, namespace, "registered namespace alias");
        self.map.insert(alias, namespace);
        Ok(())
    }

    /// Namespace an alias stands for, if registered.
    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.map.get(alias).map(String::as_str)
    }

    /// Rewrite an alias-qualified name to its namespace-qualified form.
    ///
    /// The prefix before the first `.` is tried as an alias; anything
    /// else passes through unchanged.
    pub fn rewrite(&self, name: &str) -> String {
        match name.split_once('.') {
            Some((prefix, rest)) => match self.map.get(prefix) {
                Some(namespace) => format!("{namespace}.{rest}"),
                None => name.to_string(),
            },
            None => name.to_string(),
        }
    }

    /// The completed table, for handing to the model.
    pub fn into_table(self) -> HashMap<String, String> {
        self.map
    }

    /// View of the table.
    pub fn table(&self) -> &HashMap<String, String> {
        &self.map
    }
}
