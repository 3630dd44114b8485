//! Registry mapping canonical type identifiers and aliases to validators.
//!
//! The registry is a pure dispatch layer: it owns its validators, resolves a
//! type name or short alias to the right one, and enforces a caller-supplied
//! allow-list. It holds no validation logic itself.

use std::collections::HashMap;

use thiserror::Error as ThisError;
use tracing::{debug, warn};

use crate::{age::AgeV1, ssh::SshV2, validator::AuxDataType};

/// Built-in alias for [`AgeV1`](crate::age::AgeV1).
pub const AGE_ALIAS: &str = "age";

/// Built-in alias for [`SshV2`](crate::ssh::SshV2).
pub const SSH_ALIAS: &str = "ssh";

/// Errors from registry configuration and lookup.
///
/// These signal caller or configuration mistakes, not untrusted-data
/// outcomes, so they surface as failures rather than booleans.
#[non_exhaustive]
#[derive(Debug, ThisError)]
pub enum RegistryError {
    /// The canonical type is already registered to a different
    /// implementation.
    #[error("aux data type already registered: {aux_data_type}")]
    AlreadyRegistered {
        /// The conflicting canonical type identifier
        aux_data_type: String,
    },

    /// The alias already points at a different canonical type.
    #[error("alias '{alias}' already maps to '{existing}'")]
    AliasConflict {
        /// The alias being registered
        alias: String,
        /// The canonical type it currently maps to
        existing: String,
    },

    /// The alias would shadow a registered canonical type identifier.
    #[error("alias '{alias}' collides with a registered canonical type")]
    AliasShadowsType {
        /// The offending alias
        alias: String,
    },

    /// No validator is registered for the resolved canonical type.
    #[error("aux data type not registered: {lookup}")]
    NotRegistered {
        /// The type or alias the caller asked for
        lookup: String,
    },

    /// The resolved validator's canonical type is not on the allow-list.
    #[error("aux data type not found in allow-list: {lookup}")]
    NotInAllowList {
        /// The type or alias the caller asked for
        lookup: String,
    },
}

impl RegistryError {
    /// Check if this error indicates a registration conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            RegistryError::AlreadyRegistered { .. }
                | RegistryError::AliasConflict { .. }
                | RegistryError::AliasShadowsType { .. }
        )
    }

    /// Check if this error indicates a failed lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotRegistered { .. })
    }
}

/// Owns validators keyed by canonical type, with an alias indirection.
#[derive(Debug)]
pub struct Registry {
    aux_data_types: HashMap<String, Box<dyn AuxDataType>>,
    aliases: HashMap<String, String>,
}

impl Registry {
    /// Create an empty registry with no validators registered.
    pub fn new() -> Self {
        Self {
            aux_data_types: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Start building a registry from an explicit registration list.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Create a registry with the built-in validators pre-registered:
    /// [`AgeV1`] (alias `age`) and [`SshV2`] (alias `ssh`).
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        // Built-in canonical types and aliases are disjoint by construction.
        registry.insert(Box::new(AgeV1::new()), Some(AGE_ALIAS));
        registry.insert(Box::new(SshV2::new()), Some(SSH_ALIAS));
        registry
    }

    /// Register a validator under its canonical type, optionally with an
    /// alias.
    ///
    /// Re-registering the *same* concrete implementation for a type it
    /// already holds is tolerated (the instance is replaced); a different
    /// implementation under the same canonical type fails with
    /// [`RegistryError::AlreadyRegistered`]. Alias collisions fail rather
    /// than silently retargeting lookups: see
    /// [`RegistryError::AliasConflict`] and
    /// [`RegistryError::AliasShadowsType`].
    pub fn register(
        &mut self,
        validator: Box<dyn AuxDataType>,
        alias: Option<&str>,
    ) -> Result<(), RegistryError> {
        let aux_data_type = validator.aux_data_type().to_string();

        if let Some(existing) = self.aux_data_types.get(&aux_data_type)
            && existing.as_any().type_id() != validator.as_any().type_id()
        {
            warn!("rejecting conflicting registration for '{aux_data_type}'");
            return Err(RegistryError::AlreadyRegistered { aux_data_type });
        }

        if let Some(alias) = alias {
            if let Some(existing) = self.aliases.get(alias)
                && existing != &aux_data_type
            {
                warn!("rejecting alias '{alias}': already maps to '{existing}'");
                return Err(RegistryError::AliasConflict {
                    alias: alias.to_string(),
                    existing: existing.clone(),
                });
            }
            if alias != aux_data_type && self.aux_data_types.contains_key(alias) {
                warn!("rejecting alias '{alias}': shadows a canonical type");
                return Err(RegistryError::AliasShadowsType {
                    alias: alias.to_string(),
                });
            }
        }

        self.insert(validator, alias);
        Ok(())
    }

    /// Resolve a canonical type identifier or alias to its validator.
    pub fn resolve(&self, type_or_alias: &str) -> Result<&dyn AuxDataType, RegistryError> {
        let canonical = self
            .aliases
            .get(type_or_alias)
            .map(String::as_str)
            .unwrap_or(type_or_alias);
        let validator =
            self.aux_data_types
                .get(canonical)
                .ok_or_else(|| RegistryError::NotRegistered {
                    lookup: type_or_alias.to_string(),
                })?;
        debug!("resolved '{type_or_alias}' to '{canonical}'");
        Ok(validator.as_ref())
    }

    /// Resolve, then require the resolved validator's *own* canonical type
    /// to appear in `allow_list`.
    ///
    /// The allow-list is checked against the resolved canonical identifier,
    /// not the caller's original string, so a list of canonical identifiers
    /// restricts alias-based lookups too.
    pub fn resolve_with_allow_list(
        &self,
        type_or_alias: &str,
        allow_list: &[impl AsRef<str>],
    ) -> Result<&dyn AuxDataType, RegistryError> {
        let validator = self.resolve(type_or_alias)?;
        let canonical = validator.aux_data_type();
        if !allow_list.iter().any(|allowed| allowed.as_ref() == canonical) {
            debug!("'{type_or_alias}' resolved to '{canonical}', not on the allow-list");
            return Err(RegistryError::NotInAllowList {
                lookup: type_or_alias.to_string(),
            });
        }
        Ok(validator)
    }

    /// Iterate over the registered canonical type identifiers.
    pub fn aux_data_types(&self) -> impl Iterator<Item = &str> {
        self.aux_data_types.keys().map(String::as_str)
    }

    /// Iterate over `(alias, canonical type)` pairs.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(alias, target)| (alias.as_str(), target.as_str()))
    }

    /// Unchecked insertion, shared by `register` and the built-in wiring.
    fn insert(&mut self, validator: Box<dyn AuxDataType>, alias: Option<&str>) {
        let aux_data_type = validator.aux_data_type().to_string();
        if let Some(alias) = alias {
            self.aliases.insert(alias.to_string(), aux_data_type.clone());
        }
        self.aux_data_types.insert(aux_data_type, validator);
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulates an explicit registration list; conflicts surface from
/// [`build`](RegistryBuilder::build).
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<(Box<dyn AuxDataType>, Option<String>)>,
}

impl RegistryBuilder {
    /// Add a validator without an alias.
    pub fn register(self, validator: impl AuxDataType + 'static) -> Self {
        self.push(Box::new(validator), None)
    }

    /// Add a validator with an alias.
    pub fn register_with_alias(
        self,
        validator: impl AuxDataType + 'static,
        alias: impl Into<String>,
    ) -> Self {
        self.push(Box::new(validator), Some(alias.into()))
    }

    /// Build the registry, applying each registration in order.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let mut registry = Registry::new();
        for (validator, alias) in self.entries {
            registry.register(validator, alias.as_deref())?;
        }
        Ok(registry)
    }

    fn push(mut self, validator: Box<dyn AuxDataType>, alias: Option<String>) -> Self {
        self.entries.push((validator, alias));
        self
    }
}
