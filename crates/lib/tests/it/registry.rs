//! Registry resolution and allow-list enforcement through the public API.

use std::any::Any;

use auxdata::{AuxDataType, Registry, RegistryError, Rejection};

const VALID_AGE_KEY: &str = "age1ql3z7hjy54pw3hyww5ayyfg7zqgvc7w3j2kg5sfn9aqmcac8p";

/// An externally supplied validator that only accepts a magic string.
#[derive(Debug)]
struct MagicV1;

impl AuxDataType for MagicV1 {
    fn aux_data_type(&self) -> &str {
        "magic-v1"
    }

    fn validate(&self, aux_data: &str) -> Result<(), Rejection> {
        if aux_data == "open sesame" {
            Ok(())
        } else {
            Err(Rejection::new("not the magic words"))
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn builtins_cover_both_canonical_types_and_aliases() {
    let registry = Registry::with_builtins();
    for lookup in ["age", "age-v1", "ssh", "ssh-v2"] {
        assert!(registry.resolve(lookup).is_ok(), "lookup '{lookup}' failed");
    }
}

#[test]
fn resolved_validator_validates_end_to_end() {
    let registry = Registry::with_builtins();
    let validator = registry.resolve("age").unwrap();
    // Not a valid key: the data portion of a real key with a chunk removed.
    assert!(!validator.is_valid(VALID_AGE_KEY));
    assert!(
        validator.is_valid("age1ql3z7hjy54pw3hyww5ayyfg7zqgvc7w3j2elw8zmrj2kg5sfn9aqmcac8p")
    );
}

#[test]
fn allow_list_is_checked_against_resolved_canonical_type() {
    let registry = Registry::with_builtins();

    // Alias lookup with the matching canonical identifier on the list.
    assert!(registry.resolve_with_allow_list("ssh", &["ssh-v2"]).is_ok());

    // The lookup resolves, but the canonical type is not allowed.
    let err = registry
        .resolve_with_allow_list("ssh", &["age-v1"])
        .unwrap_err();
    assert!(matches!(err, RegistryError::NotInAllowList { .. }));
    assert!(registry.resolve("ssh").is_ok());
}

#[test]
fn empty_allow_list_allows_nothing() {
    let registry = Registry::with_builtins();
    let empty: &[&str] = &[];
    assert!(registry.resolve_with_allow_list("age", empty).is_err());
}

#[test]
fn custom_validator_round_trip() {
    let mut registry = Registry::with_builtins();
    registry
        .register(Box::new(MagicV1), Some("magic"))
        .unwrap();

    let validator = registry
        .resolve_with_allow_list("magic", &["magic-v1"])
        .unwrap();
    assert_eq!(validator.aux_data_type(), "magic-v1");
    assert!(validator.is_valid("open sesame"));

    let rejection = validator.validate("abracadabra").unwrap_err();
    assert_eq!(rejection.reason(), "not the magic words");
}

#[test]
fn unknown_lookup_is_a_registry_error_not_a_boolean() {
    let registry = Registry::with_builtins();
    let err = registry.resolve("pgp-v1").unwrap_err();
    assert!(matches!(err, RegistryError::NotRegistered { .. }));
    assert!(err.to_string().contains("pgp-v1"));
}
