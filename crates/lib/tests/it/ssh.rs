//! End-to-end validation of OpenSSH public keys through the public API.

use auxdata::{AuxDataType, SshV2, ssh::SshError, ssh::wire};

/// 3072-bit RSA key with e=65537, freshly generated.
const RSA_3072: &str = "ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAABgQCk2yWX7mRMkc/2MA/LoK09B5XvpnWrXitbzyDzvG3Iqx2k65bnIFeZnmfM1tpFY22crVGgMcpz9R55r3LvLTK1SfwODojy1VPefvnpG0CA3Sdy0GnEJlL4ugMkXLNkGn3xwsvEutLq1+qGepMkVBwJ14vW7sAJ+7cXeypOn8evOVuO9mN4iMvGl/oqfBSmR7U2BGR72TFzp6TvJA+5ZGO6ZU7d/GjF7jh/F6X4TzB+gkANTvN8rE3YppOqbUbWRowghNSHUaJKDBv3R4V/QWuv5j+UWYNjC8quIGkR/8HErovS1lGBwDH3rBpQ9iCh/TQZT51gBGWtwzYWix+uHZM5ihdNTchfitH9MTE8ya60dpi8BUDWPA0tvc3SEFAxjGRN6wX6Cly/YAwxwdewsQ796ZU7n0yJ16HegQ3jzrFXA+lji28a1lTj9GcRp8I2vRzCAqKeE1kbagZqN7MQAxPTwYMjtoZFWUxm7UyAvXU+4SbMe4eifi8bTOs0RD3kI6E=";

/// 1024-bit RSA key, below the 2048-bit floor.
const RSA_1024: &str = "ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAAAgQDeZjDFiSGM8g3bkLw8mFqrmuZr2zhSfBUVM1waij0btM5yUHqTBGir7c4FQFOMtpLKRWs76Ib2YbV/N/IKMyYvEGkAnBtR+i3QAwyLYFL0aM8b5h4qif3K1z36HC9trBIHKW1njyEeob+JwCXMdyVx1hHO4Z1ihB4CN7k2j4VgWw==";

/// 3072-bit RSA key, but with e=3 rather than e=65537.
const RSA_E3: &str = "ssh-rsa AAAAB3NzaC1yc2EAAAABAwAAAYEAxIIZDttOiIfeD998NBAy40NWw5t42GTAF5AfgrE+B/fr+Bpbi5+OF4HdQ2msJM86RFqx2+8rlG8ffai/Q2kMJ4XmUF+274fVeumNj7g70qwX9ED9yBH6eX0HrUpBOtj0IbJEQDNsOOMvBv9ANJwjg1CdrpK+14ezAtQ3Yz3IZqBlBxrj2NzYs3X9slSkjG9o8awVRUtsP97XiYhWOywCNZSNvXMigOWf+xqjLW4jmFTYOPVBduqq94AI8B43RViZ5m305ffeK5+LTBo9ZTXzjjlf/0f1bujVrrq4JdCGLy+++wm868EmELukcW1v8Tb2JbuW6nqcNRYOVIqsOOTcwU0sXUuzGw2xtEOE1FYWCHE0GyvZ/ec6ZN2CF6vBfTcunCW7hB7kUMSDFw79G6lprDXEyyd3O1/rQJFYy1C7gpI/LNzJ52OpAI06XRYUU1z8BiCPoidWkrdJAJ8L0AjlNCMIrk2b3FJV/ZcA3ysl9G4ch+tomwWRrlieAa0UZoGN";

const ED25519: &str = "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIAfqfxnT/L5vcsF";
const ECDSA_P256: &str =
    "ecdsa-sha2-nistp256 AAAAE2VjZHNhLXNoYTItbmlzdHAyNTYAAAAIbmlzdHAyNTYAAABBBGhlyE2yNxuenfqVcqqVpH";

#[test]
fn accepts_strong_rsa_key() {
    assert!(SshV2::new().is_valid(RSA_3072));
}

#[test]
fn rejects_undersized_rsa_modulus() {
    let err = SshV2::new().validate(RSA_1024).unwrap_err();
    assert!(matches!(
        err,
        SshError::Wire(wire::WireError::WeakModulus { len: 129 })
    ));
}

#[test]
fn rejects_exponent_three_regardless_of_modulus_size() {
    let err = SshV2::new().validate(RSA_E3).unwrap_err();
    assert!(matches!(
        err,
        SshError::Wire(wire::WireError::WeakExponent { exponent: 3 })
    ));
}

#[test]
fn accepts_ed25519_and_ecdsa_keys() {
    let validator = SshV2::new();
    assert!(validator.is_valid(ED25519));
    assert!(validator.is_valid(ECDSA_P256));
}

#[test]
fn rejects_dsa_with_reason_naming_the_type_policy() {
    let validator: &dyn AuxDataType = &SshV2::new();
    let rejection = validator
        .validate("ssh-dss AAAAB3NzaC1kc3MAAACBAIqKj4iKj4iKj4iKj4iKj4iKj4iKj4i")
        .unwrap_err();
    assert!(rejection.reason().contains("DSA"));
}

#[test]
fn rejects_comment_field_with_part_count_reason() {
    let validator: &dyn AuxDataType = &SshV2::new();
    let rejection = validator
        .validate(&format!("{RSA_3072} user@hostname"))
        .unwrap_err();
    assert!(rejection.reason().contains("2 parts"));
}

#[test]
fn wire_parser_reports_rsa_components() {
    let body = RSA_3072.split_whitespace().nth(1).unwrap();
    let parsed = wire::parse("ssh-rsa", body).unwrap();
    assert_eq!(parsed.declared_type, "ssh-rsa");
    let rsa = parsed.rsa.unwrap();
    assert_eq!(rsa.exponent, 65537);
    // 3072-bit modulus with a leading zero byte on the wire.
    assert!(rsa.modulus_len >= 384);
}

#[test]
fn oversized_input_is_rejected_not_crashed() {
    let validator = SshV2::new();
    let huge = format!("ssh-rsa {}", "A".repeat(1 << 20));
    assert!(!validator.is_valid(&huge));
}

#[test]
fn whitespace_variants() {
    let validator = SshV2::new();
    // Outer whitespace is trimmed.
    assert!(validator.is_valid(&format!("\t{ED25519}\n")));
    // Runs of interior whitespace still split into two fields.
    let spaced = ED25519.replace(' ', "   ");
    assert!(validator.is_valid(&spaced));
    // A lone key type is not enough.
    assert!(!validator.is_valid("ssh-ed25519"));
    assert!(!validator.is_valid("   "));
}
