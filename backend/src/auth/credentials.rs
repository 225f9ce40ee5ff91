//! Credential comparison, id issuance and login tokens.
//!
//! Each concern sits behind a small trait so the directory and the handlers
//! never depend on how passwords are compared or identifiers are minted.

use rand::Rng;

use super::models::UserId;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;
const TOKEN_BYTES: usize = 16;

/// Decides whether a supplied password matches the stored one.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, stored: &str, supplied: &str) -> bool;
}

/// Passwords are stored verbatim and compared byte for byte.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaintextVerifier;

impl CredentialVerifier for PlaintextVerifier {
    fn verify(&self, stored: &str, supplied: &str) -> bool {
        stored == supplied
    }
}

/// Produces candidate ids. Uniqueness is enforced by the directory, not here.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> UserId;
}

/// Nine random base-36 characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> UserId {
        let mut rng = rand::rng();
        let id: String = (0..ID_LEN)
            .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
            .collect();
        UserId::new(id)
    }
}

/// Issues the opaque token returned on login.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self) -> String;
}

/// Hex-encoded random bytes. Tokens are never stored or checked afterwards.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpaqueTokenIssuer;

impl TokenIssuer for OpaqueTokenIssuer {
    fn issue(&self) -> String {
        let bytes: [u8; TOKEN_BYTES] = rand::random();
        hex::encode(bytes)
    }
}
