//! Identity verification behind a trait so a real credential check can
//! replace the local registry.

use thiserror::Error;

use super::storage::{AppStorage, StorageError};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No account found with that email. Please sign up.")]
    UnknownIdentity,
    #[error("An account with this email already exists.")]
    IdentityExists,
    #[error("Could not save your account: {0}")]
    Storage(#[from] StorageError),
}

pub trait IdentityVerifier {
    /// Accept `identity` for login.
    fn verify(&self, identity: &str) -> Result<(), AuthError>;
    /// Register a new `identity`.
    fn enroll(&self, identity: &str) -> Result<(), AuthError>;
}

/// Accepts any identity present in the stored registry. No secret is checked.
#[derive(Clone)]
pub struct RegistryVerifier {
    storage: AppStorage,
}

impl RegistryVerifier {
    pub fn new(storage: AppStorage) -> Self {
        Self { storage }
    }
}

impl IdentityVerifier for RegistryVerifier {
    fn verify(&self, identity: &str) -> Result<(), AuthError> {
        if self.storage.is_registered(identity) {
            Ok(())
        } else {
            Err(AuthError::UnknownIdentity)
        }
    }

    fn enroll(&self, identity: &str) -> Result<(), AuthError> {
        if self.storage.is_registered(identity) {
            return Err(AuthError::IdentityExists);
        }
        self.storage.register_identity(identity)?;
        Ok(())
    }
}
