//! Random identifiers for test data.

use uuid::Uuid;

/// A fresh v4 UUID as 32 lowercase hex characters, without hyphens.
pub fn random_identifier() -> String {
    Uuid::new_v4().simple().to_string()
}
