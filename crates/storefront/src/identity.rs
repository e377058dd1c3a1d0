//! Identity gate for member-scoped queries and mutations.
//!
//! The login and logout flows live outside this crate; they write the session
//! flag and the engine only reads it. Abstracting the read behind a trait
//! keeps storage lookups out of the sync logic and makes the guard testable
//! by substitution.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Capability to answer "is there an authenticated session" synchronously.
pub trait IdentityProvider: Send + Sync {
    /// Whether a stored session exists right now.
    fn is_authenticated(&self) -> bool;
}

/// Process-wide session flag shared with the external auth flow.
///
/// Clones share the same underlying flag, so the auth flow can hold one
/// handle for writes while the engine holds others for reads.
#[derive(Debug, Clone, Default)]
pub struct SessionIdentity {
    signed_in: Arc<AtomicBool>,
}

impl SessionIdentity {
    /// A signed-out session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed login.
    pub fn sign_in(&self) {
        self.signed_in.store(true, Ordering::Relaxed);
    }

    /// Record a logout.
    pub fn sign_out(&self) {
        self.signed_in.store(false, Ordering::Relaxed);
    }
}

impl IdentityProvider for SessionIdentity {
    fn is_authenticated(&self) -> bool {
        self.signed_in.load(Ordering::Relaxed)
    }
}
