//! Membership sync: the viewer's favorites and cart.
//!
//! Both collections are server-owned and replaced wholesale from responses,
//! never patched locally. Mutations are identity-gated: an anonymous viewer
//! gets a sign-in prompt through the notification boundary and no request is
//! sent. Each confirmed mutation marks the affected collection stale so the
//! next read refetches; a failed mutation leaves the last-known-good state
//! untouched.
//!
//! No locking anywhere: everything runs on the single UI context, and
//! readers only ever see state "as of the last successful fetch".

pub mod cart;
pub mod favorites;

pub use cart::Cart;
pub use favorites::Favorites;
