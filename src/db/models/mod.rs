//! Persisted entities and the request payloads that produce them.
//!
//! Each entity maps to one collection, named after the lower-cased type name.

pub mod booking;
pub mod contact;
pub mod hotel;
pub mod user;

pub use booking::*;
pub use contact::*;
pub use hotel::*;
pub use user::*;

use serde::Serialize;

/// A type persisted as a document in a fixed collection
pub trait Entity: Serialize {
    const COLLECTION: &'static str;
}
