//! Core types for Machikado.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod id;
pub mod slug;
pub mod status;
pub mod yen;

pub use category::{Category, EventCategory};
pub use id::*;
pub use slug::slugify;
pub use status::{OrderStatus, PaymentOutcome};
pub use yen::Yen;
