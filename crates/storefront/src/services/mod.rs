//! Domain services for the storefront.
//!
//! - [`cart`] - session-backed cart operations and totaling
//! - [`checkout`] - order creation and finalize flows (single and bundle)
//! - [`events`] - event visibility rules, filtering, and ordering
//! - [`consult`] - consult presets, shop routing, and message composition
//! - [`notify`] - stand-in for the external message-dispatch channel

pub mod cart;
pub mod checkout;
pub mod consult;
pub mod events;
pub mod notify;
