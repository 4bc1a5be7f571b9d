//! Entities, request payloads and response views.
//!
//! Entities track which business fields were modified through [`Changes`]; update requests
//! carry each field as a [`Patch`] so an omitted field is never confused with an explicit
//! `null`.

pub mod changes;
pub mod patch;
pub mod product;
pub mod user;

pub use changes::*;
pub use patch::*;
pub use product::*;
pub use user::*;
