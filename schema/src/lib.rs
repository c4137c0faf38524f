// Gophermon Schema - Shared type definitions
// This crate contains the closed enums shared between the battle engine and
// any host that persists or renders battles. Everything here is plain data
// plus the static lookup tables that go with it.

// Re-export the main types
pub use abilities::*;
pub use archetypes::*;
pub use element_types::*;
pub use status_kinds::*;

pub mod abilities;
pub mod archetypes;
pub mod element_types;
pub mod status_kinds;
