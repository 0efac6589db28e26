// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth, admin token optional) → Admin (bearer token required)
pub mod admin;
pub mod public;
