// handlers/public/mod.rs - Public handlers (no authentication required)
//
// The dashboard itself, the guest gate, cached logos and login. An admin
// token is honored where present but never required.

pub mod dashboard;
pub mod img;
pub mod info;
pub mod manifest;
pub mod session;
