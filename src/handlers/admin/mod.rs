// handlers/admin/mod.rs - Admin handlers (bearer token required)
//
// Every route here sits behind `jwt_auth_middleware`; handlers may read
// the `AuthUser` extension it inserts.

pub mod all;
pub mod catelog;
pub mod setting;
pub mod token;
pub mod tool;
pub mod user;
