pub mod auth;
pub mod response;

pub use auth::{jwt_auth_middleware, optional_admin, AuthUser};
pub use response::{ApiResponse, ApiResult};
