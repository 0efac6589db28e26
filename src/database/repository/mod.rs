//! Parameterized statements per table. Write helpers are generic over the
//! executor so the same statement runs on the pool or inside a transaction.

mod catelog;
mod img;
mod setting;
mod token;
mod tool;
mod user;

pub use catelog::CatelogRepository;
pub use img::{cache_key, ImgRepository};
pub use setting::SettingRepository;
pub use token::TokenRepository;
pub use tool::ToolRepository;
pub use user::UserRepository;
