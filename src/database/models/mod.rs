pub mod catelog;
pub mod img;
pub mod setting;
pub mod token;
pub mod tool;
pub mod user;

pub use catelog::{Catelog, CatelogInput, CatelogRow};
pub use img::Img;
pub use setting::{Setting, SettingRow, MASKED_PASSWORD};
pub use token::{ApiToken, TokenRow};
pub use tool::{SortUpdate, Tool, ToolInput, ToolRow};
pub use user::User;
