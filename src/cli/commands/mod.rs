pub mod db;
pub mod tools;
pub mod user;
