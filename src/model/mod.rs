pub mod category;
pub mod request;
pub mod role;
pub mod user;
