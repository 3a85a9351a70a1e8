pub mod category;
pub mod leave_request;
