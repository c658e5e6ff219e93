pub mod json;
pub mod pdf;
pub mod senate;
