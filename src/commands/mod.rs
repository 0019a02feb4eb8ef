pub mod backend;
pub mod upload;
