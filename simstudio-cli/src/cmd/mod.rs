pub mod batch;
pub mod config;
pub mod execute;
pub mod status;
pub mod validate;
