pub mod dtos;
pub mod error;
pub mod models;
pub mod nav;
pub mod pdf;
pub mod util;
