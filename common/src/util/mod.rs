pub mod consts;
pub mod serialize;
pub mod state;
