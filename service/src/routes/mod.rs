pub mod nav;
pub mod root;
