mod nav;
pub use nav::*;

mod error;
pub use error::*;

mod root;
pub use root::*;
