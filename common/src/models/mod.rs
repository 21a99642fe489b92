mod nav;
pub use nav::*;

mod pdf;
pub use pdf::*;
