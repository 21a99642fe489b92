mod binding;
pub use binding::*;

mod credentials;
pub use credentials::*;

mod handle;
pub use handle::*;

mod registry;
pub use registry::*;

mod service;
pub use service::*;

pub mod soap;
