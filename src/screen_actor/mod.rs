//! The catalog screen: product list, form draft and the UI events that drive them.

pub mod prompt;
pub mod service;
pub mod view;

pub use prompt::*;
pub use service::*;
pub use view::*;
