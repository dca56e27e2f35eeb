#[macro_use]
mod macros;

pub mod rest_client;
pub mod screen_client;

pub use rest_client::RestClient;
pub use screen_client::ScreenClient;
