pub mod controllers;
pub mod services;

pub use controllers::configure;
pub use services::{resolve_explicit, resolve_gateway, GatewayHints};
