pub mod gateway_resolver;

pub use gateway_resolver::{resolve_explicit, resolve_gateway, GatewayHints};
