// Tests for attributing callbacks to a gateway

use payrelay::gateways::Gateway;
use payrelay::routing::{resolve_explicit, resolve_gateway, GatewayHints};
use proptest::prelude::*;

fn hints(gateway: Option<&str>, reference: Option<&str>, id: Option<&str>) -> GatewayHints {
    GatewayHints {
        gateway: gateway.map(String::from),
        reference: reference.map(String::from),
        id: id.map(String::from),
    }
}

#[test]
fn test_explicit_gateway_is_case_insensitive() {
    assert_eq!(resolve_gateway(&hints(Some("CHIP"), None, None)).ok(), Some(Gateway::Chip));
    assert_eq!(resolve_gateway(&hints(Some("HitPay"), None, None)).ok(), Some(Gateway::Hitpay));
}

#[test]
fn test_invalid_explicit_gateway_falls_back_to_shape() {
    let resolved = resolve_gateway(&hints(Some("stripe"), Some("hitpay_abc123"), None));
    assert_eq!(resolved.ok(), Some(Gateway::Hitpay));
}

#[test]
fn test_reference_shape_is_checked_before_id() {
    let resolved = resolve_gateway(&hints(None, Some("hitpay_1"), Some("chip_1")));
    assert_eq!(resolved.ok(), Some(Gateway::Hitpay));
}

#[test]
fn test_shape_markers_are_field_specific() {
    // "chip" in the reference or "hitpay" in the id proves nothing
    assert!(resolve_gateway(&hints(None, Some("chip_1"), None)).is_err());
    assert!(resolve_gateway(&hints(None, None, Some("hitpay_1"))).is_err());
}

#[test]
fn test_explicit_resolution_ignores_shape() {
    assert!(resolve_explicit(&hints(None, Some("hitpay_abc123"), None)).is_err());
    assert_eq!(
        resolve_explicit(&GatewayHints::explicit("chip")).ok(),
        Some(Gateway::Chip)
    );
}

proptest! {
    /// A valid explicit gateway wins over whatever else is present
    #[test]
    fn explicit_gateway_always_wins(
        explicit in prop::sample::select(vec!["hitpay", "chip"]),
        reference in proptest::option::of("[a-z_]{0,16}"),
        id in proptest::option::of("[a-z_]{0,16}"),
    ) {
        let resolved = resolve_gateway(&hints(Some(explicit), reference.as_deref(), id.as_deref()));
        prop_assert_eq!(resolved.ok(), explicit.parse::<Gateway>().ok());
    }

    /// Without a marker there is no default gateway
    #[test]
    fn unmarked_hints_are_unresolved(
        reference in proptest::option::of("[A-Z0-9-]{0,16}"),
        id in proptest::option::of("[A-Z0-9-]{0,16}"),
    ) {
        prop_assert!(resolve_gateway(&hints(None, reference.as_deref(), id.as_deref())).is_err());
    }
}
