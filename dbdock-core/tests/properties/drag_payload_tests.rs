//! Property-based tests for drag transfer payloads

use proptest::prelude::*;

use dbdock_core::config::LayoutSettings;
use dbdock_core::layout::{DragPayload, DragSession, LayoutError, PaneId, TabId};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Arbitrary input never panics; anything that is rejected is reported
    /// as a malformed payload.
    #[test]
    fn prop_parse_never_panics(raw in ".{0,120}") {
        if let Err(err) = DragPayload::parse(&raw) {
            prop_assert!(matches!(err, LayoutError::MalformedPayload(_)));
        }
    }

    /// Valid payloads survive the transfer string.
    #[test]
    fn prop_encoded_payload_parses(tab in any::<u128>(), pane in any::<u128>()) {
        let payload = DragPayload::new(
            TabId(uuid::Uuid::from_u128(tab)),
            PaneId(uuid::Uuid::from_u128(pane)),
        );
        let raw = payload.encode().unwrap();
        let session = DragSession::start(&raw, &LayoutSettings::default());
        prop_assert_eq!(session.map(|s| s.payload()).ok(), Some(payload));
    }

    /// Payloads with broken ids are rejected rather than half-parsed.
    #[test]
    fn prop_bad_ids_are_rejected(garbage in "[a-z]{1,12}") {
        let raw = format!(r#"{{"tabId":"{garbage}","fromPaneId":"{garbage}"}}"#);
        prop_assert!(DragSession::start(&raw, &LayoutSettings::default()).is_err());
    }
}
