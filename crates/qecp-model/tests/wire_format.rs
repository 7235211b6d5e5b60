// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Loading playground files: lenient where the producer is inconsistent,
//! strict where the data would be corrupt.

use proptest::prelude::*;
use qecp_model::{GateType, ModelError, PositionRef, ValidationIssue, VizData};

const WITH_UNKNOWN_GATE: &str = r#"{
    "simulator": {
        "height": 1, "vertical": 1, "horizontal": 1,
        "nodes": [[[{"q":"Data","gt":"ToffoliGate","v":0,"pv":0}]]],
        "positions": [[{"x":0,"y":0}]]
    },
    "positions": [],
    "cases": []
}"#;

#[test]
fn unknown_gate_loads_and_is_reported() {
    let data = VizData::from_json_str(WITH_UNKNOWN_GATE).unwrap();
    let sim = data.simulator.as_ref().unwrap();
    assert_eq!(
        sim.node(0, 0, 0).map(|n| n.gate_type.clone()),
        Some(GateType::Unknown("ToffoliGate".into()))
    );
    let issues = data.validate();
    assert_eq!(issues.len(), 1);
    assert!(matches!(issues[0], ValidationIssue::UnknownGate { .. }));
}

#[test]
fn malformed_peer_token_rejects_the_file() {
    let json = WITH_UNKNOWN_GATE.replace(r#""gt":"ToffoliGate""#, r#""gt":"CZGate","gp":"[0]-[0]-[0]""#);
    let err = VizData::from_json_str(&json).unwrap_err();
    assert!(matches!(err, ModelError::Json(_)));
    assert!(err.to_string().contains("malformed position token"));
}

#[test]
fn decoding_only_file_has_no_simulator() {
    let data = VizData::from_json_str(r#"{"positions":[{"t":0,"x":0,"y":0},{"t":1,"x":0,"y":0}],"cases":[["a",{}]]}"#)
        .unwrap();
    assert!(data.simulator.is_none());
    assert!(!data.is_planar());
    assert!(data.case(0).is_some_and(|c| c.case.vertices.is_empty()));
}

proptest! {
    #[test]
    fn position_tokens_parse_back(t in 0usize..10_000, i in 0usize..10_000, j in 0usize..10_000) {
        let p = PositionRef::new(t, i, j);
        prop_assert_eq!(p.to_string().parse::<PositionRef>(), Ok(p));
    }
}
