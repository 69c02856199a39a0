use approx::assert_relative_eq;
use sink_core::calibration::DuplicateRegions;
use sink_core::policy::{PolicyRecord, PolicyTable};
use sink_core::services::{afforestation_potential_kg, match_policy};
use sink_core::{Calibration, SinkError};

fn table() -> PolicyTable {
    PolicyTable::from_records(vec![
        PolicyRecord::new("Odisha", "Green Odisha Mission", "Teak", 5.0),
        PolicyRecord::new("Kerala", "Haritha Keralam", "Mangrove", 0.5),
    ])
    .unwrap()
}

#[test]
fn odisha_target_covers_gap_up_to_its_potential() {
    let calibration = Calibration::default();
    for gap in [600.0, 1_100_000.0, -50.0] {
        let verdict = match_policy("Odisha", gap, &table(), &calibration).unwrap();
        assert!(verdict.policy_found);
        assert_relative_eq!(verdict.afforestation_potential_kg.unwrap(), 1_100_000.0);
        assert!(verdict.sufficient, "gap {gap} should be covered");
        assert!(verdict.residual_gap_kg.is_none());
    }
}

#[test]
fn insufficient_policy_reports_residual_gap() {
    let verdict = match_policy("Kerala", 200_000.0, &table(), &Calibration::default()).unwrap();
    // 0.5 ha * 10_000 * 22 = 110_000 kg
    assert!(verdict.policy_found);
    assert!(!verdict.sufficient);
    assert_relative_eq!(verdict.residual_gap_kg.unwrap(), 90_000.0);
    assert!(verdict.recommendation().contains("remaining gap of 90000.00 kg"));
}

#[test]
fn unknown_region_is_not_found() {
    let calibration = Calibration::default();
    for t in [PolicyTable::empty(), table()] {
        let verdict = match_policy("Unknown State", 10.0, &t, &calibration).unwrap();
        assert!(!verdict.policy_found);
        assert!(!verdict.sufficient);
        assert!(verdict.afforestation_potential_kg.is_none());
        assert!(verdict.residual_gap_kg.is_none());
        assert_eq!(verdict.recommendation(), "No specific policy found for this state.");
    }
}

#[test]
fn region_lookup_ignores_case() {
    let calibration = Calibration::default();
    let names: Vec<_> = ["ODISHA", "odisha", "Odisha"]
        .iter()
        .map(|r| match_policy(r, 1.0, &table(), &calibration).unwrap().policy_name)
        .collect();
    assert!(names.iter().all(|n| n.as_deref() == Some("Green Odisha Mission")));
}

#[test]
fn species_does_not_change_potential() {
    let calibration = Calibration::default();
    let teak = PolicyRecord::new("A", "P", "Teak", 2.0);
    let bamboo = PolicyRecord::new("A", "P", "Bamboo", 2.0);
    assert_eq!(
        afforestation_potential_kg(&teak, &calibration),
        afforestation_potential_kg(&bamboo, &calibration)
    );
}

#[test]
fn duplicate_regions_use_first_row_by_default() {
    let dup = PolicyTable::from_records(vec![
        PolicyRecord::new("Goa", "First", "Neem", 1.0),
        PolicyRecord::new("GOA", "Second", "Sal", 9.0),
    ])
    .unwrap();

    let verdict = match_policy("goa", 0.0, &dup, &Calibration::default()).unwrap();
    assert_eq!(verdict.policy_name.as_deref(), Some("First"));

    let strict = Calibration::default().with_duplicate_regions(DuplicateRegions::Reject);
    let err = match_policy("goa", 0.0, &dup, &strict).unwrap_err();
    assert_eq!(err, SinkError::AmbiguousRegion { region: "goa".into(), count: 2 });
}

#[test]
fn sufficient_recommendation_names_policy() {
    let verdict = match_policy("odisha", 10.0, &table(), &Calibration::default()).unwrap();
    assert_eq!(
        verdict.recommendation(),
        "State policy 'Green Odisha Mission' can absorb 1100000.00 kg of CO₂, which is \
         sufficient to offset the remaining emissions."
    );
}

#[test]
fn negative_target_area_is_rejected_at_ingestion() {
    let err = PolicyTable::from_records(vec![PolicyRecord::new("Goa", "P", "Neem", -2.0)])
        .unwrap_err();
    assert!(matches!(err, SinkError::InvalidTargetArea { .. }));
}
