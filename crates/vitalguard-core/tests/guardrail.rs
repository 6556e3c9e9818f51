use vitalguard_core::guardrail::{assess_labels, classify, classify_activity};
use vitalguard_core::models::labels::{ActivityLabel, AlertSeverity, SafetyLabel};
use vitalguard_core::models::vitals::VitalSigns;

#[test]
fn hrv_below_30_is_critical() {
    for hrv in [10.0, 15.5, 29.0, 29.999] {
        assert_eq!(classify(hrv), SafetyLabel::CriticalStrain, "hrv {hrv}");
    }
}

#[test]
fn hrv_between_30_and_50_inclusive_is_moderate() {
    for hrv in [30.0, 40.0, 48.0, 50.0] {
        assert_eq!(classify(hrv), SafetyLabel::ModerateStrain, "hrv {hrv}");
    }
}

#[test]
fn hrv_above_50_is_optimal() {
    for hrv in [50.001, 51.0, 75.0, 100.0] {
        assert_eq!(classify(hrv), SafetyLabel::OptimalRecovery, "hrv {hrv}");
    }
}

#[test]
fn every_integer_hrv_in_range_gets_exactly_the_expected_label() {
    for hrv in 10..=100 {
        let expected = if hrv < 30 {
            SafetyLabel::CriticalStrain
        } else if hrv <= 50 {
            SafetyLabel::ModerateStrain
        } else {
            SafetyLabel::OptimalRecovery
        };
        assert_eq!(classify(f64::from(hrv)), expected, "hrv {hrv}");
    }
}

#[test]
fn out_of_range_hrv_still_classifies_by_order() {
    assert_eq!(classify(-5.0), SafetyLabel::CriticalStrain);
    assert_eq!(classify(250.0), SafetyLabel::OptimalRecovery);
}

#[test]
fn steps_threshold_is_exclusive() {
    assert_eq!(classify_activity(0), ActivityLabel::LightSedentary);
    assert_eq!(classify_activity(2000), ActivityLabel::LightSedentary);
    assert_eq!(classify_activity(2001), ActivityLabel::HighActive);
    assert_eq!(classify_activity(10_000), ActivityLabel::HighActive);
}

#[test]
fn critical_sedentary_scenario() {
    let vitals = VitalSigns::new(80.0, 25.0, 500).unwrap();
    let labels = assess_labels(&vitals);
    assert_eq!(labels.safety, SafetyLabel::CriticalStrain);
    assert_eq!(labels.activity, ActivityLabel::LightSedentary);
}

#[test]
fn optimal_active_scenario() {
    let vitals = VitalSigns::new(70.0, 60.0, 5000).unwrap();
    let labels = assess_labels(&vitals);
    assert_eq!(labels.safety, SafetyLabel::OptimalRecovery);
    assert_eq!(labels.activity, ActivityLabel::HighActive);
}

#[test]
fn labels_display_as_clinical_strings() {
    assert_eq!(SafetyLabel::CriticalStrain.to_string(), "CRITICAL STRAIN");
    assert_eq!(SafetyLabel::ModerateStrain.to_string(), "MODERATE STRAIN");
    assert_eq!(SafetyLabel::OptimalRecovery.to_string(), "OPTIMAL RECOVERY");
    assert_eq!(ActivityLabel::HighActive.to_string(), "HIGH/ACTIVE");
    assert_eq!(ActivityLabel::LightSedentary.to_string(), "LIGHT/SEDENTARY");
}

#[test]
fn labels_serialize_as_clinical_strings() {
    let json = serde_json::to_string(&SafetyLabel::ModerateStrain).unwrap();
    assert_eq!(json, "\"MODERATE STRAIN\"");
    let back: ActivityLabel = serde_json::from_str("\"HIGH/ACTIVE\"").unwrap();
    assert_eq!(back, ActivityLabel::HighActive);
}

#[test]
fn alerts_follow_label_severity() {
    let critical = SafetyLabel::CriticalStrain.alert();
    assert_eq!(critical.severity, AlertSeverity::Error);
    assert_eq!(critical.color, "red");
    assert_eq!(
        critical.message,
        "🚨 ALERT: CRITICAL STRAIN detected. Immediate rest advised."
    );

    let moderate = SafetyLabel::ModerateStrain.alert();
    assert_eq!(moderate.severity, AlertSeverity::Warning);
    assert_eq!(moderate.color, "orange");
    assert!(moderate.message.contains("Monitor recovery trends"));

    let optimal = SafetyLabel::OptimalRecovery.alert();
    assert_eq!(optimal.severity, AlertSeverity::Success);
    assert_eq!(optimal.color, "green");
    assert!(optimal.message.contains("Physiological state is stable"));
}
