use proptest::prelude::*;
use triagemap::{
    classify, Condition, Error, LegacyClassifier, LegacyInput, RiskLevel, RiskModel, Rule,
    RuleTable, TriageClassifier, TriageInput,
};

fn patient(age: i64, fever: bool, cough: bool, sob: bool) -> TriageInput {
    TriageInput::new(age)
        .with_fever(fever)
        .with_cough(cough)
        .with_shortness_of_breath(sob)
}

#[test]
fn test_documented_scenario_is_medium() {
    let input: TriageInput = serde_json::from_str(
        r#"{"age": 72, "sex": "female", "fever": true, "cough": true,
            "shortness_of_breath": false}"#,
    )
    .unwrap();
    assert_eq!(classify(&input).unwrap().risk_level, RiskLevel::Medium);
}

#[test]
fn test_negative_age_is_a_validation_error() {
    let input: TriageInput = serde_json::from_str(r#"{"age": -1, "sex": "male"}"#).unwrap();
    match classify(&input) {
        Err(Error::Validation(message)) => assert!(message.contains("-1")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_missing_sex_is_unknown_not_an_error() {
    let input: TriageInput = serde_json::from_str(r#"{"age": 30, "fever": true}"#).unwrap();
    assert_eq!(classify(&input).unwrap().risk_level, RiskLevel::Low);
}

#[test]
fn test_severity_ordering_first_match_wins() {
    // rule 1 and rule 2 both match; the first row decides the rule name
    let result = classify(&patient(80, true, true, true)).unwrap();
    assert_eq!(result.risk_level, RiskLevel::High);
    assert_eq!(result.rule, "elderly_fever_breathless");

    let result = classify(&patient(80, false, true, false)).unwrap();
    assert_eq!(result.risk_level, RiskLevel::Medium);
    assert_eq!(result.rule, "elderly_with_symptom");
}

#[test]
fn test_custom_table_order_decides_ties() {
    let table = RuleTable::from_rules(vec![
        Rule::new("cough_low", Condition::Cough, RiskLevel::Low),
        Rule::new("cough_high", Condition::Cough, RiskLevel::High),
    ])
    .unwrap();
    let classifier = TriageClassifier::new(table);
    let result = classifier.classify(&patient(40, false, true, false)).unwrap();
    assert_eq!(result.rule, "cough_low");
    assert_eq!(result.risk_level, RiskLevel::Low);
}

#[test]
fn test_classifiers_are_independent_models() {
    fn name_of<M: RiskModel>(model: &M) -> &'static str {
        model.name()
    }
    assert_eq!(name_of(&TriageClassifier::default()), "triage");
    assert_eq!(name_of(&LegacyClassifier::default()), "legacy");

    let legacy = LegacyClassifier::default()
        .classify(&LegacyInput::new(1500.0, "general"))
        .unwrap();
    assert_eq!(legacy.risk_level, RiskLevel::Medium);
}

#[test]
fn test_classifier_is_shareable_across_threads() {
    let classifier = std::sync::Arc::new(TriageClassifier::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let classifier = classifier.clone();
            std::thread::spawn(move || {
                classifier
                    .classify(&patient(60 + i, true, false, true))
                    .unwrap()
                    .risk_level
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), RiskLevel::High);
    }
}

proptest! {
    #[test]
    fn prop_high_for_elderly_febrile_breathless(age in 65i64..=120, cough in any::<bool>()) {
        prop_assert_eq!(
            classify(&patient(age, true, cough, true)).unwrap().risk_level,
            RiskLevel::High
        );
    }

    #[test]
    fn prop_low_without_symptoms(age in 0i64..=120) {
        prop_assert_eq!(
            classify(&patient(age, false, false, false)).unwrap().risk_level,
            RiskLevel::Low
        );
    }
}
