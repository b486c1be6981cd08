use intake_core::models::answer::{AnswerSet, AnswerValue};
use intake_questionnaire::derived::{pack_years, parse_decimal, Formula, PackYearsFormula};
use proptest::prelude::*;

#[test]
fn one_pack_for_one_year_is_one() {
    assert_eq!(pack_years(true, "20", "1"), Some(1));
}

#[test]
fn small_positive_exposure_is_clamped_to_one() {
    // 1/20 * 1 = 0.05
    assert_eq!(pack_years(true, "1", "1"), Some(1));
}

#[test]
fn exposure_is_floored() {
    assert_eq!(pack_years(true, "30", "10"), Some(15));
    assert_eq!(pack_years(true, "15", "3"), Some(2));
    assert_eq!(pack_years(true, "10,5", "4"), Some(2));
}

#[test]
fn no_value_without_valid_inputs() {
    assert_eq!(pack_years(true, "0", "10"), None);
    assert_eq!(pack_years(true, "20", "0"), None);
    assert_eq!(pack_years(true, "", "10"), None);
    assert_eq!(pack_years(true, "viele", "10"), None);
    assert_eq!(pack_years(false, "20", "10"), None);
}

#[test]
fn absurd_amounts_give_no_value_instead_of_saturating() {
    let huge = "9".repeat(30);
    assert_eq!(pack_years(true, &huge, "1"), None);
    assert_eq!(pack_years(true, "20", &huge), None);
    assert_eq!(pack_years(true, &"9".repeat(400), "1"), None);

    let formula = formula();
    assert_eq!(formula.compute(&answers(AnswerValue::Bool(true), &huge, "1")), "");
}

#[test]
fn large_but_representable_amounts_still_count() {
    assert_eq!(pack_years(true, "40", "1000000"), Some(2_000_000));
}

#[test]
fn parses_comma_decimals_and_strips_noise() {
    assert_eq!(parse_decimal("2,5"), Some(2.5));
    assert_eq!(parse_decimal("2.5"), Some(2.5));
    assert_eq!(parse_decimal(" 20 Stück "), Some(20.0));
    assert_eq!(parse_decimal("1.2.3"), Some(1.2));
    assert_eq!(parse_decimal(",5"), Some(0.5));
    assert_eq!(parse_decimal("7,"), Some(7.0));
    assert_eq!(parse_decimal("-3"), Some(3.0));
    assert_eq!(parse_decimal(""), None);
    assert_eq!(parse_decimal(","), None);
    assert_eq!(parse_decimal("abc"), None);
}

fn formula() -> Formula {
    Formula::PackYears(PackYearsFormula {
        smoker: "smoker".into(),
        per_day: "per_day".into(),
        years: "years".into(),
        prefix: "at least".into(),
        unit: "pack-years".into(),
    })
}

fn answers(smoker: AnswerValue, per_day: &str, years: &str) -> AnswerSet {
    [
        ("smoker".to_string(), smoker),
        ("per_day".to_string(), AnswerValue::Text(per_day.into())),
        ("years".to_string(), AnswerValue::Text(years.into())),
    ]
    .into_iter()
    .collect()
}

#[test]
fn formula_formats_the_index() {
    let text = formula().compute(&answers(AnswerValue::Bool(true), "20", "1"));
    assert_eq!(text, "at least 1 pack-years");
}

#[test]
fn formula_accepts_yes_text_for_smoker() {
    let text = formula().compute(&answers(AnswerValue::Text("yes".into()), "40", "10"));
    assert_eq!(text, "at least 20 pack-years");
}

#[test]
fn formula_is_empty_for_non_smokers_and_bad_input() {
    assert_eq!(formula().compute(&answers(AnswerValue::Bool(false), "20", "10")), "");
    assert_eq!(formula().compute(&answers(AnswerValue::Bool(true), "0", "10")), "");
    assert_eq!(formula().compute(&AnswerSet::new()), "");
}

#[test]
fn formula_uses_custom_wording() {
    let formula = Formula::PackYears(PackYearsFormula {
        smoker: "smoker".into(),
        per_day: "per_day".into(),
        years: "years".into(),
        prefix: "mind.".into(),
        unit: "Packyears".into(),
    });
    let text = formula.compute(&answers(AnswerValue::Bool(true), "20", "12"));
    assert_eq!(text, "mind. 12 Packyears");
}

proptest! {
    #[test]
    fn positive_inputs_give_at_least_one(per_day in 1u32..100, years in 1u32..80) {
        let index = pack_years(true, &per_day.to_string(), &years.to_string()).unwrap();
        prop_assert!(index >= 1);
        prop_assert_eq!(index, ((per_day as f64 / 20.0 * years as f64).floor() as u64).max(1));
    }
}
