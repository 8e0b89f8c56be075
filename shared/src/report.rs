use crate::model::{ClassProbabilities, ValidationResult};
use std::fmt;

pub const NOT_AVAILABLE: &str = "N/A";

pub const USER_ID_MATCH: &str = "User ID Match";
pub const EXTRACTED_NAME: &str = "Extracted Name";
pub const ROLL_NUMBER: &str = "Roll Number";
pub const BRANCH: &str = "Branch";
pub const COLLEGE_FOUND: &str = "College Found";
pub const MATCHED_COLLEGE: &str = "Matched College";
pub const FACE_PHOTO_FOUND: &str = "Face Photo Found";
pub const OCR_CONFIDENCE: &str = "OCR Confidence";
pub const IMAGE_CLASSIFICATION: &str = "Image Classification";
pub const GENUINE_CONFIDENCE: &str = "Genuine Confidence";
pub const TEMPLATE_SIMILARITY: &str = "Template Similarity Score";
pub const ALL_PROBABILITIES: &str = "All Class Probabilities";
pub const VALIDATION_SCORE: &str = "Validation Score";
pub const THRESHOLD: &str = "Threshold";
pub const FAKE_BY_OCR: &str = "Fake By OCR";
pub const OUTPUT_LABEL: &str = "Output Label";
pub const ACTION: &str = "Action";
pub const REASON: &str = "Reason";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub label: &'static str,
    pub value: String,
}

/// Display-ready projection of a `ValidationResult`. Every value is already
/// formatted; absent fields read `N/A`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub status: String,
    pub message: String,
    pub user_id: String,
    pub rows: Vec<ReportRow>,
    pub extracted_text: String,
}

impl ValidationReport {
    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.value.as_str())
    }
}

/// Pure projection of a verdict into a report. No verdict, no report.
pub fn render(result: Option<&ValidationResult>) -> Option<ValidationReport> {
    let result = result?;
    let text = &result.text_validation;
    let classification = result.image_classification.as_ref();

    let rows = vec![
        row(USER_ID_MATCH, flag(text.user_id_match)),
        row(EXTRACTED_NAME, flag(text.name_extracted)),
        row(ROLL_NUMBER, or_na(text.roll_number.as_deref())),
        row(BRANCH, or_na(text.branch.as_deref())),
        row(COLLEGE_FOUND, flag(text.college_found)),
        row(MATCHED_COLLEGE, or_na(text.matched_college.as_deref())),
        row(FACE_PHOTO_FOUND, flag(text.face_photo_found)),
        row(OCR_CONFIDENCE, fixed(result.ocr_confidence, 2)),
        row(
            IMAGE_CLASSIFICATION,
            or_na(classification.and_then(|c| c.predicted_class.as_deref())),
        ),
        row(
            GENUINE_CONFIDENCE,
            fixed(classification.and_then(|c| c.genuine_confidence), 4),
        ),
        row(
            TEMPLATE_SIMILARITY,
            fixed(classification.and_then(|c| c.template_similarity_score), 4),
        ),
        row(
            ALL_PROBABILITIES,
            probabilities(classification.and_then(|c| c.all_probabilities.as_ref())),
        ),
        row(VALIDATION_SCORE, fixed(result.validation_score, 2)),
        row(THRESHOLD, fixed(result.threshold, 2)),
        row(
            FAKE_BY_OCR,
            result.is_fake_based_on_ocr.map_or_else(|| NOT_AVAILABLE.to_string(), flag),
        ),
        row(OUTPUT_LABEL, or_na(result.label.as_deref())),
        row(ACTION, or_na(result.action.as_deref())),
        row(REASON, or_na(result.reason.as_deref())),
    ];

    Some(ValidationReport {
        status: result.status.clone(),
        message: result.message.clone(),
        user_id: result.user_id.clone(),
        rows,
        extracted_text: or_na(result.extracted_text.as_deref()),
    })
}

fn row(label: &'static str, value: String) -> ReportRow {
    ReportRow { label, value }
}

fn flag(value: bool) -> String {
    value.to_string()
}

fn or_na(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}

fn fixed(value: Option<f64>, places: usize) -> String {
    match value {
        Some(v) => to_fixed(v, places),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Fixed-point text with exact ties rounded away from zero, the way
/// JavaScript's `Number.prototype.toFixed` does. Rounding works on the exact
/// decimal expansion of `value`, so `0.125` gives `0.13` while `1.005`
/// (stored just below the tie) gives `1.00`.
fn to_fixed(value: f64, places: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    // A finite f64 never has more than 1074 fractional decimal digits.
    let exact = format!("{:.1074}", value.abs());
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = whole
        .bytes()
        .chain(fraction.bytes().chain(std::iter::repeat(b'0')).take(places))
        .map(|b| b - b'0')
        .collect();

    if fraction.as_bytes().get(places).is_some_and(|&next| next >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let whole_len = digits.len() - places;
    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    for (i, digit) in digits.iter().enumerate() {
        if i == whole_len {
            out.push('.');
        }
        out.push(char::from(b'0' + digit));
    }
    out
}

fn probabilities(value: Option<&ClassProbabilities>) -> String {
    let Some(entries) = value else {
        return NOT_AVAILABLE.to_string();
    };
    entries
        .iter()
        .map(|(label, p)| format!("{}: {}", label, fixed(p, 4)))
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Status: {}", self.status)?;
        writeln!(f, "Message: {}", self.message)?;
        writeln!(f, "User ID: {}", self.user_id)?;
        for row in &self.rows {
            writeln!(f, "{}: {}", row.label, row.value)?;
        }
        writeln!(f, "Extracted Text:")?;
        write!(f, "{}", self.extracted_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ImageClassification, TextValidation};
    use proptest::prelude::*;

    fn bare() -> ValidationResult {
        ValidationResult {
            status: "success".into(),
            message: "Validation completed".into(),
            user_id: "22-733-043".into(),
            text_validation: TextValidation::default(),
            ocr_confidence: None,
            image_classification: None,
            validation_score: None,
            threshold: None,
            label: None,
            action: None,
            reason: None,
            extracted_text: None,
            is_fake_based_on_ocr: None,
        }
    }

    fn value_of(result: &ValidationResult, label: &str) -> String {
        render(Some(result)).unwrap().value(label).unwrap().to_string()
    }

    #[test]
    fn no_result_means_no_report() {
        assert!(render(None).is_none());
    }

    #[test]
    fn ocr_confidence_rounds_to_two_places() {
        let result = ValidationResult { ocr_confidence: Some(0.9567), ..bare() };
        assert_eq!(value_of(&result, OCR_CONFIDENCE), "0.96");
    }

    #[test]
    fn exact_ties_round_up() {
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(0.375, 2), "0.38");
        assert_eq!(to_fixed(0.03125, 4), "0.0313");

        let result = ValidationResult { ocr_confidence: Some(0.125), ..bare() };
        assert_eq!(value_of(&result, OCR_CONFIDENCE), "0.13");
    }

    #[test]
    fn values_stored_below_a_tie_round_down() {
        // Held as 1.00499.. and 0.000149..
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(0.00015, 4), "0.0001");
    }

    #[test]
    fn rounding_carries_into_the_whole_part() {
        assert_eq!(to_fixed(0.999, 2), "1.00");
        assert_eq!(to_fixed(9.99996, 4), "10.0000");
        assert_eq!(to_fixed(1.0, 4), "1.0000");
        assert_eq!(to_fixed(0.0, 2), "0.00");
        assert_eq!(to_fixed(-0.125, 2), "-0.13");
    }

    #[test]
    fn classification_scores_use_four_places() {
        let result = ValidationResult {
            image_classification: Some(ImageClassification {
                genuine_confidence: None,
                template_similarity_score: Some(0.12345),
                ..Default::default()
            }),
            ..bare()
        };
        assert_eq!(value_of(&result, GENUINE_CONFIDENCE), "N/A");
        assert_eq!(value_of(&result, TEMPLATE_SIMILARITY), "0.1235");
    }

    #[test]
    fn probabilities_join_in_service_order() {
        let result = ValidationResult {
            image_classification: Some(ImageClassification {
                all_probabilities: Some([("genuine", 0.8), ("fake", 0.2)].into_iter().collect()),
                ..Default::default()
            }),
            ..bare()
        };
        assert_eq!(value_of(&result, ALL_PROBABILITIES), "genuine: 0.8000, fake: 0.2000");
    }

    #[test]
    fn missing_probability_value_reads_na() {
        let probabilities = ClassProbabilities(vec![("fake".into(), None)]);
        let result = ValidationResult {
            image_classification: Some(ImageClassification {
                all_probabilities: Some(probabilities),
                ..Default::default()
            }),
            ..bare()
        };
        assert_eq!(value_of(&result, ALL_PROBABILITIES), "fake: N/A");
    }

    #[test]
    fn flags_are_never_na() {
        let result = bare();
        let report = render(Some(&result)).unwrap();
        for label in [USER_ID_MATCH, EXTRACTED_NAME, COLLEGE_FOUND, FACE_PHOTO_FOUND] {
            assert_eq!(report.value(label), Some("false"), "{label}");
        }
    }

    #[test]
    fn absent_optionals_read_na() {
        let report = render(Some(&bare())).unwrap();
        for label in [
            ROLL_NUMBER,
            BRANCH,
            MATCHED_COLLEGE,
            OCR_CONFIDENCE,
            IMAGE_CLASSIFICATION,
            GENUINE_CONFIDENCE,
            TEMPLATE_SIMILARITY,
            ALL_PROBABILITIES,
            VALIDATION_SCORE,
            THRESHOLD,
            FAKE_BY_OCR,
            OUTPUT_LABEL,
            ACTION,
            REASON,
        ] {
            assert_eq!(report.value(label), Some(NOT_AVAILABLE), "{label}");
        }
        assert_eq!(report.extracted_text, NOT_AVAILABLE);
    }

    #[test]
    fn extracted_text_is_kept_verbatim() {
        let text = "  COLLEGE OF ENGINEERING\n\tRoll: 22-733-043\n\n";
        let result = ValidationResult { extracted_text: Some(text.into()), ..bare() };
        assert_eq!(render(Some(&result)).unwrap().extracted_text, text);
    }

    #[test]
    fn plain_text_lists_rows_in_order() {
        let result = ValidationResult {
            validation_score: Some(0.8123),
            label: Some("suspicious".into()),
            extracted_text: Some("line one\nline two".into()),
            ..bare()
        };
        let text = render(Some(&result)).unwrap().to_string();

        assert!(text.starts_with(
            "Status: success\nMessage: Validation completed\nUser ID: 22-733-043\n"
        ));
        assert!(text.contains("Validation Score: 0.81\n"));
        assert!(text.find(USER_ID_MATCH).unwrap() < text.find(REASON).unwrap());
        assert!(text.ends_with("Extracted Text:\nline one\nline two"));
    }

    proptest! {
        #[test]
        fn two_place_values_stay_within_rounding(v in 0.0f64..1.0) {
            let result = ValidationResult { validation_score: Some(v), ..bare() };
            let shown = value_of(&result, VALIDATION_SCORE);
            let (_, decimals) = shown.split_once('.').unwrap();
            prop_assert_eq!(decimals.len(), 2);
            prop_assert!((shown.parse::<f64>().unwrap() - v).abs() <= 0.005 + 1e-12);
        }
    }
}
