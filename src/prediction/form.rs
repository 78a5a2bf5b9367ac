//! The six measurement fields collected by the prediction form.
//!
//! Values are kept as the raw text the user typed or selected. Widget-level
//! constraints (required, numeric range and step, enumerated choice) are
//! described by [`FieldSpec`] so any front end can enforce them the same way.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tolerance used when checking that a value sits on its field's step grid.
const STEP_EPSILON: f64 = 1e-6;

/// Choices offered for the hypertension field.
pub const HYPERTENSION_CHOICES: &[(&str, &str)] = &[("0", "No"), ("1", "Yes")];

/// One of the six form fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    SpecificGravity,
    Albumin,
    SerumCreatinine,
    Hemoglobin,
    PackedCellVolume,
    Hypertension,
}

impl FormField {
    /// All fields in display order.
    pub const ALL: [FormField; 6] = [
        FormField::SpecificGravity,
        FormField::Albumin,
        FormField::SerumCreatinine,
        FormField::Hemoglobin,
        FormField::PackedCellVolume,
        FormField::Hypertension,
    ];

    /// Wire name of the field, as sent to the backend.
    pub fn key(self) -> &'static str {
        match self {
            Self::SpecificGravity => "sg",
            Self::Albumin => "al",
            Self::SerumCreatinine => "sc",
            Self::Hemoglobin => "hemo",
            Self::PackedCellVolume => "pcv",
            Self::Hypertension => "htn",
        }
    }

    /// Input widget description for the field.
    pub fn spec(self) -> FieldSpec {
        match self {
            Self::SpecificGravity => FieldSpec::number(
                "Specific Gravity (1.0 - 1.1)",
                "e.g., 1.02",
                1.0,
                1.1,
                0.01,
            ),
            Self::Albumin => FieldSpec::number("Albumin (0 - 5)", "e.g., 3", 0.0, 5.0, 1.0),
            Self::SerumCreatinine => FieldSpec::number(
                "Serum Creatinine (0 - 10)",
                "e.g., 1.2",
                0.0,
                10.0,
                0.01,
            ),
            Self::Hemoglobin => {
                FieldSpec::number("Hemoglobin (0 - 20)", "e.g., 13.5", 0.0, 20.0, 0.01)
            }
            Self::PackedCellVolume => FieldSpec::number(
                "Packed Cell Volume (0 - 100)",
                "e.g., 40",
                0.0,
                100.0,
                1.0,
            ),
            Self::Hypertension => FieldSpec {
                label: "Hypertension",
                placeholder: None,
                kind: FieldKind::Choice(HYPERTENSION_CHOICES),
            },
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raised when a field name is not one of the six known keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown form field: {0}")]
pub struct FormFieldError(pub String);

impl FromStr for FormField {
    type Err = FormFieldError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.key() == name)
            .ok_or_else(|| FormFieldError(name.to_string()))
    }
}

/// Widget kind and constraints for a field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldKind {
    /// Numeric input with an inclusive range and a step grid anchored at `min`.
    Number { min: f64, max: f64, step: f64 },
    /// Enumerated choice of `(value, label)` pairs.
    Choice(&'static [(&'static str, &'static str)]),
}

/// Label, placeholder and constraints of one input widget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSpec {
    pub label: &'static str,
    pub placeholder: Option<&'static str>,
    pub kind: FieldKind,
}

impl FieldSpec {
    fn number(label: &'static str, placeholder: &'static str, min: f64, max: f64, step: f64) -> Self {
        Self {
            label,
            placeholder: Some(placeholder),
            kind: FieldKind::Number { min, max, step },
        }
    }

    /// True when the widget would accept `raw` as a submitted value.
    ///
    /// The value is checked exactly as it will be posted, so surrounding
    /// whitespace is rejected rather than trimmed away.
    pub fn accepts(&self, raw: &str) -> bool {
        self.problem(raw).is_none()
    }

    /// Why the widget rejects `raw`, or `None` when it is acceptable.
    pub fn problem(&self, raw: &str) -> Option<FieldProblem> {
        if raw.trim().is_empty() {
            return Some(FieldProblem::Missing);
        }
        match self.kind {
            FieldKind::Number { min, max, step } => {
                let Ok(value) = raw.parse::<f64>() else {
                    return Some(FieldProblem::NotANumber);
                };
                if !value.is_finite() {
                    Some(FieldProblem::NotANumber)
                } else if value < min || value > max {
                    Some(FieldProblem::OutOfRange)
                } else if !on_step(value, min, step) {
                    Some(FieldProblem::OffStep)
                } else {
                    None
                }
            }
            FieldKind::Choice(choices) => (!choices.iter().any(|(value, _)| *value == raw))
                .then_some(FieldProblem::UnknownChoice),
        }
    }
}

/// Reason an input widget refuses a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldProblem {
    Missing,
    NotANumber,
    OutOfRange,
    OffStep,
    UnknownChoice,
}

impl FieldProblem {
    /// Short hint shown under the offending widget.
    pub fn hint(self) -> &'static str {
        match self {
            Self::Missing => "Required",
            Self::NotANumber => "Not a number",
            Self::OutOfRange => "Out of range",
            Self::OffStep => "Too many decimals",
            Self::UnknownChoice => "Not an option",
        }
    }
}

fn on_step(value: f64, min: f64, step: f64) -> bool {
    let steps = (value - min) / step;
    (steps - steps.round()).abs() < STEP_EPSILON
}

/// Current values of the six form fields.
///
/// Serializes to the exact request body expected by the prediction endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    pub sg: String,
    pub al: String,
    pub sc: String,
    pub hemo: String,
    pub pcv: String,
    pub htn: String,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            sg: String::new(),
            al: String::new(),
            sc: String::new(),
            hemo: String::new(),
            pcv: String::new(),
            htn: "0".to_string(),
        }
    }
}

impl FormInput {
    /// Raw value currently held by `field`.
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::SpecificGravity => &self.sg,
            FormField::Albumin => &self.al,
            FormField::SerumCreatinine => &self.sc,
            FormField::Hemoglobin => &self.hemo,
            FormField::PackedCellVolume => &self.pcv,
            FormField::Hypertension => &self.htn,
        }
    }

    /// Overwrite one field, leaving the others untouched.
    pub fn set(&mut self, field: FormField, raw: impl Into<String>) {
        let slot = match field {
            FormField::SpecificGravity => &mut self.sg,
            FormField::Albumin => &mut self.al,
            FormField::SerumCreatinine => &mut self.sc,
            FormField::Hemoglobin => &mut self.hemo,
            FormField::PackedCellVolume => &mut self.pcv,
            FormField::Hypertension => &mut self.htn,
        };
        *slot = raw.into();
    }

    /// Fields whose current value the input widgets would reject.
    pub fn rejected_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|field| !field.spec().accepts(self.value(*field)))
            .collect()
    }

    /// True when every field holds a value its widget accepts.
    pub fn is_complete(&self) -> bool {
        self.rejected_fields().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormInput {
        FormInput {
            sg: "1.02".into(),
            al: "3".into(),
            sc: "1.2".into(),
            hemo: "13.5".into(),
            pcv: "40".into(),
            htn: "1".into(),
        }
    }

    #[test]
    fn default_form_has_empty_measurements_and_no_hypertension() {
        let form = FormInput::default();
        for field in &FormField::ALL[..5] {
            assert_eq!(form.value(*field), "");
        }
        assert_eq!(form.value(FormField::Hypertension), "0");
    }

    #[test]
    fn field_names_round_trip_through_parse() {
        for field in FormField::ALL {
            assert_eq!(field.key().parse::<FormField>(), Ok(field));
        }
        assert_eq!(
            "bp".parse::<FormField>(),
            Err(FormFieldError("bp".to_string()))
        );
    }

    #[test]
    fn set_overwrites_only_the_named_field() {
        let mut form = filled();
        form.set(FormField::Hemoglobin, "9.1");
        form.set(FormField::Hemoglobin, "10");
        let mut expected = filled();
        expected.hemo = "10".into();
        assert_eq!(form, expected);
    }

    #[test]
    fn serializes_to_wire_shape() {
        let json = serde_json::to_value(filled()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "sg": "1.02", "al": "3", "sc": "1.2",
                "hemo": "13.5", "pcv": "40", "htn": "1"
            })
        );
    }

    #[test]
    fn number_fields_enforce_range_and_step() {
        let sg = FormField::SpecificGravity.spec();
        assert!(sg.accepts("1.0"));
        assert!(sg.accepts("1.1"));
        assert!(!sg.accepts(" 1.02 "));
        assert!(!sg.accepts("1.02\n"));
        assert!(!sg.accepts("0.99"));
        assert!(!sg.accepts("1.015"));
        assert!(!sg.accepts("1.2"));

        let al = FormField::Albumin.spec();
        assert!(al.accepts("0"));
        assert!(al.accepts("5"));
        assert!(!al.accepts("2.5"));
        assert!(!al.accepts("6"));
        assert!(!al.accepts("-1"));

        let pcv = FormField::PackedCellVolume.spec();
        assert!(pcv.accepts("100"));
        assert!(!pcv.accepts("inf"));
        assert!(!pcv.accepts("NaN"));
        assert!(!pcv.accepts("forty"));
    }

    #[test]
    fn problems_distinguish_text_from_out_of_range() {
        let hemo = FormField::Hemoglobin.spec();
        assert_eq!(hemo.problem("13.5"), None);
        assert_eq!(hemo.problem(""), Some(FieldProblem::Missing));
        assert_eq!(hemo.problem("forty"), Some(FieldProblem::NotANumber));
        assert_eq!(hemo.problem(" 13.5"), Some(FieldProblem::NotANumber));
        assert_eq!(hemo.problem("inf"), Some(FieldProblem::NotANumber));
        assert_eq!(hemo.problem("21"), Some(FieldProblem::OutOfRange));
        assert_eq!(hemo.problem("13.555"), Some(FieldProblem::OffStep));
        assert_eq!(
            FormField::Hypertension.spec().problem("2"),
            Some(FieldProblem::UnknownChoice)
        );
        assert_eq!(FieldProblem::NotANumber.hint(), "Not a number");
        assert_eq!(FieldProblem::OutOfRange.hint(), "Out of range");
    }

    #[test]
    fn required_fields_reject_blank_values() {
        for field in FormField::ALL {
            assert!(!field.spec().accepts(""));
            assert!(!field.spec().accepts("   "));
        }
    }

    #[test]
    fn hypertension_accepts_only_enumerated_choices() {
        let htn = FormField::Hypertension.spec();
        assert!(htn.accepts("0"));
        assert!(htn.accepts("1"));
        assert!(!htn.accepts("2"));
        assert!(!htn.accepts("yes"));
    }

    #[test]
    fn completeness_reports_rejected_fields() {
        assert!(filled().is_complete());
        let mut form = filled();
        form.set(FormField::SerumCreatinine, "");
        form.set(FormField::PackedCellVolume, "101");
        assert!(!form.is_complete());
        assert_eq!(
            form.rejected_fields(),
            vec![FormField::SerumCreatinine, FormField::PackedCellVolume]
        );
    }
}
