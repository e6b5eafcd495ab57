//! Risk calculator form: controlled inputs plus submission lifecycle.
//!
//! The submission itself is a `Resource<RiskScoreResult>`: `submitting` is
//! its loading state and the displayed score is its payload. A failed
//! submission leaves the score "not yet calculated" and only logs the error.

use crate::domain::{Cholesterol, RiskBand, RiskFormInput, RiskScoreResult};
use crate::ports::ApiError;

use super::resource::{Resource, Ticket};

/// Form field identifiers, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskField {
    Age,
    Weight,
    SystolicBp,
    Cholesterol,
}

impl RiskField {
    pub const ALL: [RiskField; 4] = [Self::Age, Self::Weight, Self::SystolicBp, Self::Cholesterol];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Weight => "Weight",
            Self::SystolicBp => "Systolic BP",
            Self::Cholesterol => "Cholesterol",
        }
    }

    /// Unit or range hint, shown next to the label.
    #[must_use]
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Age => "years (18-100)",
            Self::Weight => "kg (30-200)",
            Self::SystolicBp => "mmHg (80-200)",
            Self::Cholesterol => "←/→ to change",
        }
    }
}

/// Risk calculator state.
pub struct RiskFormState {
    pub age: String,
    pub weight: String,
    pub ap_hi: String,
    pub cholesterol: Cholesterol,
    pub selected: usize,
    /// Input problem that blocked submission (not a backend failure).
    pub input_error: Option<String>,
    submission: Resource<RiskScoreResult>,
}

impl Default for RiskFormState {
    fn default() -> Self {
        let defaults = RiskFormInput::default();
        Self {
            age: format!("{}", defaults.age),
            weight: format!("{}", defaults.weight),
            ap_hi: format!("{}", defaults.ap_hi),
            cholesterol: defaults.cholesterol,
            selected: 0,
            input_error: None,
            submission: Resource::new("calculate-risk"),
        }
    }
}

impl RiskFormState {
    #[must_use]
    pub fn selected_field(&self) -> RiskField {
        RiskField::ALL[self.selected]
    }

    pub fn next_field(&mut self) {
        self.selected = (self.selected + 1) % RiskField::ALL.len();
    }

    pub fn prev_field(&mut self) {
        if self.selected == 0 {
            self.selected = RiskField::ALL.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    /// Text buffer of a numeric field; `None` for the cholesterol selector.
    #[must_use]
    pub fn value(&self, field: RiskField) -> Option<&str> {
        match field {
            RiskField::Age => Some(&self.age),
            RiskField::Weight => Some(&self.weight),
            RiskField::SystolicBp => Some(&self.ap_hi),
            RiskField::Cholesterol => None,
        }
    }

    fn buffer_mut(&mut self) -> Option<&mut String> {
        match self.selected_field() {
            RiskField::Age => Some(&mut self.age),
            RiskField::Weight => Some(&mut self.weight),
            RiskField::SystolicBp => Some(&mut self.ap_hi),
            RiskField::Cholesterol => None,
        }
    }

    /// Type into the selected numeric field. Only digits and `.` are accepted.
    pub fn input_char(&mut self, c: char) {
        if !(c.is_ascii_digit() || c == '.') {
            return;
        }
        if let Some(buf) = self.buffer_mut() {
            buf.push(c);
            self.input_error = None;
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(buf) = self.buffer_mut() {
            buf.pop();
        }
    }

    pub fn clear_field(&mut self) {
        if let Some(buf) = self.buffer_mut() {
            buf.clear();
        }
    }

    pub fn next_cholesterol(&mut self) {
        if self.selected_field() == RiskField::Cholesterol {
            self.cholesterol = self.cholesterol.next();
        }
    }

    pub fn prev_cholesterol(&mut self) {
        if self.selected_field() == RiskField::Cholesterol {
            self.cholesterol = self.cholesterol.prev();
        }
    }

    /// Parse the current inputs.
    ///
    /// # Errors
    /// Returns a message naming the first field that is not a positive number.
    pub fn to_input(&self) -> Result<RiskFormInput, String> {
        let parse = |field: RiskField, raw: &str| -> Result<f64, String> {
            raw.trim()
                .parse::<f64>()
                .map_err(|_| format!("{}: Invalid number", field.label()))
        };

        let input = RiskFormInput {
            age: parse(RiskField::Age, &self.age)?,
            weight: parse(RiskField::Weight, &self.weight)?,
            ap_hi: parse(RiskField::SystolicBp, &self.ap_hi)?,
            cholesterol: self.cholesterol,
        };
        input.validate().map_err(|errors| errors.join(", "))?;
        Ok(input)
    }

    /// Start a submission.
    ///
    /// Returns `None` while a submission is already in flight or when the
    /// inputs do not parse; otherwise clears the previous score.
    pub fn begin_submit(&mut self) -> Option<(Ticket, RiskFormInput)> {
        if self.is_submitting() {
            return None;
        }

        match self.to_input() {
            Ok(input) => {
                self.input_error = None;
                let ticket = self.submission.begin();
                Some((ticket, input))
            }
            Err(e) => {
                self.input_error = Some(e);
                None
            }
        }
    }

    /// Record the backend response for `ticket`.
    pub fn finish_submit(&mut self, ticket: Ticket, result: Result<RiskScoreResult, ApiError>) {
        self.submission.complete(ticket, result);
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submission.is_loading()
    }

    /// Last returned score, if the latest submission succeeded.
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        self.submission.data().map(|r| r.risk_score)
    }

    #[must_use]
    pub fn band(&self) -> Option<RiskBand> {
        self.submission.data().and_then(RiskScoreResult::band)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        let form = RiskFormState::default();
        assert_eq!(form.to_input(), Ok(RiskFormInput::default()));
        assert_eq!(form.age, "50");
    }

    #[test]
    fn test_submit_round_trip() {
        let mut form = RiskFormState::default();
        let (ticket, input) = form.begin_submit().expect("Should submit");
        assert_eq!(input.ap_hi, 120.0);
        assert!(form.is_submitting());
        assert_eq!(form.score(), None);

        form.finish_submit(ticket, Ok(RiskScoreResult { risk_score: 3.0 }));
        assert!(!form.is_submitting());
        assert_eq!(form.score(), Some(3.0));
        assert_eq!(form.band().map(|b| b.label()), Some("Moderate Risk"));
    }

    #[test]
    fn test_submit_ignored_while_submitting() {
        let mut form = RiskFormState::default();
        assert!(form.begin_submit().is_some());
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn test_failure_leaves_score_uncalculated() {
        let mut form = RiskFormState::default();
        let (ticket, _) = form.begin_submit().expect("Should submit");
        form.finish_submit(ticket, Err(ApiError::Status(500)));

        assert!(!form.is_submitting());
        assert_eq!(form.score(), None);
        assert!(form.input_error.is_none());
    }

    #[test]
    fn test_resubmit_clears_previous_score() {
        let mut form = RiskFormState::default();
        let (t1, _) = form.begin_submit().expect("Should submit");
        form.finish_submit(t1, Ok(RiskScoreResult { risk_score: 2.0 }));

        let _ = form.begin_submit().expect("Should submit again");
        assert_eq!(form.score(), None);
    }

    #[test]
    fn test_invalid_input_blocks_submit() {
        let mut form = RiskFormState::default();
        form.clear_field();
        assert!(form.begin_submit().is_none());
        assert_eq!(form.input_error.as_deref(), Some("Age: Invalid number"));
        assert!(!form.is_submitting());

        form.input_char('0');
        assert!(form.begin_submit().is_none());
        assert!(form.input_error.is_some());
    }

    #[test]
    fn test_field_editing() {
        let mut form = RiskFormState::default();
        form.input_char('x');
        assert_eq!(form.age, "50");
        form.delete_char();
        form.input_char('5');
        assert_eq!(form.age, "55");

        form.prev_field();
        assert_eq!(form.selected_field(), RiskField::Cholesterol);
        form.next_cholesterol();
        assert_eq!(form.cholesterol, Cholesterol::AboveNormal);
        form.input_char('1');
        assert_eq!(form.value(RiskField::Cholesterol), None);

        form.next_field();
        assert_eq!(form.selected_field(), RiskField::Age);
        form.next_cholesterol();
        assert_eq!(form.cholesterol, Cholesterol::AboveNormal);
    }
}
