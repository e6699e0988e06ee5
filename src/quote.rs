//! Cost quote for a selection of courses or degrees.
//!
//! The learner type picks the domestic or international fee, a levy is charged
//! per point, and GST applies to the subtotal for onshore learners only.
//! Amounts are whole cents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::{DatasetKind, FeeRecord, LoadedDataset};
use crate::error::{Error, Result};

/// Levy per point: $2.06.
pub const LEVY_CENTS_PER_POINT: u64 = 206;

/// GST rate, percent of the subtotal.
pub const GST_PERCENT: u64 = 15;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearnerType {
    #[default]
    Domestic,
    International,
}

impl LearnerType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Domestic => "domestic",
            Self::International => "international",
        }
    }
}

impl fmt::Display for LearnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LearnerType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "domestic" => Ok(Self::Domestic),
            "international" => Ok(Self::International),
            other => Err(Error::Validation(format!("unknown learner type: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearnerLocation {
    #[default]
    Onshore,
    Offshore,
}

impl LearnerLocation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Onshore => "onshore",
            Self::Offshore => "offshore",
        }
    }

    pub fn gst_applicable(self) -> bool {
        self == Self::Onshore
    }
}

impl fmt::Display for LearnerLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LearnerLocation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "onshore" => Ok(Self::Onshore),
            "offshore" => Ok(Self::Offshore),
            other => Err(Error::Validation(format!("unknown learner location: {other}"))),
        }
    }
}

/// One selected item as the quote sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteLine {
    pub points: f64,
    pub domestic_cents: u64,
    pub international_cents: u64,
}

impl QuoteLine {
    pub fn from_record(record: &FeeRecord) -> Self {
        QuoteLine {
            points: parse_points(&record.points),
            domestic_cents: record.domestic_fee.saturating_mul(100),
            international_cents: record.international_fee.saturating_mul(100),
        }
    }

    /// A line whose fee was already chosen for the learner.
    pub fn flat(points: f64, fee_cents: u64) -> Self {
        QuoteLine {
            points,
            domestic_cents: fee_cents,
            international_cents: fee_cents,
        }
    }

    fn fee_for(&self, learner_type: LearnerType) -> u64 {
        match learner_type {
            LearnerType::Domestic => self.domestic_cents,
            LearnerType::International => self.international_cents,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub learner_type: LearnerType,
    pub learner_location: LearnerLocation,
    pub items: usize,
    pub total_points: f64,
    pub fees_cents: u64,
    pub levy_cents: u64,
    pub subtotal_cents: u64,
    pub gst_cents: u64,
    pub total_cents: u64,
}

impl Quote {
    pub fn compute<'a>(
        lines: impl IntoIterator<Item = &'a QuoteLine>,
        learner_type: LearnerType,
        learner_location: LearnerLocation,
    ) -> Self {
        let mut items = 0;
        let mut total_points = 0.0;
        let mut fees_cents = 0u64;
        for line in lines {
            items += 1;
            total_points += line.points;
            fees_cents = fees_cents.saturating_add(line.fee_for(learner_type));
        }

        let levy_cents = (total_points * LEVY_CENTS_PER_POINT as f64).round().max(0.0) as u64;
        let subtotal_cents = fees_cents.saturating_add(levy_cents);
        let gst_cents = if learner_location.gst_applicable() {
            (subtotal_cents.saturating_mul(GST_PERCENT) + 50) / 100
        } else {
            0
        };

        Quote {
            learner_type,
            learner_location,
            items,
            total_points,
            fees_cents,
            levy_cents,
            subtotal_cents,
            gst_cents,
            total_cents: subtotal_cents.saturating_add(gst_cents),
        }
    }

    pub fn gst_applicable(&self) -> bool {
        self.learner_location.gst_applicable()
    }
}

/// Body of `POST /api/quote`: codes from one dataset plus the learner profile.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub kind: Option<DatasetKind>,
    #[serde(default)]
    pub codes: Vec<String>,
    #[serde(default)]
    pub learner_type: LearnerType,
    #[serde(default)]
    pub learner_location: LearnerLocation,
}

impl QuoteRequest {
    pub fn parse(body: &str) -> Result<Self> {
        let request: QuoteRequest = serde_json::from_str(body)
            .map_err(|err| Error::Validation(format!("Invalid request body: {err}")))?;
        if request.codes.is_empty() {
            return Err(Error::Validation("selection must contain at least one item".to_string()));
        }
        Ok(request)
    }

    pub fn kind(&self) -> DatasetKind {
        self.kind.unwrap_or(DatasetKind::Courses)
    }

    /// Price the requested codes against a cleaned dataset. Every code must be present.
    pub fn quote(&self, dataset: &LoadedDataset) -> Result<Quote> {
        let lines = self
            .codes
            .iter()
            .map(|code| {
                let code = code.trim();
                dataset
                    .records
                    .iter()
                    .find(|record| record.code == code)
                    .map(QuoteLine::from_record)
                    .ok_or_else(|| Error::Validation(format!("unknown {} code: {code}", dataset.kind)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Quote::compute(&lines, self.learner_type, self.learner_location))
    }
}

/// `105_050` -> `"$1,050.50"`.
pub fn format_cents(cents: u64) -> String {
    let digits = (cents / 100).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}.{:02}", cents % 100)
}

/// Parse display money such as `"$1,050.50"` or `"NZ$892"` into cents.
pub fn parse_cents(text: &str) -> Option<u64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let value: f64 = cleaned.parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some((value * 100.0).round() as u64)
}

/// Points text as a number; placeholders and junk count as zero.
pub fn parse_points(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p > 0.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, points: &str, domestic: u64, international: u64) -> FeeRecord {
        FeeRecord {
            code: code.to_string(),
            title: format!("{code} title"),
            faculty: "Arts".to_string(),
            points: points.to_string(),
            international_fee: international,
            domestic_fee: domestic,
        }
    }

    fn lines() -> Vec<QuoteLine> {
        vec![
            QuoteLine::from_record(&record("ARTS101", "15", 892, 4250)),
            QuoteLine::from_record(&record("ECON104", "15", 1050, 5100)),
        ]
    }

    #[test]
    fn domestic_onshore_adds_levy_and_gst() {
        let quote = Quote::compute(&lines(), LearnerType::Domestic, LearnerLocation::Onshore);
        assert_eq!(quote.items, 2);
        assert_eq!(quote.total_points, 30.0);
        assert_eq!(quote.fees_cents, 194_200);
        assert_eq!(quote.levy_cents, 6_180);
        assert_eq!(quote.subtotal_cents, 200_380);
        assert_eq!(quote.gst_cents, 30_057);
        assert_eq!(quote.total_cents, 230_437);
    }

    #[test]
    fn international_learners_pay_international_fees() {
        let quote = Quote::compute(&lines(), LearnerType::International, LearnerLocation::Onshore);
        assert_eq!(quote.fees_cents, 935_000);
        assert_eq!(quote.subtotal_cents, 941_180);
        assert_eq!(quote.gst_cents, 141_177);
    }

    #[test]
    fn offshore_learners_pay_no_gst() {
        let quote = Quote::compute(&lines(), LearnerType::International, LearnerLocation::Offshore);
        assert!(!quote.gst_applicable());
        assert_eq!(quote.gst_cents, 0);
        assert_eq!(quote.total_cents, quote.subtotal_cents);
    }

    #[test]
    fn empty_selection_costs_nothing() {
        let quote = Quote::compute(std::iter::empty(), LearnerType::Domestic, LearnerLocation::Onshore);
        assert_eq!(quote.items, 0);
        assert_eq!(quote.total_cents, 0);
    }

    #[test]
    fn fractional_points_round_the_levy() {
        let line = QuoteLine::flat(7.5, 0);
        let quote = Quote::compute([&line], LearnerType::Domestic, LearnerLocation::Offshore);
        assert_eq!(quote.levy_cents, 1_545);
    }

    #[test]
    fn request_prices_known_codes_and_rejects_unknown_ones() {
        let dataset = LoadedDataset::from_records(
            DatasetKind::Courses,
            vec![record("ARTS101", "15", 892, 4250), record("ECON104", "15", 1050, 5100)],
        );
        let request = QuoteRequest::parse(
            r#"{"codes":["ARTS101"],"learner_type":"international","learner_location":"offshore"}"#,
        )
        .unwrap();
        assert_eq!(request.kind(), DatasetKind::Courses);
        let quote = request.quote(&dataset).unwrap();
        assert_eq!(quote.fees_cents, 425_000);
        assert_eq!(quote.total_cents, 425_000 + 3_090);

        let request = QuoteRequest::parse(r#"{"codes":["NOPE999"]}"#).unwrap();
        let err = request.quote(&dataset).unwrap_err();
        assert!(err.to_string().contains("NOPE999"));

        assert!(QuoteRequest::parse(r#"{"codes":[]}"#).is_err());
    }

    #[test]
    fn learner_profile_parsing() {
        assert_eq!(" International ".parse::<LearnerType>().unwrap(), LearnerType::International);
        assert_eq!("offshore".parse::<LearnerLocation>().unwrap(), LearnerLocation::Offshore);
        assert!("martian".parse::<LearnerType>().is_err());
    }

    #[test]
    fn money_formatting_and_parsing() {
        assert_eq!(format_cents(0), "$0.00");
        assert_eq!(format_cents(89_250), "$892.50");
        assert_eq!(format_cents(123_456_789), "$1,234,567.89");
        assert_eq!(parse_cents("$1,050.50"), Some(105_050));
        assert_eq!(parse_cents("NZ$892"), Some(89_200));
        assert_eq!(parse_cents("TBD"), None);
        assert_eq!(parse_points("TBC"), 0.0);
        assert_eq!(parse_points(" 15 "), 15.0);
    }
}
