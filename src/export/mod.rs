//! Selection export: turns the browser's selection summary into a printable plan.

pub mod pdf;

use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::quote::{format_cents, parse_cents, parse_points, LearnerLocation, LearnerType, Quote, QuoteLine};

pub use pdf::{FontPdfRenderer, PdfRenderer};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    #[default]
    Course,
    Degree,
}

/// Points arrive as a number or as the text shown on the card.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PointsValue {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for PointsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s.trim()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportItem {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub points: Option<PointsValue>,
    /// Pre-formatted currency text, e.g. `"$1,050.00"`.
    #[serde(default)]
    pub fee: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportRequest {
    #[serde(default, rename = "nameInput")]
    pub name_input: String,
    #[serde(default, rename = "generateddate")]
    pub generated_date: String,
    #[serde(default)]
    pub learner_type: String,
    #[serde(default)]
    pub learner_location: String,
    #[serde(default)]
    pub gst_applicable: bool,
    #[serde(default)]
    pub courses: Vec<ExportItem>,
    #[serde(default)]
    pub course_fees: String,
    #[serde(default)]
    pub points: Option<PointsValue>,
    #[serde(default)]
    pub levy: String,
    #[serde(default, rename = "subTotal")]
    pub sub_total: String,
    #[serde(default)]
    pub gst: String,
    #[serde(default, rename = "totalCost")]
    pub total_cost: String,
    #[serde(default, rename = "itemType")]
    pub item_type: ItemType,
}

impl ExportRequest {
    pub fn parse(body: &str) -> Result<Self> {
        let request: ExportRequest = serde_json::from_str(body)
            .map_err(|err| Error::Validation(format!("Invalid request body: {err}")))?;
        if request.courses.is_empty() {
            return Err(Error::Validation("selection must contain at least one item".to_string()));
        }
        Ok(request)
    }

    /// Whether the browser sent its own summary figures.
    pub fn has_summary(&self) -> bool {
        [&self.course_fees, &self.sub_total, &self.total_cost]
            .iter()
            .any(|value| !value.trim().is_empty())
    }

    /// Quote the selected items at the fees they were exported with. Unknown
    /// learner profiles fall back to domestic and onshore.
    pub fn quote(&self) -> Quote {
        let lines: Vec<QuoteLine> = self
            .courses
            .iter()
            .map(|item| {
                let points = item.points.as_ref().map_or(0.0, |p| parse_points(&p.to_string()));
                QuoteLine::flat(points, parse_cents(&item.fee).unwrap_or(0))
            })
            .collect();
        let learner_type = self.learner_type.parse::<LearnerType>().unwrap_or_default();
        let learner_location = self.learner_location.parse::<LearnerLocation>().unwrap_or_default();
        Quote::compute(&lines, learner_type, learner_location)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Heading,
    Body,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocLine {
    pub style: LineStyle,
    pub text: String,
}

/// Renderer-independent layout of an exported plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDocument {
    pub title: String,
    pub lines: Vec<DocLine>,
}

impl PlanDocument {
    pub fn from_request(request: &ExportRequest, fallback_date: &str) -> Self {
        let title = match request.item_type {
            ItemType::Course => "Course Plan",
            ItemType::Degree => "Degree Plan",
        };
        let mut doc = PlanDocument {
            title: title.to_string(),
            lines: Vec::new(),
        };
        doc.push(LineStyle::Title, title);

        let name = request.name_input.trim();
        if !name.is_empty() {
            doc.push(LineStyle::Body, format!("Prepared for: {name}"));
        }
        let generated = non_empty_or(&request.generated_date, fallback_date);
        doc.push(LineStyle::Body, format!("Generated: {generated}"));
        doc.push(
            LineStyle::Body,
            format!("Learner: {}", capitalize(non_empty_or(&request.learner_type, "domestic"))),
        );
        if !request.learner_location.trim().is_empty() {
            doc.push(
                LineStyle::Body,
                format!("Location: {}", capitalize(&request.learner_location)),
            );
        }
        doc.push(LineStyle::Blank, "");

        let heading = match request.item_type {
            ItemType::Course => "Selected courses",
            ItemType::Degree => "Selected degrees",
        };
        doc.push(LineStyle::Heading, heading);
        for item in &request.courses {
            let mut line = format!("{}  {}", item.code.trim(), item.name.trim());
            if let Some(points) = &item.points {
                line.push_str(&format!("  ({points} points)"));
            }
            if !item.fee.trim().is_empty() {
                line.push_str(&format!("  {}", item.fee.trim()));
            }
            doc.push(LineStyle::Body, line);
        }
        doc.push(LineStyle::Blank, "");

        doc.push(LineStyle::Heading, "Summary");
        let fees_label = match request.item_type {
            ItemType::Course => "Course fees",
            ItemType::Degree => "Programme fees",
        };
        if request.has_summary() {
            doc.push_field(fees_label, &request.course_fees);
            if let Some(points) = &request.points {
                doc.push(LineStyle::Body, format!("Total points: {points}"));
            }
            doc.push_field("Levy", &request.levy);
            doc.push_field("Subtotal", &request.sub_total);
            if request.gst_applicable {
                doc.push_field("GST", &request.gst);
            }
            doc.push_field("Total cost", &request.total_cost);
        } else {
            let quote = request.quote();
            doc.push_field(fees_label, &format_cents(quote.fees_cents));
            doc.push(LineStyle::Body, format!("Total points: {}", quote.total_points));
            doc.push_field("Levy", &format_cents(quote.levy_cents));
            doc.push_field("Subtotal", &format_cents(quote.subtotal_cents));
            if quote.gst_applicable() {
                doc.push_field("GST", &format_cents(quote.gst_cents));
            }
            doc.push_field("Total cost", &format_cents(quote.total_cents));
        }
        doc
    }

    fn push(&mut self, style: LineStyle, text: impl Into<String>) {
        self.lines.push(DocLine {
            style,
            text: text.into(),
        });
    }

    fn push_field(&mut self, label: &str, value: &str) {
        let value = value.trim();
        if !value.is_empty() {
            self.push(LineStyle::Body, format!("{label}: {value}"));
        }
    }
}

/// Download name, e.g. `Course_Plan_Generated_18-10-2026.pdf`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("Course_Plan_Generated_{}.pdf", date.format("%d-%m-%Y"))
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let value = value.trim();
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

fn capitalize(value: &str) -> String {
    let value = value.trim();
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
