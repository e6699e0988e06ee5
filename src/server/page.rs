//! Server-rendered index page (`templates/index.html`). Filtering, selection
//! and the cost summary run client-side in `/static/js/app.js`, which reads the
//! `data-*` attributes written here and prices selections through `/api/quote`.

use askama::Template;

use super::api::Catalog;
use crate::data::FeeRecord;
use crate::error::{Error, Result};
use crate::quote::format_cents;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub code: String,
    pub title: String,
    pub faculty: String,
    pub points: String,
    pub domestic_fee: u64,
    pub international_fee: u64,
    pub domestic_display: String,
    pub international_display: String,
}

impl From<&FeeRecord> for Card {
    fn from(record: &FeeRecord) -> Self {
        Card {
            code: record.code.clone(),
            title: record.title.clone(),
            faculty: record.faculty.clone(),
            points: record.points.clone(),
            domestic_fee: record.domestic_fee,
            international_fee: record.international_fee,
            domestic_display: format_cents(record.domestic_fee.saturating_mul(100)),
            international_display: format_cents(record.international_fee.saturating_mul(100)),
        }
    }
}

/// One dataset's block on the page; `key` prefixes its classes and data attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub key: &'static str,
    pub heading: &'static str,
    pub faculties: Vec<String>,
    pub cards: Vec<Card>,
}

impl Section {
    fn new(key: &'static str, heading: &'static str, records: &[FeeRecord], faculties: &[String]) -> Self {
        Section {
            key,
            heading,
            faculties: faculties.to_vec(),
            cards: records.iter().map(Card::from).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub sections: Vec<Section>,
}

impl IndexTemplate {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        IndexTemplate {
            sections: vec![
                Section::new("course", "Courses", &catalog.courses, &catalog.course_faculties),
                Section::new("degree", "Degrees", &catalog.degrees, &catalog.degree_faculties),
            ],
        }
    }
}

pub fn index_html(catalog: &Catalog) -> Result<String> {
    IndexTemplate::from_catalog(catalog)
        .render()
        .map_err(|err| Error::Internal(format!("failed to render index page: {err}")))
}
