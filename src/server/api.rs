use serde::Serialize;

use crate::data::{DataStore, DatasetKind, FeeRecord};
use crate::error::Result;

/// Both cleaned datasets with their faculty indexes, as served to the page and the JSON API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    pub courses: Vec<FeeRecord>,
    pub degrees: Vec<FeeRecord>,
    pub course_faculties: Vec<String>,
    pub degree_faculties: Vec<String>,
}

pub fn load_catalog(store: &DataStore) -> Result<Catalog> {
    let courses = store.load(DatasetKind::Courses)?;
    let degrees = store.load(DatasetKind::Degrees)?;
    Ok(Catalog {
        courses: courses.records,
        degrees: degrees.records,
        course_faculties: courses.faculties,
        degree_faculties: degrees.faculties,
    })
}

pub fn health_payload() -> serde_json::Value {
    serde_json::json!({
        "status": "ok",
        "service": "tuition-api",
        "version": env!("CARGO_PKG_VERSION")
    })
}
