//! Column maps for the two fee datasets.
//! Each dataset kind maps the typed record fields onto the literal CSV headers of its store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Marker written into identity fields whose real value is not known yet.
pub const PLACEHOLDER: &str = "TBC";

/// Faculty substituted when a record has none.
pub const DEFAULT_FACULTY: &str = "Other";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub code: &'static str,
    pub title: &'static str,
    pub faculty: &'static str,
    pub points: &'static str,
    pub international_fee: &'static str,
    pub domestic_fee: &'static str,
}

impl ColumnMap {
    /// Headers in the order the store writes them.
    pub fn headers(&self) -> [&'static str; 6] {
        [
            self.code,
            self.title,
            self.points,
            self.faculty,
            self.international_fee,
            self.domestic_fee,
        ]
    }
}

pub const COURSE_COLUMNS: ColumnMap = ColumnMap {
    code: "UC Code",
    title: "Course Title",
    faculty: "Faculty",
    points: "Points",
    international_fee: "Int Fees - 2026",
    domestic_fee: "Dom Fees - 2026",
};

pub const DEGREE_COLUMNS: ColumnMap = ColumnMap {
    code: "Code",
    title: "Full Title",
    faculty: "Owning Faculty",
    points: "Points",
    international_fee: "Int -  Full Prog_2026",
    domestic_fee: "Dom - Full Prog_2026",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Courses,
    Degrees,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 2] = [DatasetKind::Courses, DatasetKind::Degrees];

    pub fn columns(self) -> &'static ColumnMap {
        match self {
            Self::Courses => &COURSE_COLUMNS,
            Self::Degrees => &DEGREE_COLUMNS,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Courses => "courses.csv",
            Self::Degrees => "degrees.csv",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Courses => "courses",
            Self::Degrees => "degrees",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDatasetKind(pub String);

impl fmt::Display for UnknownDatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown dataset kind '{}' (expected courses or degrees)", self.0)
    }
}

impl std::error::Error for UnknownDatasetKind {}

impl FromStr for DatasetKind {
    type Err = UnknownDatasetKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "courses" | "course" => Ok(Self::Courses),
            "degrees" | "degree" => Ok(Self::Degrees),
            _ => Err(UnknownDatasetKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_singular_and_plural_kinds() {
        assert_eq!("courses".parse::<DatasetKind>(), Ok(DatasetKind::Courses));
        assert_eq!("Degree".parse::<DatasetKind>(), Ok(DatasetKind::Degrees));
        assert!("programmes".parse::<DatasetKind>().is_err());
    }

    #[test]
    fn degree_fee_header_keeps_double_space() {
        assert_eq!(DEGREE_COLUMNS.international_fee, "Int -  Full Prog_2026");
        assert_eq!(DatasetKind::Degrees.columns().code, "Code");
    }
}
