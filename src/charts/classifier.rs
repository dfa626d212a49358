//! Mock chart-data classifier
//!
//! Picks a canned dataset for a visualization from its declared type and
//! title. Title matching is case-insensitive and the first matching rule
//! wins, so the order of the rules below is significant.

use serde::{Deserialize, Serialize};

use crate::models::VizType;

/// One labelled value on a chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

const SENIORITY_BANDS: &[(&str, f64)] = &[
    ("Band I", 28.0),
    ("Band II", 22.0),
    ("Band III", 18.0),
    ("Band IV", 20.0),
    ("Band V", 12.0),
];

const ORG_UNITS: &[(&str, f64)] = &[
    ("AAB", 28.0),
    ("AAC", 21.0),
    ("HGD", 16.0),
    ("XYZ", 19.0),
    ("MNO", 12.0),
];

const JOB_FAMILIES: &[(&str, f64)] = &[
    ("Engineering", 28.0),
    ("Sales", 22.0),
    ("Operations", 18.0),
    ("Customer Support", 17.0),
    ("Admin", 12.0),
    ("Finance", 8.0),
];

const LOCATIONS: &[(&str, f64)] = &[
    ("Mobile, AL", 22.0),
    ("Herndon, VA", 18.0),
    ("Austin, TX", 15.0),
    ("Seattle, WA", 12.0),
    ("Boston, MA", 10.0),
];

const EMPLOYMENT_TYPES: &[(&str, f64)] = &[
    ("Regular", 62.0),
    ("Temporary", 23.0),
    ("Contractor", 15.0),
];

const COLLAR_TYPES: &[(&str, f64)] = &[("Blue Collar", 58.0), ("White Collar", 42.0)];

const GENDERS: &[(&str, f64)] = &[("Male", 52.0), ("Female", 45.0), ("Non-binary", 3.0)];

const TENURE_BUCKETS: &[(&str, f64)] = &[
    ("<1 year", 25.0),
    ("1-2 years", 22.0),
    ("2-5 years", 28.0),
    ("5-10 years", 18.0),
    ("10+ years", 7.0),
];

const MONTHLY_SERIES: &[(&str, f64)] = &[
    ("Jan", 11.2),
    ("Feb", 10.8),
    ("Mar", 12.5),
    ("Apr", 11.9),
    ("May", 13.2),
    ("Jun", 12.1),
    ("Jul", 11.5),
    ("Aug", 10.9),
    ("Sep", 11.8),
    ("Oct", 12.3),
    ("Nov", 11.7),
    ("Dec", 10.5),
];

const HOURS_BY_LOCATION: &[(&str, f64)] = &[
    ("Mobile, AL", 8.5),
    ("Herndon, VA", 5.2),
    ("Austin, TX", 6.8),
    ("Seattle, WA", 4.9),
];

const WEEKLY_HOURS: &[(&str, f64)] = &[
    ("Week 1", 42.0),
    ("Week 2", 45.0),
    ("Week 3", 43.0),
    ("Week 4", 44.0),
];

const GENERIC_CATEGORIES: &[(&str, f64)] = &[
    ("Category A", 28.0),
    ("Category B", 22.0),
    ("Category C", 18.0),
    ("Category D", 20.0),
    ("Category E", 12.0),
];

const GENERIC_QUARTERS: &[(&str, f64)] = &[("Q1", 65.0), ("Q2", 72.0), ("Q3", 68.0), ("Q4", 81.0)];

const GENERIC_TYPES: &[(&str, f64)] = &[
    ("Type A", 35.0),
    ("Type B", 28.0),
    ("Type C", 22.0),
    ("Type D", 15.0),
];

/// Select the canned dataset for a visualization.
///
/// Pure and total: the same inputs always give the same points, and an
/// unknown chart type with an unmatched title gives an empty series.
pub fn classify(viz_type: VizType, title: &str) -> Vec<ChartPoint> {
    to_points(select_dataset(viz_type, title))
}

fn select_dataset(viz_type: VizType, title: &str) -> &'static [(&'static str, f64)] {
    let title = title.to_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|n| title.contains(n));

    // Band data is only drawn on bar and circular charts; a band line chart
    // falls through to the later rules.
    if has(&["band", "seniority"]) && (viz_type == VizType::Bar || viz_type.is_circular()) {
        return SENIORITY_BANDS;
    }
    if has(&["supervisory", "organization"]) {
        return ORG_UNITS;
    }
    if has(&["job family", "family"]) {
        return JOB_FAMILIES;
    }
    if has(&["location", "city", "site"]) {
        return LOCATIONS;
    }
    if has(&["worker type", "employment"]) {
        return EMPLOYMENT_TYPES;
    }
    if has(&["collar", "bc", "wc"]) {
        return COLLAR_TYPES;
    }
    if has(&["gender"]) {
        return GENDERS;
    }
    if has(&["tenure", "years"]) {
        return TENURE_BUCKETS;
    }
    if viz_type == VizType::Line || has(&["trend", "monthly", "time"]) {
        return MONTHLY_SERIES;
    }
    if has(&["hours", "overtime"]) {
        // Shadowed by the location rule above.
        if title.contains("location") {
            return HOURS_BY_LOCATION;
        }
        return WEEKLY_HOURS;
    }

    match viz_type {
        VizType::Bar => GENERIC_CATEGORIES,
        VizType::Line => GENERIC_QUARTERS,
        VizType::Pie | VizType::Donut => GENERIC_TYPES,
        VizType::Unknown => &[],
    }
}

fn to_points(dataset: &[(&str, f64)]) -> Vec<ChartPoint> {
    dataset
        .iter()
        .map(|(name, value)| ChartPoint::new(*name, *value))
        .collect()
}
