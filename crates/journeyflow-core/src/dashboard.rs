//! Journey list view: fetch once, sort locally, navigate to the designer.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use journeyflow_models::{Journey, JourneyId};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::info;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::api::JourneyApi;
use crate::error::Result;
use crate::view::ViewState;

/// Placeholder for journeys without a usable `updated_at`.
pub const MISSING_TIMESTAMP: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JourneySort {
    /// Ascending id.
    Id,
    /// Locale-aware name order: accents and case are secondary.
    Name,
    /// Most recently updated first.
    #[default]
    Recent,
}

/// Screen the app should show next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Designer(JourneyId),
}

pub struct JourneyList {
    api: Arc<dyn JourneyApi>,
    journeys: Vec<Journey>,
    sort: JourneySort,
    view: ViewState,
}

impl JourneyList {
    pub fn new(api: Arc<dyn JourneyApi>) -> Self {
        Self {
            api,
            journeys: Vec::new(),
            sort: JourneySort::default(),
            view: ViewState::Idle,
        }
    }

    pub async fn load(&mut self) -> Result<()> {
        self.view = ViewState::Loading;
        let result = self.api.list_journeys().await;
        match result {
            Ok(mut journeys) => {
                info!(count = journeys.len(), "Journeys loaded");
                sort_journeys(&mut journeys, self.sort);
                self.journeys = journeys;
                self.view = ViewState::Loaded;
                Ok(())
            }
            Err(err) => {
                self.view = ViewState::Error(err.to_string());
                Err(err)
            }
        }
    }

    pub fn journeys(&self) -> &[Journey] {
        &self.journeys
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn sort(&self) -> JourneySort {
        self.sort
    }

    pub fn set_sort(&mut self, sort: JourneySort) {
        self.sort = sort;
        sort_journeys(&mut self.journeys, sort);
    }

    pub fn open(&self, journey_id: i64) -> Route {
        Route::Designer(JourneyId::Persisted(journey_id))
    }

    pub fn create_new(&self) -> Route {
        Route::Designer(JourneyId::New)
    }
}

/// Stable sort of `journeys` by `sort`.
pub fn sort_journeys(journeys: &mut [Journey], sort: JourneySort) {
    match sort {
        JourneySort::Id => journeys.sort_by_key(|j| j.id),
        JourneySort::Name => journeys.sort_by(|a, b| compare_names(&a.name, &b.name)),
        JourneySort::Recent => journeys.sort_by(|a, b| {
            match (updated_at(a), updated_at(b)) {
                (Some(a), Some(b)) => b.cmp(&a),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }),
    }
}

/// Orders by base letters first, so `Ágil` sits with the `a`s and `Promoção`
/// before `Promocional`. Ties fall back to the lowercased, then the raw text.
fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn updated_at(journey: &Journey) -> Option<DateTime<Utc>> {
    journey.updated_at.as_deref().and_then(parse_timestamp)
}

/// Parses the timestamp formats the backend has been seen to emit.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `Last updated` cell: a date, or [`MISSING_TIMESTAMP`].
pub fn format_updated(journey: &Journey) -> String {
    updated_at(journey)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| MISSING_TIMESTAMP.to_string())
}
