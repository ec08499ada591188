//! Client-side filtering of the user list
//!
//! Filtering is a pure derivation: it borrows the list, never mutates it, and
//! is recomputed in full on every call. Expected lists are tens to low
//! thousands of records, so a linear scan is all that is needed.

use crate::types::User;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lower age bound applied when no filter is set
pub const DEFAULT_MIN_AGE: i32 = 0;

/// Upper age bound applied when no filter is set
pub const DEFAULT_MAX_AGE: i32 = 100;

/// Active filter parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Case-insensitive free text, empty matches everything
    pub search_term: String,
    /// Exact country, empty matches any
    pub country: String,
    /// Exact province, empty matches any
    pub province: String,
    /// Inclusive lower age bound
    pub min_age: i32,
    /// Inclusive upper age bound
    pub max_age: i32,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            country: String::new(),
            province: String::new(),
            min_age: DEFAULT_MIN_AGE,
            max_age: DEFAULT_MAX_AGE,
        }
    }
}

/// A single change to the filter criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    /// Replace the search term
    SearchTerm(String),
    /// Select a country (empty for any)
    Country(String),
    /// Select a province (empty for any)
    Province(String),
    /// Set the inclusive lower age bound
    MinAge(i32),
    /// Set the inclusive upper age bound
    MaxAge(i32),
}

impl FilterCriteria {
    /// Criteria with a custom default age range
    pub fn with_age_range(min_age: i32, max_age: i32) -> Self {
        Self {
            min_age,
            max_age,
            ..Default::default()
        }
    }

    /// Apply one change, returning the new criteria
    #[must_use]
    pub fn apply(self, change: FilterChange) -> Self {
        match change {
            FilterChange::SearchTerm(search_term) => Self {
                search_term,
                ..self
            },
            FilterChange::Country(country) => Self { country, ..self },
            FilterChange::Province(province) => Self { province, ..self },
            FilterChange::MinAge(min_age) => Self { min_age, ..self },
            FilterChange::MaxAge(max_age) => Self { max_age, ..self },
        }
    }

    /// Whether these are the stock defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Whether a single user satisfies every criterion on `today`
pub fn matches(user: &User, criteria: &FilterCriteria, today: NaiveDate) -> bool {
    Matcher::new(criteria, today).matches(user)
}

/// Users satisfying all criteria, in their original order.
pub fn filter_users(users: &[User], criteria: &FilterCriteria, today: NaiveDate) -> Vec<User> {
    let matcher = Matcher::new(criteria, today);
    users
        .iter()
        .filter(|user| matcher.matches(user))
        .cloned()
        .collect()
}

/// [`filter_users`] against the local calendar date
pub fn filter_users_now(users: &[User], criteria: &FilterCriteria) -> Vec<User> {
    filter_users(users, criteria, chrono::Local::now().date_naive())
}

// Lowercases the search term once per pass instead of once per user
struct Matcher<'a> {
    criteria: &'a FilterCriteria,
    needle: String,
    today: NaiveDate,
}

impl<'a> Matcher<'a> {
    fn new(criteria: &'a FilterCriteria, today: NaiveDate) -> Self {
        Self {
            criteria,
            needle: criteria.search_term.to_lowercase(),
            today,
        }
    }

    fn matches(&self, user: &User) -> bool {
        let criteria = self.criteria;

        if !self.needle.is_empty() && !user.search_text().to_lowercase().contains(&self.needle) {
            return false;
        }
        if !criteria.country.is_empty() && user.country != criteria.country {
            return false;
        }
        if !criteria.province.is_empty() && user.province != criteria.province {
            return false;
        }

        match user.age_on(self.today) {
            Some(age) => age >= criteria.min_age && age <= criteria.max_age,
            None => false,
        }
    }
}

/// Distinct values offered by the country and province pickers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    /// Countries in first-seen order
    pub countries: Vec<String>,
    /// Provinces in first-seen order
    pub provinces: Vec<String>,
}

/// Collect distinct countries and provinces, keeping first-seen order
pub fn facets(users: &[User]) -> Facets {
    let mut facets = Facets::default();
    for user in users {
        if !facets.countries.contains(&user.country) {
            facets.countries.push(user.country.clone());
        }
        if !facets.provinces.contains(&user.province) {
            facets.provinces.push(user.province.clone());
        }
    }
    facets
}
