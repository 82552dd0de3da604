//! Free-text matcher shared by every search strategy.
//!
//! A record matches when the trimmed, lower-cased query is a substring of
//! any [`SearchField`]. The in-memory filter here and the SQL predicate in
//! the Postgres store are both derived from [`SearchField::ALL`], so adding a
//! field forces both strategies to handle it.

use crate::types::Advocate;

/// The record fields a query is matched against.
///
/// The phone number is never searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    FirstName,
    LastName,
    FullName,
    City,
    Degree,
    /// Each specialty tag on its own, never the joined list.
    Specialty,
    YearsOfExperience,
}

impl SearchField {
    pub const ALL: [SearchField; 7] = [
        SearchField::FirstName,
        SearchField::LastName,
        SearchField::FullName,
        SearchField::City,
        SearchField::Degree,
        SearchField::Specialty,
        SearchField::YearsOfExperience,
    ];

    /// Text values this field contributes for `advocate`.
    pub fn values(self, advocate: &Advocate) -> Vec<String> {
        match self {
            SearchField::FirstName => vec![advocate.first_name.clone()],
            SearchField::LastName => vec![advocate.last_name.clone()],
            SearchField::FullName => vec![advocate.full_name()],
            SearchField::City => vec![advocate.city.clone()],
            SearchField::Degree => vec![advocate.degree.clone()],
            SearchField::Specialty => advocate.specialties.clone(),
            SearchField::YearsOfExperience => vec![advocate.years_of_experience.to_string()],
        }
    }
}

/// Trim and case-fold a raw query.
///
/// Returns `None` when nothing is left, which means "no filter".
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Does `advocate` match the free-text `query`?
pub fn matches(advocate: &Advocate, query: &str) -> bool {
    match normalize_query(query) {
        None => true,
        Some(needle) => matches_normalized(advocate, &needle),
    }
}

/// Match against an already normalized needle.
pub fn matches_normalized(advocate: &Advocate, needle: &str) -> bool {
    SearchField::ALL.iter().any(|field| {
        field
            .values(advocate)
            .iter()
            .any(|value| value.to_lowercase().contains(needle))
    })
}

/// Keep the records matching `query`, preserving their order.
pub fn filter_advocates(advocates: &[Advocate], query: &str) -> Vec<Advocate> {
    match normalize_query(query) {
        None => advocates.to_vec(),
        Some(needle) => advocates
            .iter()
            .filter(|advocate| matches_normalized(advocate, &needle))
            .cloned()
            .collect(),
    }
}
