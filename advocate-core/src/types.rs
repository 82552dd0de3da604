//! Directory record types.
//!
//! Field names serialize in camelCase to match the query endpoint's JSON
//! contract (`firstName`, `yearsOfExperience`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Contact number stored as its bare digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(pub u64);

impl PhoneNumber {
    pub fn new(digits: u64) -> Self {
        Self(digits)
    }

    pub fn digits(&self) -> u64 {
        self.0
    }

    /// Render as `(AAA) BBB-CCCC`.
    ///
    /// Only the first ten digits are grouped; any trailing digits are kept
    /// as-is. Numbers shorter than ten digits render bare.
    pub fn formatted(&self) -> String {
        let digits = self.0.to_string();
        if digits.len() < 10 {
            return digits;
        }
        let (head, rest) = digits.split_at(10);
        format!("({}) {}-{}{}", &head[..3], &head[3..6], &head[6..], rest)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl From<u64> for PhoneNumber {
    fn from(digits: u64) -> Self {
        Self(digits)
    }
}

/// One directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advocate {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub degree: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    pub years_of_experience: u32,
    pub phone_number: PhoneNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Advocate {
    /// Given and family name joined by a single space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// An advocate that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAdvocate {
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub degree: String,
    pub specialties: Vec<String>,
    pub years_of_experience: u32,
    pub phone_number: PhoneNumber,
}

impl NewAdvocate {
    /// Attach an identifier, as a store does on insert.
    pub fn with_id(self, id: i32) -> Advocate {
        Advocate {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            city: self.city,
            degree: self.degree,
            specialties: self.specialties,
            years_of_experience: self.years_of_experience,
            phone_number: self.phone_number,
            created_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn jane() -> Advocate {
        NewAdvocate {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            city: "Reno".into(),
            degree: "MSW".into(),
            specialties: vec!["Anxiety".into(), "Trauma".into()],
            years_of_experience: 5,
            phone_number: PhoneNumber(5551234567),
        }
        .with_id(1)
    }

    #[test]
    fn test_phone_formatting() {
        assert_eq!(PhoneNumber(5551234567).formatted(), "(555) 123-4567");
        assert_eq!(PhoneNumber(15551234567).formatted(), "(155) 512-34567");
        assert_eq!(PhoneNumber(12345).formatted(), "12345");
        assert_eq!(PhoneNumber(5551234567).to_string(), "(555) 123-4567");
    }

    #[test]
    fn test_json_shape_is_camel_case() {
        let value = serde_json::to_value(jane()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1,
                "firstName": "Jane",
                "lastName": "Doe",
                "city": "Reno",
                "degree": "MSW",
                "specialties": ["Anxiety", "Trauma"],
                "yearsOfExperience": 5,
                "phoneNumber": 5551234567u64,
            })
        );
    }

    #[test]
    fn test_created_at_is_optional_on_input() {
        let parsed: Advocate = serde_json::from_value(json!({
            "id": 7,
            "firstName": "Sam",
            "lastName": "Ortiz",
            "city": "Boise",
            "degree": "PhD",
            "specialties": [],
            "yearsOfExperience": 0,
            "phoneNumber": 5550000000u64,
            "createdAt": "2024-03-01T12:00:00Z"
        }))
        .unwrap();
        assert_eq!(parsed.id, 7);
        assert!(parsed.created_at.is_some());
        assert_eq!(parsed.full_name(), "Sam Ortiz");
    }
}
