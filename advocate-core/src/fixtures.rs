//! Built-in fixture set.
//!
//! Served by [`crate::store::FixtureStore`] when no database is configured
//! and inserted by the seeding operation.

use crate::types::{Advocate, NewAdvocate, PhoneNumber};

const SPECIALTIES: [&str; 26] = [
    "Bipolar",
    "LGBTQ",
    "Medication/Prescribing",
    "Suicide History/Attempts",
    "General Mental Health (anxiety, depression, stress, grief, life transitions)",
    "Men's issues",
    "Relationship Issues (family, friends, couple, etc)",
    "Trauma & PTSD",
    "Personality disorders",
    "Personal growth",
    "Substance use/abuse",
    "Pediatrics",
    "Women's issues (post-partum, infertility, family planning)",
    "Chronic pain",
    "Weight loss & nutrition",
    "Eating disorders",
    "Diabetic Diet and nutrition",
    "Coaching (leadership, career, academic and wellness)",
    "Life coaching",
    "Obsessive-compulsive disorders",
    "Neuropsychological evaluations & testing (ADHD testing)",
    "Attention and Hyperactivity (ADHD)",
    "Sleep issues",
    "Schizophrenia and psychotic disorders",
    "Learning disorders",
    "Domestic abuse",
];

// (first, last, city, degree, specialty indices, years, phone)
type Row = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static [usize],
    u32,
    u64,
);

const ROWS: [Row; 15] = [
    ("John", "Doe", "New York", "MD", &[0, 4, 7], 10, 5551234567),
    ("Jane", "Smith", "Los Angeles", "PhD", &[1, 6], 8, 5559876543),
    ("Alice", "Johnson", "Chicago", "MSW", &[4, 9, 12, 17], 5, 5554567890),
    ("Michael", "Brown", "Houston", "MD", &[2, 10], 12, 5556543210),
    ("Emily", "Davis", "Phoenix", "PhD", &[15, 16, 14], 7, 5553210987),
    ("Chris", "Martinez", "Philadelphia", "MSW", &[5, 6, 10, 25], 9, 5557890123),
    ("Jessica", "Taylor", "San Antonio", "MD", &[11, 20, 21], 11, 5554561234),
    ("David", "Harris", "San Diego", "PhD", &[8, 23], 6, 5557896543),
    ("Laura", "Clark", "Dallas", "MSW", &[12, 3], 4, 5550123456),
    ("Daniel", "Lewis", "San Jose", "MD", &[13, 22, 2], 13, 5553217654),
    ("Sarah", "Lee", "Austin", "PhD", &[19, 24, 9, 18, 20], 10, 5551238765),
    ("James", "King", "Jacksonville", "MSW", &[], 5, 5556540987),
    ("Megan", "Green", "San Francisco", "MD", &[7, 0, 1], 14, 5559873456),
    ("Joshua", "Walker", "Columbus", "PhD", &[17, 18], 9, 5556781234),
    ("Amanda", "Hall", "Fort Worth", "MSW", &[4, 11], 3, 5559872345),
];

/// Fixture records without identifiers, in insertion order.
pub fn new_advocates() -> Vec<NewAdvocate> {
    ROWS.iter()
        .map(
            |&(first_name, last_name, city, degree, specialties, years, phone)| NewAdvocate {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                city: city.to_string(),
                degree: degree.to_string(),
                specialties: specialties
                    .iter()
                    .map(|&idx| SPECIALTIES[idx].to_string())
                    .collect(),
                years_of_experience: years,
                phone_number: PhoneNumber(phone),
            },
        )
        .collect()
}

/// Fixture records with identifiers `1..=15`, as a freshly seeded table holds them.
pub fn advocates() -> Vec<Advocate> {
    new_advocates()
        .into_iter()
        .zip(1..)
        .map(|(advocate, id)| advocate.with_id(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_unique_and_sequential() {
        let all = advocates();
        let ids: Vec<i32> = all.iter().map(|a| a.id).collect();
        assert_eq!(ids, (1..=15).collect::<Vec<_>>());
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), all.len());
    }

    #[test]
    fn test_fixture_covers_empty_specialties() {
        assert!(advocates().iter().any(|a| a.specialties.is_empty()));
    }

    #[test]
    fn test_phone_numbers_are_ten_digits() {
        for advocate in advocates() {
            assert_eq!(advocate.phone_number.digits().to_string().len(), 10);
        }
    }
}
