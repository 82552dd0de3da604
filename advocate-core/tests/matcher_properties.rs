//! Property tests for the free-text matcher.

use advocate_core::{fixtures, matches, Advocate, PhoneNumber};
use proptest::prelude::*;

fn jane_doe() -> Advocate {
    Advocate {
        id: 1,
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        city: "Reno".into(),
        degree: "MSW".into(),
        specialties: vec!["Anxiety".into(), "Trauma".into()],
        years_of_experience: 5,
        phone_number: PhoneNumber(5551234567),
        created_at: None,
    }
}

fn arb_advocate() -> impl Strategy<Value = Advocate> {
    (
        "[A-Za-z]{1,10}",
        "[A-Za-z]{1,10}",
        "[A-Za-z ]{1,12}",
        "[A-Z]{2,4}",
        prop::collection::vec("[A-Za-z &/]{1,16}", 0..4),
        0u32..60,
        1_000_000_000u64..9_999_999_999,
    )
        .prop_map(
            |(first_name, last_name, city, degree, specialties, years, phone)| Advocate {
                id: 1,
                first_name,
                last_name,
                city,
                degree,
                specialties,
                years_of_experience: years,
                phone_number: PhoneNumber(phone),
                created_at: None,
            },
        )
}

/// Literal restatement of the matching rule, used as the oracle.
fn searched_values(advocate: &Advocate) -> Vec<String> {
    let mut values = vec![
        advocate.first_name.clone(),
        advocate.last_name.clone(),
        format!("{} {}", advocate.first_name, advocate.last_name),
        advocate.city.clone(),
        advocate.degree.clone(),
        advocate.years_of_experience.to_string(),
    ];
    values.extend(advocate.specialties.iter().cloned());
    values.into_iter().map(|v| v.to_lowercase()).collect()
}

proptest! {
    #[test]
    fn blank_query_matches_any_record(advocate in arb_advocate(), blank in "[ \t\n]{0,5}") {
        prop_assert!(matches(&advocate, &blank));
    }

    #[test]
    fn match_iff_substring_of_a_searched_field(advocate in arb_advocate(), query in "[A-Za-z0-9 ]{1,6}") {
        let needle = query.trim().to_lowercase();
        let expected = needle.is_empty()
            || searched_values(&advocate).iter().any(|v| v.contains(&needle));
        prop_assert_eq!(matches(&advocate, &query), expected);
    }

    #[test]
    fn matching_ignores_case(advocate in arb_advocate(), query in "[A-Za-z]{1,6}") {
        prop_assert_eq!(
            matches(&advocate, &query.to_uppercase()),
            matches(&advocate, &query.to_lowercase())
        );
    }

    #[test]
    fn every_substring_of_a_specialty_matches(advocate in arb_advocate(), start in 0usize..16, len in 1usize..16) {
        for specialty in &advocate.specialties {
            let chars: Vec<char> = specialty.chars().collect();
            if start >= chars.len() {
                continue;
            }
            let end = (start + len).min(chars.len());
            let fragment: String = chars[start..end].iter().collect();
            if fragment.trim().is_empty() {
                continue;
            }
            prop_assert!(matches(&advocate, &fragment), "{:?} in {:?}", fragment, specialty);
        }
    }
}

#[test]
fn jane_doe_scenario() {
    let jane = jane_doe();
    assert!(matches(&jane, "anx"));
    assert!(matches(&jane, "xiety"));
    assert!(!matches(&jane, "10"));
    assert!(matches(&jane, ""));
    assert!(!matches(&jane, "555"));
    assert!(matches(&jane, "JANE"));
}

#[test]
fn fixture_full_name_search() {
    let hits: Vec<i32> = fixtures::advocates()
        .iter()
        .filter(|a| matches(a, "john doe"))
        .map(|a| a.id)
        .collect();
    assert_eq!(hits, vec![1]);
}
