//! Doctor directory: feed model, filtering, sorting and suggestions

use super::nullable::or_default;
use serde::{Deserialize, Serialize};

/// Maximum number of autocomplete suggestions
pub const MAX_SUGGESTIONS: usize = 3;

/// Shown for feed entries without a name
pub const UNKNOWN_DOCTOR: &str = "Unknown Doctor";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speciality {
    #[serde(default, deserialize_with = "or_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clinic {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

/// One entry of the directory feed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(default, deserialize_with = "or_default")]
    pub id: String,
    #[serde(default, deserialize_with = "or_default")]
    pub name: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub specialities: Vec<Speciality>,
    /// Display string such as "₹ 500"
    #[serde(default)]
    pub fees: Option<String>,
    /// Display string such as "13 Years of experience"
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub video_consult: bool,
    #[serde(default, deserialize_with = "or_default")]
    pub in_clinic: bool,
    #[serde(default)]
    pub clinic: Option<Clinic>,
}

impl Doctor {
    /// Numeric fee: the digits of the fee string, 0 when none
    pub fn fee_amount(&self) -> u64 {
        self.fees
            .as_deref()
            .map(|f| f.chars().filter(char::is_ascii_digit).collect::<String>())
            .and_then(|digits| digits.parse().ok())
            .unwrap_or(0)
    }

    /// Years of experience: the leading integer of the experience string, 0 when none
    pub fn experience_years(&self) -> u32 {
        self.experience
            .as_deref()
            .map(|e| {
                e.trim_start()
                    .chars()
                    .take_while(char::is_ascii_digit)
                    .collect::<String>()
            })
            .and_then(|digits| digits.parse().ok())
            .unwrap_or(0)
    }

    /// Name for display; feeds occasionally omit it
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            UNKNOWN_DOCTOR
        } else {
            &self.name
        }
    }

    pub fn speciality_names(&self) -> impl Iterator<Item = &str> {
        self.specialities
            .iter()
            .map(|s| s.name.as_str())
            .filter(|n| !n.is_empty())
    }

    pub fn has_speciality(&self, name: &str) -> bool {
        self.speciality_names().any(|n| n == name)
    }

    pub fn name_matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }

    pub fn clinic_name(&self) -> Option<&str> {
        self.clinic.as_ref().and_then(|c| c.name.as_deref())
    }

    pub fn city(&self) -> Option<&str> {
        self.clinic
            .as_ref()
            .and_then(|c| c.address.as_ref())
            .and_then(|a| a.city.as_deref())
    }
}

/// Consultation mode filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consultation {
    Video,
    InClinic,
}

impl Consultation {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Video => "Video Consult",
            Self::InClinic => "In Clinic",
        }
    }

    fn matches(&self, doctor: &Doctor) -> bool {
        match self {
            Self::Video => doctor.video_consult,
            Self::InClinic => doctor.in_clinic,
        }
    }
}

/// Sort order of the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorySort {
    /// Fees, low to high
    Fees,
    /// Experience, high to low
    Experience,
}

impl DirectorySort {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fees => "Fees - Low to High",
            Self::Experience => "Experience - High to Low",
        }
    }
}

/// Search, filter and sort selections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryQuery {
    pub search: String,
    pub consultation: Option<Consultation>,
    pub specialties: Vec<String>,
    pub sort: Option<DirectorySort>,
}

impl DirectoryQuery {
    pub fn matches(&self, doctor: &Doctor) -> bool {
        doctor.name_matches(&self.search)
            && self.consultation.map_or(true, |c| c.matches(doctor))
            && self.specialties.iter().all(|s| doctor.has_speciality(s))
    }

    /// Filter then sort; the sort is stable so ties keep feed order
    pub fn apply<'a>(&self, doctors: &'a [Doctor]) -> Vec<&'a Doctor> {
        let mut result: Vec<&Doctor> = doctors.iter().filter(|d| self.matches(d)).collect();
        match self.sort {
            Some(DirectorySort::Fees) => result.sort_by_key(|d| d.fee_amount()),
            Some(DirectorySort::Experience) => {
                result.sort_by(|a, b| b.experience_years().cmp(&a.experience_years()))
            }
            None => {}
        }
        result
    }

    pub fn toggle_specialty(&mut self, name: &str) {
        match self.specialties.iter().position(|s| s == name) {
            Some(pos) => {
                self.specialties.remove(pos);
            }
            None => self.specialties.push(name.to_string()),
        }
    }

    pub fn clear_specialties(&mut self) {
        self.specialties.clear();
    }

    pub fn set_consultation(&mut self, mode: Consultation) {
        self.consultation = Some(mode);
    }

    pub fn clear_consultation(&mut self) {
        self.consultation = None;
    }

    pub fn set_sort(&mut self, sort: DirectorySort) {
        self.sort = Some(sort);
    }
}

/// Autocomplete: the first few doctors whose name contains `query`
pub fn suggestions<'a>(doctors: &'a [Doctor], query: &str) -> Vec<&'a Doctor> {
    if query.is_empty() {
        return Vec::new();
    }
    doctors
        .iter()
        .filter(|d| d.name_matches(query))
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Unique specialty names in first-seen order
pub fn all_specialties(doctors: &[Doctor]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in doctors.iter().flat_map(Doctor::speciality_names) {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doctor(name: &str, fees: &str, experience: &str, specs: &[&str]) -> Doctor {
        Doctor {
            id: name.to_lowercase(),
            name: name.to_string(),
            specialities: specs
                .iter()
                .map(|s| Speciality {
                    name: s.to_string(),
                })
                .collect(),
            fees: Some(fees.to_string()),
            experience: Some(experience.to_string()),
            video_consult: true,
            in_clinic: false,
            ..Default::default()
        }
    }

    fn sample() -> Vec<Doctor> {
        let mut clinic_only = doctor("Dr. Meera Rao", "₹ 300", "5 Years of experience", &["Dentist"]);
        clinic_only.video_consult = false;
        clinic_only.in_clinic = true;
        vec![
            doctor("Dr. Arjun Mehta", "₹ 800", "13 Years of experience", &["General Physician", "Dentist"]),
            clinic_only,
            doctor("Dr. Kavya Iyer", "₹ 500", "20 Years of experience", &["Dermatologist"]),
        ]
    }

    fn names(doctors: &[&Doctor]) -> Vec<String> {
        doctors.iter().map(|d| d.name.clone()).collect()
    }

    #[test]
    fn test_decode_feed_entry() {
        let json = r#"[{
            "id": "111",
            "name": "Dr. A",
            "name_initials": "DA",
            "photo": "https://example.com/a.png",
            "specialities": [{"name": "Dentist"}],
            "fees": "₹ 500",
            "experience": "13 Years of experience",
            "video_consult": true,
            "in_clinic": false,
            "clinic": {"name": "Smile Care", "address": {"city": "Chennai", "locality": "T Nagar"}}
        }, {"id": "112", "name": "Dr. B"}]"#;
        let doctors: Vec<Doctor> = serde_json::from_str(json).unwrap();
        assert_eq!(doctors.len(), 2);
        assert_eq!(doctors[0].clinic_name(), Some("Smile Care"));
        assert_eq!(doctors[0].city(), Some("Chennai"));
        assert_eq!(doctors[1].fee_amount(), 0);
        assert!(doctors[1].specialities.is_empty());
    }

    #[test]
    fn test_fee_and_experience_parsing() {
        let d = doctor("X", "₹ 1,200", "13 Years of experience", &[]);
        assert_eq!(d.fee_amount(), 1200);
        assert_eq!(d.experience_years(), 13);

        let blank = Doctor::default();
        assert_eq!(blank.fee_amount(), 0);
        assert_eq!(blank.experience_years(), 0);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let doctors = sample();
        let query = DirectoryQuery {
            search: "MEERA".to_string(),
            ..Default::default()
        };
        assert_eq!(names(&query.apply(&doctors)), vec!["Dr. Meera Rao"]);
    }

    #[test]
    fn test_empty_query_keeps_feed_order() {
        let doctors = sample();
        let all = DirectoryQuery::default().apply(&doctors);
        assert_eq!(
            names(&all),
            vec!["Dr. Arjun Mehta", "Dr. Meera Rao", "Dr. Kavya Iyer"]
        );
    }

    #[test]
    fn test_consultation_filter() {
        let doctors = sample();
        let mut query = DirectoryQuery::default();
        query.set_consultation(Consultation::InClinic);
        assert_eq!(names(&query.apply(&doctors)), vec!["Dr. Meera Rao"]);
        query.clear_consultation();
        assert_eq!(query.apply(&doctors).len(), 3);
    }

    #[test]
    fn test_specialties_must_all_match() {
        let doctors = sample();
        let mut query = DirectoryQuery::default();
        query.toggle_specialty("Dentist");
        assert_eq!(
            names(&query.apply(&doctors)),
            vec!["Dr. Arjun Mehta", "Dr. Meera Rao"]
        );
        query.toggle_specialty("General Physician");
        assert_eq!(names(&query.apply(&doctors)), vec!["Dr. Arjun Mehta"]);
        query.toggle_specialty("Dentist");
        assert_eq!(query.specialties, vec!["General Physician".to_string()]);
        query.clear_specialties();
        assert!(query.specialties.is_empty());
    }

    #[test]
    fn test_sort_by_fees_ascending() {
        let doctors = sample();
        let mut query = DirectoryQuery::default();
        query.set_sort(DirectorySort::Fees);
        assert_eq!(
            names(&query.apply(&doctors)),
            vec!["Dr. Meera Rao", "Dr. Kavya Iyer", "Dr. Arjun Mehta"]
        );
    }

    #[test]
    fn test_sort_by_experience_descending() {
        let doctors = sample();
        let mut query = DirectoryQuery::default();
        query.set_sort(DirectorySort::Experience);
        assert_eq!(
            names(&query.apply(&doctors)),
            vec!["Dr. Kavya Iyer", "Dr. Arjun Mehta", "Dr. Meera Rao"]
        );
    }

    #[test]
    fn test_suggestions_limited_and_empty_for_blank_query() {
        let doctors = sample();
        assert!(suggestions(&doctors, "").is_empty());
        assert_eq!(suggestions(&doctors, "dr.").len(), MAX_SUGGESTIONS);
        assert_eq!(names(&suggestions(&doctors, "kavya")), vec!["Dr. Kavya Iyer"]);
    }

    #[test]
    fn test_all_specialties_first_seen_order() {
        let doctors = sample();
        assert_eq!(
            all_specialties(&doctors),
            vec!["General Physician", "Dentist", "Dermatologist"]
        );
    }

    #[test]
    fn test_null_fields_in_feed_entry_decode_to_defaults() {
        let feed = r#"[
            {"id": "1", "name": "Dr. A", "specialities": [{"name": "Dentist"}]},
            {"id": "2", "name": null, "specialities": null, "video_consult": null}
        ]"#;
        let doctors: Vec<Doctor> = serde_json::from_str(feed).unwrap();

        assert_eq!(doctors.len(), 2);
        assert_eq!(doctors[0].display_name(), "Dr. A");
        assert_eq!(doctors[1].display_name(), UNKNOWN_DOCTOR);
        assert!(doctors[1].specialities.is_empty());
        assert!(!doctors[1].video_consult);
    }
}
