//! Requirement extractor — pulls the required skill set plus experience and
//! education requirements out of a job description.
//!
//! Same lexicon as the resume side, plus a short-noun-phrase heuristic for
//! skills the lexicon does not know ("platform engineering", "UX design").

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::lexicon::{
    display_case, scan_soft_skills, scan_technical_skills, title_case,
};
use crate::models::job::JobRequirement;

const MAX_REQUIRED_SKILLS: usize = 15;

/// 1–3 token phrases anchored on a craft noun.
static NOUN_PHRASE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:[A-Za-z][A-Za-z+/#.-]*\s+){0,2}(?:development|engineering|programming|design)\b",
    )
    .unwrap()
});

/// Leading words that make a captured phrase grammar, not a skill.
const PHRASE_STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "of", "in", "on", "for", "with", "our", "your", "their", "to",
    "is", "are", "as", "at", "by", "from", "this", "that", "strong", "proven", "solid",
    "excellent", "hands-on", "prior", "relevant", "own", "drive", "will", "you", "we",
];

/// Explicit year phrasings, tried in order — first hit wins.
static EXPERIENCE_REQ_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(\d+)\+?\s*(?:to\s*\d+)?\s*years?\s*(?:of\s*)?experience",
        r"(?i)experience[:\s]*(\d+)\+?\s*years?",
        r"(?i)minimum\s*(\d+)\s*years?",
        r"(?i)at\s*least\s*(\d+)\s*years?",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static SENIOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:senior|lead|principal)\b").unwrap());
static MID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:mid|intermediate)\b").unwrap());
static JUNIOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:junior|entry|fresher)\b").unwrap());

static PHD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:phd|doctorate|ph\.d)\b").unwrap());
static MASTERS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:master|m\.s\.|m\.tech|mtech|m\.e\.)\b").unwrap());
static BACHELORS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:bachelor|b\.s\.|b\.tech|btech|b\.e\.|degree)\b").unwrap());
static DIPLOMA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:diploma|certification)\b").unwrap());

/// Extracts the full [`JobRequirement`] from a job description.
/// Total function — sparse descriptions yield empty fields, never errors.
pub fn extract_requirement(description: &str) -> JobRequirement {
    JobRequirement {
        required_skills: extract_required_skills(description),
        experience_requirement: extract_experience_requirement(description),
        education_requirement: extract_education_requirement(description),
    }
}

/// Technical-lexicon hits first, then soft skills, then free-form noun
/// phrases; case-insensitive dedupe; capped at 15.
fn extract_required_skills(description: &str) -> Vec<String> {
    let lower = description.to_lowercase();
    let mut seen = HashSet::new();

    let mut skills: Vec<String> = Vec::new();
    for term in scan_technical_skills(&lower) {
        let display = display_case(term);
        if seen.insert(display.to_lowercase()) {
            skills.push(display);
        }
    }

    let mut extras: Vec<String> = Vec::new();
    for term in scan_soft_skills(&lower) {
        let display = title_case(term);
        if seen.insert(display.to_lowercase()) {
            extras.push(display);
        }
    }
    for phrase in noun_phrase_skills(description) {
        if seen.insert(phrase.to_lowercase()) {
            extras.push(phrase);
        }
    }

    skills.extend(extras);
    skills.truncate(MAX_REQUIRED_SKILLS);
    skills
}

/// Captures phrases like "backend development" or "distributed systems
/// engineering", strips leading grammar words, keeps 1–3 token results.
fn noun_phrase_skills(description: &str) -> Vec<String> {
    let mut phrases = Vec::new();
    for m in NOUN_PHRASE_RE.find_iter(description) {
        let words: Vec<&str> = m
            .as_str()
            .split_whitespace()
            .skip_while(|w| PHRASE_STOPWORDS.contains(&w.to_lowercase().as_str()))
            .collect();
        if (1..=3).contains(&words.len()) {
            phrases.push(title_case(&words.join(" ")));
        }
    }
    phrases
}

fn extract_experience_requirement(description: &str) -> String {
    for re in EXPERIENCE_REQ_RES.iter() {
        if let Some(caps) = re.captures(description) {
            return format!("{}+ years", &caps[1]);
        }
    }

    if SENIOR_RE.is_match(description) {
        "5+ years".to_string()
    } else if MID_RE.is_match(description) {
        "2-4 years".to_string()
    } else if JUNIOR_RE.is_match(description) {
        "0-2 years".to_string()
    } else {
        String::new()
    }
}

/// Tier keywords checked highest first — the first tier that appears wins.
fn extract_education_requirement(description: &str) -> String {
    if PHD_RE.is_match(description) {
        "Ph.D. or Doctorate".to_string()
    } else if MASTERS_RE.is_match(description) {
        "Master's Degree".to_string()
    } else if BACHELORS_RE.is_match(description) {
        "Bachelor's Degree".to_string()
    } else if DIPLOMA_RE.is_match(description) {
        "Diploma or Certification".to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKEND_JD: &str = "\
Senior Backend Engineer

We are looking for a senior engineer with 5+ years of experience building
services in Python and Go. You will own backend development for our core
platform: PostgreSQL, Redis, Docker, Kubernetes, AWS. Bachelor's degree in
Computer Science or equivalent required. Strong communication skills.";

    #[test]
    fn test_technical_skills_come_first() {
        let req = extract_requirement(BACKEND_JD);
        assert!(!req.required_skills.is_empty());
        assert!(
            crate::extraction::lexicon::is_technical_skill(
                &req.required_skills[0].to_lowercase()
            ),
            "first skill should be a technical-lexicon hit, got {:?}",
            req.required_skills
        );
    }

    #[test]
    fn test_lexicon_skills_extracted() {
        let req = extract_requirement(BACKEND_JD);
        assert!(req.required_skills.contains(&"Python".to_string()));
        assert!(req.required_skills.contains(&"Docker".to_string()));
        assert!(req.required_skills.contains(&"Redis".to_string()));
    }

    #[test]
    fn test_noun_phrase_skills_extracted() {
        let req = extract_requirement(BACKEND_JD);
        assert!(
            req.required_skills
                .iter()
                .any(|s| s.to_lowercase().contains("development")),
            "expected a development noun phrase, got {:?}",
            req.required_skills
        );
    }

    #[test]
    fn test_skills_capped_at_fifteen() {
        let req = extract_requirement(
            "python java javascript typescript ruby rust swift kotlin php scala \
             react angular vue mysql postgresql mongodb redis aws azure gcp docker \
             kubernetes jenkins linux git sql nosql api rest graphql",
        );
        assert_eq!(req.required_skills.len(), 15);
    }

    #[test]
    fn test_explicit_years_requirement() {
        let req = extract_requirement("Requires 3+ years of experience with Java.");
        assert_eq!(req.experience_requirement, "3+ years");
    }

    #[test]
    fn test_minimum_years_phrasing() {
        let req = extract_requirement("Minimum 4 years in backend roles.");
        assert_eq!(req.experience_requirement, "4+ years");
    }

    #[test]
    fn test_seniority_keyword_fallback() {
        assert_eq!(
            extract_requirement("Senior engineer wanted").experience_requirement,
            "5+ years"
        );
        assert_eq!(
            extract_requirement("Intermediate developer role").experience_requirement,
            "2-4 years"
        );
        assert_eq!(
            extract_requirement("Entry level position").experience_requirement,
            "0-2 years"
        );
    }

    #[test]
    fn test_no_experience_signal_is_empty() {
        let req = extract_requirement("We value curiosity.");
        assert_eq!(req.experience_requirement, "");
    }

    #[test]
    fn test_education_tiers_highest_first() {
        assert_eq!(
            extract_requirement("PhD preferred, Master's accepted").education_requirement,
            "Ph.D. or Doctorate"
        );
        assert_eq!(
            extract_requirement("Master's degree required").education_requirement,
            "Master's Degree"
        );
        assert_eq!(
            extract_requirement("Bachelor's degree required").education_requirement,
            "Bachelor's Degree"
        );
        assert_eq!(
            extract_requirement("Diploma holders welcome").education_requirement,
            "Diploma or Certification"
        );
    }

    #[test]
    fn test_no_education_signal_is_empty() {
        let req = extract_requirement("Ship fast, learn faster.");
        assert_eq!(req.education_requirement, "");
    }

    #[test]
    fn test_empty_description_yields_empty_requirement() {
        let req = extract_requirement("");
        assert!(req.required_skills.is_empty());
        assert_eq!(req.experience_requirement, "");
        assert_eq!(req.education_requirement, "");
    }
}
