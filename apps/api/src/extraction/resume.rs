//! Text field extractor — pulls structured candidate fields out of raw resume
//! text using pattern tables and a person-entity heuristic.
//!
//! Every function here is total: malformed or sparse text degrades to safe
//! defaults (`"Unknown"` name, empty strings, `None`), never an error. The
//! fallback chains run in a fixed priority order that downstream score
//! stability depends on — do not reorder them.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::lexicon::{display_case, scan_skills, title_case};
use crate::models::candidate::CandidateProfile;

/// Sentinel for resumes with an experience heading but no validated work
/// content, and for entry-level resumes with no heading at all.
pub const NO_EXPERIENCE: &str = "No professional experience";

const EDUCATION_MAX_CHARS: usize = 600;
const EXPERIENCE_MAX_CHARS: usize = 1000;
const MAX_SKILLS: usize = 20;
/// Person spans past this offset are too deep in the document to be a name.
const NAME_SCAN_WINDOW: usize = 500;

// ────────────────────────────────────────────────────────────────────────────
// Pattern tables
// ────────────────────────────────────────────────────────────────────────────

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});

/// International and US phone formats, tried in order — first hit wins.
static PHONE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\+?\d{1,3}[-.\s]?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}",
        r"\+?\d{10,13}",
        r"\(\d{3}\)\s?\d{3}[-.\s]?\d{4}",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static LINKEDIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)linkedin\.com/in/[\w-]+").unwrap());
static GITHUB_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)github\.com/[\w-]+").unwrap());

/// Explicit "N years of experience" variants, tried in order.
static YEARS_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(\d+)\+?\s*years?\s*(?:of\s*)?experience",
        r"(?i)experience[:\s]*(\d+)\+?\s*years?",
        r"(?i)(\d+)\+?\s*years?\s*(?:in|of)\s*(?:software|development|programming)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Section keywords that start a new segment mid-line when a resume collapses
/// headers onto content lines (PDF extraction frequently loses newlines).
static EDUCATION_BREAK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:experience|skills|projects|certifications|computer skills|technical skills|work history|employment)\b")
        .unwrap()
});
static EXPERIENCE_BREAK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:education|skills|projects|certifications|technical skills|academic)\b")
        .unwrap()
});

const EDUCATION_START_HEADERS: &[&str] = &[
    "education",
    "academic background",
    "academic qualifications",
    "qualifications",
    "educational background",
    "academics",
];

const EDUCATION_END_HEADERS: &[&str] = &[
    "experience",
    "work history",
    "employment",
    "skills",
    "projects",
    "certifications",
    "achievements",
    "publications",
    "references",
    "technical skills",
    "professional experience",
    "work experience",
    "computer skills",
    "programming",
    "languages:",
    "tools",
    "frameworks",
    "abilities",
    "competencies",
    "expertise",
];

const EXPERIENCE_START_HEADERS: &[&str] = &[
    "experience",
    "work history",
    "employment history",
    "employment",
    "professional experience",
    "work experience",
    "career history",
    "professional background",
    "relevant experience",
    "internship",
];

const EXPERIENCE_END_HEADERS: &[&str] = &[
    "education",
    "skills",
    "projects",
    "certifications",
    "achievements",
    "publications",
    "references",
    "technical skills",
    "academic",
    "qualifications",
    "training",
    "courses",
    "interests",
    "hobbies",
    "computer skills",
    "programming skills",
    "languages",
];

/// A bare skill list signals we have run past education into a skills block.
static SKILL_LIST_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:python|java|c\+\+|javascript|html|css|sql|react|node)").unwrap());

/// Course/academic-project lines are not work experience.
static COURSE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:^(?:relevant\s+)?coursework\b|^courses?\b|^(?:academic|class|course)\s+projects?\b|^projects?\s*:)",
    )
    .unwrap()
});

/// Employer indicators: company suffixes, employment verbs, "Intern".
static EMPLOYER_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:\b(?:inc|llc|ltd|corp|corporation|technologies|solutions|labs|systems)\b\.?|\bintern\b|\b(?:developed|designed|implemented|built|managed|led|worked|collaborated|delivered|maintained|deployed)\b)",
    )
    .unwrap()
});

/// "at CompanyName" / "@ CompanyName" — deliberately case-sensitive on the
/// company initial.
static AT_COMPANY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\bat\s+|@\s?)[A-Z][A-Za-z&.-]+").unwrap());

/// Month-year ranges ending in a year or "Present".
static DATE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s*\d{4}\s*(?:-|–|—|to)\s*(?:present|current|(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s*\d{4})",
    )
    .unwrap()
});

static GPA_MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:gpa|cgpa)\b").unwrap());
static EMPLOYMENT_TERM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:inc|llc|ltd|corp|employed)\b").unwrap());

// Education fallback patterns for resumes without a recognizable section header.
static UNIVERSITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Z][a-zA-Z\s\-,]+(?:University|College|Institute|School)[^|]*?(?:19|20)\d{2})")
        .unwrap()
});
static DEGREE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b((?:Bachelor|Master|Ph\.?D|B\.?S\.?|M\.?S\.?|B\.?Tech|M\.?Tech|B\.?E\.?|M\.?E\.?)(?:\s+(?:of|in)\s+[A-Za-z ]+)?)",
    )
    .unwrap()
});
static GPA_VALUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:GPA|CGPA)[:\s]*(\d+\.?\d*(?:\s*/\s*\d+\.?\d*)?)").unwrap()
});

// Experience fallback patterns, same situation.
static JOB_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)((?:Software|Data|Web|Full[- ]?Stack|Frontend|Backend|Mobile|DevOps|Cloud|ML|AI|Machine Learning)?\s?(?:Developer|Engineer|Analyst|Designer|Intern|Manager|Architect|Consultant|Specialist)[^|\n]*)",
    )
    .unwrap()
});
static ACTION_VERB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)((?:Developed|Designed|Implemented|Built|Created|Managed|Led|Worked|Collaborated|Utilized|Learned)[^.!?|]{20,150})",
    )
    .unwrap()
});

/// Words that disqualify a capitalized span from being a person name:
/// section headers, document labels, org/company-suffix terms, and common
/// job-title words.
const NAME_STOPLIST: &[&str] = &[
    "resume", "curriculum", "vitae", "cv", "profile", "summary", "objective", "contact",
    "education", "experience", "skills", "projects", "certifications", "references",
    "qualifications", "achievements", "publications", "inc", "llc", "ltd", "corp", "corporation",
    "company", "technologies", "solutions", "systems", "university", "college", "institute",
    "school", "senior", "junior", "software", "engineer", "developer", "manager", "analyst",
    "consultant", "architect", "specialist", "intern", "computer", "science", "engineering",
    "technology", "information", "data", "bachelor", "master", "degree",
];

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Extracts a structured [`CandidateProfile`] from raw resume text.
pub fn extract_profile(raw_text: &str) -> CandidateProfile {
    let email = extract_email(raw_text);

    CandidateProfile {
        name: extract_name(raw_text, &email),
        phone: extract_phone(raw_text),
        skills: extract_skills(raw_text),
        education: extract_education(raw_text),
        experience: extract_experience(raw_text),
        summary: None,
        linkedin: extract_linkedin(raw_text),
        github: extract_github(raw_text),
        estimated_years_of_experience: estimate_years_of_experience(raw_text),
        email,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Name
// ────────────────────────────────────────────────────────────────────────────

/// Name resolution chain, in priority order:
/// 1. person-like span in the first 5 non-empty lines,
/// 2. first non-empty line when it reads like a bare 2–4 word name,
/// 3. derivation from the email local part,
/// 4. any person-like span starting inside the first 500 characters,
/// 5. `"Unknown"`.
fn extract_name(text: &str, email: &str) -> String {
    for line in text.lines().filter(|l| !l.trim().is_empty()).take(5) {
        if let Some(span) = first_person_span(line) {
            return span;
        }
    }

    if let Some(first_line) = text.lines().map(str::trim).find(|l| !l.is_empty()) {
        let words: Vec<&str> = first_line.split_whitespace().collect();
        if (2..=4).contains(&words.len())
            && words
                .iter()
                .all(|w| w.chars().all(char::is_alphabetic))
            && !is_section_header(first_line)
        {
            return first_line.to_string();
        }
    }

    if let Some(derived) = name_from_email(email) {
        return derived;
    }

    let mut offset = 0;
    for line in text.lines() {
        if offset >= NAME_SCAN_WINDOW {
            break;
        }
        if let Some(span) = first_person_span(line) {
            return span;
        }
        offset += line.len() + 1;
    }

    "Unknown".to_string()
}

/// Finds the first run of 2–5 capitalized alphabetic words in the line that
/// passes the validity filter. A single capitalized token is too weak a
/// signal to treat as a person.
fn first_person_span(line: &str) -> Option<String> {
    let mut run: Vec<&str> = Vec::new();
    let flush = |run: &mut Vec<&str>| -> Option<String> {
        let span = run.join(" ");
        run.clear();
        if (2..=5).contains(&span.split_whitespace().count()) && is_valid_person_name(&span) {
            Some(span)
        } else {
            None
        }
    };

    for word in line.split_whitespace() {
        let name_like = word.chars().all(char::is_alphabetic)
            && word.chars().next().is_some_and(char::is_uppercase);
        if name_like {
            run.push(word);
        } else if let Some(span) = flush(&mut run) {
            return Some(span);
        }
    }
    flush(&mut run)
}

/// Validity filter: 1–5 alphabetic words, none of them a stoplisted
/// header/org/title term.
fn is_valid_person_name(candidate: &str) -> bool {
    let words: Vec<&str> = candidate.split_whitespace().collect();
    if words.is_empty() || words.len() > 5 {
        return false;
    }
    words.iter().all(|w| {
        w.chars().all(char::is_alphabetic) && !NAME_STOPLIST.contains(&w.to_lowercase().as_str())
    })
}

fn is_section_header(line: &str) -> bool {
    let line_lower = line.trim().to_lowercase();
    EDUCATION_START_HEADERS
        .iter()
        .chain(EDUCATION_END_HEADERS)
        .chain(EXPERIENCE_START_HEADERS)
        .any(|h| line_lower.starts_with(h))
}

/// Derives "John Smith" from "john.smith@acme.com": split the local part on
/// `.`/`_`/`-`, strip digits, keep up to two alphabetic segments.
fn name_from_email(email: &str) -> Option<String> {
    let local = email.split('@').next()?;
    let segments: Vec<String> = local
        .split(['.', '_', '-'])
        .map(|seg| seg.chars().filter(|c| !c.is_ascii_digit()).collect::<String>())
        .filter(|seg| !seg.is_empty() && seg.chars().all(char::is_alphabetic))
        .take(2)
        .map(|seg| title_case(&seg))
        .collect();
    if segments.is_empty() {
        None
    } else {
        Some(segments.join(" "))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Contact fields
// ────────────────────────────────────────────────────────────────────────────

fn extract_email(text: &str) -> String {
    EMAIL_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn extract_phone(text: &str) -> String {
    for re in PHONE_RES.iter() {
        if let Some(m) = re.find(text) {
            return m.as_str().to_string();
        }
    }
    String::new()
}

fn extract_linkedin(text: &str) -> Option<String> {
    LINKEDIN_RE.find(text).map(|m| format!("https://{}", m.as_str()))
}

fn extract_github(text: &str) -> Option<String> {
    GITHUB_RE.find(text).map(|m| format!("https://{}", m.as_str()))
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

fn extract_skills(text: &str) -> Vec<String> {
    let text_lower = text.to_lowercase();
    let mut seen = HashSet::new();
    let mut skills = Vec::new();
    for term in scan_skills(&text_lower) {
        let display = display_case(term);
        if seen.insert(display.to_lowercase()) {
            skills.push(display);
        }
    }
    skills.truncate(MAX_SKILLS);
    skills
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// Splits on newlines AND ahead of section keywords embedded mid-line, so a
/// flattened "EducationB.Tech ... ExperienceAcme Corp" still segments.
fn split_with_section_breaks(text: &str, breaks: &Regex) -> Vec<String> {
    let mut segments = Vec::new();
    for line in text.split('\n') {
        let mut start = 0;
        for m in breaks.find_iter(line) {
            if m.start() > start {
                segments.push(line[start..m.start()].trim().to_string());
            }
            start = m.start();
        }
        segments.push(line[start..].trim().to_string());
    }
    segments.retain(|s| !s.is_empty());
    segments
}

fn prefix_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn extract_education(text: &str) -> String {
    let lines = split_with_section_breaks(text, &EDUCATION_BREAK_RE);

    let mut collected: Vec<&str> = Vec::new();
    let mut in_section = false;

    for line in &lines {
        let line_lower = line.to_lowercase();

        let is_start = EDUCATION_START_HEADERS
            .iter()
            .any(|h| line_lower.starts_with(h));
        if is_start && line_lower.chars().count() < 50 {
            in_section = true;
            continue;
        }

        let head = prefix_chars(&line_lower, 30);
        let is_end = EDUCATION_END_HEADERS
            .iter()
            .any(|h| line_lower.starts_with(h) || head.contains(h));
        if in_section && is_end && line_lower.chars().count() < 50 {
            break;
        }

        if in_section {
            // A bare skill list means the section ended without a header.
            if SKILL_LIST_LINE_RE.is_match(&line_lower) {
                break;
            }
            collected.push(line);
        }
    }

    if !collected.is_empty() {
        return truncate_chars(&collected.join(" | "), EDUCATION_MAX_CHARS);
    }

    // No recognizable section — fall back to direct pattern extraction.
    let mut info: Vec<String> = Vec::new();
    for caps in UNIVERSITY_RE.captures_iter(text).take(2) {
        info.push(caps[1].trim().to_string());
    }
    for caps in DEGREE_RE.captures_iter(text).take(2) {
        let cleaned = caps[1].trim().to_string();
        if !cleaned.is_empty() && !info.contains(&cleaned) {
            info.push(cleaned);
        }
    }
    if let Some(caps) = GPA_VALUE_RE.captures(text) {
        info.push(format!("GPA: {}", &caps[1]));
    }

    if info.is_empty() {
        String::new()
    } else {
        truncate_chars(&info.join(" | "), EDUCATION_MAX_CHARS)
    }
}

fn extract_experience(text: &str) -> String {
    let lines = split_with_section_breaks(text, &EXPERIENCE_BREAK_RE);

    let mut collected: Vec<&str> = Vec::new();
    let mut in_section = false;
    let mut header_found = false;

    for line in &lines {
        let line_lower = line.to_lowercase();

        let is_start = EXPERIENCE_START_HEADERS
            .iter()
            .any(|h| line_lower.starts_with(h));
        if is_start && line_lower.chars().count() < 60 {
            in_section = true;
            header_found = true;
            continue;
        }

        let head = prefix_chars(&line_lower, 30);
        let is_end = EXPERIENCE_END_HEADERS
            .iter()
            .any(|h| line_lower.starts_with(h) || head.contains(h));
        if in_section && is_end && line_lower.chars().count() < 50 {
            break;
        }

        if in_section && is_work_content(line) {
            collected.push(line);
        }
    }

    if !collected.is_empty() {
        return truncate_chars(&collected.join(" | "), EXPERIENCE_MAX_CHARS);
    }

    // A heading with nothing valid under it means the candidate has no real
    // work history yet; so does a headerless resume full of student signals.
    if header_found || is_entry_level(text) {
        return NO_EXPERIENCE.to_string();
    }

    // No recognizable section — fall back to direct pattern extraction.
    let mut info: Vec<String> = Vec::new();
    for caps in JOB_TITLE_RE.captures_iter(text).take(3) {
        let cleaned = caps[1].trim().to_string();
        if cleaned.chars().count() > 10 && !info.contains(&cleaned) {
            info.push(cleaned);
        }
    }
    for caps in ACTION_VERB_RE.captures_iter(text).take(5) {
        let cleaned = caps[1].trim().to_string();
        if !cleaned.is_empty() && !info.contains(&cleaned) {
            info.push(cleaned);
        }
    }
    for m in DATE_RANGE_RE.find_iter(text).take(3) {
        let cleaned = m.as_str().trim().to_string();
        if !info.contains(&cleaned) {
            info.push(cleaned);
        }
    }

    if info.is_empty() {
        String::new()
    } else {
        truncate_chars(&info.join(" | "), EXPERIENCE_MAX_CHARS)
    }
}

/// Content validation for experience lines: course/project lines are
/// rejected; employer indicators are accepted; anything longer than 30
/// characters passes as a fallback.
fn is_work_content(line: &str) -> bool {
    if COURSE_LINE_RE.is_match(line) {
        return false;
    }
    EMPLOYER_MARKER_RE.is_match(line)
        || AT_COMPANY_RE.is_match(line)
        || DATE_RANGE_RE.is_match(line)
        || line.chars().count() > 30
}

/// Entry-level/student heuristics: pursuing-a-degree phrasing, GPA mentions,
/// or internship-seeking language, with no employment terms anywhere.
fn is_entry_level(text: &str) -> bool {
    let lower = text.to_lowercase();
    let student_signal = lower.contains("pursuing")
        || lower.contains("seeking internship")
        || lower.contains("seeking an internship")
        || GPA_MENTION_RE.is_match(&lower);
    student_signal && !EMPLOYMENT_TERM_RE.is_match(text)
}

// ────────────────────────────────────────────────────────────────────────────
// Years of experience
// ────────────────────────────────────────────────────────────────────────────

fn estimate_years_of_experience(text: &str) -> Option<f64> {
    for re in YEARS_RES.iter() {
        if let Some(caps) = re.captures(text) {
            if let Ok(years) = caps[1].parse::<f64>() {
                return Some(years);
            }
        }
    }
    if is_entry_level(text) {
        return Some(0.0);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESUME: &str = "\
John Smith
john.smith@acme.com | +1 555-123-4567
linkedin.com/in/johnsmith | github.com/johnsmith

Summary
Software engineer with 5+ years of experience building web services.

Experience
Senior Software Engineer at Acme Corp, Jan 2019 - Present
Developed and maintained Python microservices on AWS.
Software Engineer, Globex Inc, Jun 2016 - Dec 2018

Education
B.Tech in Computer Science, State University, 2016
GPA: 3.7

Skills
Python, Django, PostgreSQL, Docker, Kubernetes
";

    const STUDENT_RESUME: &str = "\
RESUME
jane.doe@university.edu
Pursuing B.Tech in Computer Science
GPA: 3.8
Seeking internship opportunities in software development
Relevant coursework: Data Structures, Algorithms
Skills: Python, Java
";

    #[test]
    fn test_name_from_first_line() {
        let profile = extract_profile(FULL_RESUME);
        assert_eq!(profile.name, "John Smith");
    }

    #[test]
    fn test_name_derived_from_email_when_first_line_is_header() {
        let text = "RESUME\njohn.smith@acme.com\n5+ years of experience\n";
        let profile = extract_profile(text);
        assert_eq!(profile.name, "John Smith");
    }

    #[test]
    fn test_name_unknown_when_nothing_matches() {
        let profile = extract_profile("1234567890\n!!!\n");
        assert_eq!(profile.name, "Unknown");
    }

    #[test]
    fn test_name_skips_stoplisted_spans() {
        // "Acme Corp" is capitalized but stoplisted; the person span wins.
        let text = "Acme Corp\nMary Jane Watson\nmary@acme.com\n";
        let profile = extract_profile(text);
        assert_eq!(profile.name, "Mary Jane Watson");
    }

    #[test]
    fn test_email_extraction() {
        let profile = extract_profile(FULL_RESUME);
        assert_eq!(profile.email, "john.smith@acme.com");
    }

    #[test]
    fn test_email_missing_is_empty() {
        let profile = extract_profile("No contact details here");
        assert_eq!(profile.email, "");
    }

    #[test]
    fn test_phone_extraction() {
        let profile = extract_profile(FULL_RESUME);
        assert_eq!(profile.phone, "+1 555-123-4567");
    }

    #[test]
    fn test_skills_extracted_and_display_cased() {
        let profile = extract_profile(FULL_RESUME);
        assert!(profile.skills.contains(&"Python".to_string()));
        assert!(profile.skills.contains(&"Django".to_string()));
        assert!(profile.skills.contains(&"Docker".to_string()));
    }

    #[test]
    fn test_skills_deduplicated_case_insensitively() {
        let profile = extract_profile("PYTHON python Python");
        assert_eq!(
            profile.skills.iter().filter(|s| *s == "Python").count(),
            1
        );
    }

    #[test]
    fn test_skills_capped_at_twenty() {
        let text = "python java javascript typescript ruby rust swift kotlin php scala \
                    html css react angular vue svelte jquery bootstrap webpack vite \
                    mysql postgresql mongodb redis docker kubernetes jenkins terraform";
        let profile = extract_profile(text);
        assert!(profile.skills.len() <= 20);
    }

    #[test]
    fn test_education_section_extracted() {
        let profile = extract_profile(FULL_RESUME);
        assert!(profile.education.contains("B.Tech"), "got: {}", profile.education);
        assert!(profile.education.contains("State University"));
    }

    #[test]
    fn test_education_truncated_to_600_chars() {
        let long_line = "a".repeat(400);
        let text = format!("Education\n{long_line}\n{long_line}\n");
        let profile = extract_profile(&text);
        assert!(profile.education.chars().count() <= 600);
    }

    #[test]
    fn test_experience_section_extracted_with_separator() {
        let profile = extract_profile(FULL_RESUME);
        assert!(profile.experience.contains("Acme Corp"));
        assert!(profile.experience.contains(" | "));
    }

    #[test]
    fn test_experience_header_with_only_courses_yields_sentinel() {
        let text = "Alice Wonder\nExperience\nRelevant coursework: Compilers\n";
        let profile = extract_profile(text);
        assert_eq!(profile.experience, NO_EXPERIENCE);
    }

    #[test]
    fn test_entry_level_resume_yields_sentinel_and_zero_years() {
        let profile = extract_profile(STUDENT_RESUME);
        assert_eq!(profile.experience, NO_EXPERIENCE);
        assert_eq!(profile.estimated_years_of_experience, Some(0.0));
    }

    #[test]
    fn test_years_of_experience_explicit_mention() {
        let profile = extract_profile(FULL_RESUME);
        assert_eq!(profile.estimated_years_of_experience, Some(5.0));
    }

    #[test]
    fn test_years_of_experience_absent_for_non_student_text() {
        let profile = extract_profile("Worked at Initech on various systems.");
        assert_eq!(profile.estimated_years_of_experience, None);
    }

    #[test]
    fn test_linkedin_and_github_normalized_to_https() {
        let profile = extract_profile(FULL_RESUME);
        assert_eq!(
            profile.linkedin.as_deref(),
            Some("https://linkedin.com/in/johnsmith")
        );
        assert_eq!(
            profile.github.as_deref(),
            Some("https://github.com/johnsmith")
        );
    }

    #[test]
    fn test_extraction_never_panics_on_sparse_input() {
        for text in ["", " ", "\n\n\n", "x", "@@@@", "email@", "123"] {
            let profile = extract_profile(text);
            assert!(profile.skills.len() <= 20, "input {text:?}");
        }
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let first = extract_profile(FULL_RESUME);
        let second = extract_profile(FULL_RESUME);
        assert_eq!(first, second);
    }

    #[test]
    fn test_section_break_splits_flattened_headers() {
        let segments = split_with_section_breaks(
            "Education B.Tech 2016 Experience Acme Corp",
            &EDUCATION_BREAK_RE,
        );
        assert!(segments.iter().any(|s| s.starts_with("Experience")));
    }
}
