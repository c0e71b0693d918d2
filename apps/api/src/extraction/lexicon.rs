//! Skill lexicon — the fixed vocabulary both resume and job-description
//! extraction match against. Data only; the scan lives with each extractor.

use once_cell::sync::Lazy;
use regex::Regex;

/// Skills recognized in resume text, grouped by category. Scan order is
/// declaration order, which fixes the order of extracted skill lists.
pub static SKILL_LEXICON: &[&str] = &[
    // Programming languages
    "python", "java", "javascript", "typescript", "c++", "c#", "ruby", "go", "golang", "rust",
    "swift", "kotlin", "php", "scala", "r", "matlab", "perl", "shell", "bash",
    // Web technologies
    "html", "css", "sass", "less", "react", "reactjs", "react.js", "angular", "angularjs", "vue",
    "vuejs", "vue.js", "next.js", "nextjs", "nuxt", "svelte", "jquery", "bootstrap", "tailwind",
    "tailwindcss", "material-ui", "chakra", "webpack", "vite", "babel",
    // Backend frameworks
    "node.js", "nodejs", "express", "expressjs", "django", "flask", "fastapi", "spring",
    "spring boot", "springboot", ".net", "asp.net", "rails", "ruby on rails", "laravel",
    "nest.js", "nestjs", "koa", "hapi",
    // Databases
    "mysql", "postgresql", "postgres", "mongodb", "redis", "elasticsearch", "cassandra",
    "dynamodb", "firebase", "sqlite", "oracle", "sql server", "mariadb", "neo4j",
    // Cloud & DevOps
    "aws", "amazon web services", "azure", "gcp", "google cloud", "docker", "kubernetes", "k8s",
    "jenkins", "gitlab", "github actions", "terraform", "ansible", "nginx", "apache", "linux",
    "unix", "ci/cd", "devops",
    // Data science & ML
    "machine learning", "deep learning", "tensorflow", "pytorch", "keras", "scikit-learn",
    "pandas", "numpy", "scipy", "matplotlib", "seaborn", "nlp", "natural language processing",
    "computer vision", "opencv", "data analysis", "data science", "big data", "hadoop", "spark",
    // Mobile
    "android", "ios", "react native", "flutter", "objective-c", "xamarin",
    // Other technologies
    "git", "github", "bitbucket", "jira", "confluence", "agile", "scrum", "rest", "restful",
    "graphql", "api", "microservices", "soap", "grpc", "unit testing", "jest", "pytest",
    "selenium", "cypress",
    // Soft skills
    "communication", "leadership", "teamwork", "problem solving", "analytical",
    "project management", "time management", "critical thinking",
];

/// Technical skills recognized in job descriptions. Smaller than the resume
/// lexicon — job postings name stacks, not tooling minutiae.
pub static TECHNICAL_SKILLS: &[&str] = &[
    // Programming languages
    "python", "java", "javascript", "typescript", "c++", "c#", "ruby", "go", "rust", "swift",
    "kotlin", "php", "scala", "r",
    // Web technologies
    "html", "css", "react", "angular", "vue", "next.js", "node.js", "express", "django", "flask",
    "fastapi", "spring", "spring boot",
    // Databases
    "mysql", "postgresql", "mongodb", "redis", "elasticsearch", "sql", "nosql", "database",
    // Cloud & DevOps
    "aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "ci/cd", "devops", "linux", "git",
    // Data science & ML
    "machine learning", "deep learning", "tensorflow", "pytorch", "data science", "data analysis",
    "nlp", "ai", "artificial intelligence",
    // Other
    "api", "rest", "graphql", "microservices", "agile", "scrum",
];

/// Soft skills recognized in job descriptions.
pub static SOFT_SKILLS: &[&str] = &[
    "communication", "leadership", "teamwork", "problem solving", "analytical", "creative",
    "detail oriented", "self motivated", "time management", "project management", "collaboration",
];

static SKILL_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| compile(SKILL_LEXICON));
static TECHNICAL_PATTERNS: Lazy<Vec<(&'static str, Regex)>> =
    Lazy::new(|| compile(TECHNICAL_SKILLS));
static SOFT_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| compile(SOFT_SKILLS));

fn compile(lexicon: &[&'static str]) -> Vec<(&'static str, Regex)> {
    lexicon
        .iter()
        .map(|term| {
            let pattern = format!(r"\b{}\b", regex::escape(term));
            (
                *term,
                Regex::new(&pattern).expect("lexicon term compiles to a valid pattern"),
            )
        })
        .collect()
}

fn scan(text_lower: &str, patterns: &[(&'static str, Regex)]) -> Vec<&'static str> {
    patterns
        .iter()
        .filter(|(_, re)| re.is_match(text_lower))
        .map(|(term, _)| *term)
        .collect()
}

/// Whole-word, case-insensitive scan of the resume skill lexicon.
/// Caller is expected to pass already-lowercased text.
pub fn scan_skills(text_lower: &str) -> Vec<&'static str> {
    scan(text_lower, &SKILL_PATTERNS)
}

/// Whole-word scan of the job-description technical lexicon.
pub fn scan_technical_skills(text_lower: &str) -> Vec<&'static str> {
    scan(text_lower, &TECHNICAL_PATTERNS)
}

/// Whole-word scan of the job-description soft-skill lexicon.
pub fn scan_soft_skills(text_lower: &str) -> Vec<&'static str> {
    scan(text_lower, &SOFT_PATTERNS)
}

/// Returns true when the term is in the technical lexicon (used to order
/// technical hits ahead of free-form noun phrases).
pub fn is_technical_skill(term_lower: &str) -> bool {
    TECHNICAL_SKILLS.contains(&term_lower)
}

/// Display casing: title-case multi-letter terms, upper-case 1–2 letter
/// acronyms ("go" → "GO", "spring boot" → "Spring Boot").
pub fn display_case(skill: &str) -> String {
    if skill.len() > 2 {
        title_case(skill)
    } else {
        skill.to_uppercase()
    }
}

/// Capitalizes the first letter of every alphabetic run and lowercases the
/// rest ("machine learning" → "Machine Learning", "node.js" → "Node.Js").
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_finds_whole_words_only() {
        let hits = scan_skills("experienced java developer");
        assert!(hits.contains(&"java"));
        // "javascript" must not match inside "java developer"
        assert!(!hits.contains(&"javascript"));
    }

    #[test]
    fn test_scan_finds_multi_word_terms() {
        let hits = scan_skills("worked on machine learning and spring boot services");
        assert!(hits.contains(&"machine learning"));
        assert!(hits.contains(&"spring boot"));
    }

    #[test]
    fn test_scan_does_not_match_substrings() {
        // "rest" must not match inside "restaurant"
        let hits = scan_technical_skills("managed a restaurant chain");
        assert!(!hits.contains(&"rest"));
    }

    #[test]
    fn test_display_case_title_cases_long_terms() {
        assert_eq!(display_case("python"), "Python");
        assert_eq!(display_case("machine learning"), "Machine Learning");
    }

    #[test]
    fn test_display_case_uppercases_short_terms() {
        assert_eq!(display_case("go"), "GO");
        assert_eq!(display_case("r"), "R");
    }

    #[test]
    fn test_title_case_restarts_after_punctuation() {
        assert_eq!(title_case("node.js"), "Node.Js");
        assert_eq!(title_case("ci/cd"), "Ci/Cd");
    }

    #[test]
    fn test_is_technical_skill() {
        assert!(is_technical_skill("python"));
        assert!(!is_technical_skill("communication"));
    }
}
