//! Ordered first-match category rules and display-name lookup.
//!
//! Rule order is significant: the first matching predicate wins, so a
//! title matching several rules classifies by whichever appears first.
//! In particular the industry rule sits before the economy rule so
//! company earnings headlines resolve to industry coverage.

use regex::Regex;
use std::sync::LazyLock;

/// One classification rule: predicate, machine slug, human display name.
pub struct CategoryRule {
    pub pattern: Regex,
    pub slug: &'static str,
    pub display: &'static str,
}

/// Slug for titles no rule matches.
pub const UNCATEGORIZED_SLUG: &str = "uncategorized";
/// Display name for unmatched titles.
pub const UNCATEGORIZED_DISPLAY: &str = "Uncategorized";

const MATCH_CONFIDENCE: f64 = 0.7;
const DEFAULT_CONFIDENCE: f64 = 0.3;

static RULES: LazyLock<Vec<CategoryRule>> = LazyLock::new(|| {
    let rule = |pattern: &str, slug: &'static str, display: &'static str| CategoryRule {
        pattern: Regex::new(pattern).expect("category rule pattern"),
        slug,
        display,
    };
    vec![
        rule(
            r"(?i)\b(ai|llm|gpt|model|machine learning|neural)\b",
            "llm",
            "Large Language Models",
        ),
        rule(
            r"(?i)security|vulnerab|exploit|ransom|hacker|breach|privacy",
            "cybersecurity",
            "Cybersecurity",
        ),
        rule(
            r"(?i)chip|semiconductor|hardware|smartphone|gadget|wearable",
            "consumer-tech",
            "Consumer Tech & Hardware",
        ),
        rule(
            r"(?i)\bcloud\b|kubernetes|\bk8s\b|container|devops|\bsre\b",
            "cloud-devops",
            "Cloud & DevOps",
        ),
        // Ordered ahead of economy so earnings headlines land here.
        rule(
            r"(?i)company|merger|acquisition|\bipo\b|startup|earnings",
            "industry",
            "Industry & Companies",
        ),
        rule(
            r"(?i)econom|stock|market|inflation|finance",
            "economy",
            "Economy & Markets",
        ),
        rule(r"(?i)game|gaming|esports|console", "gaming", "Gaming"),
        rule(
            r"(?i)science|space|astronom|rocket|telescope",
            "science",
            "Science & Space",
        ),
        rule(
            r"(?i)health|medical|pharma|biotech|\bdrug\b",
            "healthcare",
            "Healthcare & Biotech",
        ),
        rule(
            r"(?i)energy|climate|emission|solar|renewable",
            "energy-climate",
            "Energy & Climate",
        ),
        rule(
            r"(?i)blockchain|bitcoin|crypto|ethereum",
            "blockchain",
            "Blockchain & Crypto",
        ),
        rule(
            r"(?i)policy|regulat|complian|legislat|antitrust",
            "policy",
            "Policy & Regulation",
        ),
        rule(
            r"(?i)\bdata\b|database|\betl\b|analytics|warehouse",
            "data",
            "Data & Databases",
        ),
        rule(
            r"(?i)\bweb\b|frontend|browser|mobile app|\bapp\b",
            "web-mobile",
            "Web & Mobile",
        ),
        rule(
            r"(?i)software|programming|engineering|architecture|backend",
            "software-dev",
            "Software Engineering",
        ),
        rule(
            r"(?i)media|culture|film|music|streaming|social",
            "culture-media",
            "Culture & Media",
        ),
    ]
});

/// Extra display names with no classification rule of their own.
const EXTRA_DISPLAY: [(&str, &str); 2] = [
    ("ai-ml", "AI & Machine Learning"),
    (UNCATEGORIZED_SLUG, UNCATEGORIZED_DISPLAY),
];

/// A classification outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub slug: String,
    pub display: String,
    pub confidence: f64,
}

/// Classify a title against the ordered rule list; first match wins.
#[must_use]
pub fn classify(title: &str) -> Classification {
    for rule in RULES.iter() {
        if rule.pattern.is_match(title) {
            return Classification {
                slug: rule.slug.to_string(),
                display: rule.display.to_string(),
                confidence: MATCH_CONFIDENCE,
            };
        }
    }
    Classification {
        slug: UNCATEGORIZED_SLUG.to_string(),
        display: UNCATEGORIZED_DISPLAY.to_string(),
        confidence: DEFAULT_CONFIDENCE,
    }
}

/// Look up the human display name for a category slug, falling back to
/// the raw slug when unmapped.
#[must_use]
pub fn display_name(slug: &str) -> &str {
    for rule in RULES.iter() {
        if rule.slug == slug {
            return rule.display;
        }
    }
    for (s, display) in EXTRA_DISPLAY {
        if s == slug {
            return display;
        }
    }
    slug
}
