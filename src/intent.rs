use once_cell::sync::Lazy;
use regex::Regex;

/// Guidance shown whenever a message cannot be parsed into a weather question.
pub const GUIDANCE: &str = r#"Please ask: "What is the weather in [City]?""#;

/// Trailing "in <words>" clause, optionally followed by a question mark.
static CITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)in\s+([a-zA-Z\s]+?)\s*\??$").expect("city pattern is valid")
});

/// Topic keywords the question must mention.
static TOPIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)weather|air quality").expect("topic pattern is valid"));

/// Broad "in <word>" check, independent of the trailing-clause extraction.
static IN_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)in\s+\w+").expect("in-word pattern is valid"));

/// Accepted question with its extracted city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedIntent {
    pub city: String,
}

/// Stage one: pull the city out of a trailing "in <city>" clause.
///
/// Case-preserving on the city text; an all-whitespace capture yields `None`.
pub fn extract_city(text: &str) -> Option<String> {
    let captures = CITY_RE.captures(text)?;
    let city = captures.get(1)?.as_str().trim();
    if city.is_empty() {
        return None;
    }
    Some(city.to_string())
}

/// Stage two: confirm the message is actually about weather or air quality
/// and names a place somewhere. Deliberately broader than [`extract_city`];
/// both stages must pass on their own.
pub fn confirms_topic(text: &str) -> bool {
    TOPIC_RE.is_match(text) && IN_WORD_RE.is_match(text)
}

/// Validate a free-text message and extract the city it asks about.
///
/// Pure and deterministic; `None` means the caller should surface
/// [`GUIDANCE`] and must not issue a backend call.
pub fn parse(text: &str) -> Option<ParsedIntent> {
    let city = extract_city(text)?;
    if !confirms_topic(text) {
        return None;
    }
    Some(ParsedIntent { city })
}
