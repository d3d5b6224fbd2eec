// Rule-based entity recognizer. Catches addresses the patterns miss.
use crate::extractor::markup::ArticleText;
use crate::extractor::patterns::BOROUGH_RX;
use crate::extractor::CandidateSource;
use crate::model::CandidateRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    Organization,
    Facility,
    Place,
    Region,
    Person,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

const CONNECTORS: &[&str] = &["&", "of", "the", "and", "de", "la", "del", "di", "da", "du"];
const HONORIFICS: &[&str] = &["Mr.", "Mrs.", "Ms.", "Dr.", "Chef"];
const ABBREVIATIONS: &[&str] = &["St.", "Ave.", "Blvd.", "Rd.", "Pl.", "Mr.", "Mrs.", "Ms.", "Dr.", "Jr.", "Sr."];
const REGION_WORDS: &[&str] = &[
    "The", "Brooklyn", "Bronx", "Queens", "Manhattan", "Staten", "Island", "New", "York", "NYC", "NY",
];
const STREET_WORDS: &[&str] = &[
    "Street", "St", "St.", "Avenue", "Ave", "Ave.", "Boulevard", "Blvd", "Blvd.", "Road", "Rd", "Rd.",
    "Place", "Pl", "Pl.", "Lane", "Drive", "Parkway", "Broadway", "Bowery",
];

/// Groups runs of capitalized or numeric words, line by line, into labeled
/// entities. Runs break at clause punctuation and at lowercase words other
/// than a few connectors.
#[derive(Debug, Default)]
pub struct EntityRecognizer;

impl EntityRecognizer {
    pub fn recognize(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();

        for line in text.lines() {
            let mut run: Vec<&str> = Vec::new();
            for raw in line.split_whitespace() {
                let (token, closes) = clean_token(raw);
                if is_capitalized_or_numeric(token) || (!run.is_empty() && CONNECTORS.contains(&token)) {
                    run.push(token);
                } else {
                    flush(&mut run, &mut entities);
                }
                if closes {
                    flush(&mut run, &mut entities);
                }
            }
            flush(&mut run, &mut entities);
        }

        entities
    }
}

impl CandidateSource for EntityRecognizer {
    fn candidates(&self, text: &ArticleText) -> Vec<CandidateRecord> {
        self.recognize(text.as_str())
            .into_iter()
            .filter(|e| {
                matches!(
                    e.label,
                    EntityLabel::Organization | EntityLabel::Facility | EntityLabel::Place
                )
            })
            .filter(|e| e.text.chars().any(|c| c.is_ascii_digit()) || BOROUGH_RX.is_match(&e.text))
            .map(|e| CandidateRecord {
                name: e.text.clone(),
                address_text: e.text,
                snippet: String::new(),
            })
            .collect()
    }
}

/// Strips quotes and brackets; reports whether the token ends a clause.
fn clean_token(raw: &str) -> (&str, bool) {
    let token = raw
        .trim_start_matches(['"', '“', '‘', '(', '\''])
        .trim_end_matches(['"', '”', '’', ')']);
    let closes = token.ends_with([',', ';', ':', '!', '?'])
        || (token.ends_with('.') && !ABBREVIATIONS.contains(&token));
    if closes {
        (token.trim_end_matches([',', ';', ':', '!', '?', '.']), true)
    } else {
        (token, false)
    }
}

fn is_capitalized_or_numeric(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit())
}

fn flush<'a>(run: &mut Vec<&'a str>, entities: &mut Vec<Entity>) {
    while run.last().is_some_and(|t| CONNECTORS.contains(t)) {
        run.pop();
    }
    if run.len() >= 2 {
        entities.push(Entity {
            text: run.join(" "),
            label: classify(run),
        });
    }
    run.clear();
}

fn classify(run: &[&str]) -> EntityLabel {
    if HONORIFICS.contains(&run[0]) {
        EntityLabel::Person
    } else if run.iter().all(|t| REGION_WORDS.contains(t) || is_zip(t)) {
        EntityLabel::Region
    } else if run.iter().any(|t| STREET_WORDS.contains(t)) {
        EntityLabel::Place
    } else if run.iter().any(|t| t.chars().any(|c| c.is_ascii_digit())) {
        EntityLabel::Facility
    } else {
        EntityLabel::Organization
    }
}

fn is_zip(token: &str) -> bool {
    token.len() == 5 && token.chars().all(|c| c.is_ascii_digit())
}
