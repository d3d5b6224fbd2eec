// Address matchers, most specific first
use crate::extractor::markup::ArticleText;
use crate::extractor::CandidateSource;
use crate::model::CandidateRecord;
use crate::utils::squash_whitespace;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

const BOROUGHS: &str = r"Brooklyn|Bronx|Queens|Manhattan|Staten Island|New York|NYC";

const STREET_SUFFIXES: &str = r"Street|St|Avenue|Ave|Boulevard|Blvd|Road|Rd|Place|Pl|Lane|Ln|Drive|Dr|Parkway|Pkwy|Broadway|Bowery";

pub static BOROUGH_RX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{BOROUGHS})\b")).expect("valid borough regex")
});

// 123 Smith St, Brooklyn, NY 11231
static FULL_ADDRESS_RX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b\d{{1,5}}[A-Z]?[ \t]+[\w \t.,'&/-]+?,\s*(?:{BOROUGHS})[\w \t.,'-]*?(?:NY)?[ \t]*\d{{5}}"
    ))
    .expect("valid full address regex")
});

// 123 Smith St, Brooklyn (state and zip optional)
static STREET_WITH_BOROUGH_RX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b\d{{1,5}}[A-Z]?[ \t]+[\w \t.'&/-]+?,\s*(?:{BOROUGHS})\b(?:,?[ \t]*NY\b)?(?:[ \t]+\d{{5}}\b)?"
    ))
    .expect("valid street with borough regex")
});

// Smith St & Court St, Brooklyn
static INTERSECTION_RX: LazyLock<Regex> = LazyLock::new(|| {
    let word = r"[A-Z0-9][\w.'-]*";
    Regex::new(&format!(
        r"\b{word}(?:[ \t]+{word}){{0,3}}[ \t]*&[ \t]*{word}(?:[ \t]+{word}){{0,3}},[ \t]*(?i:{BOROUGHS})\b"
    ))
    .expect("valid intersection regex")
});

// 123 Smith St
static BARE_STREET_RX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b\d{{1,5}}[A-Za-z]?[ \t]+(?:[A-Z0-9][\w'.-]*[ \t]+){{0,4}}(?:{STREET_SUFFIXES})\b"
    ))
    .expect("valid bare street regex")
});

/// The address shapes we look for. Order matters: when two shapes yield the
/// same address text, the earlier one supplies the name and snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressPattern {
    FullAddress,
    StreetWithBorough,
    Intersection,
    BareStreet,
}

impl AddressPattern {
    pub const ORDERED: [AddressPattern; 4] = [
        AddressPattern::FullAddress,
        AddressPattern::StreetWithBorough,
        AddressPattern::Intersection,
        AddressPattern::BareStreet,
    ];

    fn regex(self) -> &'static Regex {
        match self {
            AddressPattern::FullAddress => &*FULL_ADDRESS_RX,
            AddressPattern::StreetWithBorough => &*STREET_WITH_BOROUGH_RX,
            AddressPattern::Intersection => &*INTERSECTION_RX,
            AddressPattern::BareStreet => &*BARE_STREET_RX,
        }
    }

    /// Byte ranges of every non-overlapping match, left to right.
    pub fn find_spans(self, text: &str) -> Vec<Range<usize>> {
        self.regex().find_iter(text).map(|m| m.range()).collect()
    }
}

impl CandidateSource for AddressPattern {
    fn candidates(&self, text: &ArticleText) -> Vec<CandidateRecord> {
        let raw = text.as_str();
        self.find_spans(raw)
            .into_iter()
            .map(|span| CandidateRecord {
                name: text.name_before(span.start),
                address_text: squash_whitespace(&raw[span.clone()]),
                snippet: text.snippet_at(span),
            })
            .collect()
    }
}
