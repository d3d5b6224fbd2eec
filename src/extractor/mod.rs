// Extractor module: turns one article body into candidate restaurant records.

pub mod entities;
pub mod markup;
pub mod patterns;

use crate::model::{ArticleRecord, CandidateRecord, ExtractError};
use entities::EntityRecognizer;
use markup::ArticleText;
use patterns::AddressPattern;
use std::collections::HashSet;

/// Anything that can propose candidates from an article's plain text.
pub trait CandidateSource: Send + Sync {
    fn candidates(&self, text: &ArticleText) -> Vec<CandidateRecord>;
}

pub struct Extractor {
    sources: Vec<Box<dyn CandidateSource>>,
    max_body_bytes: usize,
}

impl Extractor {
    /// The four address patterns in priority order, then the entity recognizer.
    pub fn new(max_body_bytes: usize) -> Self {
        let mut sources: Vec<Box<dyn CandidateSource>> = AddressPattern::ORDERED
            .into_iter()
            .map(|p| Box::new(p) as Box<dyn CandidateSource>)
            .collect();
        sources.push(Box::new(EntityRecognizer));
        Self::with_sources(sources, max_body_bytes)
    }

    pub fn with_sources(sources: Vec<Box<dyn CandidateSource>>, max_body_bytes: usize) -> Self {
        Self {
            sources,
            max_body_bytes,
        }
    }

    /// Runs every source over the article and keeps the first candidate seen
    /// for each address. Malformed markup is not an error; the only fault is
    /// a body larger than the configured limit.
    pub fn extract(&self, article: &ArticleRecord) -> Result<Vec<CandidateRecord>, ExtractError> {
        if article.body.len() > self.max_body_bytes {
            return Err(ExtractError::Oversized {
                size: article.body.len(),
                limit: self.max_body_bytes,
            });
        }

        let text = ArticleText::from_markup(&article.body);
        let mut seen = HashSet::new();

        Ok(self
            .sources
            .iter()
            .flat_map(|source| source.candidates(&text))
            .filter(|c| !c.address_text.is_empty() && seen.insert(c.address_text.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(body: &str) -> ArticleRecord {
        ArticleRecord {
            title: "Test".into(),
            published: None,
            body: body.into(),
        }
    }

    fn prose(chars: usize) -> String {
        "we lingered over a bowl of noodles and talked about the broth "
            .chars()
            .cycle()
            .take(chars)
            .collect()
    }

    #[test]
    fn finds_lucias_trattoria() {
        let body = format!(
            "<p>Lucia's Trattoria<br>123 Smith St, Brooklyn, NY 11231</p><p>{}</p>",
            prose(200)
        );
        let found = Extractor::new(1 << 20).extract(&article(&body)).unwrap();

        let lucia = found
            .iter()
            .find(|c| c.address_text == "123 Smith St, Brooklyn, NY 11231")
            .expect("full address candidate");
        assert_eq!(lucia.name, "Lucia's Trattoria");
        assert!(lucia.snippet.starts_with("123 Smith St, Brooklyn, NY 11231…we lingered"));
        assert!(lucia.snippet.chars().count() <= 260);
    }

    #[test]
    fn linked_and_bolded_address_is_found_whole() {
        let body = "<p><b>Lucia's <em>Trattoria</em></b><br>\
                    <a href=\"https://maps.example/?q=123+Smith+St\">123 Smith St</a>, Brooklyn, NY 11231</p>\
                    <p>Carroll Gardens<br><strong>454 Van Brunt St</strong>, Brooklyn</p>";
        let found = Extractor::new(1 << 20).extract(&article(body)).unwrap();

        let lucia = found
            .iter()
            .find(|c| c.address_text == "123 Smith St, Brooklyn, NY 11231")
            .expect("full address across a link");
        assert_eq!(lucia.name, "Lucia's Trattoria");

        let hometown = found
            .iter()
            .find(|c| c.address_text == "454 Van Brunt St, Brooklyn")
            .expect("street with borough across bold text");
        assert_eq!(hometown.name, "Carroll Gardens");
    }

    #[test]
    fn same_address_from_two_patterns_is_emitted_once() {
        let body = "<p>Lucia's Trattoria<br>123 Smith St, Brooklyn, NY 11231</p>";
        let text = ArticleText::from_markup(body);
        assert_eq!(AddressPattern::FullAddress.candidates(&text).len(), 1);
        assert_eq!(AddressPattern::StreetWithBorough.candidates(&text).len(), 1);

        let found = Extractor::new(1 << 20).extract(&article(body)).unwrap();
        let full: Vec<_> = found
            .iter()
            .filter(|c| c.address_text == "123 Smith St, Brooklyn, NY 11231")
            .collect();
        assert_eq!(full.len(), 1);
        assert_eq!(full[0].name, "Lucia's Trattoria");
    }

    #[test]
    fn pattern_beats_entity_for_identical_address() {
        let body = "<p>The Grill, 99 East 52nd St</p>";
        let found = Extractor::new(1 << 20).extract(&article(body)).unwrap();
        assert_eq!(
            found,
            vec![CandidateRecord {
                name: "The Grill".into(),
                address_text: "99 East 52nd St".into(),
                snippet: "99 East 52nd St".into(),
            }]
        );
    }

    #[test]
    fn first_occurrence_wins_within_an_article() {
        let body = "<p>Hometown Bar-B-Que<br>454 Van Brunt St, Brooklyn</p>\
                    <p>Hometown Annex<br>454 Van Brunt St, Brooklyn</p>";
        let found = Extractor::new(1 << 20).extract(&article(body)).unwrap();
        let hits: Vec<_> = found
            .iter()
            .filter(|c| c.address_text == "454 Van Brunt St, Brooklyn")
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Hometown Bar-B-Que");
    }

    #[test]
    fn sources_run_in_registration_order() {
        struct Fixed(&'static str);
        impl CandidateSource for Fixed {
            fn candidates(&self, _text: &ArticleText) -> Vec<CandidateRecord> {
                vec![CandidateRecord {
                    name: self.0.into(),
                    address_text: "1 Main St".into(),
                    snippet: String::new(),
                }]
            }
        }

        let sources: Vec<Box<dyn CandidateSource>> = vec![Box::new(Fixed("first")), Box::new(Fixed("second"))];
        let extractor = Extractor::with_sources(sources, 1024);
        let found = extractor.extract(&article("")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "first");
    }

    #[test]
    fn text_without_digits_or_boroughs_yields_nothing() {
        let body = format!("<h2>Notes From Lunch</h2><p>{}</p>", prose(300));
        let found = Extractor::new(1 << 20).extract(&article(&body)).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn hostile_markup_is_not_an_error() {
        let extractor = Extractor::new(1 << 20);
        assert!(extractor.extract(&article("")).unwrap().is_empty());
        assert!(extractor.extract(&article("<div><p><<<>>></b></i>&&&;")).unwrap().is_empty());
    }

    #[test]
    fn oversized_body_is_a_fault() {
        let err = Extractor::new(8).extract(&article("<p>far too long</p>")).unwrap_err();
        assert!(matches!(err, ExtractError::Oversized { size: 19, limit: 8 }));
    }
}
