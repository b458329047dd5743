use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};

use crate::error::ListingError;
use crate::scrapers::traits::DocumentParser;
use crate::scrapers::types::ListingEntry;

/// Class marker of paid top placements
pub const PROMOTED_MARKER: &str = "is-topad";

/// CSS selectors for each structural role of a result page
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    pub container: String,
    pub item: String,
    pub anchor: String,
    pub price: String,
    pub location: String,
    pub article: String,
    /// Attribute of `article` holding the ad id
    pub id_attribute: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            container: "#srchrslt-adtable".to_string(),
            item: ".ad-listitem".to_string(),
            anchor: "a.ellipsis".to_string(),
            price: "p.aditem-main--middle--price-shipping--price".to_string(),
            location: ".aditem-main--top--left".to_string(),
            article: "article.aditem".to_string(),
            id_attribute: "data-adid".to_string(),
        }
    }
}

/// `DocumentParser` built on the `scraper` crate
#[derive(Debug)]
pub struct ScraperDocumentParser {
    container: Selector,
    item: Selector,
    anchor: Selector,
    price: Selector,
    location: Selector,
    article: Selector,
    id_attribute: String,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid selector {css:?}: {e}"))
}

impl ScraperDocumentParser {
    pub fn new() -> Result<Self> {
        Self::with_selectors(ListingSelectors::default())
    }

    pub fn with_selectors(selectors: ListingSelectors) -> Result<Self> {
        Ok(Self {
            container: selector(&selectors.container)?,
            item: selector(&selectors.item)?,
            anchor: selector(&selectors.anchor)?,
            price: selector(&selectors.price)?,
            location: selector(&selectors.location)?,
            article: selector(&selectors.article)?,
            id_attribute: selectors.id_attribute,
        })
    }

    fn read_entry(&self, item: ElementRef<'_>) -> ListingEntry {
        let link = item.select(&self.anchor).next();

        ListingEntry {
            promoted: is_promoted(item),
            href: link.and_then(|a| a.value().attr("href")).map(str::to_string),
            title: link.map(element_text).unwrap_or_default(),
            price_text: item
                .select(&self.price)
                .next()
                .map(element_text)
                .unwrap_or_default(),
            location_text: item
                .select(&self.location)
                .last()
                .map(element_text)
                .unwrap_or_default(),
            external_id: item
                .select(&self.article)
                .next()
                .and_then(|article| article.value().attr(&self.id_attribute))
                .map(str::to_string),
        }
    }
}

impl DocumentParser for ScraperDocumentParser {
    fn entries(&self, html: &str) -> Result<Vec<ListingEntry>, ListingError> {
        let document = Html::parse_document(html);

        let containers: Vec<_> = document.select(&self.container).collect();
        if containers.is_empty() {
            return Err(ListingError::MissingResults);
        }

        Ok(containers
            .into_iter()
            .flat_map(|container| container.select(&self.item))
            .map(|item| self.read_entry(item))
            .collect())
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn has_marker(element: ElementRef<'_>) -> bool {
    element
        .value()
        .attr("class")
        .map(|class| class.contains(PROMOTED_MARKER))
        .unwrap_or(false)
}

/// The marker sits either on the list item itself or on its first element child
fn is_promoted(item: ElementRef<'_>) -> bool {
    has_marker(item) || item.children().find_map(ElementRef::wrap).is_some_and(has_marker)
}
