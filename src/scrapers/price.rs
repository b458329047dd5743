//! Price and location text handling for German listing markup.
//!
//! Prices are shown like `1.200 € VB` (thousands separated by `.`, `VB` =
//! negotiable) or as the literal `Zu verschenken` for free items.

use crate::scrapers::observer::SkipReason;

/// Price text of items given away for free
pub const GIVEAWAY: &str = "zu verschenken";

/// Substrings removed before the numeric parse. `â‚¬` is how the euro sign
/// shows up when UTF-8 markup is read as Latin-1.
const PRICE_NOISE: [&str; 4] = ["VB", "â‚¬", "€", "."];

/// Strip price decorations, returning the bare digits (possibly empty)
pub fn clean_price(price_text: &str) -> String {
    let mut cleaned = price_text.trim().to_string();
    for noise in PRICE_NOISE {
        cleaned = cleaned.replace(noise, "");
    }
    cleaned.trim().to_string()
}

/// Apply the bounds of a search to a displayed price.
///
/// `max_price` is exclusive, `min_price` inclusive and only consulted when
/// `max_price` is set. Giveaways pass regardless of bounds.
pub fn check_price(
    price_text: &str,
    max_price: Option<u64>,
    min_price: Option<u64>,
) -> Result<(), SkipReason> {
    let Some(max_price) = max_price else {
        return Ok(());
    };

    if price_text.trim().to_lowercase() == GIVEAWAY {
        return Ok(());
    }

    let cleaned = clean_price(price_text);
    if cleaned.is_empty() {
        return Err(SkipReason::EmptyPrice);
    }

    let price: u64 = cleaned
        .parse()
        .map_err(|_| SkipReason::UnparseablePrice(cleaned.clone()))?;

    if price >= max_price {
        return Err(SkipReason::AboveMaxPrice { price, max_price });
    }

    if let Some(min_price) = min_price {
        if price < min_price {
            return Err(SkipReason::BelowMinPrice { price, min_price });
        }
    }

    Ok(())
}

/// Trim and collapse every whitespace run into a single space
pub fn normalize_location(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
