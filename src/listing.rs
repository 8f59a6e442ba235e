use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::draft::Prefill;

pub const MAX_RESULTS: usize = 5;

/// One search hit: a product title, its description and an image URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

impl From<Listing> for Prefill {
    fn from(l: Listing) -> Self {
        Prefill {
            name: l.title,
            notes: l.description,
            photo_uri: l.image.unwrap_or_default(),
        }
    }
}

/// Looks up product listings for a scanned barcode.
pub trait ListingProvider {
    fn search_by_barcode(&self, barcode: &str) -> Result<Vec<Listing>>;
}

/// Offline provider backed by a few known barcodes.
#[derive(Debug, Clone)]
pub struct FixtureListings {
    entries: Vec<(&'static str, Listing)>,
}

impl Default for FixtureListings {
    fn default() -> Self {
        let entry = |code, title: &str, description: &str, image: &str| {
            (
                code,
                Listing {
                    title: title.to_string(),
                    description: description.to_string(),
                    image: Some(image.to_string()),
                },
            )
        };
        FixtureListings {
            entries: vec![
                entry(
                    "761941335827",
                    "Arrow (Season 3) Action Figure",
                    "DC Collectibles. Interchangeable hands and bow.",
                    "https://m.media-amazon.com/images/I/81zbrdYfXJL._AC_SL1500_.jpg",
                ),
                entry(
                    "630509252743",
                    "Marvel Legends Spider-Man",
                    "Hasbro. Includes web accessories and alternate hands.",
                    "https://m.media-amazon.com/images/I/91fXzBC+2QL._AC_SL1500_.jpg",
                ),
                entry(
                    "0887961802285",
                    "He-Man Masters of the Universe Origins",
                    "Mattel. Vintage styling with modern articulation.",
                    "https://m.media-amazon.com/images/I/71iMTVRvN9L._AC_SL1500_.jpg",
                ),
            ],
        }
    }
}

impl FixtureListings {
    pub fn barcodes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(code, _)| *code)
    }
}

impl ListingProvider for FixtureListings {
    fn search_by_barcode(&self, barcode: &str) -> Result<Vec<Listing>> {
        let barcode = barcode.trim();
        let hits: Vec<Listing> = self
            .entries
            .iter()
            .filter(|(code, _)| *code == barcode)
            .map(|(_, listing)| listing.clone())
            .take(MAX_RESULTS)
            .collect();
        tracing::debug!(barcode, hits = hits.len(), "fixture barcode lookup");
        Ok(hits)
    }
}
