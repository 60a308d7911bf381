use regex::Regex;
use std::sync::LazyLock;

use crate::model::Listing;
use crate::utils::{absolutize, clean_text, listing_id_from_url, title_case, to_kebab_case};

static LOCATION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:ophalen|verzenden|vanaf|in)\b\s*").unwrap());

pub fn normalize_all(listings: &mut [Listing], base_url: &str) {
    for listing in listings.iter_mut() {
        normalize_listing(listing, base_url);
    }
}

fn normalize_listing(listing: &mut Listing, base_url: &str) {
    listing.title = clean_text(&listing.title);
    listing.description = clean_text(&listing.description);
    listing.price_text = clean_text(&listing.price_text);
    listing.location = normalize_location(&listing.location);
    listing.url = absolutize(base_url, &listing.url);
    listing.image = absolutize(base_url, &listing.image);

    if listing.id.is_empty() {
        listing.id = listing_id_from_url(&listing.url).unwrap_or_else(|| {
            if listing.url.is_empty() {
                format!("title:{}", to_kebab_case(&listing.title))
            } else {
                listing.url.clone()
            }
        });
    }
}

/// Drops pickup/shipping prefixes and title-cases the place name.
pub fn normalize_location(raw: &str) -> String {
    let cleaned = clean_text(raw);
    let stripped = LOCATION_PREFIX.replace(&cleaned, "");
    title_case(stripped.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.marktplaats.nl";

    #[test]
    fn location_prefixes_are_stripped() {
        assert_eq!(normalize_location("Ophalen Amsterdam"), "Amsterdam");
        assert_eq!(normalize_location("verzenden"), "");
        assert_eq!(normalize_location("  in  den haag "), "Den Haag");
        assert_eq!(normalize_location("Ingen"), "Ingen");
    }

    #[test]
    fn listing_is_cleaned_and_absolutized() {
        let mut listings = vec![Listing {
            title: "  Teak \n stoel ".into(),
            url: "/v/huis/stoelen/m2000000001-teak-stoel".into(),
            image: "//images.marktplaats.com/1.jpg".into(),
            location: "Vanaf UTRECHT".into(),
            ..Listing::default()
        }];
        normalize_all(&mut listings, BASE);
        let l = &listings[0];
        assert_eq!(l.title, "Teak stoel");
        assert_eq!(l.url, "https://www.marktplaats.nl/v/huis/stoelen/m2000000001-teak-stoel");
        assert_eq!(l.image, "https://images.marktplaats.com/1.jpg");
        assert_eq!(l.location, "Utrecht");
        assert_eq!(l.id, "m2000000001");
    }

    #[test]
    fn existing_id_is_kept() {
        let mut listings = vec![Listing {
            id: "m42".into(),
            title: "Lamp".into(),
            url: "/v/lamp/m2000000009-lamp".into(),
            ..Listing::default()
        }];
        normalize_all(&mut listings, BASE);
        assert_eq!(listings[0].id, "m42");
    }

    #[test]
    fn id_falls_back_to_url_then_title() {
        let mut listings = vec![
            Listing {
                title: "Kast".into(),
                url: "https://example.com/kast".into(),
                ..Listing::default()
            },
            Listing {
                title: "Oude Kast".into(),
                ..Listing::default()
            },
        ];
        normalize_all(&mut listings, BASE);
        assert_eq!(listings[0].id, "https://example.com/kast");
        assert_eq!(listings[1].id, "title:oude-kast");
    }
}
