//! Fixed English -> Dutch vocabulary for furniture searches.
//!
//! Tables map an alias (English or Dutch) to a canonical English name and the
//! Dutch term used on the site. Aliases are lowercase and may span up to
//! [`MAX_KEY_WORDS`] words.

use crate::utils::clean_text;

pub const MAX_KEY_WORDS: usize = 3;

/// Predefined prompts whose Dutch terms were tuned by hand.
const PHRASES: &[(&str, &str)] = &[
    ("mid century chair", "teak stoel"),
    ("mid century table", "teak tafel"),
    ("vintage chair", "vintage stoel"),
    ("design lamp", "lamp design"),
    ("industrial style", "industrieel metaal"),
    ("scandinavian wood", "licht hout"),
];

pub const PREDEFINED_PROMPTS: &[&str] = &[
    "mid century chair",
    "mid century table",
    "vintage chair",
    "design lamp",
    "industrial style",
    "scandinavian wood",
];

type Entry = (&'static str, &'static str, &'static str);

/// (alias, canonical, dutch)
const ITEMS: &[(&str, &str, &str)] = &[
    ("chair", "chair", "stoel"),
    ("chairs", "chair", "stoelen"),
    ("stoel", "chair", "stoel"),
    ("stoelen", "chair", "stoelen"),
    ("dining chair", "chair", "eetkamerstoel"),
    ("dining chairs", "chair", "eetkamerstoelen"),
    ("armchair", "armchair", "fauteuil"),
    ("lounge chair", "armchair", "fauteuil"),
    ("fauteuil", "armchair", "fauteuil"),
    ("table", "table", "tafel"),
    ("tables", "table", "tafels"),
    ("tafel", "table", "tafel"),
    ("dining table", "dining table", "eettafel"),
    ("eettafel", "dining table", "eettafel"),
    ("coffee table", "coffee table", "salontafel"),
    ("salontafel", "coffee table", "salontafel"),
    ("side table", "side table", "bijzettafel"),
    ("couch", "couch", "bank"),
    ("couches", "couch", "banken"),
    ("sofa", "couch", "bank"),
    ("sofas", "couch", "banken"),
    ("bank", "couch", "bank"),
    ("lamp", "lamp", "lamp"),
    ("lamps", "lamp", "lampen"),
    ("floor lamp", "floor lamp", "vloerlamp"),
    ("vloerlamp", "floor lamp", "vloerlamp"),
    ("pendant lamp", "pendant lamp", "hanglamp"),
    ("pendant", "pendant lamp", "hanglamp"),
    ("hanglamp", "pendant lamp", "hanglamp"),
    ("desk lamp", "desk lamp", "bureaulamp"),
    ("cabinet", "cabinet", "kast"),
    ("cupboard", "cabinet", "kast"),
    ("kast", "cabinet", "kast"),
    ("wardrobe", "wardrobe", "kledingkast"),
    ("bookcase", "bookcase", "boekenkast"),
    ("bookshelf", "bookcase", "boekenkast"),
    ("shelf", "shelf", "wandplank"),
    ("sideboard", "sideboard", "dressoir"),
    ("dressoir", "sideboard", "dressoir"),
    ("dresser", "dresser", "ladekast"),
    ("chest of drawers", "dresser", "ladekast"),
    ("desk", "desk", "bureau"),
    ("bureau", "desk", "bureau"),
    ("bed", "bed", "bed"),
    ("mirror", "mirror", "spiegel"),
    ("spiegel", "mirror", "spiegel"),
    ("rug", "rug", "vloerkleed"),
    ("carpet", "rug", "vloerkleed"),
    ("stool", "stool", "kruk"),
    ("bar stool", "stool", "barkruk"),
    ("kruk", "stool", "kruk"),
    ("bench", "bench", "bankje"),
    ("ottoman", "ottoman", "poef"),
    ("pouf", "ottoman", "poef"),
];

/// (alias, canonical, dutch)
const STYLES: &[(&str, &str, &str)] = &[
    ("mid century", "mid century", "teak"),
    ("mid century modern", "mid century", "teak"),
    ("mid-century", "mid century", "teak"),
    ("midcentury", "mid century", "teak"),
    ("mcm", "mid century", "teak"),
    ("vintage", "vintage", "vintage"),
    ("retro", "vintage", "vintage"),
    ("industrial", "industrial", "industrieel"),
    ("industrieel", "industrial", "industrieel"),
    ("scandinavian", "scandinavian", "scandinavisch"),
    ("scandi", "scandinavian", "scandinavisch"),
    ("nordic", "scandinavian", "scandinavisch"),
    ("danish", "scandinavian", "deens"),
    ("modern", "modern", "modern"),
    ("contemporary", "modern", "modern"),
    ("antique", "antique", "antiek"),
    ("antiek", "antique", "antiek"),
    ("rustic", "rustic", "landelijk"),
    ("farmhouse", "rustic", "landelijk"),
    ("minimalist", "minimalist", "minimalistisch"),
    ("design", "design", "design"),
    ("designer", "design", "design"),
    ("bohemian", "bohemian", "boho"),
    ("boho", "bohemian", "boho"),
    ("art deco", "art deco", "art deco"),
    ("brutalist", "brutalist", "brutalist"),
];

/// Dutch terms searched for each canonical style in a style collection.
const STYLE_COLLECTION_TERMS: &[(&str, &[&str])] = &[
    ("mid century", &["teak", "mid century"]),
    ("vintage", &["vintage", "retro"]),
    ("industrial", &["industrieel", "metaal"]),
    ("scandinavian", &["scandinavisch", "deens design"]),
    ("modern", &["modern"]),
    ("antique", &["antiek"]),
    ("rustic", &["landelijk", "eiken"]),
    ("minimalist", &["minimalistisch"]),
    ("design", &["design"]),
    ("bohemian", &["boho", "rotan"]),
    ("art deco", &["art deco"]),
    ("brutalist", &["brutalist"]),
];

/// (alias, canonical, dutch)
const MATERIALS: &[(&str, &str, &str)] = &[
    ("wood", "wood", "hout"),
    ("wooden", "wood", "houten"),
    ("hout", "wood", "hout"),
    ("oak", "oak", "eiken"),
    ("eiken", "oak", "eiken"),
    ("teak", "teak", "teak"),
    ("walnut", "walnut", "notenhout"),
    ("pine", "pine", "grenen"),
    ("metal", "metal", "metaal"),
    ("metaal", "metal", "metaal"),
    ("steel", "steel", "staal"),
    ("chrome", "chrome", "chroom"),
    ("brass", "brass", "messing"),
    ("leather", "leather", "leer"),
    ("leer", "leather", "leer"),
    ("velvet", "velvet", "fluweel"),
    ("rattan", "rattan", "rotan"),
    ("rotan", "rattan", "rotan"),
    ("wicker", "wicker", "riet"),
    ("glass", "glass", "glas"),
    ("marble", "marble", "marmer"),
    ("bamboo", "bamboo", "bamboe"),
    ("linen", "linen", "linnen"),
];

/// Colours, rooms and shapes: translated but not parsed into fields.
const TERMS: &[(&str, &str)] = &[
    ("black", "zwart"),
    ("white", "wit"),
    ("green", "groen"),
    ("blue", "blauw"),
    ("red", "rood"),
    ("grey", "grijs"),
    ("gray", "grijs"),
    ("brown", "bruin"),
    ("yellow", "geel"),
    ("pink", "roze"),
    ("round", "rond"),
    ("square", "vierkant"),
    ("small", "klein"),
    ("large", "groot"),
    ("big", "groot"),
    ("living room", "woonkamer"),
    ("bedroom", "slaapkamer"),
    ("dining room", "eetkamer"),
    ("kitchen", "keuken"),
    ("garden", "tuin"),
    ("outdoor", "buiten"),
    ("office", "kantoor"),
    ("kids", "kinder"),
];

/// (alias, display name, postcode)
const CITIES: &[Entry] = &[
    ("amsterdam", "Amsterdam", "1012"),
    ("rotterdam", "Rotterdam", "3011"),
    ("utrecht", "Utrecht", "3511"),
    ("den haag", "Den Haag", "2511"),
    ("the hague", "Den Haag", "2511"),
    ("eindhoven", "Eindhoven", "5611"),
    ("groningen", "Groningen", "9711"),
    ("haarlem", "Haarlem", "2011"),
    ("leiden", "Leiden", "2311"),
    ("delft", "Delft", "2611"),
    ("nijmegen", "Nijmegen", "6511"),
    ("arnhem", "Arnhem", "6811"),
    ("maastricht", "Maastricht", "6211"),
    ("tilburg", "Tilburg", "5038"),
    ("breda", "Breda", "4811"),
    ("zwolle", "Zwolle", "8011"),
    ("amersfoort", "Amersfoort", "3811"),
    ("almere", "Almere", "1315"),
    ("den bosch", "'s-Hertogenbosch", "5211"),
    ("'s-hertogenbosch", "'s-Hertogenbosch", "5211"),
];

const FILLER: &[&str] = &[
    "a", "an", "the", "for", "with", "and", "cool", "nice", "some", "style", "looking", "want",
    "i", "me", "my", "please", "in", "near", "around",
];

/// Lowercases and strips punctuation, keeping hyphens and apostrophes.
pub fn normalize(text: &str) -> String {
    let mapped: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '\'' {
                c
            } else {
                ' '
            }
        })
        .collect();
    clean_text(&mapped)
}

pub fn phrase(normalized: &str) -> Option<&'static str> {
    PHRASES
        .iter()
        .find(|(en, _)| *en == normalized)
        .map(|(_, nl)| *nl)
}

fn find3(table: &'static [Entry], key: &str) -> Option<&'static Entry> {
    table.iter().find(|(alias, _, _)| *alias == key)
}

/// Canonical item name and Dutch term for an alias.
pub fn item(key: &str) -> Option<(&'static str, &'static str)> {
    find3(ITEMS, key).map(|(_, canonical, nl)| (*canonical, *nl))
}

pub fn style(key: &str) -> Option<(&'static str, &'static str)> {
    find3(STYLES, key).map(|(_, canonical, nl)| (*canonical, *nl))
}

pub fn material(key: &str) -> Option<(&'static str, &'static str)> {
    find3(MATERIALS, key).map(|(_, canonical, nl)| (*canonical, *nl))
}

fn term(key: &str) -> Option<&'static str> {
    TERMS.iter().find(|(en, _)| *en == key).map(|(_, nl)| *nl)
}

/// Display name and postcode for a city alias.
pub fn city(key: &str) -> Option<(&'static str, &'static str)> {
    find3(CITIES, key).map(|(_, name, postcode)| (*name, *postcode))
}

pub fn city_postcode(name: &str) -> Option<&'static str> {
    let key = normalize(name);
    city(&key).map(|(_, postcode)| postcode)
}

pub fn is_filler(word: &str) -> bool {
    FILLER.contains(&word)
}

/// Dutch term for any known key, in item/style/material/term order.
pub fn lookup(key: &str) -> Option<&'static str> {
    item(key)
        .or_else(|| style(key))
        .or_else(|| material(key))
        .map(|(_, nl)| nl)
        .or_else(|| term(key))
}

pub fn style_collection_terms(canonical: &str) -> Option<&'static [&'static str]> {
    STYLE_COLLECTION_TERMS
        .iter()
        .find(|(s, _)| *s == canonical)
        .map(|(_, terms)| *terms)
}
