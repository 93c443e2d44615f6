use serde::{Deserialize, Serialize};

/// Components recognized in a free-text address. Every field is optional; the
/// validator decides which absences are fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedAddress {
    pub street: Option<String>,
    pub occupancy: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

/// Splits a free-text address into tagged components.
pub trait AddressTagger: Send + Sync {
    fn tag(&self, address: &str) -> TaggedAddress;
}

/// Tagger for comma separated US addresses such as
/// `15 E Railroad St, Apt 2, Mount Sterling, Brown County, IL 62353`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTagger;

const OCCUPANCY_DESIGNATORS: [&str; 8] =
    ["apt", "apartment", "unit", "suite", "ste", "rm", "room", "#"];

/// State names spanning several words, lowercased.
const MULTI_WORD_STATES: [&str; 11] = [
    "district of columbia",
    "new hampshire",
    "new jersey",
    "new mexico",
    "new york",
    "north carolina",
    "north dakota",
    "rhode island",
    "south carolina",
    "south dakota",
    "west virginia",
];

impl AddressTagger for StandardTagger {
    fn tag(&self, address: &str) -> TaggedAddress {
        let mut segments: Vec<String> = address
            .split(',')
            .map(normalize_segment)
            .filter(|segment| !segment.is_empty())
            .collect();
        let mut tagged = TaggedAddress::default();

        let Some(last) = segments.pop() else {
            return tagged;
        };

        let mut tokens: Vec<&str> = last.split_whitespace().collect();
        if tokens.last().is_some_and(|token| looks_like_zip(token)) {
            tagged.zip_code = tokens.pop().map(str::to_string);
        }

        if tokens.is_empty() {
            // zip code stood alone, so the state is the previous segment
            tagged.state = segments.pop();
        } else if segments.len() <= 1 {
            // no comma between city and state: the state is the trailing
            // multi-word state name if there is one, else the final token
            let state_len = trailing_state_len(&tokens);
            tagged.state = Some(tokens.split_off(tokens.len() - state_len).join(" "));
            if !tokens.is_empty() {
                let prefix = tokens.join(" ");
                if segments.is_empty() {
                    segments.push(prefix);
                } else {
                    tagged.city = Some(prefix);
                }
            }
        } else {
            tagged.state = Some(tokens.join(" "));
        }

        if tagged.city.is_none() && segments.len() >= 2 {
            if let Some(county) = segments.last().and_then(|s| strip_county_suffix(s)) {
                tagged.county = Some(county);
                segments.pop();
            }
        }

        if tagged.city.is_none() && segments.len() >= 2 {
            tagged.city = segments.pop();
        }

        let mut segments = segments.into_iter();
        let Some(street) = segments.next() else {
            return tagged;
        };

        let middle: Vec<String> = segments.collect();
        if middle.is_empty() {
            let (street, occupancy) = split_inline_occupancy(&street);
            tagged.street = Some(street);
            tagged.occupancy = occupancy;
        } else {
            tagged.street = Some(street);
            tagged.occupancy = Some(middle.join(" "));
        }

        tagged
    }
}

fn normalize_segment(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn looks_like_zip(token: &str) -> bool {
    let base = token.split_once('-').map_or(token, |(base, _)| base);
    base.len() == 5 && base.bytes().all(|b| b.is_ascii_digit())
}

fn strip_county_suffix(segment: &str) -> Option<String> {
    let (name, suffix) = segment.rsplit_once(' ')?;
    suffix
        .eq_ignore_ascii_case("county")
        .then(|| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

fn trailing_state_len(tokens: &[&str]) -> usize {
    for words in [3, 2] {
        if tokens.len() >= words {
            let tail = tokens[tokens.len() - words..].join(" ").to_lowercase();
            if MULTI_WORD_STATES.contains(&tail.as_str()) {
                return words;
            }
        }
    }
    1
}

fn is_designator(token: &str) -> bool {
    let bare = token.trim_end_matches('.').to_ascii_lowercase();
    OCCUPANCY_DESIGNATORS.contains(&bare.as_str()) || (token.starts_with('#') && token.len() > 1)
}

/// A designator only counts after the house number and at least one street
/// word, and a bare word designator needs something after it (`Unit 4`).
fn split_inline_occupancy(street: &str) -> (String, Option<String>) {
    let tokens: Vec<&str> = street.split_whitespace().collect();
    let split_at = (2..tokens.len()).find(|&index| {
        let token = tokens[index];
        let self_contained = token.starts_with('#') && token.len() > 1;
        is_designator(token) && (self_contained || index + 1 < tokens.len())
    });

    match split_at {
        Some(index) => (
            tokens[..index].join(" "),
            Some(tokens[index..].join(" ")),
        ),
        None => (street.to_string(), None),
    }
}
