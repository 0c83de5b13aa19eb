//! Street-address tokenization.
//!
//! The scorer treats a cell as a street address when its tokens span at
//! least three distinct token classes, so "123 Main St" qualifies while a
//! bare number or a bare word does not. The tokenizer is a collaborator
//! seam: production can plug a full parser behind [`AddressTokenizer`].

/// Token class assigned by an address tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    HouseNumber,
    StreetName,
    StreetType,
    Directional,
    UnitType,
    UnitNumber,
    Other,
}

/// Splits text into (token, class) pairs.
pub trait AddressTokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<(String, TokenClass)>;
}

/// Number of distinct classes (excluding `Other`) required for a match.
pub const ADDRESS_CLASS_MINIMUM: usize = 3;

/// True when the tokenized text spans enough distinct classes.
pub fn looks_like_address(tokenizer: &dyn AddressTokenizer, text: &str) -> bool {
    let mut classes = std::collections::HashSet::new();
    for (_, class) in tokenizer.tokenize(text) {
        if class != TokenClass::Other {
            classes.insert(class);
        }
    }
    classes.len() >= ADDRESS_CLASS_MINIMUM
}

/// Rule-based tokenizer for US-style street addresses.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsStreetTokenizer;

const STREET_TYPES: &[&str] = &[
    "st", "street", "ave", "avenue", "rd", "road", "blvd", "boulevard", "dr", "drive", "ln",
    "lane", "ct", "court", "pl", "place", "ter", "terrace", "way", "cir", "circle", "pkwy",
    "parkway", "hwy", "highway", "sq", "square", "trl", "trail",
];

const DIRECTIONALS: &[&str] = &[
    "n", "s", "e", "w", "ne", "nw", "se", "sw", "north", "south", "east", "west",
];

const UNIT_TYPES: &[&str] = &["apt", "apartment", "suite", "ste", "unit", "bldg", "floor", "fl"];

impl AddressTokenizer for UsStreetTokenizer {
    fn tokenize(&self, text: &str) -> Vec<(String, TokenClass)> {
        let mut tokens = Vec::new();
        let mut saw_unit_type = false;

        for (position, raw) in text.split_whitespace().enumerate() {
            let token = raw.trim_matches(|c: char| c == ',' || c == '.');
            if token.is_empty() {
                continue;
            }
            let lower = token.to_lowercase();

            let class = if token.starts_with('#') && token[1..].chars().all(|c| c.is_ascii_digit())
            {
                TokenClass::UnitNumber
            } else if token.chars().all(|c| c.is_ascii_digit()) {
                if saw_unit_type {
                    TokenClass::UnitNumber
                } else if position == 0 {
                    TokenClass::HouseNumber
                } else {
                    TokenClass::Other
                }
            } else if UNIT_TYPES.contains(&lower.as_str()) {
                saw_unit_type = true;
                TokenClass::UnitType
            } else if STREET_TYPES.contains(&lower.as_str()) {
                TokenClass::StreetType
            } else if DIRECTIONALS.contains(&lower.as_str()) {
                TokenClass::Directional
            } else if token.chars().all(char::is_alphabetic) {
                TokenClass::StreetName
            } else {
                TokenClass::Other
            };

            tokens.push((token.to_string(), class));
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_address_matches() {
        let tok = UsStreetTokenizer;
        assert!(looks_like_address(&tok, "123 Main St"));
        assert!(looks_like_address(&tok, "8 W Cerritos Ave #54"));
        assert!(looks_like_address(&tok, "9930 Valley View Rd Suite 12"));
    }

    #[test]
    fn test_non_addresses_do_not_match() {
        let tok = UsStreetTokenizer;
        assert!(!looks_like_address(&tok, "hello world"));
        assert!(!looks_like_address(&tok, "12345"));
        assert!(!looks_like_address(&tok, "New Orleans"));
        assert!(!looks_like_address(&tok, ""));
    }

    #[test]
    fn test_token_classes() {
        let tok = UsStreetTokenizer;
        let tokens = tok.tokenize("123 N Main St Apt 4");
        let classes: Vec<TokenClass> = tokens.iter().map(|(_, c)| *c).collect();
        assert_eq!(
            classes,
            vec![
                TokenClass::HouseNumber,
                TokenClass::Directional,
                TokenClass::StreetName,
                TokenClass::StreetType,
                TokenClass::UnitType,
                TokenClass::UnitNumber,
            ]
        );
    }
}
