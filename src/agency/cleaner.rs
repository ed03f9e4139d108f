use regex::{Captures, Regex};
use titlecase::titlecase;

use super::config::AgencyConfig;

/// Characters that can be dropped from either end of a name
const SEPARATORS: &str = r"[\s,;:/\-–]";

const STREET_TYPES: [(&str, &str); 8] = [
    ("st", "Street"),
    ("ave", "Avenue"),
    ("av", "Avenue"),
    ("blvd", "Boulevard"),
    ("rd", "Road"),
    ("dr", "Drive"),
    ("cres", "Crescent"),
    ("pkwy", "Parkway"),
];

// Mac is too ambiguous to re-case generally (Mackenzie, Machine)
const MAC_NAMES: &str = "arthur|kay|laren|leod|millan|nab|pherson";

/// Stop name cleaning. Stages run in order, each one expecting the previous:
/// brand token, trailing direction, upper case words, cosmetics.
///
/// Running it on its own output changes nothing.
pub struct StopNameCleaner {
    brand: Option<Regex>,
    empty_brackets: Regex,
    leading_separators: Regex,
    trailing_separators: Regex,
    trailing_direction: Regex,
    letters: Regex,
    mc: Regex,
    mac: Regex,
    open_bracket_inner: Regex,
    close_bracket_inner: Regex,
    open_bracket_outer: Regex,
    close_bracket_outer: Regex,
    ordinal: Regex,
    street_type: Regex,
    space_before_punctuation: Regex,
}

impl StopNameCleaner {
    pub fn new(config: &AgencyConfig) -> Self {
        // It's important these are compiled once, cleaning runs for every stop
        let brand = (!config.brand_tokens().is_empty()).then(|| {
            let words = config
                .brand_tokens()
                .iter()
                .map(|token| regex::escape(token))
                .collect::<Vec<_>>()
                .join("|");
            Regex::new(&format!(r"(?i)\b(?:{})\b", words)).unwrap()
        });

        Self {
            brand,
            empty_brackets: Regex::new(r"\(\s*\)").unwrap(),
            leading_separators: Regex::new(&format!("^{}+", SEPARATORS)).unwrap(),
            trailing_separators: Regex::new(&format!("{}+$", SEPARATORS)).unwrap(),
            trailing_direction: Regex::new(
                r"(?i)(?:^|[\s(),/\-])(?:[nsewo]\.|north\s*/\s*nord|south\s*/\s*sud|east\s*/\s*est|west\s*/\s*ouest)$",
            )
            .unwrap(),
            letters: Regex::new(r"\p{L}+(?:['’]\p{L}+)*").unwrap(),
            mc: Regex::new(r"\bMc(\p{Ll})").unwrap(),
            mac: Regex::new(&format!(r"\bMac({})\b", MAC_NAMES)).unwrap(),
            open_bracket_inner: Regex::new(r"\(\s+").unwrap(),
            close_bracket_inner: Regex::new(r"\s+\)").unwrap(),
            open_bracket_outer: Regex::new(r"([^\s(])\(").unwrap(),
            close_bracket_outer: Regex::new(r"\)([^\s),.;:])").unwrap(),
            ordinal: Regex::new(r"(?i)\b(\d+)(st|nd|rd|th)\b").unwrap(),
            street_type: Regex::new(r"(?i)^(st|ave|av|blvd|rd|dr|cres|pkwy)\.?([,;:]?)$").unwrap(),
            space_before_punctuation: Regex::new(r"\s+([,;:])").unwrap(),
        }
    }

    pub fn clean(&self, name: &str) -> String {
        let name = self.strip_brand(name);
        let name = self.strip_trailing_directions(&name);
        let name = self.fix_uppercase_words(&name);
        self.fix_cosmetics(&name)
    }

    fn collapse_whitespace(name: &str) -> String {
        name.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn trim_separators(&self, name: &str) -> String {
        let name = self.leading_separators.replace(name, "");
        self.trailing_separators.replace(&name, "").into_owned()
    }

    /// Removes the brand as if it was never written
    fn strip_brand(&self, name: &str) -> String {
        let mut name = name.to_string();
        if let Some(brand) = &self.brand {
            // removing one occurrence can make another one whole
            loop {
                let stripped = brand.replace_all(&name, "").into_owned();
                if stripped == name {
                    break;
                }
                name = stripped;
            }
        }
        let name = self.empty_brackets.replace_all(&name, "");
        self.trim_separators(&Self::collapse_whitespace(&name))
    }

    /// `Bayview N.`, `Blair East / Est`. Only at the end of the name
    fn strip_trailing_directions(&self, name: &str) -> String {
        let mut name = self.trim_separators(name);
        loop {
            let stripped = self.trailing_direction.replace(&name, "").into_owned();
            if stripped == name {
                break;
            }
            name = self.trim_separators(&stripped);
        }
        name
    }

    /// `BAYVIEW` becomes `Bayview`, `McArthur` stays as is
    fn fix_uppercase_words(&self, name: &str) -> String {
        self.letters
            .replace_all(name, |caps: &Captures| {
                let word = &caps[0];
                let all_upper = word.chars().any(char::is_uppercase)
                    && !word.chars().any(char::is_lowercase);
                if all_upper && word.chars().count() > 1 {
                    titlecase(&word.to_lowercase())
                } else {
                    word.to_string()
                }
            })
            .into_owned()
    }

    fn fix_cosmetics(&self, name: &str) -> String {
        let name = self.mc.replace_all(name, |caps: &Captures| {
            format!("Mc{}", caps[1].to_uppercase())
        });
        let name = self.mac.replace_all(&name, |caps: &Captures| {
            let rest = &caps[1];
            format!("Mac{}{}", rest[..1].to_uppercase(), &rest[1..])
        });

        let name = self.open_bracket_inner.replace_all(&name, "(");
        let name = self.close_bracket_inner.replace_all(&name, ")");
        let name = self.open_bracket_outer.replace_all(&name, "$1 (");
        let name = self.close_bracket_outer.replace_all(&name, ") $1");

        let name = self.ordinal.replace_all(&name, |caps: &Captures| {
            format!("{}{}", &caps[1], caps[2].to_lowercase())
        });

        let name = self.space_before_punctuation.replace_all(&name, "$1");

        // street types come after the street name, a leading `St` is a saint
        name.split_whitespace()
            .enumerate()
            .map(|(i, word)| match self.street_type.captures(word) {
                Some(caps) if i > 0 => {
                    let key = caps[1].to_lowercase();
                    let expanded = STREET_TYPES
                        .iter()
                        .find(|(abbreviation, _)| *abbreviation == key)
                        .map(|(_, expanded)| *expanded)
                        .unwrap_or(word);
                    format!("{}{}", expanded, &caps[2])
                }
                _ => word.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
