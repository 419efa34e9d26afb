//! Keyword classifier mapping a free-text description to an activity type.

use common::model::activity::ActivityType;

/// Keyword sets in evaluation order; the first set with a match wins.
const DEFAULT_RULES: &[(ActivityType, &[&str])] = &[
    (
        ActivityType::Waste,
        &["waste", "landfill", "trash", "garbage", "recycl", "disposal", "scrap", "compost"],
    ),
    (
        ActivityType::Transport,
        &[
            "truck", "delivery", "fleet", "freight", "shipping", "shipment", "logistic", "flight",
            "travel", "vehicle", "diesel", "petrol", "gasoline", "fuel", "taxi", "train", "van ",
            "commute", "mileage",
        ],
    ),
    (
        ActivityType::Energy,
        &[
            "electric", "energy", "power", "kwh", "natural gas", "heating", "hvac", "utility",
            "utilities", "server", "data center", "lighting", "solar", "grid",
        ],
    ),
    (
        ActivityType::SupplyChain,
        &[
            "purchase", "procure", "supplier", "vendor", "material", "packaging", "goods",
            "inventory", "steel", "plastic", "paper", "component", "raw ",
        ],
    ),
];

#[derive(Debug, Clone)]
struct KeywordRule {
    activity_type: ActivityType,
    keywords: Vec<String>,
}

/// Case-insensitive substring classifier. Total: every input, including the
/// empty string, maps to some type (`other` when nothing matches).
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<KeywordRule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new(
            DEFAULT_RULES
                .iter()
                .map(|(activity_type, keywords)| {
                    let keywords = keywords.iter().map(|k| k.to_string()).collect::<Vec<_>>();
                    (*activity_type, keywords)
                }),
        )
    }
}

impl Classifier {
    pub fn new<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = (ActivityType, Vec<String>)>,
    {
        let rules = rules
            .into_iter()
            .map(|(activity_type, keywords)| KeywordRule {
                activity_type,
                keywords: keywords
                    .into_iter()
                    .map(|k| k.to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect(),
            })
            .collect();
        Classifier { rules }
    }

    pub fn classify(&self, description: &str) -> ActivityType {
        // Padding lets keywords ending in a space also match at the end of the text.
        let haystack = format!("{} ", description.to_lowercase());
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| haystack.contains(k.as_str())))
            .map(|rule| rule.activity_type)
            .unwrap_or(ActivityType::Other)
    }
}
