//! Natural-language matching: extractors and the intent classifier.

mod classifier;
mod extractor;

pub use classifier::{IntentClassifier, RuleClassifier};
pub use extractor::{
    extract_flight_number, extract_integer, extract_search_params, parse_br_date, SearchParams,
};
