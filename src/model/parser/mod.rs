pub mod post_text_classifier;
pub mod status_parser;
