pub mod city;

pub use city::{capitalize_words, format_suggestion, normalize_city};
