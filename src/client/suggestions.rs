use crate::models::Suggestion;
use crate::parser::city::{capitalize_words, format_suggestion};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
}

/// What the user asked to look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// A picked suggestion, already formatted as `"City, CC"`.
    Suggestion(String),
    /// The typed text, trimmed.
    Raw(String),
}

impl Submission {
    #[must_use]
    pub fn city(&self) -> &str {
        match self {
            Self::Suggestion(city) | Self::Raw(city) => city,
        }
    }
}

/// Input box state for city autocomplete: the typed text, the current
/// suggestions and which one is highlighted.
#[derive(Debug, Clone, Default)]
pub struct Autocomplete {
    input: String,
    suggestions: Vec<Suggestion>,
    highlight: Option<usize>,
    min_query_len: usize,
}

impl Autocomplete {
    #[must_use]
    pub fn new(min_query_len: usize) -> Self {
        Self {
            min_query_len,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    #[must_use]
    pub const fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    /// Replaces the typed text. Returns true when the trimmed text is long
    /// enough to fetch suggestions for; otherwise the suggestions are cleared.
    pub fn set_input(&mut self, value: &str) -> bool {
        self.input = value.to_string();
        self.highlight = None;

        let trimmed = value.trim();
        let wants_suggestions =
            !trimmed.is_empty() && trimmed.chars().count() >= self.min_query_len;
        if !wants_suggestions {
            self.suggestions.clear();
        }
        wants_suggestions
    }

    pub fn set_suggestions(&mut self, suggestions: Vec<Suggestion>) {
        self.suggestions = suggestions;
        self.highlight = None;
    }

    /// Picks suggestion `index` as if it had been clicked.
    pub fn select(&mut self, index: usize) -> Option<Submission> {
        let chosen = self.suggestions.get(index)?;
        if chosen.name.trim().is_empty() {
            return None;
        }

        let formatted = if chosen.country_code.trim().is_empty() {
            capitalize_words(chosen.name.trim())
        } else {
            format_suggestion(&chosen.name, &chosen.country_code)
        };

        self.input.clone_from(&formatted);
        self.suggestions.clear();
        self.highlight = None;
        Some(Submission::Suggestion(formatted))
    }

    /// Up and Down move the highlight, wrapping in both directions.
    /// Enter submits the highlighted suggestion, or the typed text when
    /// nothing is highlighted.
    pub fn on_key(&mut self, key: Key) -> Option<Submission> {
        let count = self.suggestions.len();

        match key {
            Key::Down if count > 0 => {
                self.highlight = Some(self.highlight.map_or(0, |i| (i + 1) % count));
                None
            }
            Key::Up if count > 0 => {
                self.highlight = Some(self.highlight.map_or(count - 1, |i| (i + count - 1) % count));
                None
            }
            Key::Up | Key::Down => None,
            Key::Enter => {
                if let Some(index) = self.highlight
                    && index < count
                {
                    return self.select(index);
                }

                let trimmed = self.input.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    let raw = trimmed.to_string();
                    self.suggestions.clear();
                    Some(Submission::Raw(raw))
                }
            }
        }
    }
}
