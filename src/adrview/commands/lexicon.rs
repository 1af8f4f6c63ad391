use crate::commands::{CmdMessage, CmdResult, LexiconEntry};
use crate::lexicon::{Field, Lexicon};
use crate::model::Status;

/// Keyword tables of `lexicon`, for every language or just `lang`.
pub fn run(lexicon: &Lexicon, lang: Option<&str>) -> CmdResult {
    let languages: Vec<&str> = match lang {
        Some(lang) => vec![lang],
        None => lexicon.languages(),
    };

    let mut entries = Vec::new();
    for language in &languages {
        let mut push = |label: &str, keywords: &[String]| {
            if !keywords.is_empty() {
                entries.push(LexiconEntry {
                    language: language.to_string(),
                    label: label.to_string(),
                    keywords: keywords.to_vec(),
                });
            }
        };
        push("status", lexicon.field_keywords_for(Field::Status, language));
        push("date", lexicon.field_keywords_for(Field::Date, language));
        for status in Status::CLASSIFICATION_ORDER {
            push(status.as_str(), lexicon.status_keywords_for(status, language));
        }
    }

    let mut result = CmdResult::default();
    if entries.is_empty() {
        let message = match lang {
            Some(lang) => format!("No keywords for language '{}'.", lang),
            None => "The lexicon is empty.".to_string(),
        };
        result.add_message(CmdMessage::warning(message));
    }
    result.with_lexicon(entries)
}
