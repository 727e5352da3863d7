//! UI Builder module for creating keyboards and formatting messages

use teloxide::types::{KeyboardButton, KeyboardMarkup};

// Import localization
use crate::localization::{t_args_lang, t_lang};

use crate::config::{DialogueConfig, MESSAGE_TEXT_LIMIT};
use crate::dialogue::{FlowKind, Gender};
use crate::fake_data::Field;
use crate::output_router::NamesDelivery;

use super::dialogue_manager::Action;

// Button labels; the dialogue classifier matches them without the emoji
pub const BUTTON_NAME_GENERATOR: &str = "🧠 Name Generator";
pub const BUTTON_FAKE_DATA: &str = "🧩 Fake Data";
pub const BUTTON_MAIN_MENU: &str = "🏠 Main Menu";

/// Reply keyboard attached to a text message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyboard {
    MainMenu,
    GenderMenu,
    None,
}

/// A message to send for an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Text {
        text: String,
        keyboard: Keyboard,
    },
    Document {
        filename: String,
        contents: Vec<u8>,
        caption: String,
    },
}

impl Outbound {
    fn text(text: String, keyboard: Keyboard) -> Self {
        Outbound::Text { text, keyboard }
    }
}

/// Main menu: both generators plus the reset button
pub fn main_menu_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![
            KeyboardButton::new(BUTTON_NAME_GENERATOR),
            KeyboardButton::new(BUTTON_FAKE_DATA),
        ],
        vec![KeyboardButton::new(BUTTON_MAIN_MENU)],
    ])
    .resize_keyboard()
}

/// Gender choices plus the reset button
pub fn gender_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        [Gender::Male, Gender::Female, Gender::Mixed]
            .iter()
            .map(|g| KeyboardButton::new(g.label()))
            .collect(),
        vec![KeyboardButton::new(BUTTON_MAIN_MENU)],
    ])
    .resize_keyboard()
}

/// Build the Telegram keyboard for a [`Keyboard`] choice
pub fn keyboard_markup(keyboard: Keyboard) -> Option<KeyboardMarkup> {
    match keyboard {
        Keyboard::MainMenu => Some(main_menu_keyboard()),
        Keyboard::GenderMenu => Some(gender_keyboard()),
        Keyboard::None => None,
    }
}

fn available_fields() -> String {
    [
        Field::FirstName,
        Field::LastName,
        Field::FullName,
        Field::Username,
        Field::Age,
        Field::Gender,
        Field::City,
        Field::State,
        Field::Country,
        Field::PostalCode,
        Field::Address,
        Field::Phone,
        Field::Email,
        Field::Job,
        Field::Company,
        Field::Uuid,
    ]
    .iter()
    .map(|f| f.key().to_string())
    .collect::<Vec<_>>()
    .join(", ")
}

/// Render an action into the messages to send, in order
pub fn render_action(
    action: &Action,
    config: &DialogueConfig,
    language_code: Option<&str>,
) -> Vec<Outbound> {
    let max = config.max_count.to_string();

    match action {
        Action::Welcome => vec![Outbound::text(
            t_lang("welcome", language_code),
            Keyboard::MainMenu,
        )],
        Action::Help => {
            let threshold = config.inline_threshold.to_string();
            vec![Outbound::text(
                t_args_lang(
                    "help",
                    &[("max", &max), ("threshold", &threshold)],
                    language_code,
                ),
                Keyboard::MainMenu,
            )]
        }
        Action::MainMenu => vec![Outbound::text(
            t_lang("main-menu", language_code),
            Keyboard::MainMenu,
        )],
        Action::ChooseOption => vec![Outbound::text(
            t_lang("choose-option", language_code),
            Keyboard::MainMenu,
        )],
        Action::AskCountry { flow } => {
            let key = match flow {
                FlowKind::Names => "ask-country",
                FlowKind::FakeData => "ask-country-fake",
            };
            vec![Outbound::text(t_lang(key, language_code), Keyboard::None)]
        }
        Action::AskGender { country, .. } => vec![Outbound::text(
            t_args_lang(
                "ask-gender",
                &[("country", &crate::text_normalization::title_case(country))],
                language_code,
            ),
            Keyboard::GenderMenu,
        )],
        Action::AskCount { flow, .. } => {
            let key = match flow {
                FlowKind::Names => "ask-count",
                FlowKind::FakeData => "ask-count-fake",
            };
            vec![Outbound::text(
                t_args_lang(key, &[("max", &max)], language_code),
                Keyboard::None,
            )]
        }
        Action::AskFields => vec![Outbound::text(
            t_args_lang("ask-fields", &[("fields", &available_fields())], language_code),
            Keyboard::None,
        )],
        Action::Invalid { error, .. } => {
            let keyboard = match error {
                crate::errors::InputError::InvalidGender(_) => Keyboard::GenderMenu,
                _ => Keyboard::None,
            };
            vec![Outbound::text(render_input_error(error, language_code), keyboard)]
        }
        Action::CorpusNotFound(error) => vec![Outbound::text(
            render_corpus_error(error, language_code),
            Keyboard::MainMenu,
        )],
        Action::Names(result) => {
            let count = result.produced.to_string();
            let args = [
                ("count", count.as_str()),
                ("country", result.country.as_str()),
                ("gender", result.gender.as_str()),
            ];
            let exhausted = (result.produced < result.requested as usize).then(|| {
                let requested = result.requested.to_string();
                t_args_lang(
                    "names-exhausted",
                    &[("available", count.as_str()), ("requested", requested.as_str())],
                    language_code,
                )
            });
            let with_note = |mut text: String| {
                if let Some(note) = &exhausted {
                    text.push('\n');
                    text.push_str(note);
                }
                text
            };

            match &result.delivery {
                NamesDelivery::Inline(names) => {
                    let header =
                        with_note(t_args_lang("names-success-inline", &args, language_code));
                    vec![Outbound::text(
                        format!("{header}\n\n{}", names.join("\n")),
                        Keyboard::MainMenu,
                    )]
                }
                NamesDelivery::File(file) => vec![Outbound::Document {
                    filename: file.filename.clone(),
                    contents: file.contents.clone().into_bytes(),
                    caption: with_note(t_args_lang("names-file-caption", &args, language_code)),
                }],
            }
        }
        Action::FakeData(result) => {
            let count = result.count.to_string();
            let header_for = |shown: usize| {
                let shown = shown.to_string();
                t_args_lang(
                    "fake-success-preview",
                    &[
                        ("count", count.as_str()),
                        ("country", result.country.as_str()),
                        ("shown", shown.as_str()),
                    ],
                    language_code,
                )
            };

            let mut messages = vec![Outbound::text(
                fit_preview(header_for, &result.delivery.preview, MESSAGE_TEXT_LIMIT),
                Keyboard::MainMenu,
            )];
            if let Some(file) = &result.delivery.file {
                messages.push(Outbound::Document {
                    filename: file.filename.clone(),
                    contents: file.contents.clone().into_bytes(),
                    caption: t_args_lang(
                        "fake-file-caption",
                        &[("count", count.as_str()), ("country", result.country.as_str())],
                        language_code,
                    ),
                });
            }
            messages
        }
    }
}

fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Header followed by as many preview lines as fit in `limit` UTF-16 units.
///
/// The header is rebuilt for the number of lines kept. A single line that
/// still does not fit is cut short and ends with `…`.
fn fit_preview<F>(header_for: F, lines: &[String], limit: usize) -> String
where
    F: Fn(usize) -> String,
{
    for shown in (1..=lines.len()).rev() {
        let text = format!("{}\n\n{}", header_for(shown), lines[..shown].join("\n"));
        if utf16_len(&text) <= limit {
            return text;
        }
    }

    let Some(first) = lines.first() else {
        return header_for(0);
    };
    let header = header_for(1);
    let budget = limit.saturating_sub(utf16_len(&header) + 3);
    let mut used = 0;
    let line: String = first
        .chars()
        .take_while(|c| {
            used += c.len_utf16();
            used <= budget
        })
        .collect();
    format!("{header}\n\n{line}…")
}

/// Localized re-prompt for a validation error
pub fn render_input_error(
    error: &crate::errors::InputError,
    language_code: Option<&str>,
) -> String {
    use crate::errors::InputError;

    match error {
        InputError::OutOfRange { min, max } => {
            let (min, max) = (min.to_string(), max.to_string());
            t_args_lang(
                error.localization_key(),
                &[("min", &min), ("max", &max)],
                language_code,
            )
        }
        InputError::UnsupportedCountryName(input) | InputError::UnknownCountry(input) => {
            t_args_lang(error.localization_key(), &[("input", input)], language_code)
        }
        _ => t_lang(error.localization_key(), language_code),
    }
}

/// Localized corpus failure naming every attempted path
pub fn render_corpus_error(
    error: &crate::errors::CorpusError,
    language_code: Option<&str>,
) -> String {
    use crate::errors::CorpusError;

    match error {
        CorpusError::NotFound {
            country,
            gender,
            attempted,
        } => {
            let paths = attempted
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            let country = crate::text_normalization::title_case(country);
            t_args_lang(
                "corpus-not-found",
                &[
                    ("country", country.as_str()),
                    ("gender", gender.as_str()),
                    ("paths", paths.as_str()),
                ],
                language_code,
            )
        }
        CorpusError::Io { .. } => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::dialogue_manager::NamesResult;
    use crate::dialogue::Step;
    use crate::errors::InputError;
    use crate::output_router::OutputFile;

    #[test]
    fn test_gender_error_reshows_gender_keyboard() {
        let action = Action::Invalid {
            error: InputError::InvalidGender("robot".into()),
            step: Step::AwaitGender,
        };
        let messages = render_action(&action, &DialogueConfig::default(), Some("en"));
        assert_eq!(
            messages,
            vec![Outbound::Text {
                text: "❌ Please select: Male / Female / Mixed".to_string(),
                keyboard: Keyboard::GenderMenu,
            }]
        );
    }

    #[test]
    fn test_fit_preview_drops_lines_over_limit() {
        let lines: Vec<String> = (0..10).map(|i| format!("{i}: {}", "x".repeat(97))).collect();
        let header_for = |shown: usize| format!("first {shown}:");

        let text = fit_preview(header_for, &lines, 450);
        assert!(utf16_len(&text) <= 450);
        assert!(text.starts_with("first 4:"));
        assert_eq!(text.split("\n\n").nth(1).unwrap().lines().count(), 4);

        let text = fit_preview(header_for, &lines, 60);
        assert!(utf16_len(&text) <= 60);
        assert!(text.starts_with("first 1:\n\n0: xxx"));
        assert!(text.ends_with('…'));
    }

    #[test]
    fn test_exhausted_note_in_file_caption() {
        let action = Action::Names(NamesResult {
            country: "Japan".into(),
            gender: Gender::Male,
            requested: 300,
            produced: 250,
            delivery: NamesDelivery::File(OutputFile {
                filename: "japan_male_names_x.txt".into(),
                contents: "Kenta Sato\n".into(),
            }),
        });
        let messages = render_action(&action, &DialogueConfig::default(), Some("en"));
        match &messages[..] {
            [Outbound::Document { caption, .. }] => {
                assert!(caption.starts_with("✅ 250 male names from Japan"));
                assert!(caption.contains("Only 250 names are available"));
            }
            other => panic!("expected a document, got {other:?}"),
        }
    }

    #[test]
    fn test_file_delivery_renders_single_document() {
        let action = Action::Names(NamesResult {
            country: "Japan".into(),
            gender: Gender::Female,
            requested: 300,
            produced: 300,
            delivery: NamesDelivery::File(OutputFile {
                filename: "japan_female_names_x.txt".into(),
                contents: "Yumi Sato\n".into(),
            }),
        });
        let messages = render_action(&action, &DialogueConfig::default(), None);
        assert_eq!(messages.len(), 1);
        assert!(matches!(
            &messages[0],
            Outbound::Document { filename, caption, .. }
                if filename == "japan_female_names_x.txt" && caption.contains("300")
        ));
    }
}
