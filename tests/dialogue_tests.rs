use anyhow::Result;
use tempfile::TempDir;

use namegen_bot::bot::{Action, SessionMachine};
use namegen_bot::config::DialogueConfig;
use namegen_bot::corpus::CorpusStore;
use namegen_bot::dialogue::{FlowKind, Gender, Session, Step};
use namegen_bot::errors::InputError;
use namegen_bot::output_router::NamesDelivery;
use namegen_bot::session_store::{InMemSessionStore, SessionStore};

fn machine_with_corpus(dir: &TempDir) -> SessionMachine<InMemSessionStore> {
    let names: Vec<String> = (0..80).map(|i| format!("Taro{i} Tanaka")).collect();
    std::fs::write(dir.path().join("japan_male.txt"), names.join("\n")).unwrap();

    let config = DialogueConfig {
        seed: Some(17),
        ..DialogueConfig::default()
    };
    SessionMachine::new(InMemSessionStore::new(), CorpusStore::new(dir.path()), config)
}

/// A gender-shaped message at the country step is a country
#[tokio::test]
async fn test_strict_step_ordering() -> Result<()> {
    let dir = TempDir::new()?;
    let machine = machine_with_corpus(&dir);

    machine.handle(7, "🧠 Name Generator").await;
    let action = machine.handle(7, "male").await;

    assert_eq!(
        action,
        Action::AskGender {
            flow: FlowKind::Names,
            country: "male".to_string()
        }
    );
    let session = machine.store().get(7).unwrap();
    assert_eq!(session.step, Step::AwaitGender);
    assert_eq!(session.country.as_deref(), Some("male"));
    assert_eq!(session.gender, None);

    // A count-looking message at the country step is also a country
    machine.handle(8, "/names").await;
    assert!(matches!(
        machine.handle(8, "50").await,
        Action::AskGender { .. }
    ));

    Ok(())
}

/// Navigation resets any step and a new flow always starts cleanly
#[tokio::test]
async fn test_navigation_reset_from_every_step() -> Result<()> {
    let dir = TempDir::new()?;
    let machine = machine_with_corpus(&dir);
    let inputs = ["Japan", "Female", "5000"];

    for depth in 0..=inputs.len() {
        machine.handle(1, "🧩 Fake Data").await;
        for input in &inputs[..depth] {
            machine.handle(1, input).await;
        }

        assert_eq!(machine.handle(1, "🏠 Main Menu").await, Action::MainMenu);
        assert!(machine.store().get(1).is_none());

        assert_eq!(
            machine.handle(1, "🧠 Name Generator").await,
            Action::AskCountry {
                flow: FlowKind::Names
            }
        );
        assert_eq!(machine.store().get(1), Some(Session::start(FlowKind::Names)));
        machine.handle(1, "/start").await;
    }

    Ok(())
}

/// Starting a flow mid-dialogue silently discards the old session
#[tokio::test]
async fn test_flow_restart_discards_progress() -> Result<()> {
    let dir = TempDir::new()?;
    let machine = machine_with_corpus(&dir);

    machine.handle(3, "🧠 Name Generator").await;
    machine.handle(3, "Japan").await;
    machine.handle(3, "Male").await;

    machine.handle(3, "🧩 Fake Data").await;
    let session = machine.store().get(3).unwrap();
    assert_eq!(session.flow, FlowKind::FakeData);
    assert_eq!(session.step, Step::AwaitCountry);
    assert_eq!(session.country, None);

    Ok(())
}

/// Count validation re-prompts without advancing
#[tokio::test]
async fn test_count_errors_keep_step() -> Result<()> {
    let dir = TempDir::new()?;
    let machine = machine_with_corpus(&dir);

    machine.handle(4, "/names").await;
    machine.handle(4, "Japan").await;
    machine.handle(4, "MALE").await;

    assert!(matches!(
        machine.handle(4, "fifty").await,
        Action::Invalid {
            error: InputError::NotANumber(_),
            step: Step::AwaitCount
        }
    ));
    assert_eq!(
        machine.handle(4, "5001").await,
        Action::Invalid {
            error: InputError::OutOfRange { min: 1, max: 5000 },
            step: Step::AwaitCount
        }
    );
    assert_eq!(machine.store().get(4).map(|s| s.step), Some(Step::AwaitCount));
    assert_eq!(machine.store().get(4).and_then(|s| s.gender), Some(Gender::Male));

    Ok(())
}

/// Japan → Male → 50 yields 50 distinct inline names and removes the session
#[tokio::test]
async fn test_names_flow_ends_session() -> Result<()> {
    let dir = TempDir::new()?;
    let machine = machine_with_corpus(&dir);

    machine.handle(5, "name generator").await;
    machine.handle(5, "Japan").await;
    machine.handle(5, "Male").await;

    match machine.handle(5, "50").await {
        Action::Names(result) => {
            assert_eq!(result.produced, 50);
            assert_eq!(result.country, "Japan");
            match result.delivery {
                NamesDelivery::Inline(names) => {
                    let unique: std::collections::HashSet<_> = names.iter().collect();
                    assert_eq!(unique.len(), 50);
                }
                other => panic!("expected inline delivery, got {other:?}"),
            }
        }
        other => panic!("expected names, got {other:?}"),
    }

    assert!(machine.store().get(5).is_none());
    assert_eq!(machine.handle(5, "50").await, Action::ChooseOption);

    Ok(())
}

/// The fake-data flow asks for fields and falls back to defaults when disabled
#[tokio::test]
async fn test_fake_data_field_step() -> Result<()> {
    let dir = TempDir::new()?;
    let machine = machine_with_corpus(&dir);

    machine.handle(6, "🧩 Fake Data").await;
    machine.handle(6, "Japan").await;
    machine.handle(6, "Mixed").await;
    assert_eq!(machine.handle(6, "3").await, Action::AskFields);

    assert!(matches!(
        machine.handle(6, " , ").await,
        Action::Invalid {
            error: InputError::EmptyFields,
            step: Step::AwaitFields
        }
    ));

    match machine.handle(6, "full_name, email, hobby").await {
        Action::FakeData(result) => {
            assert_eq!(result.count, 3);
            assert_eq!(result.delivery.preview.len(), 3);
            assert!(result.delivery.file.is_none());
            assert!(result.delivery.preview[0].contains("hobby: N/A"));
        }
        other => panic!("expected fake data, got {other:?}"),
    }
    assert!(machine.store().get(6).is_none());

    let simple = SessionMachine::new(
        InMemSessionStore::new(),
        CorpusStore::new(dir.path()),
        DialogueConfig {
            ask_fields: false,
            ..DialogueConfig::default()
        },
    );
    simple.handle(6, "🧩 Fake Data").await;
    simple.handle(6, "Norway").await;
    simple.handle(6, "Female").await;
    match simple.handle(6, "2").await {
        Action::FakeData(result) => {
            let line = &result.delivery.preview[0];
            for key in ["full_name:", "age:", "city:", "email:", "phone:", "country: Norway"] {
                assert!(line.contains(key), "{line} is missing {key}");
            }
        }
        other => panic!("expected fake data, got {other:?}"),
    }

    Ok(())
}
