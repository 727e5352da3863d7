//! End-to-end tests of message processing through a recording channel.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::Mutex;
use tempfile::TempDir;

use namegen_bot::bot::{process_text, Keyboard, MessageChannel, SessionMachine};
use namegen_bot::config::DialogueConfig;
use namegen_bot::corpus::CorpusStore;
use namegen_bot::session_store::{InMemSessionStore, SessionStore, UserId};

#[derive(Debug, Clone, PartialEq)]
enum Sent {
    Text {
        user: UserId,
        text: String,
        keyboard: Keyboard,
    },
    Document {
        user: UserId,
        filename: String,
        contents: Vec<u8>,
        caption: String,
    },
}

#[derive(Default)]
struct RecordingChannel {
    sent: Mutex<Vec<Sent>>,
    fail_documents: bool,
    /// Texts longer than this many UTF-16 units are rejected
    text_limit: Option<usize>,
    /// Texts containing this marker are rejected
    reject_text: Option<&'static str>,
}

impl RecordingChannel {
    fn failing_documents() -> Self {
        Self {
            fail_documents: true,
            ..Self::default()
        }
    }

    fn with_text_limit(limit: usize) -> Self {
        Self {
            text_limit: Some(limit),
            ..Self::default()
        }
    }

    fn rejecting_text(marker: &'static str) -> Self {
        Self {
            reject_text: Some(marker),
            ..Self::default()
        }
    }

    fn take(&self) -> Vec<Sent> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }
}

#[async_trait]
impl MessageChannel for RecordingChannel {
    async fn send_text(&self, user: UserId, text: &str, keyboard: Keyboard) -> Result<()> {
        if let Some(limit) = self.text_limit {
            let len = text.encode_utf16().count();
            if len > limit {
                return Err(anyhow!("message is too long: {len} > {limit}"));
            }
        }
        if self.reject_text.is_some_and(|marker| text.contains(marker)) {
            return Err(anyhow!("message rejected"));
        }
        self.sent.lock().unwrap().push(Sent::Text {
            user,
            text: text.to_string(),
            keyboard,
        });
        Ok(())
    }

    async fn send_document(
        &self,
        user: UserId,
        contents: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> Result<()> {
        if self.fail_documents {
            return Err(anyhow!("upload rejected"));
        }
        self.sent.lock().unwrap().push(Sent::Document {
            user,
            filename: filename.to_string(),
            contents,
            caption: caption.to_string(),
        });
        Ok(())
    }
}

fn setup(dir: &TempDir, corpus_size: usize) -> SessionMachine<InMemSessionStore> {
    let names: Vec<String> = (0..corpus_size)
        .map(|i| format!("Haruto{i} Sato"))
        .collect();
    std::fs::write(dir.path().join("japan_male.txt"), names.join("\n")).unwrap();

    let config = DialogueConfig {
        seed: Some(99),
        ..DialogueConfig::default()
    };
    SessionMachine::new(InMemSessionStore::new(), CorpusStore::new(dir.path()), config)
}

async fn send_all(
    channel: &RecordingChannel,
    machine: &SessionMachine<InMemSessionStore>,
    user: UserId,
    messages: &[&str],
) -> Result<()> {
    send_all_in(channel, machine, user, messages, "en").await
}

async fn send_all_in(
    channel: &RecordingChannel,
    machine: &SessionMachine<InMemSessionStore>,
    user: UserId,
    messages: &[&str],
    language: &str,
) -> Result<()> {
    for message in messages {
        process_text(channel, machine, user, message, Some(language)).await?;
    }
    Ok(())
}

fn single_text(sent: &[Sent]) -> (&str, Keyboard) {
    assert_eq!(sent.len(), 1, "expected exactly one message: {sent:?}");
    match &sent[0] {
        Sent::Text { text, keyboard, .. } => (text.as_str(), *keyboard),
        other => panic!("expected text, got {other:?}"),
    }
}

/// Every transition emits exactly one message
#[tokio::test]
async fn test_japan_scenario_inline() -> Result<()> {
    let dir = TempDir::new()?;
    let machine = setup(&dir, 120);
    let channel = RecordingChannel::default();

    send_all(&channel, &machine, 10, &["🧠 Name Generator"]).await?;
    let sent = channel.take();
    let (text, keyboard) = single_text(&sent);
    assert!(text.contains("country"));
    assert_eq!(keyboard, Keyboard::None);

    send_all(&channel, &machine, 10, &["Japan"]).await?;
    let sent = channel.take();
    let (text, keyboard) = single_text(&sent);
    assert!(text.contains("Japan"));
    assert_eq!(keyboard, Keyboard::GenderMenu);

    send_all(&channel, &machine, 10, &["Male"]).await?;
    let sent = channel.take();
    let (text, _) = single_text(&sent);
    assert!(text.contains("5000"));

    send_all(&channel, &machine, 10, &["50"]).await?;
    let sent = channel.take();
    let (text, keyboard) = single_text(&sent);
    assert!(text.starts_with("✅ 50 male names from Japan:"));
    assert_eq!(keyboard, Keyboard::MainMenu);
    let names: Vec<&str> = text.split("\n\n").nth(1).unwrap().lines().collect();
    assert_eq!(names.len(), 50);
    assert_eq!(
        names.iter().collect::<std::collections::HashSet<_>>().len(),
        50
    );

    assert!(machine.store().get(10).is_none());

    send_all(&channel, &machine, 10, &["50"]).await?;
    let sent = channel.take();
    let (text, _) = single_text(&sent);
    assert_eq!(text, "Please choose an option from the menu.");

    Ok(())
}

/// A missing corpus names every attempted path and resets the session
#[tokio::test]
async fn test_atlantis_corpus_not_found() -> Result<()> {
    let dir = TempDir::new()?;
    let machine = setup(&dir, 10);
    let channel = RecordingChannel::default();

    send_all(&channel, &machine, 11, &["🧠 Name Generator", "Atlantis", "Male"]).await?;
    channel.take();

    send_all(&channel, &machine, 11, &["10"]).await?;
    let sent = channel.take();
    let (text, keyboard) = single_text(&sent);
    assert_eq!(keyboard, Keyboard::MainMenu);
    assert!(text.contains("Atlantis"));
    for file in [
        "atlantis_male.txt",
        "atlantis.txt",
        "atlantis_male_first.txt",
        "atlantis_last.txt",
    ] {
        assert!(text.contains(file), "{text} does not mention {file}");
    }
    assert!(machine.store().get(11).is_none());

    Ok(())
}

/// Above the threshold the names arrive as a single document
#[tokio::test]
async fn test_file_delivery_above_threshold() -> Result<()> {
    let dir = TempDir::new()?;
    let machine = setup(&dir, 400);
    let channel = RecordingChannel::default();

    send_all(&channel, &machine, 12, &["/names", "japan", "male"]).await?;
    channel.take();

    send_all(&channel, &machine, 12, &["200"]).await?;
    assert!(matches!(&channel.take()[..], [Sent::Text { .. }]));

    send_all(&channel, &machine, 12, &["/names", "japan", "male"]).await?;
    channel.take();
    send_all(&channel, &machine, 12, &["201"]).await?;
    match &channel.take()[..] {
        [Sent::Document {
            user,
            filename,
            contents,
            caption,
        }] => {
            assert_eq!(*user, 12);
            assert!(filename.starts_with("japan_male_names_"));
            assert!(caption.contains("201"));
            let body = String::from_utf8(contents.clone())?;
            assert_eq!(body.lines().count(), 201);
        }
        other => panic!("expected a document, got {other:?}"),
    }

    Ok(())
}

/// A request larger than the corpus returns the whole corpus with a note
#[tokio::test]
async fn test_exhausted_corpus() -> Result<()> {
    let dir = TempDir::new()?;
    let machine = setup(&dir, 30);
    let channel = RecordingChannel::default();

    send_all(&channel, &machine, 13, &["/names", "Japan", "Male"]).await?;
    channel.take();
    send_all(&channel, &machine, 13, &["100"]).await?;

    let sent = channel.take();
    let (text, _) = single_text(&sent);
    assert!(text.contains("Only 30 names are available"));
    assert_eq!(text.split("\n\n").nth(1).unwrap().lines().count(), 30);

    Ok(())
}

/// A failed upload produces a warning and leaves no session behind
#[tokio::test]
async fn test_delivery_failure_warns_user() -> Result<()> {
    let dir = TempDir::new()?;
    let machine = setup(&dir, 400);
    let channel = RecordingChannel::failing_documents();

    send_all(&channel, &machine, 14, &["/names", "Japan", "Male", "300"]).await?;
    let sent = channel.take();
    let last = sent.last().unwrap();
    assert_eq!(
        last,
        &Sent::Text {
            user: 14,
            text: "⚠️ Your file could not be delivered. Please try again.".to_string(),
            keyboard: Keyboard::MainMenu,
        }
    );
    assert!(machine.store().get(14).is_none());

    Ok(())
}

/// Large fake-data batches send a preview and a file
#[tokio::test]
async fn test_fake_data_preview_and_file() -> Result<()> {
    let dir = TempDir::new()?;
    let machine = setup(&dir, 10);
    let channel = RecordingChannel::default();

    send_all(
        &channel,
        &machine,
        15,
        &["🧩 Fake Data", "Germany", "Female", "250", "full_name, city, uuid"],
    )
    .await?;
    let sent = channel.take();
    let tail = &sent[sent.len() - 2..];

    match tail {
        [Sent::Text { text, .. }, Sent::Document {
            filename, contents, ..
        }] => {
            assert!(text.contains("first 10"));
            assert_eq!(text.split("\n\n").nth(1).unwrap().lines().count(), 10);
            assert!(filename.starts_with("germany_fake_data_"));
            assert_eq!(String::from_utf8(contents.clone())?.lines().count(), 250);
        }
        other => panic!("unexpected messages: {other:?}"),
    }

    Ok(())
}

const ALL_FIELDS: &str = "first_name, last_name, full_name, username, age, gender, city, state, \
                          country, postal_code, address, phone, email, job, company, uuid";

/// A preview with every field still fits in one Telegram message
#[tokio::test]
async fn test_fake_data_preview_fits_message_limit() -> Result<()> {
    let dir = TempDir::new()?;
    let machine = setup(&dir, 10);
    let channel = RecordingChannel::with_text_limit(4096);

    send_all_in(
        &channel,
        &machine,
        16,
        &[
            "/fakedata",
            "Saint Vincent and the Grenadines",
            "Female",
            "250",
            ALL_FIELDS,
        ],
        "fr",
    )
    .await?;
    let sent = channel.take();

    match &sent[sent.len() - 2..] {
        [Sent::Text { text, .. }, Sent::Document { contents, .. }] => {
            assert!(text.encode_utf16().count() <= 4096);
            let shown = text.split("\n\n").nth(1).unwrap().lines().count();
            assert!((1..=10).contains(&shown));
            assert!(text.contains(&format!("Voici les {shown} premières")));
            assert_eq!(String::from_utf8(contents.clone())?.lines().count(), 250);
        }
        other => panic!("unexpected messages: {other:?}"),
    }
    assert!(sent.iter().all(|s| !matches!(
        s,
        Sent::Text { text, .. } if text.starts_with("⚠️")
    )));

    Ok(())
}

/// A rejected result text is reported and the file still goes out
#[tokio::test]
async fn test_rejected_preview_still_delivers_file() -> Result<()> {
    let dir = TempDir::new()?;
    let machine = setup(&dir, 10);
    let channel = RecordingChannel::rejecting_text("Showing the first");

    send_all(
        &channel,
        &machine,
        17,
        &["🧩 Fake Data", "Germany", "Male", "250", "full_name, email"],
    )
    .await?;
    let sent = channel.take();

    match &sent[sent.len() - 2..] {
        [Sent::Text { text, keyboard, .. }, Sent::Document { filename, .. }] => {
            assert_eq!(
                text,
                "⚠️ A message could not be delivered. Please try again."
            );
            assert_eq!(*keyboard, Keyboard::MainMenu);
            assert!(filename.starts_with("germany_fake_data_"));
        }
        other => panic!("unexpected messages: {other:?}"),
    }
    assert!(machine.store().get(17).is_none());

    Ok(())
}

/// Users never see each other's sessions
#[tokio::test]
async fn test_sessions_do_not_leak_between_users() -> Result<()> {
    let dir = TempDir::new()?;
    let machine = setup(&dir, 100);
    let channel = RecordingChannel::default();

    send_all(&channel, &machine, 20, &["/names", "Japan"]).await?;
    send_all(&channel, &machine, 21, &["Male"]).await?;
    let sent = channel.take();

    assert_eq!(
        sent.last(),
        Some(&Sent::Text {
            user: 21,
            text: "Please choose an option from the menu.".to_string(),
            keyboard: Keyboard::MainMenu,
        })
    );
    assert_eq!(machine.store().len(), 1);

    Ok(())
}
