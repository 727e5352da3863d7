//! Output router: decides between inline text and a file attachment.

use chrono::Local;
use uuid::Uuid;

use crate::config::{INLINE_THRESHOLD, PREVIEW_RECORDS};
use crate::dialogue::Gender;
use crate::fake_data::FakeRecord;
use crate::text_normalization::country_slug;

/// A file to deliver as a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub filename: String,
    pub contents: String,
}

/// How a name list reaches the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamesDelivery {
    Inline(Vec<String>),
    File(OutputFile),
}

/// Fake-data delivery: always a preview, plus a file for large batches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordsDelivery {
    pub preview: Vec<String>,
    pub file: Option<OutputFile>,
}

#[derive(Debug, Clone, Copy)]
pub struct OutputRouter {
    inline_threshold: usize,
}

impl Default for OutputRouter {
    fn default() -> Self {
        Self::new(INLINE_THRESHOLD)
    }
}

impl OutputRouter {
    pub fn new(inline_threshold: usize) -> Self {
        Self { inline_threshold }
    }

    /// Inline when the requested count is within the threshold, file otherwise
    pub fn route_names(
        &self,
        country: &str,
        gender: Gender,
        requested: usize,
        names: Vec<String>,
    ) -> NamesDelivery {
        if requested <= self.inline_threshold {
            return NamesDelivery::Inline(names);
        }
        NamesDelivery::File(OutputFile {
            filename: names_filename(country, gender),
            contents: render_lines(&names),
        })
    }

    /// First records as a preview; the full set as a file above the threshold
    pub fn route_records(
        &self,
        country: &str,
        requested: usize,
        records: &[FakeRecord],
    ) -> RecordsDelivery {
        let preview = records
            .iter()
            .take(PREVIEW_RECORDS)
            .map(FakeRecord::render)
            .collect();

        let file = (requested > self.inline_threshold).then(|| {
            let lines: Vec<String> = records.iter().map(FakeRecord::render).collect();
            OutputFile {
                filename: fake_data_filename(country),
                contents: render_lines(&lines),
            }
        });

        RecordsDelivery { preview, file }
    }
}

/// One entry per line, newline-terminated
pub fn render_lines(lines: &[String]) -> String {
    let mut contents = lines.join("\n");
    contents.push('\n');
    contents
}

fn unique_suffix() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{}_{}", Local::now().format("%Y%m%d%H%M%S"), &id[..8])
}

/// `{slug}_{gender}_names_{timestamp}_{id}.txt`
pub fn names_filename(country: &str, gender: Gender) -> String {
    format!(
        "{}_{}_names_{}.txt",
        country_slug(country),
        gender.as_str(),
        unique_suffix()
    )
}

/// `{slug}_fake_data_{timestamp}_{id}.txt`
pub fn fake_data_filename(country: &str) -> String {
    format!("{}_fake_data_{}.txt", country_slug(country), unique_suffix())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("First{i} Last{i}")).collect()
    }

    #[test]
    fn test_threshold_boundary() {
        let router = OutputRouter::default();

        assert!(matches!(
            router.route_names("Japan", Gender::Male, 200, names(200)),
            NamesDelivery::Inline(list) if list.len() == 200
        ));
        match router.route_names("Japan", Gender::Male, 201, names(201)) {
            NamesDelivery::File(file) => {
                assert!(file.filename.starts_with("japan_male_names_"));
                assert!(file.filename.ends_with(".txt"));
                assert_eq!(file.contents.lines().count(), 201);
            }
            other => panic!("expected file delivery, got {other:?}"),
        }
    }

    #[test]
    fn test_filenames_are_unique() {
        assert_ne!(
            names_filename("United States", Gender::Mixed),
            names_filename("United States", Gender::Mixed)
        );
    }

    #[test]
    fn test_records_preview_and_file() {
        let router = OutputRouter::default();
        let records: Vec<FakeRecord> = (0..250)
            .map(|i| FakeRecord {
                values: vec![("age".into(), i.to_string())],
            })
            .collect();

        let small = router.route_records("Japan", 50, &records[..50]);
        assert_eq!(small.preview.len(), 10);
        assert!(small.file.is_none());

        let large = router.route_records("Japan", 250, &records);
        assert_eq!(large.preview.len(), 10);
        let file = large.file.unwrap();
        assert!(file.filename.starts_with("japan_fake_data_"));
        assert_eq!(file.contents.lines().count(), 250);
    }
}
