//! Filing document loading.

use std::fs;

use tracing::debug;

use earnings_core::{DocumentFormat, EarningsError, Filing, Result};
use earnings_html::Classifier;

static PLAIN_TEXT: Classifier = Classifier::PlainText;

/// A filing with its text loaded.
#[derive(Clone, Debug)]
pub struct Document {
    /// The filing the text came from.
    pub filing: Filing,
    /// HTML markup, or plain text for PDF filings.
    pub text: String,
}

impl Document {
    /// Wraps already loaded text.
    #[must_use]
    pub const fn new(filing: Filing, text: String) -> Self {
        Self { filing, text }
    }

    /// Reads a filing from disk. PDF text is extracted page by page.
    ///
    /// # Errors
    ///
    /// Returns [`EarningsError::Io`] if the file cannot be read and
    /// [`EarningsError::Pdf`] if text extraction fails.
    pub fn load(filing: &Filing) -> Result<Self> {
        let text = match filing.format {
            DocumentFormat::Html | DocumentFormat::Text => {
                let bytes = fs::read(&filing.path).map_err(|e| EarningsError::io(&filing.path, e))?;
                String::from_utf8_lossy(&bytes).into_owned()
            }
            DocumentFormat::Pdf => pdf_extract::extract_text(&filing.path).map_err(|e| {
                EarningsError::Pdf {
                    path: filing.path.clone(),
                    message: e.to_string(),
                }
            })?,
        };
        debug!(path = %filing.path.display(), bytes = text.len(), "Loaded filing");
        Ok(Self::new(filing.clone(), text))
    }

    /// Returns true if the text is line-oriented rather than markup.
    #[must_use]
    pub const fn is_plain_text(&self) -> bool {
        matches!(self.filing.format, DocumentFormat::Pdf | DocumentFormat::Text)
    }

    /// The classifier to use for this document: text documents are always
    /// read line by line, markup follows the statement's classifier.
    #[must_use]
    pub fn classifier<'a>(&self, markup: &'a Classifier) -> &'a Classifier {
        if self.is_plain_text() {
            &PLAIN_TEXT
        } else {
            markup
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use earnings_core::{FiscalPeriod, Quarter};

    #[test]
    fn test_load_html_and_text() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("press-release.htm");
        fs::write(&html, "<table><tr><td>Revenues</td></tr></table>").unwrap();
        let text = dir.path().join("press-release.txt");
        fs::write(&text, "Total revenues 25,500\n").unwrap();

        let period = FiscalPeriod::new(2024, Quarter::Q2);
        let filing = Filing::from_path("tesla", period, &html).unwrap();
        let document = Document::load(&filing).unwrap();
        assert!(document.text.contains("Revenues"));
        assert!(!document.is_plain_text());
        assert_eq!(*document.classifier(&Classifier::inline()), Classifier::inline());

        let filing = Filing::from_path("tesla", period, &text).unwrap();
        let document = Document::load(&filing).unwrap();
        assert!(document.is_plain_text());
        assert_eq!(*document.classifier(&Classifier::inline()), Classifier::PlainText);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("10-Q.htm");
        let filing = Filing::from_path("intel", FiscalPeriod::new(2024, Quarter::Q1), &path).unwrap();
        assert!(matches!(Document::load(&filing), Err(EarningsError::Io { .. })));
    }
}
