//! Parsed document records as delivered by a document source.

/// One document from the corpus, with each field kept as paragraphs.
///
/// `text` and `graphic` may occur several times in a record; each
/// occurrence is a section holding its own paragraphs. Absent fields are
/// simply empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceDocument {
    pub docno: String,
    pub date: Vec<String>,
    pub headline: Vec<String>,
    pub text: Vec<Vec<String>>,
    pub graphic: Vec<Vec<String>>,
}

impl SourceDocument {
    pub fn new(docno: impl Into<String>) -> Self {
        Self { docno: docno.into(), ..Default::default() }
    }

    pub fn with_headline(mut self, paragraph: impl Into<String>) -> Self {
        self.headline.push(paragraph.into());
        self
    }

    pub fn with_date(mut self, paragraph: impl Into<String>) -> Self {
        self.date.push(paragraph.into());
        self
    }

    /// Add a body section made of the given paragraphs.
    pub fn with_text<I, S>(mut self, paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text.push(paragraphs.into_iter().map(Into::into).collect());
        self
    }

    /// Add a graphic/caption section made of the given paragraphs.
    pub fn with_graphic<I, S>(mut self, paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.graphic.push(paragraphs.into_iter().map(Into::into).collect());
        self
    }

    /// Text that gets tokenized: headline, then body sections, then graphic
    /// sections, each flattened and separated by a newline.
    pub fn indexable_text(&self) -> String {
        [
            join_paragraphs(&self.headline),
            join_sections(&self.text),
            join_sections(&self.graphic),
        ]
        .join("\n")
    }
}

/// Trim every paragraph and join them with newlines.
pub fn join_paragraphs(paragraphs: &[String]) -> String {
    paragraphs.iter().map(|p| p.trim()).collect::<Vec<_>>().join("\n")
}

/// Flatten sections of paragraphs into one newline-separated string.
pub fn join_sections(sections: &[Vec<String>]) -> String {
    sections.iter().map(|s| join_paragraphs(s)).collect::<Vec<_>>().join("\n")
}
