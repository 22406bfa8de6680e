//! Corpus reading: TREC-style `<DOC>` records, optionally gzip-compressed.
//!
//! A record looks like
//!
//! ```text
//! <DOC>
//! <DOCNO> LA010189-0001 </DOCNO>
//! <DATE><P>January 1, 1989, Sunday</P></DATE>
//! <HEADLINE><P>...</P></HEADLINE>
//! <TEXT><P>...</P><P>...</P></TEXT>
//! <GRAPHIC><P>...</P></GRAPHIC>
//! </DOC>
//! ```
//!
//! Only paragraphs (`<P>`) inside DATE, HEADLINE, TEXT and GRAPHIC are kept;
//! every other element is skipped. Any decode error is fatal to the stream.

use crate::{SourceDocument, SourceError};
use flate2::bufread::MultiGzDecoder;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const CORPUS_EXTENSIONS: &[&str] = &["gz", "xml", "sgml", "sgm"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Date,
    Headline,
    Text,
    Graphic,
}

/// Streams [`SourceDocument`]s out of a TREC-style SGML reader.
///
/// Yields `Err` once on the first decode failure and then stops.
pub struct TrecReader<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> TrecReader<R> {
    pub fn new(inner: R) -> Self {
        Self { reader: Reader::from_reader(inner), buf: Vec::new(), done: false }
    }

    fn next_document(&mut self) -> Result<Option<SourceDocument>, SourceError> {
        let mut doc: Option<SourceDocument> = None;
        let mut docno: Option<String> = None;
        let mut in_docno = false;
        let mut field: Option<Field> = None;
        let mut paragraph: Option<String> = None;

        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(source) => {
                    return Err(SourceError::Xml { position: self.reader.buffer_position() as u64, source });
                }
            };
            let position = self.reader.buffer_position() as u64;

            match event {
                Event::Start(ref e) => match e.name().as_ref() {
                    b"DOC" => {
                        if doc.is_some() {
                            return Err(SourceError::Malformed(format!("nested <DOC> at byte {position}")));
                        }
                        doc = Some(SourceDocument::default());
                    }
                    _ if doc.is_none() => {}
                    b"DOCNO" => {
                        in_docno = true;
                        docno.get_or_insert_with(String::new);
                    }
                    b"DATE" => field = Some(Field::Date),
                    b"HEADLINE" => field = Some(Field::Headline),
                    b"TEXT" => {
                        if let Some(d) = doc.as_mut() {
                            d.text.push(Vec::new());
                        }
                        field = Some(Field::Text);
                    }
                    b"GRAPHIC" => {
                        if let Some(d) = doc.as_mut() {
                            d.graphic.push(Vec::new());
                        }
                        field = Some(Field::Graphic);
                    }
                    b"P" if field.is_some() => paragraph = Some(String::new()),
                    _ => {}
                },
                Event::Empty(ref e) => match (e.name().as_ref(), doc.as_mut(), field) {
                    (b"P", Some(d), Some(f)) => push_paragraph(d, f, String::new()),
                    (b"TEXT", Some(d), _) => d.text.push(Vec::new()),
                    (b"GRAPHIC", Some(d), _) => d.graphic.push(Vec::new()),
                    _ => {}
                },
                Event::Text(ref e) => {
                    if in_docno || paragraph.is_some() {
                        let text = e
                            .unescape()
                            .map_err(|err| SourceError::Xml { position, source: err.into() })?;
                        append_text(in_docno, &mut docno, &mut paragraph, &text);
                    }
                }
                Event::CData(ref e) => {
                    let text = String::from_utf8_lossy(e);
                    append_text(in_docno, &mut docno, &mut paragraph, &text);
                }
                Event::End(ref e) => match e.name().as_ref() {
                    b"DOCNO" => in_docno = false,
                    b"P" => {
                        if let (Some(p), Some(d), Some(f)) = (paragraph.take(), doc.as_mut(), field) {
                            push_paragraph(d, f, p);
                        }
                    }
                    b"DATE" | b"HEADLINE" | b"TEXT" | b"GRAPHIC" => {
                        field = None;
                        paragraph = None;
                    }
                    b"DOC" => {
                        let Some(mut finished) = doc.take() else { continue };
                        // a missing DOCNO is empty text like any other absent field
                        finished.docno = docno.take().map(|d| d.trim().to_string()).unwrap_or_default();
                        return Ok(Some(finished));
                    }
                    _ => {}
                },
                Event::Eof => {
                    if doc.is_some() {
                        return Err(SourceError::Malformed("input ended inside <DOC>".to_string()));
                    }
                    return Ok(None);
                }
                _ => {}
            }
        }
    }
}

fn append_text(in_docno: bool, docno: &mut Option<String>, paragraph: &mut Option<String>, text: &str) {
    if in_docno {
        if let Some(d) = docno.as_mut() {
            d.push_str(text);
        }
    } else if let Some(p) = paragraph.as_mut() {
        p.push_str(text);
    }
}

fn push_paragraph(doc: &mut SourceDocument, field: Field, paragraph: String) {
    match field {
        Field::Date => doc.date.push(paragraph),
        Field::Headline => doc.headline.push(paragraph),
        Field::Text => match doc.text.last_mut() {
            Some(section) => section.push(paragraph),
            None => doc.text.push(vec![paragraph]),
        },
        Field::Graphic => match doc.graphic.last_mut() {
            Some(section) => section.push(paragraph),
            None => doc.graphic.push(vec![paragraph]),
        },
    }
}

impl<R: BufRead> Iterator for TrecReader<R> {
    type Item = Result<SourceDocument, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_document() {
            Ok(Some(doc)) => Some(Ok(doc)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("gz")
}

/// Open one corpus file, decompressing `.gz` input on the fly.
pub fn open_corpus(path: &Path) -> Result<TrecReader<Box<dyn BufRead>>, SourceError> {
    let file = File::open(path).map_err(|e| SourceError::io(path, e))?;
    let inner: Box<dyn BufRead> = if is_gzip(path) {
        Box::new(BufReader::new(MultiGzDecoder::new(BufReader::new(file))))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(TrecReader::new(inner))
}

/// Corpus files under `input`: the file itself, or every `.gz`, `.xml`,
/// `.sgml` and `.sgm` file below a directory in sorted path order.
pub fn collect_corpus_files(input: &Path) -> Result<Vec<PathBuf>, SourceError> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(SourceError::io(input, std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory")));
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(input) {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| input.to_path_buf());
            SourceError::io(path, e.into())
        })?;
        let p = entry.path();
        if p.is_file() {
            if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                if CORPUS_EXTENSIONS.contains(&ext) {
                    files.push(p.to_path_buf());
                }
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Documents from all `files`, in order. Files are opened lazily.
pub fn read_corpus(files: Vec<PathBuf>) -> impl Iterator<Item = Result<SourceDocument, SourceError>> {
    files.into_iter().flat_map(|path| -> Box<dyn Iterator<Item = Result<SourceDocument, SourceError>>> {
        tracing::debug!(path = %path.display(), "reading corpus file");
        match open_corpus(&path) {
            Ok(reader) => Box::new(reader),
            Err(e) => Box::new(std::iter::once(Err(e))),
        }
    })
}
