//! Page-by-page extraction of a PDF into a [`Book`].

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::detect::{sniff_bytes, sniff_path};
use crate::error::{Error, Result};
use crate::model::{Book, ImageRef, PageRecord};
use crate::render;

use super::image::encode_png;
use super::options::{ErrorMode, ExtractOptions};

/// Bound on `/Parent` hops when looking for inherited resources.
const MAX_INHERITANCE_DEPTH: usize = 32;

/// Bound on Form XObject nesting when looking for images.
const MAX_FORM_DEPTH: usize = 16;

/// Opens a PDF and extracts its pages, text and images.
pub struct Extractor {
    doc: LopdfDocument,
    source: Option<PathBuf>,
    title: String,
    options: ExtractOptions,
}

impl Extractor {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ExtractOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Reading PDF file: {}", path.display());

        sniff_path(path)?;
        let doc = LopdfDocument::load(path)?;

        let title = options
            .title
            .clone()
            .unwrap_or_else(|| title_from_path(path));

        Ok(Self::with_document(doc, Some(path.to_path_buf()), title, options))
    }

    /// Parse a PDF held in memory. `name` is used to derive the title.
    pub fn from_bytes(data: &[u8], name: &str, options: ExtractOptions) -> Result<Self> {
        sniff_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;

        let title = options
            .title
            .clone()
            .unwrap_or_else(|| title_from_path(Path::new(name)));

        Ok(Self::with_document(doc, None, title, options))
    }

    fn with_document(
        doc: LopdfDocument,
        source: Option<PathBuf>,
        title: String,
        options: ExtractOptions,
    ) -> Self {
        if doc.is_encrypted() {
            log::warn!("Document is encrypted; text and images may be unreadable");
        }
        Self {
            doc,
            source,
            title,
            options,
        }
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Get PDF version.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Title the book will carry.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Creation date from the document Info dictionary.
    pub fn created(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        let info_ref = self.doc.trailer.get(b"Info").ok()?.as_reference().ok()?;
        let info = self.doc.get_dictionary(info_ref).ok()?;
        get_string_from_dict(info, b"CreationDate").and_then(|s| parse_pdf_date(&s))
    }

    /// Extract every page, in order, into a book.
    ///
    /// Writes images into the configured output directory, and the text dump
    /// if one is configured.
    pub fn extract(&self) -> Result<Book> {
        let mut book = Book::new(self.title.clone());
        book.external_company_id = self.options.external_company_id.clone();
        book.source = self.source.clone();
        book.pdf_version = self.version();
        book.created = self.created();

        if self.options.extract_images {
            fs::create_dir_all(&self.options.output_dir)?;
        }

        for index in 0..self.page_count() {
            let page = self.extract_page(index)?;
            log::debug!(
                "Page {}: {} chars, {} images",
                page.number(),
                page.text.len(),
                page.images.len()
            );
            book.add_page(page);
        }

        if let Some(ref path) = self.options.text_dump {
            render::write_text(&book, path)?;
            log::info!("Wrote text to {}", path.display());
        }

        book.extracted_at = chrono::Utc::now();
        Ok(book)
    }

    /// Extract a single page (0-based index), writing its images to disk.
    pub fn extract_page(&self, index: u32) -> Result<PageRecord> {
        let pages = self.doc.get_pages();
        let page_num = index + 1;
        let page_id = *pages
            .get(&page_num)
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))?;

        let text = match self.extract_page_text(page_num) {
            Ok(text) => text,
            Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                log::warn!("Failed to extract text from page {}: {}", page_num, e);
                String::new()
            }
            Err(e) => return Err(e),
        };

        let mut page = PageRecord::new(index, self.title.clone(), text);
        if self.options.extract_images {
            for image in self.extract_page_images(index, page_id)? {
                page.add_image(image);
            }
        }

        Ok(page)
    }

    fn extract_page_text(&self, page_num: u32) -> Result<String> {
        let text = self
            .doc
            .extract_text(&[page_num])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_num, e)))?;
        Ok(text.trim_end().to_string())
    }

    fn extract_page_images(&self, index: u32, page_id: ObjectId) -> Result<Vec<ImageRef>> {
        let image_ids = self.page_image_ids(page_id);
        if image_ids.is_empty() {
            return Ok(Vec::new());
        }

        fs::create_dir_all(&self.options.output_dir)?;

        let mut images = Vec::with_capacity(image_ids.len());
        for (k, xref) in image_ids.into_iter().enumerate() {
            let k = k as u32;
            let file_name = ImageRef::file_name(index, k, self.options.image_index_base);
            let path = self.options.output_dir.join(file_name);

            let stream = self
                .doc
                .get_object(xref)
                .and_then(Object::as_stream)
                .map_err(|e| Error::ImageExtract(e.to_string()))?;

            let image = match encode_png(&self.doc, stream) {
                Ok(encoded) => {
                    fs::write(&path, &encoded.data)?;
                    ImageRef::new(index, k, &path).with_dimensions(encoded.width, encoded.height)
                }
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!(
                        "Image {} {:?} on page {} kept as raw stream: {}",
                        k,
                        xref,
                        index + 1,
                        e
                    );
                    fs::write(&path, &stream.content)?;
                    ImageRef::new(index, k, &path)
                }
                Err(e) => return Err(e),
            };

            log::info!("Saved image {}", path.display());
            images.push(image);
        }

        Ok(images)
    }

    /// Object ids of the image XObjects a page draws, in dictionary order.
    ///
    /// Images inside Form XObjects are included, after the form's position in
    /// the enclosing dictionary. Each object is listed once per page.
    fn page_image_ids(&self, page_id: ObjectId) -> Vec<ObjectId> {
        let mut ids = Vec::new();
        if let Some(resources) = self.page_resources(page_id) {
            let mut forms = Vec::new();
            self.collect_image_ids(resources, 0, &mut ids, &mut forms);
        }
        ids
    }

    fn collect_image_ids(
        &self,
        resources: &Dictionary,
        depth: usize,
        ids: &mut Vec<ObjectId>,
        forms: &mut Vec<ObjectId>,
    ) {
        if depth >= MAX_FORM_DEPTH {
            log::warn!("Form XObjects nested deeper than {}; skipping", MAX_FORM_DEPTH);
            return;
        }
        let Some(xobjects) = resources
            .get(b"XObject")
            .ok()
            .and_then(|o| self.resolve_dict(o))
        else {
            return;
        };

        for (_name, obj) in xobjects.iter() {
            let Ok(xref) = obj.as_reference() else {
                continue;
            };
            let Ok(Object::Stream(stream)) = self.doc.get_object(xref) else {
                continue;
            };
            let subtype = stream.dict.get(b"Subtype").and_then(Object::as_name).ok();

            if subtype == Some(b"Image".as_slice()) {
                if !ids.contains(&xref) {
                    ids.push(xref);
                }
            } else if subtype == Some(b"Form".as_slice()) && !forms.contains(&xref) {
                forms.push(xref);
                if let Some(form_resources) = stream
                    .dict
                    .get(b"Resources")
                    .ok()
                    .and_then(|o| self.resolve_dict(o))
                {
                    self.collect_image_ids(form_resources, depth + 1, ids, forms);
                }
            }
        }
    }

    /// The page's `/Resources`, following `/Parent` for inherited resources.
    fn page_resources(&self, page_id: ObjectId) -> Option<&Dictionary> {
        let mut node = self.doc.get_dictionary(page_id).ok()?;
        for _ in 0..MAX_INHERITANCE_DEPTH {
            if let Ok(res) = node.get(b"Resources") {
                return self.resolve_dict(res);
            }
            let parent = node.get(b"Parent").ok()?.as_reference().ok()?;
            node = self.doc.get_dictionary(parent).ok()?;
        }
        None
    }

    fn resolve_dict<'a>(&'a self, obj: &'a Object) -> Option<&'a Dictionary> {
        match obj {
            Object::Reference(r) => self.doc.get_dictionary(*r).ok(),
            Object::Dictionary(d) => Some(d),
            _ => None,
        }
    }
}

/// Title derived from a file name: the name without its `.pdf` extension.
pub(crate) fn title_from_path(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let ext_at = name.len().saturating_sub(4);
    match name.get(ext_at..) {
        Some(ext) if ext.eq_ignore_ascii_case(".pdf") => name[..ext_at].to_string(),
        _ => name,
    }
}

/// Helper to get a string from a PDF dictionary.
fn get_string_from_dict(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => {
            // UTF-16BE with BOM is the PDF standard for Unicode strings
            if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
                let utf16: Vec<u16> = bytes[2..]
                    .chunks_exact(2)
                    .map(|c| u16::from_be_bytes([c[0], c[1]]))
                    .collect();
                String::from_utf16(&utf16).ok()
            } else {
                String::from_utf8(bytes.clone())
                    .ok()
                    .or_else(|| Some(bytes.iter().map(|&b| b as char).collect()))
            }
        }
        Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}

/// Parse a PDF date string (D:YYYYMMDDHHmmSSOHH'mm').
fn parse_pdf_date(s: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let s = s.strip_prefix("D:").unwrap_or(s);

    if s.len() < 4 {
        return None;
    }

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month: u32 = s.get(4..6).and_then(|m| m.parse().ok()).unwrap_or(1);
    let day: u32 = s.get(6..8).and_then(|d| d.parse().ok()).unwrap_or(1);
    let hour: u32 = s.get(8..10).and_then(|h| h.parse().ok()).unwrap_or(0);
    let minute: u32 = s.get(10..12).and_then(|m| m.parse().ok()).unwrap_or(0);
    let second: u32 = s.get(12..14).and_then(|s| s.parse().ok()).unwrap_or(0);

    chrono::NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .map(|dt| chrono::DateTime::from_naive_utc_and_offset(dt, chrono::Utc))
}
