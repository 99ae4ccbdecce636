// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-page PDF report documents.
//!
//! Each page holds one raster image at its natural size (one pixel is 0.75 pt, i.e. 96 dpi).
//! The file is assembled in a temporary file next to the destination and moved into place
//! only by [`ReportDocument::finish`]; dropping an unfinished document leaves nothing behind.

use core::fmt;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use miniz_oxide::deflate::compress_to_vec_zlib;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, TextStr};
use tempfile::NamedTempFile;

use crate::error::{RenderError, Result};
use crate::raster::RasterImage;

const POINTS_PER_PIXEL: f32 = 0.75;
const IMAGE_NAME: Name<'static> = Name(b"Im1");

/// An open report document.
pub struct ReportDocument {
    path: PathBuf,
    file: NamedTempFile,
    pdf: Pdf,
    next_ref: Ref,
    catalog: Ref,
    page_tree: Ref,
    pages: Vec<Ref>,
    title: Option<String>,
}

impl fmt::Debug for ReportDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportDocument")
            .field("path", &self.path)
            .field("pages", &self.pages.len())
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

impl ReportDocument {
    /// Opens a document that will be written to `path`.
    ///
    /// The parent directory must exist.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file = NamedTempFile::new_in(&dir).map_err(|e| RenderError::io(&path, e))?;
        let mut next_ref = Ref::new(1);
        let catalog = next_ref.bump();
        let page_tree = next_ref.bump();
        Ok(Self {
            path,
            file,
            pdf: Pdf::new(),
            next_ref,
            catalog,
            page_tree,
            pages: Vec::new(),
            title: None,
        })
    }

    /// Sets the document title recorded in the PDF metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Appends `image` as a new page sized to the image.
    pub fn add_page(&mut self, image: &RasterImage) {
        let page_id = self.next_ref.bump();
        let image_id = self.next_ref.bump();
        let content_id = self.next_ref.bump();

        let (w, h) = (
            image.width() as f32 * POINTS_PER_PIXEL,
            image.height() as f32 * POINTS_PER_PIXEL,
        );

        let mut page = self.pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, w, h));
        page.parent(self.page_tree);
        page.contents(content_id);
        page.resources().x_objects().pair(IMAGE_NAME, image_id);
        page.finish();

        let data = compress_to_vec_zlib(&image.rgb(), 6);
        let mut xobject = self.pdf.image_xobject(image_id, &data);
        xobject.filter(Filter::FlateDecode);
        xobject.width(i32::try_from(image.width()).unwrap_or(i32::MAX));
        xobject.height(i32::try_from(image.height()).unwrap_or(i32::MAX));
        xobject.color_space().device_rgb();
        xobject.bits_per_component(8);
        xobject.finish();

        let mut content = Content::new();
        content.save_state();
        content.transform([w, 0.0, 0.0, h, 0.0, 0.0]);
        content.x_object(IMAGE_NAME);
        content.restore_state();
        self.pdf.stream(content_id, &content.finish());

        self.pages.push(page_id);
        tracing::debug!(
            page = self.pages.len(),
            width = image.width(),
            height = image.height(),
            "added report page"
        );
    }

    /// Writes the document and moves it to its destination.
    ///
    /// Fails with [`RenderError::EmptyDocument`] when no page was added; nothing is written
    /// in that case.
    pub fn finish(self) -> Result<PathBuf> {
        let Self {
            path,
            mut file,
            mut pdf,
            mut next_ref,
            catalog,
            page_tree,
            pages,
            title,
        } = self;
        if pages.is_empty() {
            return Err(RenderError::EmptyDocument(path));
        }

        pdf.catalog(catalog).pages(page_tree);
        pdf.pages(page_tree)
            .kids(pages.iter().copied())
            .count(i32::try_from(pages.len()).unwrap_or(i32::MAX));
        if let Some(title) = &title {
            pdf.document_info(next_ref.bump()).title(TextStr(title.as_str()));
        }

        let bytes = pdf.finish();
        file.write_all(&bytes)
            .and_then(|()| file.flush())
            .map_err(|e| RenderError::io(&path, e))?;
        file.persist(&path)
            .map_err(|e| RenderError::io(&path, e.error))?;
        tracing::info!(path = %path.display(), pages = pages.len(), "wrote report document");
        Ok(path)
    }
}
