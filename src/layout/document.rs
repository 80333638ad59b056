//! Multi-page document assembly.

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::Page;
use crate::transform::TransformProvider;

use super::options::ErrorMode;
use super::reconstruct::LayoutReconstructor;

/// Header placed before the text of the page at 1-based output `position`.
pub fn page_header(position: usize) -> String {
    format!("\n ------ BEGIN PAGE {} ------ \n", position)
}

/// Text substituted for a page that failed in lenient mode.
pub fn failed_page_marker(page: u32, error: &Error) -> String {
    format!("[page {} unavailable: {}]", page, error)
}

/// Join page texts, numbering pages by their position in the output.
pub fn assemble_document<I, S>(page_texts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    page_texts
        .into_iter()
        .enumerate()
        .fold(String::new(), |mut document, (i, text)| {
            document.push_str(&page_header(i + 1));
            document.push_str(text.as_ref());
            document
        })
}

impl<P: TransformProvider> LayoutReconstructor<P> {
    /// Reconstruct every selected page and join them into one document.
    ///
    /// Pages are ordered by ascending page number and numbered 1, 2, … in
    /// the output regardless of gaps in the source numbering. Pages run in
    /// parallel unless the options say otherwise; the output is the same
    /// either way. A failed page aborts the document in
    /// [`ErrorMode::Strict`] and is replaced by a marker in
    /// [`ErrorMode::Lenient`].
    ///
    /// Two selected pages sharing a number are rejected with
    /// [`Error::InvalidInput`] in either mode.
    pub fn reconstruct_document(&self, pages: &[Page]) -> Result<String> {
        let mut selected: Vec<&Page> = pages
            .iter()
            .filter(|page| self.options().pages.includes(page.number))
            .collect();
        selected.sort_by_key(|page| page.number);

        if let Some(pair) = selected.windows(2).find(|w| w[0].number == w[1].number) {
            return Err(Error::InvalidInput(format!(
                "page {} appears more than once",
                pair[0].number
            )));
        }
        if selected.is_empty() && !pages.is_empty() {
            log::warn!(
                "page selection {:?} matches none of {} pages",
                self.options().pages,
                pages.len()
            );
        }

        log::debug!(
            "reconstructing {} of {} pages ({})",
            selected.len(),
            pages.len(),
            if self.options().parallel {
                "parallel"
            } else {
                "sequential"
            }
        );

        let render = |(index, page): (usize, &&Page)| -> Result<String> {
            let mut rng = self.options().page_rng(index);
            self.page_text(page.number, &page.fragments, &page.boundary, &mut rng)
        };

        let results: Vec<Result<String>> = if self.options().parallel {
            selected.par_iter().enumerate().map(render).collect()
        } else {
            selected.iter().enumerate().map(render).collect()
        };

        let mut texts = Vec::with_capacity(results.len());
        for (page, result) in selected.iter().zip(results) {
            match result {
                Ok(text) => texts.push(text),
                Err(e) => match self.options().error_mode {
                    ErrorMode::Strict => return Err(e.on_page(page.number)),
                    ErrorMode::Lenient => {
                        log::warn!("Failed to reconstruct page {}: {}", page.number, e);
                        texts.push(failed_page_marker(page.number, &e));
                    }
                },
            }
        }

        Ok(assemble_document(texts))
    }
}
