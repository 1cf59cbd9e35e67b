// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTML extraction helpers for source-page verification.

use scraper::{Html, Selector};

/// Collect the `href` attribute of every anchor element, verbatim.
///
/// No normalization is applied: relative paths, trailing slashes and
/// scheme differences are all preserved as written in the source page,
/// because link verification is an exact string match.
pub fn extract_links(body: &str) -> Vec<String> {
    let document = Html::parse_document(body);
    let anchors = Selector::parse("a[href]").expect("static selector");

    document
        .select(&anchors)
        .filter_map(|el| el.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Best-effort title text of the document; None if there is no `<title>`
/// or it is empty.
pub fn extract_title(body: &str) -> Option<String> {
    let document = Html::parse_document(body);
    let title = Selector::parse("title").expect("static selector");

    let text: String = document.select(&title).next()?.text().collect();
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
