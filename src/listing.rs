//! Directory listing module
//! Fetches a directory-index document and extracts the image links from it.

use crate::constants::IMAGE_EXTENSIONS;
use thiserror::Error;
use tracing::debug;

/// One image discovered in the directory index.
///
/// The sequence of entries is built once per refresh and never mutated;
/// everything downstream (grid, filter, lightbox) indexes into it.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEntry {
    /// Link target exactly as listed by the server.
    pub path: String,
    /// Absolute URL used to fetch the image.
    pub url: String,
    /// Filename component (path after the last separator), shown as the label.
    pub name: String,
    /// Lowercased filename, computed once so the filter never re-normalizes.
    pub name_lower: String,
}

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server returned HTTP {0}")]
    Status(reqwest::StatusCode),
}

/// Fetch the index document and build the ordered image sequence.
pub async fn fetch_listing(
    client: &reqwest::Client,
    index_url: &str,
) -> Result<Vec<ImageEntry>, ListingError> {
    let response = client.get(index_url).send().await?;
    if !response.status().is_success() {
        return Err(ListingError::Status(response.status()));
    }
    let body = response.text().await?;
    let entries = parse_index(index_url, &body);
    debug!(url = index_url, count = entries.len(), "Directory listing fetched");
    Ok(entries)
}

/// Parse an index document into image entries, preserving source order.
/// Links are kept when their target ends with a supported image extension;
/// duplicates survive as the server listed them.
pub fn parse_index(index_url: &str, html: &str) -> Vec<ImageEntry> {
    extract_hrefs(html)
        .into_iter()
        .filter(|href| has_image_extension(href))
        .map(|href| {
            let name = filename_of(&href).to_string();
            let name_lower = name.to_lowercase();
            let url = resolve_url(index_url, &href);
            ImageEntry { path: href, url, name, name_lower }
        })
        .collect()
}

/// Collect every `<a>` tag's href value in source order.
/// Handles double-quoted, single-quoted, and unquoted attribute forms.
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let mut hrefs = Vec::new();
    let mut pos = 0;

    while let Some(rel) = html[pos..].find('<') {
        let tag_start = pos + rel + 1;
        pos = tag_start;

        let rest = &html[tag_start..];
        let mut chars = rest.chars();
        let is_anchor = matches!(chars.next(), Some('a') | Some('A'))
            && matches!(chars.next(), Some(c) if c.is_ascii_whitespace());
        if !is_anchor {
            continue;
        }

        let Some(tag_end) = rest.find('>') else {
            break;
        };
        if let Some(value) = extract_attr_value(&rest[1..tag_end], "href") {
            hrefs.push(value);
        }
        pos = tag_start + tag_end;
    }

    hrefs
}

/// Pull one attribute value out of a tag's inner text.
fn extract_attr_value(tag: &str, key: &str) -> Option<String> {
    let lower = tag.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut search = 0;

    while let Some(rel) = lower[search..].find(key) {
        let at = search + rel;
        search = at + key.len();

        let boundary_before = at == 0 || bytes[at - 1].is_ascii_whitespace();
        let mut j = at + key.len();
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if !boundary_before || j >= bytes.len() || bytes[j] != b'=' {
            continue;
        }
        j += 1;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if j >= bytes.len() {
            return None;
        }

        // Slice the original tag, not the lowercased copy: values keep their case.
        let raw = &tag[j..];
        let value = match raw.as_bytes()[0] {
            quote @ (b'"' | b'\'') => {
                let inner = &raw[1..];
                match inner.find(quote as char) {
                    Some(end) => &inner[..end],
                    None => inner,
                }
            }
            _ => raw
                .split(|c: char| c.is_ascii_whitespace())
                .next()
                .unwrap_or(""),
        };
        return Some(value.to_string());
    }

    None
}

/// True when the link target ends with one of the supported image
/// extensions, compared case-insensitively.
pub fn has_image_extension(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| {
        lower
            .strip_suffix(ext)
            .is_some_and(|stem| stem.ends_with('.'))
    })
}

/// Filename component of a link target: everything after the last separator.
pub fn filename_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Resolve a listed href against the index URL.
fn resolve_url(index_url: &str, href: &str) -> String {
    if href.contains("://") {
        return href.to_string();
    }
    if let Some(rest) = href.strip_prefix('/') {
        // Server-absolute path: join against the scheme + authority only.
        if let Some(authority_start) = index_url.find("://").map(|p| p + 3) {
            if let Some(path_start) = index_url[authority_start..].find('/') {
                return format!("{}/{}", &index_url[..authority_start + path_start], rest);
            }
        }
        return format!("{}/{}", index_url.trim_end_matches('/'), rest);
    }
    format!("{}/{}", index_url.trim_end_matches('/'), href)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:8000/images/";

    #[test]
    fn filters_listing_by_extension_case_insensitively() {
        let html = concat!(
            "<html><body><ul>",
            "<li><a href=\"a.png\">a.png</a></li>",
            "<li><a href=\"b.txt\">b.txt</a></li>",
            "<li><a href=\"c.JPG\">c.JPG</a></li>",
            "<li><a href=\"d.webp\">d.webp</a></li>",
            "</ul></body></html>",
        );
        let entries = parse_index(BASE, html);
        let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["a.png", "c.JPG", "d.webp"]);
    }

    #[test]
    fn preserves_source_order_and_duplicates() {
        let html = "<a href=\"z.gif\">z</a><a href=\"a.png\">a</a><a href=\"z.gif\">z</a>";
        let entries = parse_index(BASE, html);
        let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["z.gif", "a.png", "z.gif"]);
    }

    #[test]
    fn extracts_quoted_single_quoted_and_unquoted_hrefs() {
        let html = "<a href=\"one.png\">1</a><a href='two.png'>2</a><a href=three.png>3</a>";
        assert_eq!(extract_hrefs(html), vec!["one.png", "two.png", "three.png"]);
    }

    #[test]
    fn ignores_non_anchor_tags_and_anchors_without_href() {
        let html = "<area href=\"nope.png\"><a name=\"x\">no link</a><a class=\"f\" href=\"yes.png\">y</a>";
        assert_eq!(extract_hrefs(html), vec!["yes.png"]);
    }

    #[test]
    fn href_value_case_is_preserved() {
        let html = "<A HREF=\"Shot.PNG\">s</A>";
        assert_eq!(extract_hrefs(html), vec!["Shot.PNG"]);
    }

    #[test]
    fn extension_match_requires_a_dot() {
        assert!(has_image_extension("photo.jpeg"));
        assert!(has_image_extension("PHOTO.JPEG"));
        assert!(!has_image_extension("jpeg"));
        assert!(!has_image_extension("photojpeg"));
        assert!(!has_image_extension("notes.txt"));
        assert!(!has_image_extension("?C=M;O=A"));
    }

    #[test]
    fn filename_is_the_component_after_the_last_separator() {
        assert_eq!(filename_of("images/sub/pic.png"), "pic.png");
        assert_eq!(filename_of("pic.png"), "pic.png");
    }

    #[test]
    fn resolves_relative_server_absolute_and_full_urls() {
        assert_eq!(resolve_url(BASE, "a.png"), "http://localhost:8000/images/a.png");
        assert_eq!(resolve_url(BASE, "/images/a.png"), "http://localhost:8000/images/a.png");
        assert_eq!(
            resolve_url(BASE, "https://cdn.example/a.png"),
            "https://cdn.example/a.png"
        );
    }

    #[test]
    fn entries_carry_precomputed_lowercase_names() {
        let entries = parse_index(BASE, "<a href=\"sub/Sunset Beach.JPG\">x</a>");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Sunset Beach.JPG");
        assert_eq!(entries[0].name_lower, "sunset beach.jpg");
        assert_eq!(entries[0].url, "http://localhost:8000/images/sub/Sunset Beach.JPG");
    }
}
