//! Filtering logic

use super::App;
use crate::listing::ImageEntry;

impl App {
    /// Rebuild the visible set from the search field.
    pub(crate) fn apply_filter(&mut self) {
        self.filtered_indices = filter_indices(&self.entries, &self.search_query);
    }
}

/// Indices of the entries whose filename contains the normalized term.
/// The term is trimmed and lowercased once per pass; entry names were
/// lowercased at listing time, so nothing is re-normalized per entry.
pub(crate) fn filter_indices(entries: &[ImageEntry], query: &str) -> Vec<usize> {
    let term = query.trim().to_lowercase();

    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| term.is_empty() || entry.name_lower.contains(&term))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::filter_indices;
    use crate::listing::parse_index;
    use crate::ui::components::count_label;

    const BASE: &str = "http://localhost:8000/images/";
    const LISTING: &str = concat!(
        "<a href=\"a.png\">a</a>",
        "<a href=\"b.txt\">b</a>",
        "<a href=\"c.JPG\">c</a>",
        "<a href=\"d.webp\">d</a>",
    );

    fn visible_names(term: &str) -> Vec<String> {
        let entries = parse_index(BASE, LISTING);
        filter_indices(&entries, term)
            .into_iter()
            .map(|i| entries[i].name.clone())
            .collect()
    }

    #[test]
    fn empty_term_shows_all_entries() {
        let visible = visible_names("");
        assert_eq!(visible, vec!["a.png", "c.JPG", "d.webp"]);
        assert_eq!(count_label(visible.len()), "3 images");
    }

    #[test]
    fn whitespace_only_term_counts_as_empty() {
        assert_eq!(visible_names("   ").len(), 3);
    }

    #[test]
    fn term_matches_filename_substring_case_insensitively() {
        let visible = visible_names("c");
        assert_eq!(visible, vec!["c.JPG"]);
        assert_eq!(count_label(visible.len()), "1 image");
    }

    #[test]
    fn non_matching_term_shows_zero() {
        let visible = visible_names("zzz");
        assert!(visible.is_empty());
        assert_eq!(count_label(visible.len()), "0 images");
    }

    #[test]
    fn extension_is_part_of_the_matched_name() {
        assert_eq!(visible_names("webp"), vec!["d.webp"]);
    }

    #[test]
    fn term_is_trimmed_before_matching() {
        assert_eq!(visible_names("  C  "), vec!["c.JPG"]);
    }
}
