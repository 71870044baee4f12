//! Reusable UI components
//!
//! Standalone helpers shared by the grid, the top bar, and the lightbox.

/// Format the visible-entry readout: singular "image" only for exactly one.
pub fn count_label(visible: usize) -> String {
    if visible == 1 {
        "1 image".to_string()
    } else {
        format!("{} images", visible)
    }
}

/// Shorten a filename to fit a card label, keeping the extension visible.
pub fn truncate_filename(name: &str, max_chars: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_chars || max_chars < 8 {
        return name.to_string();
    }
    let tail: String = chars[chars.len() - 7..].iter().collect();
    let head: String = chars[..max_chars - 8].iter().collect();
    format!("{}…{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_is_singular_only_for_one() {
        assert_eq!(count_label(0), "0 images");
        assert_eq!(count_label(1), "1 image");
        assert_eq!(count_label(2), "2 images");
        assert_eq!(count_label(17), "17 images");
    }

    #[test]
    fn short_names_pass_through() {
        assert_eq!(truncate_filename("cat.png", 24), "cat.png");
    }

    #[test]
    fn long_names_keep_their_tail() {
        let name = "very-long-holiday-photo-from-2024.jpeg";
        let short = truncate_filename(name, 24);
        assert!(short.chars().count() <= 24);
        assert!(short.ends_with("24.jpeg"));
        assert!(short.contains('…'));
    }
}
