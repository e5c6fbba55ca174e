//! Detail view helpers for a single selected photo.

use anyhow::Result;
use html2text::from_read;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::data_models::PhotoItem;

// Kept exactly as the client has always matched it: two arbitrary characters
// between the attributes, so a single space (the usual markup) never matches.
static DIMENSIONS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"width="(\d+)"..height="(\d+)""#).expect("valid dimensions regex"));

static QUOTED_AUTHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\("(.+)"\)"#).expect("valid author regex"));

const TEXT_WIDTH: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoDetail {
    item: PhotoItem,
}

impl PhotoDetail {
    pub fn from_item(item: PhotoItem) -> PhotoDetail {
        PhotoDetail { item }
    }

    pub fn item(&self) -> &PhotoItem {
        &self.item
    }

    /// Image width and height embedded in the description's `<img>` tag.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        let caps = DIMENSIONS.captures(&self.item.description_html)?;
        let width = caps[1].parse().ok()?;
        let height = caps[2].parse().ok()?;
        Some((width, height))
    }

    pub fn tag_list(&self) -> Vec<&str> {
        self.item.tags.split_whitespace().collect()
    }

    /// Feed authors look like `nobody@flickr.com ("name")`.
    pub fn author_name(&self) -> &str {
        QUOTED_AUTHOR
            .captures(&self.item.author)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .unwrap_or(&self.item.author)
    }

    pub fn description_text(&self) -> Result<String> {
        let text = from_read(self.item.description_html.as_bytes(), TEXT_WIDTH)?;
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(author: &str, tags: &str, description: &str) -> PhotoDetail {
        PhotoDetail::from_item(PhotoItem::new(
            "Tabby".into(),
            "https://live.staticflickr.com/1_m.jpg".into(),
            author.into(),
            tags.into(),
            description.into(),
        ))
    }

    #[test]
    fn test_dimensions_need_two_char_separator() {
        let d = detail("", "", r#"<img src="x.jpg" width="240", height="160" />"#);
        assert_eq!(d.dimensions(), Some((240, 160)));
    }

    #[test]
    fn test_dimensions_with_single_space_do_not_match() {
        let d = detail("", "", r#"<img src="x.jpg" width="240" height="160" />"#);
        assert_eq!(d.dimensions(), None);
    }

    #[test]
    fn test_dimensions_overflow() {
        let d = detail("", "", r#"width="99999999999"  height="1""#);
        assert_eq!(d.dimensions(), None);
    }

    #[test]
    fn test_tag_list() {
        let d = detail("", "cats  tabby\tkitten", "");
        assert_eq!(d.tag_list(), vec!["cats", "tabby", "kitten"]);
        assert!(detail("", "", "").tag_list().is_empty());
    }

    #[test]
    fn test_author_name() {
        assert_eq!(
            detail(r#"nobody@flickr.com ("Jane Doe")"#, "", "").author_name(),
            "Jane Doe"
        );
        assert_eq!(detail("plain author", "", "").author_name(), "plain author");
    }

    #[test]
    fn test_description_text_strips_markup() {
        let d = detail("", "", "<p><a href=\"https://x\">someone</a> posted a photo</p>");
        let text = d.description_text().unwrap();
        assert!(text.contains("posted a photo"), "got {text:?}");
        assert!(!text.contains("<p>"));
    }
}
