use serde::{Deserialize, Serialize};

/// One photo from the public feed. Serializable so a selected item can be
/// handed over to the detail view.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PhotoItem {
    pub title: String,
    pub image_url: String,
    pub author: String,
    pub tags: String,
    pub description_html: String,
}

impl PhotoItem {
    pub fn new(
        title: String,
        image_url: String,
        author: String,
        tags: String,
        description_html: String,
    ) -> PhotoItem {
        PhotoItem {
            title,
            image_url,
            author,
            tags,
            description_html,
        }
    }
}

/// Ordered photos returned by one successful fetch.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    items: Vec<PhotoItem>,
}

impl SearchResult {
    pub fn new(items: Vec<PhotoItem>) -> SearchResult {
        SearchResult { items }
    }

    pub fn items(&self) -> &[PhotoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PhotoItem> {
        self.items.get(index)
    }

    pub fn into_items(self) -> Vec<PhotoItem> {
        self.items
    }
}

// =============================================================================
// Wire format of feeds/photos_public.gne
// =============================================================================

#[derive(Deserialize, Debug, Clone)]
pub struct FeedResponse {
    pub items: Vec<FeedEntry>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FeedEntry {
    pub title: String,
    pub media: FeedMedia,
    pub author: String,
    pub tags: String,
    pub description: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FeedMedia {
    pub m: String,
}

impl From<FeedEntry> for PhotoItem {
    fn from(entry: FeedEntry) -> Self {
        PhotoItem::new(
            entry.title,
            entry.media.m,
            entry.author,
            entry.tags,
            entry.description,
        )
    }
}

impl From<FeedResponse> for SearchResult {
    fn from(response: FeedResponse) -> Self {
        SearchResult::new(response.items.into_iter().map(PhotoItem::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_response_ignores_unknown_fields() {
        let body = r#"{
            "title": "Recent Uploads tagged cats",
            "link": "https://www.flickr.com/photos/tags/cats/",
            "items": [{
                "title": "Tabby",
                "link": "https://www.flickr.com/photos/someone/1/",
                "media": {"m": "https://live.staticflickr.com/1_m.jpg"},
                "date_taken": "2024-01-01T00:00:00-08:00",
                "description": "<p>a cat</p>",
                "published": "2024-01-02T00:00:00Z",
                "author": "nobody@flickr.com (\"someone\")",
                "author_id": "1@N00",
                "tags": "cats tabby"
            }]
        }"#;
        let response: FeedResponse = serde_json::from_str(body).unwrap();
        let result = SearchResult::from(response);

        assert_eq!(result.len(), 1);
        let item = result.get(0).unwrap();
        assert_eq!(item.title, "Tabby");
        assert_eq!(item.image_url, "https://live.staticflickr.com/1_m.jpg");
        assert_eq!(item.tags, "cats tabby");
        assert_eq!(item.description_html, "<p>a cat</p>");
    }

    #[test]
    fn test_feed_entry_missing_media_is_rejected() {
        let body = r#"{"items":[{"title":"x","author":"a","tags":"","description":""}]}"#;
        assert!(serde_json::from_str::<FeedResponse>(body).is_err());
    }

    #[test]
    fn test_result_keeps_feed_order() {
        let body = r#"{"items":[
            {"title":"first","media":{"m":"1"},"author":"a","tags":"","description":""},
            {"title":"second","media":{"m":"2"},"author":"a","tags":"","description":""},
            {"title":"third","media":{"m":"3"},"author":"a","tags":"","description":""}
        ]}"#;
        let result = SearchResult::from(serde_json::from_str::<FeedResponse>(body).unwrap());
        let titles: Vec<&str> = result.items().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }
}
