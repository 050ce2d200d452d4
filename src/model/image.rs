use serde::{Deserialize, Serialize};
use url::Url;

/// An image pinned to the mood board or the dashboard slideshow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardImage {
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub caption: String,
}

impl BoardImage {
    pub fn new(url: impl Into<String>) -> Self {
        BoardImage {
            id: 0,
            url: url.into(),
            caption: String::new(),
        }
    }

    /// An image is addable when its URL is non-blank and parses.
    pub fn is_valid(&self) -> bool {
        let trimmed = self.url.trim();
        !trimmed.is_empty() && Url::parse(trimmed).is_ok()
    }
}

impl crate::sync::Record for BoardImage {
    fn id(&self) -> u64 {
        self.id
    }
    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// Starter mood board shown before any images have been saved.
pub fn default_mood_images() -> Vec<BoardImage> {
    let seed = [
        ("https://picsum.photos/id/10/400/600", "Wedding dress idea"),
        ("https://picsum.photos/id/225/400/600", "Venue decor"),
        ("https://picsum.photos/id/1040/400/600", "Flower arrangements"),
        ("https://picsum.photos/id/106/400/600", "Cake design"),
    ];
    seed.iter()
        .enumerate()
        .map(|(i, (url, caption))| BoardImage {
            id: i as u64 + 1,
            url: (*url).to_string(),
            caption: (*caption).to_string(),
        })
        .collect()
}

/// The dashboard slideshow starts empty; the couple curates it.
pub fn default_slides() -> Vec<BoardImage> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_url_is_invalid() {
        assert!(!BoardImage::new("not a url").is_valid());
        assert!(!BoardImage::new("").is_valid());
        assert!(BoardImage::new("https://example.com/a.jpg").is_valid());
        assert!(BoardImage::new("data:image/png;base64,iVBOR").is_valid());
    }

    #[test]
    fn mood_seed_ids_start_at_one() {
        let images = default_mood_images();
        assert_eq!(images[0].id, 1);
        assert_eq!(images.last().unwrap().id, 4);
    }
}
