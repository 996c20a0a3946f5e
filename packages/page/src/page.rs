use crate::block::Block;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle state of a page.
///
/// Transitions: `draft → published`, `draft → archived`,
/// `published → archived`, `archived → published` (re-publish). There is
/// no path back to draft once a page has left it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    Draft,
    Published,
    Archived,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatusError {
    #[error("a page cannot return to draft once it left the draft state")]
    NoReturnToDraft,
}

/// A marketing page: metadata plus an ordered block sequence.
///
/// `updated_at` doubles as the version marker the sync protocol compares
/// against — every mutation must go through [`Page::touch`] so the marker
/// is strictly monotonic even if the wall clock stalls or steps back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub content: Vec<Block>,

    pub status: PageStatus,

    // SEO passthrough, opaque to the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Page {
    pub fn new(
        id: impl Into<String>,
        slug: impl Into<String>,
        title: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            title: title.into(),
            description: None,
            content: Vec::new(),
            status: PageStatus::Draft,
            meta_title: None,
            meta_description: None,
            og_image: None,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Bump the version marker. Always advances strictly, even when `now`
    /// is not past the previous marker.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        let floor = self.updated_at + Duration::milliseconds(1);
        self.updated_at = now.max(floor);
    }

    /// `draft/archived → published`. Sets `published_at` exactly once, on
    /// the first publish; re-publishing an archived page keeps the
    /// original timestamp. Publishing an already-published page is a
    /// no-op.
    pub fn publish(&mut self, now: DateTime<Utc>) -> Result<(), StatusError> {
        if self.status == PageStatus::Published {
            return Ok(());
        }
        self.status = PageStatus::Published;
        self.touch(now);
        if self.published_at.is_none() {
            self.published_at = Some(self.updated_at);
        }
        Ok(())
    }

    /// `draft/published → archived`. Idempotent.
    pub fn archive(&mut self, now: DateTime<Utc>) -> Result<(), StatusError> {
        if self.status == PageStatus::Archived {
            return Ok(());
        }
        self.status = PageStatus::Archived;
        self.touch(now);
        Ok(())
    }

    /// Route a requested status through the state machine. Used by save
    /// paths that carry a target status, so a raw field write can never
    /// skip the transition rules.
    pub fn set_status(&mut self, status: PageStatus, now: DateTime<Utc>) -> Result<(), StatusError> {
        match status {
            PageStatus::Published => self.publish(now),
            PageStatus::Archived => self.archive(now),
            PageStatus::Draft => {
                if self.status == PageStatus::Draft {
                    Ok(())
                } else {
                    Err(StatusError::NoReturnToDraft)
                }
            }
        }
    }

    /// A page is servable on the public route iff it is published.
    pub fn is_public(&self) -> bool {
        self.status == PageStatus::Published
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockKind;
    use serde_json::json;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_publish_sets_published_at_once() {
        let mut page = Page::new("p1", "promo", "Promo", at(100));

        page.publish(at(200)).unwrap();
        assert_eq!(page.status, PageStatus::Published);
        let first = page.published_at.unwrap();
        assert!(first <= page.updated_at);

        page.archive(at(300)).unwrap();
        page.publish(at(400)).unwrap();
        assert_eq!(page.published_at.unwrap(), first);
        assert_eq!(page.status, PageStatus::Published);
    }

    #[test]
    fn test_no_return_to_draft() {
        let mut page = Page::new("p1", "promo", "Promo", at(100));
        page.publish(at(200)).unwrap();

        assert_eq!(
            page.set_status(PageStatus::Draft, at(300)),
            Err(StatusError::NoReturnToDraft)
        );
        assert_eq!(page.status, PageStatus::Published);

        page.archive(at(400)).unwrap();
        assert_eq!(
            page.set_status(PageStatus::Draft, at(500)),
            Err(StatusError::NoReturnToDraft)
        );
    }

    #[test]
    fn test_draft_to_archived_directly() {
        let mut page = Page::new("p1", "promo", "Promo", at(100));
        page.archive(at(200)).unwrap();
        assert_eq!(page.status, PageStatus::Archived);
        assert!(page.published_at.is_none());
    }

    #[test]
    fn test_touch_is_strictly_monotonic() {
        let mut page = Page::new("p1", "promo", "Promo", at(100));
        let v0 = page.updated_at;

        // Wall clock stalled at the same instant
        page.touch(at(100));
        let v1 = page.updated_at;
        assert!(v1 > v0);

        // Wall clock stepped backwards
        page.touch(at(50));
        assert!(page.updated_at > v1);
    }

    #[test]
    fn test_publish_is_idempotent() {
        let mut page = Page::new("p1", "promo", "Promo", at(100));
        page.publish(at(200)).unwrap();
        let marker = page.updated_at;

        page.publish(at(300)).unwrap();
        assert_eq!(page.updated_at, marker);
    }

    #[test]
    fn test_page_wire_round_trip() {
        let mut page = Page::new("p1", "promo", "Promo", at(100));
        page.description = Some("Summer campaign".to_string());
        page.meta_title = Some("Promo | Estates".to_string());
        page.content.push(Block::new(
            "hero-1",
            BlockKind::Hero,
            json!({ "title": "Welcome", "unknownKey": [1, 2] }),
        ));
        page.content.push(Block::new(
            "statistics-2",
            BlockKind::Statistics,
            json!({ "items": [{ "label": "Units", "value": 120 }] }),
        ));

        let wire = serde_json::to_value(&page).unwrap();
        assert_eq!(wire["status"], "draft");
        assert_eq!(wire["content"][0]["type"], "hero");
        assert_eq!(wire["content"][1]["id"], "statistics-2");

        let back: Page = serde_json::from_value(wire).unwrap();
        assert_eq!(back, page);
    }
}
