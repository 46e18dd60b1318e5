//! Push notification payload for newly issued outlooks.
//!
//! The publisher delivers this payload; the core only decides its content.

use crate::model::overlay::Versioned;
use crate::timeline::selection::select_authoritative;
use serde::Serialize;

const DEFAULT_TITLE: &str = "New Convective Outlook";
const DEFAULT_BODY: &str = "A new convective outlook has been issued.";
const DEFAULT_ICON: &str = "/icon.png";
const MAP_URL: &str = "https://handry6.github.io/ConvectiveOutlookNew/interactive_map.html";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub icon: String,
    /// Opened when the notification is clicked.
    pub url: String,
    pub identifier: String,
    pub version: u32,
}

impl NotificationPayload {
    /// Default announcement for `overlay`.
    pub fn for_overlay(overlay: &impl Versioned) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            body: DEFAULT_BODY.to_string(),
            icon: DEFAULT_ICON.to_string(),
            url: MAP_URL.to_string(),
            identifier: overlay.identifier().to_string(),
            version: overlay.validity().version,
        }
    }

    /// Announcement for the authoritative overlay at the latest window start.
    pub fn for_latest<T: Versioned>(overlays: &[T]) -> Option<Self> {
        let newest_start = overlays
            .iter()
            .map(|overlay| overlay.validity().start)
            .max()?;
        select_authoritative(overlays, newest_start)
            .overlay
            .map(Self::for_overlay)
    }
}
