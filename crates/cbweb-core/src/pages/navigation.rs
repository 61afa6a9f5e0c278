//! Site header: navigation menu, current route and scroll state.

use serde::Serialize;
use serde_json::Value;

use super::{MountToken, Slice};
use crate::api::{ContentClient, Transport, MAIN_NAVIGATION};
use crate::reconcile::FieldReader;

/// Scroll offset past which the header switches to its compact style.
const SCROLLED_THRESHOLD: f64 = 100.0;

/// Routed pages of the site, in menu order.
pub const ROUTES: [(&str, &str); 6] = [
    ("Home", "/home"),
    ("About Us", "/about-us"),
    ("News", "/news"),
    ("Product Details", "/product-details"),
    ("Contact Us", "/contact-us"),
    ("Device", "/device"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: String,
    pub route: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

impl NavItem {
    pub fn from_value(item: &Value) -> Self {
        let r = FieldReader::from_value(Some(item));
        let children = r
            .collection(&["children", "items"])
            .map(|c| c.iter().map(NavItem::from_value).collect())
            .unwrap_or_default();
        Self {
            label: r.text(&["label", "title", "name"], ""),
            route: r.text(&["route", "url", "link", "path"], ""),
            children,
        }
    }
}

pub fn fallback_menu() -> Vec<NavItem> {
    ROUTES
        .iter()
        .map(|(label, route)| NavItem {
            label: label.to_string(),
            route: route.to_string(),
            children: Vec::new(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub menu_key: String,
    pub items: Slice<Vec<NavItem>>,
    pub current_route: String,
    pub is_scrolled: bool,
}

impl Default for Header {
    fn default() -> Self {
        Self::new(MAIN_NAVIGATION)
    }
}

impl Header {
    pub fn new(menu_key: &str) -> Self {
        Self {
            menu_key: menu_key.to_string(),
            items: Slice::default(),
            current_route: String::new(),
            is_scrolled: false,
        }
    }

    pub fn on_navigation_end(&mut self, url: &str) {
        self.current_route = url.to_string();
    }

    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.is_scrolled = scroll_y > SCROLLED_THRESHOLD;
    }

    /// True if `route` is the current route or one of its parents.
    pub fn is_active(&self, route: &str) -> bool {
        let current = self.current_route.as_str();
        current == route
            || current
                .strip_prefix(route)
                .is_some_and(|rest| rest.starts_with('/') || rest.starts_with('?'))
    }

    pub async fn mount<T: Transport>(&mut self, client: &ContentClient<T>, mount: &MountToken) {
        let outcome = client
            .navigation_menu(&self.menu_key)
            .await
            .map(|items| items.iter().map(NavItem::from_value).collect::<Vec<_>>());
        // An empty menu from the API reads the same as no menu.
        let outcome = outcome.map(|items| if items.is_empty() { fallback_menu() } else { items });
        self.items
            .resolve(mount, "navigation menu", outcome, fallback_menu);
    }
}

pub async fn load<T: Transport>(
    client: &ContentClient<T>,
    menu_key: &str,
    mount: &MountToken,
) -> Header {
    let mut header = Header::new(menu_key);
    header.mount(client, mount).await;
    header
}
