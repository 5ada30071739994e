//! Static route tables and navigation active-state resolution
//!
//! The resolver only compares path prefixes; query strings and fragments
//! are never parsed.

/// A site-internal navigation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
}

/// A link leaving the site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalLink {
    pub label: &'static str,
    pub href: &'static str,
}

pub const HOME_HREF: &str = "/";
pub const SERVICES_HREF: &str = "/services";

/// Caption shown in the collapsed mobile header when no entry matches
pub const FALLBACK_LABEL: &str = "Menu";

pub const PRIMARY_NAV: &[NavItem] = &[
    NavItem { label: "Home", href: "/" },
    NavItem { label: "About Us", href: "/about" },
    NavItem { label: "Services", href: "/services" },
    NavItem { label: "Gallery", href: "/gallery" },
    NavItem { label: "Contact", href: "/contact" },
    NavItem { label: "Blog", href: "/blog" },
];

pub const SERVICE_NAV: &[NavItem] = &[
    NavItem { label: "Kitchen Backsplash", href: "/kitchen-backsplashes" },
    NavItem { label: "Bathroom & Shower", href: "/bathroom-shower" },
    NavItem { label: "Floor Tile Installation", href: "/floor-tile-installation" },
    NavItem { label: "Fireplaces", href: "/fireplaces" },
    NavItem { label: "Special Projects", href: "/special-projects" },
];

pub const SOCIAL_LINKS: &[ExternalLink] = &[
    ExternalLink { label: "Facebook", href: "https://www.facebook.com/AestheticTileCo" },
    ExternalLink { label: "X", href: "https://x.com/AestheticTileCo" },
    ExternalLink { label: "YouTube", href: "https://www.youtube.com/@AestheticTile" },
    ExternalLink { label: "Instagram", href: "https://www.instagram.com/aesthetictile/" },
];

/// Whether a link should be highlighted for the current path.
///
/// Home only matches itself exactly; every other link matches its own path
/// and anything beneath it.
pub fn is_active(href: &str, current_path: &str) -> bool {
    if href == HOME_HREF {
        return current_path == HOME_HREF;
    }
    current_path.starts_with(href)
}

/// Whether the collapsible services group should be highlighted.
///
/// True on the services index and on any individual service page.
pub fn is_services_group_active<S: AsRef<str>>(current_path: &str, child_hrefs: &[S]) -> bool {
    is_active(SERVICES_HREF, current_path)
        || child_hrefs
            .iter()
            .any(|href| is_active(href.as_ref(), current_path))
}

/// Label of the entry whose href equals the current path
pub fn current_label(current_path: &str) -> &'static str {
    PRIMARY_NAV
        .iter()
        .chain(SERVICE_NAV.iter())
        .find(|item| item.href == current_path)
        .map(|item| item.label)
        .unwrap_or(FALLBACK_LABEL)
}

/// Highlight state for both route tables, derived from one path.
///
/// Recomputed on every path change and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveNavSet {
    pub primary: Vec<&'static str>,
    pub services: Vec<&'static str>,
    pub services_group: bool,
}

impl ActiveNavSet {
    /// Resolve against the site's own route tables
    pub fn resolve(current_path: &str) -> Self {
        Self::resolve_with(current_path, PRIMARY_NAV, SERVICE_NAV)
    }

    /// Resolve against arbitrary ordered route tables
    pub fn resolve_with(current_path: &str, primary: &[NavItem], services: &[NavItem]) -> Self {
        let service_hrefs: Vec<&str> = services.iter().map(|item| item.href).collect();
        let services_group = is_services_group_active(current_path, &service_hrefs);

        let primary = primary
            .iter()
            .filter(|item| {
                if item.href == SERVICES_HREF {
                    services_group
                } else {
                    is_active(item.href, current_path)
                }
            })
            .map(|item| item.href)
            .collect();

        let services = services
            .iter()
            .filter(|item| is_active(item.href, current_path))
            .map(|item| item.href)
            .collect();

        Self {
            primary,
            services,
            services_group,
        }
    }

    pub fn is_primary_active(&self, href: &str) -> bool {
        self.primary.contains(&href)
    }

    pub fn is_service_active(&self, href: &str) -> bool {
        self.services.contains(&href)
    }
}
