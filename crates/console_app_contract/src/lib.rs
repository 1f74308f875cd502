//! Shared contract types between the operator console runtime and hosted
//! applications.
//!
//! The hosting page builds an ordered [`AppCatalog`] of immutable
//! [`AppDescriptor`] entries before the console mounts. Window content stays
//! opaque to the window manager: it is supplied as an [`AppMountFn`] and never
//! enters registry state.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use leptos::View;
use serde::{Deserialize, Serialize};

/// Stable identifier for a console application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Returns an application identifier when `raw` conforms to the
    /// lowercase-slug policy (`terminal`, `course-vault`, ...).
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_application_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid application id `{raw}`; expected a lowercase slug"
            ))
        }
    }

    /// Creates an id without validation for compile-time trusted constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_valid_application_id(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 64 {
        return false;
    }
    let bytes = raw.as_bytes();
    if !bytes[0].is_ascii_lowercase() {
        return false;
    }
    if raw.ends_with('-') || raw.contains("--") {
        return false;
    }
    bytes
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
}

/// Top-left offset of a window on the console surface, in px.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfacePoint {
    /// Horizontal offset from the surface origin.
    pub x: i32,
    /// Vertical offset from the surface origin.
    pub y: i32,
}

impl SurfacePoint {
    /// Returns this point shifted by `(dx, dy)`.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Window dimensions in px.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    /// Window width.
    pub width: i32,
    /// Window height.
    pub height: i32,
}

impl SurfaceSize {
    /// Returns these dimensions clamped to the given floor.
    pub fn clamped_min(self, min_width: i32, min_height: i32) -> Self {
        Self {
            width: self.width.max(min_width),
            height: self.height.max(min_height),
        }
    }
}

/// Mount context injected by the console runtime when window content renders.
#[derive(Debug, Clone)]
pub struct AppMountContext {
    /// Stable application id from the catalog.
    pub app_id: ApplicationId,
}

/// Content mount function supplied by the hosting page per application.
pub type AppMountFn = fn(AppMountContext) -> View;

/// Opaque renderable content payload carried by a catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct AppModule {
    mount_fn: AppMountFn,
}

impl AppModule {
    /// Creates a module from a mount function.
    pub const fn new(mount_fn: AppMountFn) -> Self {
        Self { mount_fn }
    }

    /// Mounts the content view with a runtime-provided context.
    pub fn mount(self, context: AppMountContext) -> View {
        (self.mount_fn)(context)
    }
}

/// Immutable application descriptor supplied once at console startup.
#[derive(Debug, Clone)]
pub struct AppDescriptor {
    /// Unique catalog key.
    pub app_id: ApplicationId,
    /// Full display title shown in the titlebar and palette.
    pub title: String,
    /// Short call-sign label shown in the dock and tab strip.
    pub call_sign: String,
    /// Icon reference resolved by the hosting page's stylesheet.
    pub icon_id: String,
    /// Descriptive text searched by the command palette.
    pub description: String,
    /// Optional fixed initial size.
    pub initial_size: Option<SurfaceSize>,
    /// Optional fixed initial position; bypasses the open cascade.
    pub initial_position: Option<SurfacePoint>,
    /// Opaque content payload mounted into the window body.
    pub module: AppModule,
}

/// Ordered catalog of application descriptors.
///
/// Order determines dock display order; the open cascade is driven by the
/// registry's own first-open order, not catalog order.
#[derive(Debug, Clone, Default)]
pub struct AppCatalog {
    apps: Vec<AppDescriptor>,
}

impl AppCatalog {
    /// Builds a catalog from descriptors, keeping the first entry per id.
    pub fn new(apps: Vec<AppDescriptor>) -> Self {
        let mut seen: Vec<ApplicationId> = Vec::with_capacity(apps.len());
        let apps = apps
            .into_iter()
            .filter(|app| {
                if seen.contains(&app.app_id) {
                    false
                } else {
                    seen.push(app.app_id.clone());
                    true
                }
            })
            .collect();
        Self { apps }
    }

    /// Returns the descriptor for `app_id` when it is in the catalog.
    pub fn descriptor(&self, app_id: &ApplicationId) -> Option<&AppDescriptor> {
        self.apps.iter().find(|app| app.app_id == *app_id)
    }

    /// Returns whether `app_id` names a catalog entry.
    pub fn contains(&self, app_id: &ApplicationId) -> bool {
        self.descriptor(app_id).is_some()
    }

    /// Iterates descriptors in display order.
    pub fn iter(&self) -> impl Iterator<Item = &AppDescriptor> {
        self.apps.iter()
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.apps.len()
    }

    /// Returns whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

/// Stable DOM id for a managed window's focusable root element.
pub fn window_surface_dom_id(app_id: &ApplicationId) -> String {
    format!("console-window-{app_id}")
}

#[cfg(test)]
mod tests {
    use leptos::IntoView;

    use super::*;

    fn blank(_: AppMountContext) -> View {
        ().into_view()
    }

    fn descriptor(raw: &str) -> AppDescriptor {
        AppDescriptor {
            app_id: ApplicationId::trusted(raw),
            title: raw.to_string(),
            call_sign: raw[..raw.len().min(3)].to_uppercase(),
            icon_id: raw.to_string(),
            description: String::new(),
            initial_size: None,
            initial_position: None,
            module: AppModule::new(blank),
        }
    }

    #[test]
    fn application_id_requires_lowercase_slug() {
        assert!(ApplicationId::new("terminal").is_ok());
        assert!(ApplicationId::new("course-vault").is_ok());
        assert!(ApplicationId::new("").is_err());
        assert!(ApplicationId::new("Terminal").is_err());
        assert!(ApplicationId::new("term_inal").is_err());
        assert!(ApplicationId::new("trailing-").is_err());
        assert!(ApplicationId::new("double--dash").is_err());
    }

    #[test]
    fn catalog_preserves_order_and_drops_duplicate_ids() {
        let catalog = AppCatalog::new(vec![
            descriptor("alpha"),
            descriptor("beta"),
            descriptor("alpha"),
        ]);

        assert_eq!(catalog.len(), 2);
        let order: Vec<&str> = catalog.iter().map(|app| app.app_id.as_str()).collect();
        assert_eq!(order, vec!["alpha", "beta"]);
        assert!(catalog.contains(&ApplicationId::trusted("beta")));
        assert!(!catalog.contains(&ApplicationId::trusted("gamma")));
    }
}
