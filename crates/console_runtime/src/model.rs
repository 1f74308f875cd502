use console_app_contract::{ApplicationId, SurfacePoint, SurfaceSize};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fallback window width when a descriptor fixes no initial size.
pub const DEFAULT_WINDOW_WIDTH: i32 = 640;
/// Fallback window height when a descriptor fixes no initial size.
pub const DEFAULT_WINDOW_HEIGHT: i32 = 400;
/// Base x offset for the first cascaded window.
pub const DEFAULT_WINDOW_X: i32 = 96;
/// Base y offset for the first cascaded window.
pub const DEFAULT_WINDOW_Y: i32 = 72;
/// Cascade step applied per previously opened application, on both axes.
pub const CASCADE_STEP_PX: i32 = 40;
/// First stacking value handed out by the registry counter.
pub const BASE_Z_INDEX: u32 = 1000;
/// Width floor for maximized windows.
pub const MAXIMIZE_MIN_WIDTH: i32 = 720;
/// Height floor for maximized windows.
pub const MAXIMIZE_MIN_HEIGHT: i32 = 420;

/// Per-application window record owned by the registry.
///
/// A record is born the first time its application opens and is never
/// destroyed afterwards; closing only clears [`WindowRecord::is_open`] so a
/// later reopen restores the last committed geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    /// Catalog id this record belongs to.
    pub app_id: ApplicationId,
    /// Whether the window is in the open set.
    pub is_open: bool,
    /// Current top-left offset.
    pub position: SurfacePoint,
    /// Current dimensions.
    pub size: SurfaceSize,
    /// Stacking value; higher draws on top, never reused.
    pub z_index: u32,
    /// Hidden from view while retaining geometry and stacking.
    pub is_minimized: bool,
    /// Occupies the full console surface.
    pub is_maximized: bool,
    /// Geometry snapshot taken on maximize; present iff maximized.
    pub stored_position: Option<SurfacePoint>,
    /// Size snapshot taken on maximize; present iff maximized.
    pub stored_size: Option<SurfaceSize>,
    /// Participates in the shared tab strip.
    pub show_tabs: bool,
}

impl WindowRecord {
    /// Whether this window currently draws on the surface.
    pub fn is_rendered(&self) -> bool {
        self.is_open && !self.is_minimized
    }
}

/// Three-state launcher status derived from a window record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    /// Not open; clicking launches it.
    Ready,
    /// Open and visible; clicking raises it.
    Active,
    /// Open but minimized; clicking restores it.
    Dormant,
}

impl ApplicationStatus {
    /// Stable token used for dock styling and labels.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Active => "active",
            Self::Dormant => "dormant",
        }
    }
}

/// Full registry snapshot: one record per application opened so far, in
/// first-open order, plus the monotonic stacking counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryState {
    /// Window records in first-open order.
    pub windows: Vec<WindowRecord>,
    /// Next stacking value to assign; strictly increases for the lifetime of
    /// the surface.
    pub next_z_index: u32,
}

impl Default for RegistryState {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
            next_z_index: BASE_Z_INDEX,
        }
    }
}

impl RegistryState {
    /// Returns the record for `app_id` when one exists.
    pub fn window(&self, app_id: &ApplicationId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.app_id == *app_id)
    }

    /// Derives the launcher status for `app_id`.
    pub fn application_status(&self, app_id: &ApplicationId) -> ApplicationStatus {
        match self.window(app_id) {
            Some(window) if window.is_open && window.is_minimized => ApplicationStatus::Dormant,
            Some(window) if window.is_open => ApplicationStatus::Active,
            _ => ApplicationStatus::Ready,
        }
    }

    /// Returns the rendered window with the highest stacking value.
    pub fn topmost_rendered(&self) -> Option<&WindowRecord> {
        self.windows
            .iter()
            .filter(|w| w.is_rendered())
            .max_by_key(|w| w.z_index)
    }

    /// Returns the tab-participating rendered windows in first-open order.
    pub fn tab_group(&self) -> Vec<&WindowRecord> {
        self.windows
            .iter()
            .filter(|w| w.is_rendered() && w.show_tabs)
            .collect()
    }

    /// Serializes the snapshot for deterministic browser E2E assertions.
    pub fn to_debug_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Pointer coordinates in surface client space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    /// Client x.
    pub x: i32,
    /// Client y.
    pub y: i32,
}

/// One in-flight titlebar drag.
///
/// `position` is the transient visual offset; the registry record is only
/// updated when the drag ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    /// Application being dragged.
    pub app_id: ApplicationId,
    /// Pointer position at drag start.
    pub pointer_start: PointerPosition,
    /// Window position at drag start.
    pub origin: SurfacePoint,
    /// Current uncommitted visual position.
    pub position: SurfacePoint,
}

/// Transient pointer interaction state, kept outside the registry snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    /// Active titlebar drag when one exists.
    pub dragging: Option<DragSession>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(raw: &str, is_open: bool, is_minimized: bool, z_index: u32) -> WindowRecord {
        WindowRecord {
            app_id: ApplicationId::trusted(raw),
            is_open,
            position: SurfacePoint { x: 0, y: 0 },
            size: SurfaceSize {
                width: DEFAULT_WINDOW_WIDTH,
                height: DEFAULT_WINDOW_HEIGHT,
            },
            z_index,
            is_minimized,
            is_maximized: false,
            stored_position: None,
            stored_size: None,
            show_tabs: false,
        }
    }

    #[test]
    fn application_status_covers_all_three_states() {
        let state = RegistryState {
            windows: vec![
                record("uplink", true, false, BASE_Z_INDEX),
                record("atlas", true, true, BASE_Z_INDEX + 1),
                record("beacon", false, false, BASE_Z_INDEX + 2),
            ],
            next_z_index: BASE_Z_INDEX + 3,
        };

        assert_eq!(
            state.application_status(&ApplicationId::trusted("uplink")),
            ApplicationStatus::Active
        );
        assert_eq!(
            state.application_status(&ApplicationId::trusted("atlas")),
            ApplicationStatus::Dormant
        );
        assert_eq!(
            state.application_status(&ApplicationId::trusted("beacon")),
            ApplicationStatus::Ready
        );
        assert_eq!(
            state.application_status(&ApplicationId::trusted("ghost")),
            ApplicationStatus::Ready
        );
    }

    #[test]
    fn topmost_rendered_ignores_minimized_and_closed_windows() {
        let state = RegistryState {
            windows: vec![
                record("uplink", true, false, BASE_Z_INDEX),
                record("atlas", true, true, BASE_Z_INDEX + 5),
                record("beacon", false, false, BASE_Z_INDEX + 9),
            ],
            next_z_index: BASE_Z_INDEX + 10,
        };

        let topmost = state.topmost_rendered().expect("rendered window");
        assert_eq!(topmost.app_id.as_str(), "uplink");
    }

    #[test]
    fn debug_json_snapshot_carries_window_records() {
        let state = RegistryState {
            windows: vec![record("uplink", true, false, BASE_Z_INDEX)],
            next_z_index: BASE_Z_INDEX + 1,
        };

        let json = state.to_debug_json();
        assert_eq!(json["next_z_index"], 1001);
        assert_eq!(json["windows"][0]["app_id"], "uplink");
        assert_eq!(json["windows"][0]["is_open"], true);
    }
}
