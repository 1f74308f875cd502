//! Registry mutation API: actions, side-effect intents, and transition logic
//! for the operator console window manager.

use console_app_contract::{AppCatalog, ApplicationId, SurfacePoint, SurfaceSize};
use thiserror::Error;

use crate::model::{
    DragSession, InteractionState, PointerPosition, RegistryState, WindowRecord,
    CASCADE_STEP_PX, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_X,
    DEFAULT_WINDOW_Y, MAXIMIZE_MIN_HEIGHT, MAXIMIZE_MIN_WIDTH,
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Actions accepted by [`reduce_console`] to mutate [`RegistryState`].
pub enum ConsoleAction {
    /// Open an application, creating its window record on first open.
    OpenWindow {
        /// Application to open.
        app_id: ApplicationId,
    },
    /// Soft-close a window; the record keeps its geometry for reopening.
    CloseWindow {
        /// Application to close.
        app_id: ApplicationId,
    },
    /// Raise a window to the top of the stack and clear minimized.
    FocusWindow {
        /// Application to focus.
        app_id: ApplicationId,
    },
    /// Flip the minimized flag, leaving geometry and stacking untouched.
    ToggleMinimize {
        /// Application to minimize or restore.
        app_id: ApplicationId,
    },
    /// Overwrite a window's position; ignored while maximized.
    SetWindowPosition {
        /// Application to reposition.
        app_id: ApplicationId,
        /// New top-left offset.
        position: SurfacePoint,
    },
    /// Overwrite a window's size, regardless of maximize state.
    SetWindowSize {
        /// Application to resize.
        app_id: ApplicationId,
        /// New dimensions.
        size: SurfaceSize,
    },
    /// Toggle (or force) the maximized state against the given viewport.
    ToggleMaximize {
        /// Application to maximize or restore.
        app_id: ApplicationId,
        /// Target state; `None` negates the current state.
        force: Option<bool>,
        /// Available surface dimensions used when entering maximize.
        viewport: SurfaceSize,
    },
    /// Switch the shared tab strip from one window to another.
    SelectTab {
        /// Window the tab strip is rendered on.
        from: ApplicationId,
        /// Selected tab's application.
        to: ApplicationId,
        /// Available surface dimensions, forwarded to maximize.
        viewport: SurfaceSize,
    },
    /// Begin a titlebar drag, popping a maximized window back to floating.
    BeginMove {
        /// Application being dragged.
        app_id: ApplicationId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update the transient visual position of the active drag.
    UpdateMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active drag and commit its final position.
    EndMove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_console`] for the host boundary.
pub enum RuntimeEffect {
    /// Move DOM focus onto the window surface of the given application.
    FocusWindowSurface(ApplicationId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Registry errors for actions that reference ids outside the catalog.
pub enum RegistryError {
    /// The action named an application id absent from the catalog.
    #[error("application `{0}` is not in the catalog")]
    UnknownApplication(ApplicationId),
}

/// Applies a [`ConsoleAction`] to the registry snapshot and collects resulting
/// side effects.
///
/// Operations addressing a catalog application whose window was never opened,
/// or is currently closed, are silent no-ops.
///
/// # Errors
///
/// Returns [`RegistryError::UnknownApplication`] when an action references an
/// id absent from the catalog.
pub fn reduce_console(
    catalog: &AppCatalog,
    state: &mut RegistryState,
    interaction: &mut InteractionState,
    action: ConsoleAction,
) -> Result<Vec<RuntimeEffect>, RegistryError> {
    let mut effects = Vec::new();
    match action {
        ConsoleAction::OpenWindow { app_id } => {
            let descriptor = catalog
                .descriptor(&app_id)
                .ok_or_else(|| RegistryError::UnknownApplication(app_id.clone()))?;
            let z_index = next_z_index(state);
            if let Some(window) = find_window_mut(state, &app_id) {
                window.is_open = true;
                window.is_minimized = false;
                window.z_index = z_index;
            } else {
                let opened_before = state.windows.len() as i32;
                let position = descriptor.initial_position.unwrap_or(SurfacePoint {
                    x: DEFAULT_WINDOW_X + opened_before * CASCADE_STEP_PX,
                    y: DEFAULT_WINDOW_Y + opened_before * CASCADE_STEP_PX,
                });
                let size = descriptor.initial_size.unwrap_or(SurfaceSize {
                    width: DEFAULT_WINDOW_WIDTH,
                    height: DEFAULT_WINDOW_HEIGHT,
                });
                state.windows.push(WindowRecord {
                    app_id: app_id.clone(),
                    is_open: true,
                    position,
                    size,
                    z_index,
                    is_minimized: false,
                    is_maximized: false,
                    stored_position: None,
                    stored_size: None,
                    show_tabs: false,
                });
            }

            let another_maximized = state
                .windows
                .iter()
                .any(|w| w.app_id != app_id && w.is_open && w.is_maximized);
            if another_maximized {
                for window in state.windows.iter_mut().filter(|w| w.is_open) {
                    window.show_tabs = true;
                }
            }

            effects.push(RuntimeEffect::FocusWindowSurface(app_id));
        }
        ConsoleAction::CloseWindow { app_id } => {
            require_known(catalog, &app_id)?;
            if let Some(window) = find_window_mut(state, &app_id) {
                window.is_open = false;
            }
        }
        ConsoleAction::FocusWindow { app_id } => {
            require_known(catalog, &app_id)?;
            focus_window_internal(state, &app_id, &mut effects);
        }
        ConsoleAction::ToggleMinimize { app_id } => {
            require_known(catalog, &app_id)?;
            if let Some(window) = find_window_mut(state, &app_id) {
                if window.is_open {
                    window.is_minimized = !window.is_minimized;
                }
            }
        }
        ConsoleAction::SetWindowPosition { app_id, position } => {
            require_known(catalog, &app_id)?;
            if let Some(window) = find_window_mut(state, &app_id) {
                if window.is_open && !window.is_maximized {
                    window.position = position;
                }
            }
        }
        ConsoleAction::SetWindowSize { app_id, size } => {
            require_known(catalog, &app_id)?;
            if let Some(window) = find_window_mut(state, &app_id) {
                if window.is_open {
                    window.size = size;
                }
            }
        }
        ConsoleAction::ToggleMaximize {
            app_id,
            force,
            viewport,
        } => {
            require_known(catalog, &app_id)?;
            let Some(current) = state.window(&app_id) else {
                return Ok(effects);
            };
            if !current.is_open {
                return Ok(effects);
            }
            let target = force.unwrap_or(!current.is_maximized);
            if target && !current.is_maximized {
                enter_maximize(state, &app_id, viewport);
            } else if !target && current.is_maximized {
                leave_maximize(catalog, state, &app_id);
            }
        }
        ConsoleAction::SelectTab { from, to, viewport } => {
            require_known(catalog, &from)?;
            require_known(catalog, &to)?;
            if from == to {
                return Ok(effects);
            }
            let from_maximized = state
                .window(&from)
                .map(|w| w.is_open && w.is_maximized)
                .unwrap_or(false);
            let to_open = state.window(&to).map(|w| w.is_open).unwrap_or(false);
            if !to_open {
                effects.extend(reduce_console(
                    catalog,
                    state,
                    interaction,
                    ConsoleAction::OpenWindow { app_id: to.clone() },
                )?);
            }
            if from_maximized {
                effects.extend(reduce_console(
                    catalog,
                    state,
                    interaction,
                    ConsoleAction::ToggleMaximize {
                        app_id: to.clone(),
                        force: Some(true),
                        viewport,
                    },
                )?);
            }
            effects.extend(reduce_console(
                catalog,
                state,
                interaction,
                ConsoleAction::FocusWindow { app_id: to },
            )?);
        }
        ConsoleAction::BeginMove { app_id, pointer } => {
            require_known(catalog, &app_id)?;
            let Some(window) = state.window(&app_id) else {
                return Ok(effects);
            };
            if !window.is_rendered() {
                return Ok(effects);
            }
            if window.is_maximized {
                leave_maximize(catalog, state, &app_id);
            }
            focus_window_internal(state, &app_id, &mut effects);
            let origin = state
                .window(&app_id)
                .map(|w| w.position)
                .unwrap_or(SurfacePoint {
                    x: DEFAULT_WINDOW_X,
                    y: DEFAULT_WINDOW_Y,
                });
            interaction.dragging = Some(DragSession {
                app_id,
                pointer_start: pointer,
                origin,
                position: origin,
            });
        }
        ConsoleAction::UpdateMove { pointer } => {
            if let Some(session) = interaction.dragging.as_mut() {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                session.position = session.origin.offset(dx, dy);
            }
        }
        ConsoleAction::EndMove => {
            if let Some(session) = interaction.dragging.take() {
                if let Some(window) = find_window_mut(state, &session.app_id) {
                    if window.is_open && !window.is_maximized {
                        window.position = session.position;
                    }
                }
            }
        }
    }

    Ok(effects)
}

fn require_known(catalog: &AppCatalog, app_id: &ApplicationId) -> Result<(), RegistryError> {
    if catalog.contains(app_id) {
        Ok(())
    } else {
        Err(RegistryError::UnknownApplication(app_id.clone()))
    }
}

fn next_z_index(state: &mut RegistryState) -> u32 {
    let z_index = state.next_z_index;
    state.next_z_index = state.next_z_index.saturating_add(1);
    z_index
}

fn find_window_mut<'a>(
    state: &'a mut RegistryState,
    app_id: &ApplicationId,
) -> Option<&'a mut WindowRecord> {
    state.windows.iter_mut().find(|w| w.app_id == *app_id)
}

fn focus_window_internal(
    state: &mut RegistryState,
    app_id: &ApplicationId,
    effects: &mut Vec<RuntimeEffect>,
) {
    let is_open = state.window(app_id).map(|w| w.is_open).unwrap_or(false);
    if !is_open {
        return;
    }
    let z_index = next_z_index(state);
    if let Some(window) = find_window_mut(state, app_id) {
        window.z_index = z_index;
        window.is_minimized = false;
    }
    effects.push(RuntimeEffect::FocusWindowSurface(app_id.clone()));
}

fn enter_maximize(state: &mut RegistryState, app_id: &ApplicationId, viewport: SurfaceSize) {
    let join_tab_group = state
        .windows
        .iter()
        .any(|w| w.app_id != *app_id && w.is_open && w.show_tabs);
    if let Some(window) = find_window_mut(state, app_id) {
        window.stored_position = Some(window.position);
        window.stored_size = Some(window.size);
        window.position = SurfacePoint { x: 0, y: 0 };
        window.size = viewport.clamped_min(MAXIMIZE_MIN_WIDTH, MAXIMIZE_MIN_HEIGHT);
        window.is_minimized = false;
        window.is_maximized = true;
        if join_tab_group {
            window.show_tabs = true;
        }
    }
}

fn leave_maximize(catalog: &AppCatalog, state: &mut RegistryState, app_id: &ApplicationId) {
    let (fallback_position, fallback_size) = catalog
        .descriptor(app_id)
        .map(|descriptor| (descriptor.initial_position, descriptor.initial_size))
        .unwrap_or((None, None));
    if let Some(window) = find_window_mut(state, app_id) {
        window.position = window
            .stored_position
            .take()
            .or(fallback_position)
            .unwrap_or(SurfacePoint {
                x: DEFAULT_WINDOW_X,
                y: DEFAULT_WINDOW_Y,
            });
        window.size = window
            .stored_size
            .take()
            .or(fallback_size)
            .unwrap_or(SurfaceSize {
                width: DEFAULT_WINDOW_WIDTH,
                height: DEFAULT_WINDOW_HEIGHT,
            });
        window.is_maximized = false;
        window.show_tabs = false;
    }
}
