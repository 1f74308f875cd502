//! Console surface UI composition and interaction surfaces.

mod dock;
mod palette;
mod window;

use std::time::Duration;

use console_app_contract::ApplicationId;
use leptos::*;

use self::{dock::Dock, palette::CommandPalette, window::ConsoleWindow};
use crate::{
    model::{ApplicationStatus, PointerPosition},
    registry::ConsoleAction,
};

pub use crate::runtime_context::{use_console_runtime, ConsoleProvider, ConsoleRuntimeContext};

/// Delay before the configured auto-open fires, letting the surface lay out
/// first. One-shot; unmounting the surface is the only cancellation path.
const AUTO_OPEN_DELAY: Duration = Duration::from_millis(400);

#[component]
/// Renders the full console surface: one window per catalog entry, the dock
/// rail, and the command palette overlay.
pub fn ConsoleSurface(
    /// Application to open once, shortly after mount.
    #[prop(optional)]
    auto_open: Option<ApplicationId>,
) -> impl IntoView {
    let runtime = use_console_runtime();

    if let Some(app_id) = auto_open {
        set_timeout(
            move || runtime.dispatch_action(ConsoleAction::OpenWindow { app_id }),
            AUTO_OPEN_DELAY,
        );
    }

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        if runtime.interaction.get_untracked().dragging.is_some() {
            runtime.dispatch_action(ConsoleAction::UpdateMove {
                pointer: pointer_from_pointer_event(&ev),
            });
        }
    };
    let on_pointer_end = move |_| {
        if runtime.interaction.get_untracked().dragging.is_some() {
            runtime.dispatch_action(ConsoleAction::EndMove);
        }
    };

    view! {
        <div
            class="console-surface"
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_end
            on:pointercancel=on_pointer_end
        >
            <div class="console-window-layer">
                <For
                    each=move || {
                        runtime.catalog.with_value(|catalog| {
                            catalog
                                .iter()
                                .map(|app| app.app_id.clone())
                                .collect::<Vec<_>>()
                        })
                    }
                    key=|app_id| app_id.to_string()
                    let:app_id
                >
                    <ConsoleWindow app_id=app_id />
                </For>
            </div>

            <Dock />
            <CommandPalette />
        </div>
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}
