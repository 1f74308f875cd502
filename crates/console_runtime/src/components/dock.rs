use super::*;

/// Persistent launcher rail listing every catalog application.
///
/// Each entry reflects the three-state lifecycle of its window: never opened
/// or closed, open and on the surface, or minimized.
#[component]
pub(super) fn Dock() -> impl IntoView {
    let runtime = use_console_runtime();

    view! {
        <nav class="console-dock" aria-label="Application dock">
            <For
                each=move || {
                    runtime.catalog.with_value(|catalog| {
                        catalog
                            .iter()
                            .map(|app| {
                                (app.app_id.clone(), app.title.clone(), app.icon_id.clone())
                            })
                            .collect::<Vec<_>>()
                    })
                }
                key=|entry| entry.0.to_string()
                let:entry
            >
                {{
                    let (app_id, title, icon_id) = entry;
                    let status_id = app_id.clone();
                    let status = Signal::derive(move || {
                        runtime.state.get().application_status(&status_id)
                    });
                    let label_title = title.clone();
                    let activate = move |ev: web_sys::MouseEvent| {
                        stop_mouse_event(&ev);
                        let action = match status.get_untracked() {
                            ApplicationStatus::Ready => ConsoleAction::OpenWindow {
                                app_id: app_id.clone(),
                            },
                            ApplicationStatus::Active => ConsoleAction::FocusWindow {
                                app_id: app_id.clone(),
                            },
                            ApplicationStatus::Dormant => ConsoleAction::ToggleMinimize {
                                app_id: app_id.clone(),
                            },
                        };
                        runtime.dispatch_action(action);
                    };
                    view! {
                        <button
                            class=move || format!("dock-entry status-{}", status.get().token())
                            aria-label=move || dock_entry_aria_label(&label_title, status.get())
                            title=title.clone()
                            on:click=activate
                        >
                            <span
                                class=format!("console-icon icon-{icon_id}")
                                aria-hidden="true"
                            ></span>
                        </button>
                    }
                }}
            </For>
        </nav>
    }
}

fn dock_entry_aria_label(title: &str, status: ApplicationStatus) -> String {
    let state = match status {
        ApplicationStatus::Ready => "ready",
        ApplicationStatus::Active => "active",
        ApplicationStatus::Dormant => "minimized",
    };
    format!("{title} ({state})")
}
