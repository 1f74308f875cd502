use super::*;
use console_app_contract::{window_surface_dom_id, AppMountContext};
use crate::model::WindowRecord;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

#[component]
pub(super) fn ConsoleWindow(app_id: ApplicationId) -> impl IntoView {
    let runtime = use_console_runtime();
    let app_id = store_value(app_id);
    let descriptor = runtime
        .catalog
        .with_value(|catalog| catalog.descriptor(&app_id.get_value()).cloned())
        .expect("catalog descriptor for mounted window");

    let window = Signal::derive(move || {
        let id = app_id.get_value();
        runtime
            .state
            .get()
            .windows
            .into_iter()
            .find(|w| w.app_id == id)
    });
    // While dragging, the visual position comes from the transient session
    // instead of the registry snapshot.
    let drag_position = Signal::derive(move || {
        let id = app_id.get_value();
        runtime
            .interaction
            .get()
            .dragging
            .filter(|session| session.app_id == id)
            .map(|session| session.position)
    });

    let focus = move |_| {
        let id = app_id.get_value();
        let state = runtime.state.get_untracked();
        let already_topmost = state
            .topmost_rendered()
            .map(|w| w.app_id == id)
            .unwrap_or(false);
        if !already_topmost {
            runtime.dispatch_action(ConsoleAction::FocusWindow { app_id: id });
        }
    };
    let minimize = move |_| {
        runtime.dispatch_action(ConsoleAction::ToggleMinimize {
            app_id: app_id.get_value(),
        });
    };
    let close = move |_| {
        runtime.dispatch_action(ConsoleAction::CloseWindow {
            app_id: app_id.get_value(),
        });
    };
    let toggle_maximize = move |_| {
        runtime.dispatch_action(ConsoleAction::ToggleMaximize {
            app_id: app_id.get_value(),
            force: None,
            viewport: runtime.surface_viewport(),
        });
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if ev.pointer_type() == "mouse" && ev.button() != 0 {
            return;
        }
        if ev.pointer_type() != "mouse" && !ev.is_primary() {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(ConsoleAction::BeginMove {
            app_id: app_id.get_value(),
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let titlebar_double_click = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        toggle_maximize(ev);
    };

    view! {
        <Show when=move || window.get().map(|w| w.is_rendered()).unwrap_or(false) fallback=|| ()>
            {
                let descriptor = descriptor.clone();
                move || {
                    let Some(win) = window.get() else {
                        return ().into_view();
                    };
                    let position = drag_position.get().unwrap_or(win.position);
                    let style = format!(
                        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
                        position.x, position.y, win.size.width, win.size.height, win.z_index
                    );
                    let maximized_class = if win.is_maximized { " maximized" } else { "" };

                    view! {
                        <section
                            id=window_surface_dom_id(&win.app_id)
                            class=format!("console-window{maximized_class}")
                            style=style
                            tabindex="-1"
                            role="dialog"
                            aria-label=descriptor.title.clone()
                            on:pointerdown=focus
                        >
                            <header
                                class="titlebar"
                                on:pointerdown=begin_move
                                on:dblclick=titlebar_double_click
                            >
                                <div class="titlebar-title">
                                    <span
                                        class=format!("console-icon icon-{}", descriptor.icon_id)
                                        aria-hidden="true"
                                    ></span>
                                    <span>{descriptor.title.clone()}</span>
                                </div>
                                <div class="titlebar-controls">
                                    <button
                                        aria-label="Minimize window"
                                        on:pointerdown=move |ev: web_sys::PointerEvent| {
                                            ev.prevent_default();
                                            ev.stop_propagation();
                                        }
                                        on:mousedown=move |ev| stop_mouse_event(&ev)
                                        on:click=move |ev| {
                                            stop_mouse_event(&ev);
                                            minimize(ev);
                                        }
                                    >
                                        "–"
                                    </button>
                                    <button
                                        aria-label=if win.is_maximized {
                                            "Restore window"
                                        } else {
                                            "Maximize window"
                                        }
                                        on:pointerdown=move |ev: web_sys::PointerEvent| {
                                            ev.prevent_default();
                                            ev.stop_propagation();
                                        }
                                        on:mousedown=move |ev| stop_mouse_event(&ev)
                                        on:click=move |ev| {
                                            stop_mouse_event(&ev);
                                            toggle_maximize(ev);
                                        }
                                    >
                                        {if win.is_maximized { "❐" } else { "□" }}
                                    </button>
                                    <button
                                        aria-label="Close window"
                                        on:pointerdown=move |ev: web_sys::PointerEvent| {
                                            ev.prevent_default();
                                            ev.stop_propagation();
                                        }
                                        on:mousedown=move |ev| stop_mouse_event(&ev)
                                        on:click=move |ev| {
                                            stop_mouse_event(&ev);
                                            close(ev);
                                        }
                                    >
                                        "✕"
                                    </button>
                                </div>
                            </header>
                            <Show
                                when=move || {
                                    window
                                        .get()
                                        .map(|w| w.is_maximized && w.show_tabs)
                                        .unwrap_or(false)
                                }
                                fallback=|| ()
                            >
                                <WindowTabStrip app_id=app_id.get_value() />
                            </Show>
                            <div class="window-body">
                                <WindowContent app_id=win.app_id.clone() />
                            </div>
                        </section>
                    }
                    .into_view()
                }
            }
        </Show>
    }
}

/// Tab strip rendered on a maximized window, listing every rendered
/// tab-participating window in first-open order.
#[component]
fn WindowTabStrip(app_id: ApplicationId) -> impl IntoView {
    let runtime = use_console_runtime();
    let app_id = store_value(app_id);

    view! {
        <nav class="window-tab-strip" role="tablist">
            <For
                each=move || {
                    let state = runtime.state.get();
                    state
                        .tab_group()
                        .into_iter()
                        .cloned()
                        .collect::<Vec<WindowRecord>>()
                }
                key=|win| win.app_id.to_string()
                let:win
            >
                {{
                    let tab_id = win.app_id.clone();
                    let call_sign = runtime
                        .catalog
                        .with_value(|catalog| {
                            catalog.descriptor(&tab_id).map(|d| d.call_sign.clone())
                        })
                        .unwrap_or_default();
                    let is_current = tab_id == app_id.get_value();
                    let select_id = tab_id.clone();
                    view! {
                        <button
                            role="tab"
                            aria-selected=is_current.to_string()
                            class=if is_current { "window-tab current" } else { "window-tab" }
                            on:pointerdown=move |ev: web_sys::PointerEvent| {
                                ev.prevent_default();
                                ev.stop_propagation();
                            }
                            on:mousedown=move |ev| stop_mouse_event(&ev)
                            on:click=move |ev| {
                                stop_mouse_event(&ev);
                                if select_id != app_id.get_value() {
                                    runtime.dispatch_action(ConsoleAction::SelectTab {
                                        from: app_id.get_value(),
                                        to: select_id.clone(),
                                        viewport: runtime.surface_viewport(),
                                    });
                                }
                            }
                        >
                            {call_sign}
                        </button>
                    }
                }}
            </For>
        </nav>
    }
}

/// Mounts the caller-supplied opaque content payload for one window.
#[component]
fn WindowContent(app_id: ApplicationId) -> impl IntoView {
    let runtime = use_console_runtime();
    let contents = runtime
        .catalog
        .with_value(|catalog| {
            catalog.descriptor(&app_id).map(|descriptor| {
                descriptor.module.mount(AppMountContext {
                    app_id: descriptor.app_id.clone(),
                })
            })
        })
        .unwrap_or_else(|| ().into_view());

    view! { <div class="window-body-content">{contents}</div> }
}
