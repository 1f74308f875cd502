use console_app_contract::{AppCatalog, AppDescriptor};
use leptos::ev;

use super::*;

/// Keyboard-summoned launcher overlay.
///
/// `Ctrl+K` (or `Cmd+K`) toggles the palette; `Escape` dismisses it. Typing
/// filters the catalog and `Enter` launches the first remaining match.
#[component]
pub(super) fn CommandPalette() -> impl IntoView {
    let runtime = use_console_runtime();
    let open = create_rw_signal(false);
    let query = create_rw_signal(String::new());

    let keydown = window_event_listener(ev::keydown, move |ev| {
        let key = ev.key();
        if (ev.ctrl_key() || ev.meta_key()) && !ev.alt_key() && key.eq_ignore_ascii_case("k") {
            ev.prevent_default();
            query.set(String::new());
            open.update(|value| *value = !*value);
        } else if key == "Escape" && open.get_untracked() {
            open.set(false);
        }
    });
    on_cleanup(move || keydown.remove());

    let launch = move |app_id: ApplicationId| {
        runtime.dispatch_action(ConsoleAction::OpenWindow { app_id });
        query.set(String::new());
        open.set(false);
    };

    let results = move || {
        runtime
            .catalog
            .with_value(|catalog| palette_matches(catalog, &query.get()))
    };

    view! {
        <Show when=move || open.get() fallback=|| ()>
            <div class="palette-backdrop" on:mousedown=move |_| open.set(false)>
                <div
                    class="command-palette"
                    role="dialog"
                    aria-label="Command palette"
                    on:mousedown=|ev| ev.stop_propagation()
                >
                    <input
                        class="palette-input"
                        type="text"
                        placeholder="Search applications"
                        prop:value=move || query.get()
                        on:input=move |ev| query.set(event_target_value(&ev))
                        on:keydown=move |ev| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                if let Some(first) = results().into_iter().next() {
                                    launch(first.app_id);
                                }
                            }
                        }
                    />
                    <ul class="palette-results" role="listbox">
                        <For
                            each=results
                            key=|app| app.app_id.to_string()
                            let:app
                        >
                            {{
                                let launch_id = app.app_id.clone();
                                view! {
                                    <li role="option">
                                        <button
                                            class="palette-result"
                                            on:click=move |ev| {
                                                stop_mouse_event(&ev);
                                                launch(launch_id.clone());
                                            }
                                        >
                                            <span class="palette-result-title">
                                                {app.title.clone()}
                                            </span>
                                            <span class="palette-result-description">
                                                {app.description.clone()}
                                            </span>
                                        </button>
                                    </li>
                                }
                            }}
                        </For>
                    </ul>
                </div>
            </div>
        </Show>
    }
}

/// Filters the catalog by case-insensitive substring against each entry's
/// title and description. A blank query keeps every entry.
pub(super) fn palette_matches(catalog: &AppCatalog, query: &str) -> Vec<AppDescriptor> {
    let needle = query.trim().to_lowercase();
    catalog
        .iter()
        .filter(|app| {
            needle.is_empty()
                || app.title.to_lowercase().contains(&needle)
                || app.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use console_app_contract::{AppModule, SurfaceSize};
    use pretty_assertions::assert_eq;

    use super::*;

    fn blank(_: console_app_contract::AppMountContext) -> View {
        ().into_view()
    }

    fn catalog() -> AppCatalog {
        AppCatalog::new(vec![
            AppDescriptor {
                app_id: ApplicationId::trusted("uplink"),
                title: "Uplink Monitor".to_string(),
                call_sign: "UPL".to_string(),
                icon_id: "uplink".to_string(),
                description: "Live relay telemetry".to_string(),
                initial_size: Some(SurfaceSize {
                    width: 640,
                    height: 400,
                }),
                initial_position: None,
                module: AppModule::new(blank),
            },
            AppDescriptor {
                app_id: ApplicationId::trusted("atlas"),
                title: "Atlas".to_string(),
                call_sign: "ATL".to_string(),
                icon_id: "atlas".to_string(),
                description: "Station map and routing".to_string(),
                initial_size: None,
                initial_position: None,
                module: AppModule::new(blank),
            },
        ])
    }

    fn matched_ids(query: &str) -> Vec<String> {
        palette_matches(&catalog(), query)
            .into_iter()
            .map(|app| app.app_id.to_string())
            .collect()
    }

    #[test]
    fn blank_query_keeps_catalog_order() {
        assert_eq!(matched_ids(""), vec!["uplink", "atlas"]);
        assert_eq!(matched_ids("   "), vec!["uplink", "atlas"]);
    }

    #[test]
    fn query_matches_title_and_description_case_insensitively() {
        assert_eq!(matched_ids("MONITOR"), vec!["uplink"]);
        assert_eq!(matched_ids("routing"), vec!["atlas"]);
        assert_eq!(matched_ids("  atlas "), vec!["atlas"]);
    }

    #[test]
    fn unmatched_query_yields_no_results() {
        assert_eq!(matched_ids("zephyr"), Vec::<String>::new());
    }
}
