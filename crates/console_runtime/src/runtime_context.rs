//! Runtime provider and context wiring for the operator console.
//!
//! This module owns the long-lived registry container and the dispatch
//! callback; UI composition stays in [`crate::components`].

use console_app_contract::{AppCatalog, SurfaceSize};
use leptos::*;

use crate::{
    host::ConsoleHostContext,
    model::{InteractionState, RegistryState},
    registry::{reduce_console, ConsoleAction},
};

#[derive(Clone, Copy)]
/// Leptos context for reading console state and dispatching [`ConsoleAction`]
/// values.
pub struct ConsoleRuntimeContext {
    /// Host boundary for viewport queries and effect execution.
    pub host: StoredValue<ConsoleHostContext>,
    /// Immutable application catalog supplied at mount.
    pub catalog: StoredValue<AppCatalog>,
    /// Reactive registry snapshot signal.
    pub state: RwSignal<RegistryState>,
    /// Reactive drag interaction signal.
    pub interaction: RwSignal<InteractionState>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<ConsoleAction>,
}

impl ConsoleRuntimeContext {
    /// Dispatches a registry action through the runtime context callback.
    pub fn dispatch_action(&self, action: ConsoleAction) {
        self.dispatch.call(action);
    }

    /// Returns the surface dimensions currently available for maximize.
    pub fn surface_viewport(&self) -> SurfaceSize {
        self.host.get_value().surface_viewport_size()
    }
}

#[component]
/// Provides [`ConsoleRuntimeContext`] to descendant components.
///
/// Every dispatched action runs the reducer against a clone of the current
/// snapshot and publishes the result with a single `set`, so observers never
/// see partial updates.
pub fn ConsoleProvider(
    /// Ordered application catalog assembled by the hosting page.
    catalog: AppCatalog,
    children: Children,
) -> impl IntoView {
    let host = store_value(ConsoleHostContext);
    let catalog = store_value(catalog);
    let state = create_rw_signal(RegistryState::default());
    let interaction = create_rw_signal(InteractionState::default());

    let dispatch = Callback::new(move |action: ConsoleAction| {
        let mut registry = state.get_untracked();
        let mut drag = interaction.get_untracked();
        let previous_registry = registry.clone();
        let previous_drag = drag.clone();

        let outcome = catalog
            .with_value(|catalog| reduce_console(catalog, &mut registry, &mut drag, action));
        match outcome {
            Ok(effects) => {
                if registry != previous_registry {
                    state.set(registry);
                }
                if drag != previous_drag {
                    interaction.set(drag);
                }
                for effect in effects {
                    host.get_value().run_runtime_effect(effect);
                }
            }
            Err(err) => logging::warn!("console registry rejected action: {err}"),
        }
    });

    let runtime = ConsoleRuntimeContext {
        host,
        catalog,
        state,
        interaction,
        dispatch,
    };
    provide_context(runtime);

    children().into_view()
}

/// Returns the current [`ConsoleRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`ConsoleProvider`].
pub fn use_console_runtime() -> ConsoleRuntimeContext {
    use_context::<ConsoleRuntimeContext>().expect("ConsoleRuntimeContext not provided")
}
