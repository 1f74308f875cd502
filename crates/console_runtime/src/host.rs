//! Browser-environment boundary for the console runtime.
//!
//! Keeps reducer semantics free of DOM access: viewport queries and effect
//! execution live behind this typed seam so native test builds compile
//! without a browser.

use console_app_contract::{window_surface_dom_id, ApplicationId, SurfaceSize};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

use crate::registry::RuntimeEffect;

/// Host bundle for viewport queries and runtime effect execution.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleHostContext;

impl ConsoleHostContext {
    /// Returns the surface dimensions currently available to the window
    /// manager.
    pub fn surface_viewport_size(&self) -> SurfaceSize {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let width = window
                    .inner_width()
                    .ok()
                    .and_then(|value| value.as_f64())
                    .map(|value| value as i32)
                    .unwrap_or(1280);
                let height = window
                    .inner_height()
                    .ok()
                    .and_then(|value| value.as_f64())
                    .map(|value| value as i32)
                    .unwrap_or(800);
                return SurfaceSize {
                    width: width.max(320),
                    height: height.max(240),
                };
            }
        }

        SurfaceSize {
            width: 1280,
            height: 800,
        }
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::FocusWindowSurface(app_id) => focus_window_surface(&app_id),
        }
    }
}

fn focus_window_surface(app_id: &ApplicationId) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let Some(element) = document.get_element_by_id(&window_surface_dom_id(app_id)) else {
            return;
        };
        let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() else {
            return;
        };
        let callback = Closure::once_into_js(move || {
            let _ = element.focus();
        });
        let _ = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0);
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = window_surface_dom_id(app_id);
}
