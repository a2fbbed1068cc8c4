//! Dismissible error banner.
//!
//! Validation, service and network failures all land here. "Try again"
//! only hides the banner; predicting again is up to the user.

use leptos::*;

use super::{PanelSignals, SessionHandle};

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let panels = expect_context::<PanelSignals>();
    let session = expect_context::<SessionHandle>();

    let on_retry = move |_| session.dismiss_error();

    view! {
        <Show
            when=move || panels.error.get().is_some()
            fallback=|| view! { }
        >
            <div class="error-message" id="errorMessage">
                <span class="error-icon">"❌"</span>
                <span class="error-text" id="errorText">
                    {move || panels.error.get().unwrap_or_default()}
                </span>
                <button class="btn btn-secondary" id="retryBtn" on:click=on_retry.clone()>
                    "Try again"
                </button>
            </div>
        </Show>
    }
}
