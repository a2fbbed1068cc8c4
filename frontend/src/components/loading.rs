use leptos::*;

use super::PanelSignals;

#[component]
pub fn LoadingOverlay() -> impl IntoView {
    let panels = expect_context::<PanelSignals>();

    view! {
        <Show
            when=move || panels.loading.get()
            fallback=|| view! { }
        >
            <div class="loading-overlay" id="loadingOverlay">
                <div class="spinner"></div>
                <div class="loading-text">"⏳ Analyzing image..."</div>
            </div>
        </Show>
    }
}
