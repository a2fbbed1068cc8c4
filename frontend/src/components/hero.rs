//! Hero section component

use leptos::*;

use crate::config::KNOWN_CLASSES;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"Image Recognition"</h1>
            <p class="subtitle">
                "Upload a photo and find out what it shows. "
                "Recognised classes: " {KNOWN_CLASSES.join(", ")} "."
            </p>
        </div>
    }
}
