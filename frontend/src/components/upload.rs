//! Image upload component with drag & drop support.
//!
//! Shows the drop zone while nothing is selected, then the file summary
//! and the predict button.

use leptos::*;
use web_sys::{DragEvent, Event, HtmlInputElement};

use super::{PanelSignals, SessionHandle};

#[component]
pub fn UploadSection() -> impl IntoView {
    let panels = expect_context::<PanelSignals>();
    let session = expect_context::<SessionHandle>();
    let (dragging, set_dragging) = create_signal(false);
    let file_input = create_node_ref::<html::Input>();

    // Forget the previous pick so choosing the same file again fires `change`
    create_effect(move |_| {
        if panels.file_info.get().is_none() {
            if let Some(input) = file_input.get() {
                input.set_value("");
            }
        }
    });

    let on_file_change = {
        let session = session.clone();
        move |ev: Event| {
            let input: HtmlInputElement = event_target(&ev);
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                session.select_file(file);
            }
        }
    };

    let on_drop = {
        let session = session.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_dragging.set(false);
            let file = ev
                .data_transfer()
                .and_then(|transfer| transfer.files())
                .and_then(|files| files.get(0));
            if let Some(file) = file {
                session.select_file(file);
            }
        }
    };

    let trigger_file_input = move |_| {
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    let on_remove = {
        let session = session.clone();
        move |_| session.clear_selection()
    };

    let on_predict = move |_| session.submit_prediction();

    view! {
        <div class="upload-section">
            <Show
                when=move || panels.upload_prompt.get()
                fallback=|| view! { }
            >
                <div
                    class="upload-area"
                    id="uploadArea"
                    class:dragover=move || dragging.get()
                    on:click=trigger_file_input
                    on:dragover=move |ev: DragEvent| {
                        ev.prevent_default();
                        set_dragging.set(true);
                    }
                    on:dragleave=move |_| set_dragging.set(false)
                    on:drop=on_drop.clone()
                >
                    <div class="upload-icon">"📷"</div>
                    <div class="upload-text">"Drop an image here"</div>
                    <div class="upload-hint">"or click to browse (max 16MB)"</div>
                </div>
            </Show>

            <input
                type="file"
                id="imageInput"
                accept="image/*"
                style="display:none"
                node_ref=file_input
                on:change=on_file_change
            />

            <Show
                when=move || panels.file_info.get().is_some()
                fallback=|| view! { }
            >
                <div class="file-info" id="fileInfo">
                    <span class="file-name">
                        {move || panels.file_info.get().map(|f| f.name).unwrap_or_default()}
                    </span>
                    <span class="file-size">
                        {move || panels.file_info.get().map(|f| f.size_label).unwrap_or_default()}
                    </span>
                    <button class="remove-file" id="removeFile" on:click=on_remove.clone()>
                        "✕"
                    </button>
                </div>
            </Show>

            <button
                class="btn btn-primary"
                id="predictBtn"
                disabled=move || !panels.predict_enabled.get()
                on:click=on_predict
            >
                "Predict"
            </button>
        </div>
    }
}
