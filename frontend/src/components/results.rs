//! Results panel: preview, top prediction and the ranked list

use leptos::*;

use super::{PanelSignals, SessionHandle};

#[component]
pub fn ResultsSection() -> impl IntoView {
    let panels = expect_context::<PanelSignals>();
    let session = expect_context::<SessionHandle>();

    let on_new_prediction = move |_| {
        log::info!("🔄 New prediction - back to the drop zone");
        session.reset();
    };

    view! {
        <Show
            when=move || panels.results.get().is_some()
            fallback=|| view! { }
        >
            <div class="results-section" id="resultsSection">
                <div class="preview-container">
                    <Show
                        when=move || panels.preview.get().is_some()
                        fallback=|| view! { <div class="preview-placeholder">"Loading preview..."</div> }
                    >
                        <img
                            id="previewImage"
                            class="preview-image"
                            alt="Uploaded image"
                            src=move || panels.preview.get().unwrap_or_default()
                        />
                    </Show>
                </div>

                <div class="main-result">
                    <div class="main-prediction" id="mainPrediction">
                        {move || panels.results.get().map(|r| r.label).unwrap_or_default()}
                    </div>
                    <div class="main-confidence" id="mainConfidence">
                        {move || panels.results.get().map(|r| r.confidence_label).unwrap_or_default()}
                    </div>
                </div>

                <div class="predictions-list" id="predictionsList">
                    <For
                        each=move || panels.results.get().map(|r| r.rows).unwrap_or_default().into_iter().enumerate()
                        key=|(idx, row)| (*idx, row.class.clone(), row.confidence_label.clone())
                        children=move |(_, row)| {
                            view! {
                                <div class="prediction-item">
                                    <span class="pred-class">{row.class}</span>
                                    <span class="pred-confidence">{row.confidence_label}</span>
                                </div>
                            }
                        }
                    />
                </div>

                <button class="btn btn-primary" id="newPredictionBtn" on:click=on_new_prediction.clone()>
                    "New prediction"
                </button>
            </div>
        </Show>
    }
}
