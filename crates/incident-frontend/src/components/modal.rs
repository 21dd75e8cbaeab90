//! # Modal Component
//!
//! Overlay shell shared by the report list and the statistics views.
//! Clicking the backdrop or the close button dismisses it.

use leptos::prelude::*;

use crate::state::{use_app_state, ModalKind};

#[component]
pub fn Modal(kind: ModalKind, title: &'static str, children: ChildrenFn) -> impl IntoView {
    let state = use_app_state();

    view! {
        <Show when=move || state.modal.get() == Some(kind)>
            <div class="modal" on:click=move |_| state.close_modal()>
                <div class="modal-content" on:click=|ev| ev.stop_propagation()>
                    <div class="modal-header">
                        <span class="panel-title">{title}</span>
                        <button class="modal-close" title="Cerrar" on:click=move |_| state.close_modal()>
                            "×"
                        </button>
                    </div>
                    <div class="modal-body">{children()}</div>
                </div>
            </div>
        </Show>
    }
}
