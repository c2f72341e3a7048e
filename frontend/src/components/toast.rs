use uuid::Uuid;
use yew::prelude::*;

use crate::hooks::use_toasts::Toast;

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
    pub toasts: Vec<Toast>,
    pub on_dismiss: Callback<Uuid>,
}

#[function_component(ToastStack)]
pub fn toast_stack(props: &ToastStackProps) -> Html {
    html! {
        <div class="toast-stack" aria-live="polite">
            {for props.toasts.iter().map(|toast| {
                let id = toast.id;
                let on_dismiss = props.on_dismiss.clone();
                html! {
                    <div key={id.to_string()} class={classes!("toast", toast.notice.tone.as_class())}>
                        <div class="toast-body">
                            <strong class="toast-title">{&toast.notice.title}</strong>
                            if !toast.notice.message.is_empty() {
                                <p class="toast-message">{&toast.notice.message}</p>
                            }
                        </div>
                        <button
                            type="button"
                            class="toast-dismiss"
                            aria-label="Dismiss"
                            onclick={Callback::from(move |_| on_dismiss.emit(id))}
                        >
                            {"×"}
                        </button>
                    </div>
                }
            })}
        </div>
    }
}
