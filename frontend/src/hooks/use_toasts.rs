use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use shared::agenda::Notice;
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub notice: Notice,
}

pub enum ToastAction {
    Push(Toast),
    Dismiss(Uuid),
}

/// Visible toasts, oldest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastList(pub Vec<Toast>);

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut toasts = self.0.clone();
        match action {
            ToastAction::Push(toast) => toasts.push(toast),
            ToastAction::Dismiss(id) => toasts.retain(|toast| toast.id != id),
        }
        Rc::new(ToastList(toasts))
    }
}

pub struct UseToastsResult {
    pub toasts: Vec<Toast>,
    pub push: Callback<Notice>,
    pub dismiss: Callback<Uuid>,
}

/// Toasts that dismiss themselves after `timeout_ms`
#[hook]
pub fn use_toasts(timeout_ms: u32) -> UseToastsResult {
    let list = use_reducer(ToastList::default);

    let dismiss = {
        let dispatcher = list.dispatcher();
        use_callback((), move |id: Uuid, _| dispatcher.dispatch(ToastAction::Dismiss(id)))
    };

    let push = {
        let dispatcher = list.dispatcher();
        use_callback(timeout_ms, move |notice: Notice, timeout_ms| {
            let id = Uuid::new_v4();
            log::debug!("🔔 {}: {}", notice.title, notice.message);
            dispatcher.dispatch(ToastAction::Push(Toast { id, notice }));

            let dispatcher = dispatcher.clone();
            let timeout_ms = *timeout_ms;
            spawn_local(async move {
                TimeoutFuture::new(timeout_ms).await;
                dispatcher.dispatch(ToastAction::Dismiss(id));
            });
        })
    };

    UseToastsResult {
        toasts: list.0.clone(),
        push,
        dismiss,
    }
}
