use std::rc::Rc;

use shared::form::{
    self, appointment_fields, validate_appointment, AppointmentFormContext, AppointmentFormData,
    FormState, FormValues, CANCEL_LABEL,
};
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::components::dynamic_form::{render_field, DynamicForm, FieldOverride, FieldRenderContext};

pub enum FormAction {
    Edit(&'static str, String),
    /// Outcome of `FormState::prepare_submit` on the current snapshot
    Prepared(FormState),
    Finished(Result<(), String>),
    DismissError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormStore(FormState);

impl Reducible for FormStore {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            FormAction::Edit(name, value) => next.0.edit(name, value),
            FormAction::Prepared(prepared) => next.0 = prepared,
            FormAction::Finished(outcome) => next.0.finish_submit(outcome),
            FormAction::DismissError => next.0.dismiss_submit_error(),
        }
        Rc::new(next)
    }
}

/// A validated submission plus the callback that reports how it went
pub type SubmitRequest = (AppointmentFormData, Callback<Result<(), String>>);

#[derive(Properties, PartialEq)]
pub struct AppointmentFormProps {
    pub initial: FormValues,
    pub context: AppointmentFormContext,
    #[prop_or_default]
    pub loading: bool,
    pub on_submit: Callback<SubmitRequest>,
    pub on_cancel: Callback<()>,
}

#[function_component(AppointmentForm)]
pub fn appointment_form(props: &AppointmentFormProps) -> Html {
    let form = {
        let initial = props.initial.clone();
        use_reducer(move || FormStore(FormState::new(initial)))
    };
    let state = &form.0;
    let busy = state.is_busy(props.loading);

    let on_change = {
        let dispatcher = form.dispatcher();
        Callback::from(move |(name, value): (&'static str, String)| {
            dispatcher.dispatch(FormAction::Edit(name, value))
        })
    };

    let on_submit = {
        let dispatcher = form.dispatcher();
        let snapshot = state.clone();
        let context = props.context.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut next = snapshot.clone();
            let prepared = next.prepare_submit(|values| validate_appointment(values, &context));
            dispatcher.dispatch(FormAction::Prepared(next));

            if let Some(data) = prepared {
                let done = {
                    let dispatcher = dispatcher.clone();
                    Callback::from(move |outcome| dispatcher.dispatch(FormAction::Finished(outcome)))
                };
                on_submit.emit((data, done));
            }
        })
    };

    let on_dismiss_error = {
        let dispatcher = form.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(FormAction::DismissError))
    };

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    // Notes get a character count under the default textarea
    let overrides = vec![FieldOverride {
        name: form::NOTES,
        render: Callback::from(|context: FieldRenderContext| {
            let count = context.value.chars().count();
            html! {
                <>
                    {render_field(&context)}
                    <small class="field-hint">{format!("{} characters", count)}</small>
                </>
            }
        }),
    }];

    let fields = appointment_fields(&props.context);
    let form_errors = state.errors.outside(&fields);

    html! {
        <form class="appointment-form" onsubmit={on_submit} novalidate={true}>
            {for form_errors.iter().map(|error| html! {
                <div class="form-message error" role="alert">
                    <span>{&error.message}</span>
                </div>
            })}

            if let Some(error) = &state.submit_error {
                <div class="form-message error" role="alert">
                    <span>{error}</span>
                    <button type="button" class="form-message-dismiss" aria-label="Dismiss" onclick={on_dismiss_error}>
                        {"×"}
                    </button>
                </div>
            }

            <DynamicForm
                {fields}
                values={state.values.clone()}
                errors={state.errors.clone()}
                {overrides}
                disabled={busy}
                {on_change}
            />

            <div class="form-actions">
                <button type="button" class="btn btn-secondary" disabled={busy} onclick={on_cancel}>
                    {CANCEL_LABEL}
                </button>
                <button type="submit" class="btn btn-primary" disabled={busy}>
                    {state.submit_label(props.loading)}
                </button>
            </div>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn context() -> AppointmentFormContext {
        AppointmentFormContext {
            user_id: Some(1),
            ..Default::default()
        }
    }

    fn prepare(state: &FormState) -> (FormState, Option<AppointmentFormData>) {
        let mut next = state.clone();
        let prepared = next.prepare_submit(|values| validate_appointment(values, &context()));
        (next, prepared)
    }

    #[wasm_bindgen_test]
    fn test_store_follows_submission_lifecycle() {
        let initial = FormValues::new()
            .with(form::TITLE, "")
            .with(form::START_TIME, "2024-06-05T10:00")
            .with(form::END_TIME, "2024-06-05T11:00")
            .with(form::STATUS, "SCHEDULED");
        let store = Rc::new(FormStore(FormState::new(initial)));

        let (rejected, data) = prepare(&store.0);
        assert!(data.is_none());
        let store = store.reduce(FormAction::Prepared(rejected));
        assert_eq!(store.0.errors.get(form::TITLE), Some("Title is required"));

        let store = store.reduce(FormAction::Edit(form::TITLE, "Viewing".to_string()));
        assert!(store.0.errors.is_empty());

        let (submitting, data) = prepare(&store.0);
        assert_eq!(data.map(|data| data.title).as_deref(), Some("Viewing"));
        let store = store.reduce(FormAction::Prepared(submitting));
        assert!(store.0.is_busy(false));

        let store = store.reduce(FormAction::Finished(Err("Failed to create appointment".into())));
        assert!(!store.0.submitting);
        assert_eq!(store.0.submit_error.as_deref(), Some("Failed to create appointment"));

        let store = store.reduce(FormAction::DismissError);
        assert_eq!(store.0.submit_error, None);
    }
}
