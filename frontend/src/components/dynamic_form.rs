use shared::form::{FieldKind, FormField, FormValues, ValidationErrors};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

/// Everything a field renderer needs
#[derive(Clone, PartialEq)]
pub struct FieldRenderContext {
    pub field: FormField,
    pub value: String,
    pub error: Option<String>,
    pub disabled: bool,
    pub on_change: Callback<String>,
}

/// Custom renderer for one field; wins over the per-kind default
#[derive(Clone, PartialEq)]
pub struct FieldOverride {
    pub name: &'static str,
    pub render: Callback<FieldRenderContext, Html>,
}

#[derive(Properties, PartialEq)]
pub struct DynamicFormProps {
    pub fields: Vec<FormField>,
    pub values: FormValues,
    pub errors: ValidationErrors,
    #[prop_or_default]
    pub overrides: Vec<FieldOverride>,
    #[prop_or_default]
    pub disabled: bool,
    pub on_change: Callback<(&'static str, String)>,
}

#[function_component(DynamicForm)]
pub fn dynamic_form(props: &DynamicFormProps) -> Html {
    html! {
        <div class="dynamic-form">
            {for props.fields.iter().map(|field| {
                let name = field.name;
                let on_change = props.on_change.reform(move |value: String| (name, value));
                let context = FieldRenderContext {
                    field: field.clone(),
                    value: props.values.get(name).to_string(),
                    error: props.errors.get(name).map(str::to_string),
                    disabled: props.disabled,
                    on_change,
                };

                match props.overrides.iter().find(|custom| custom.name == name) {
                    Some(custom) => custom.render.emit(context),
                    None => render_field(&context),
                }
            })}
        </div>
    }
}

/// Default rendering, chosen by the field's kind
pub fn render_field(context: &FieldRenderContext) -> Html {
    let field = &context.field;
    let id = format!("field-{}", field.name);
    let placeholder = field.placeholder.unwrap_or_default();

    let control = match &field.kind {
        FieldKind::Text | FieldKind::DateTimeLocal => {
            let input_type = if matches!(field.kind, FieldKind::DateTimeLocal) {
                "datetime-local"
            } else {
                "text"
            };
            let on_change = context.on_change.clone();
            html! {
                <input
                    id={id.clone()}
                    name={field.name}
                    type={input_type}
                    placeholder={placeholder}
                    value={context.value.clone()}
                    required={field.required}
                    disabled={context.disabled}
                    oninput={Callback::from(move |e: InputEvent| {
                        on_change.emit(e.target_unchecked_into::<HtmlInputElement>().value())
                    })}
                />
            }
        }
        FieldKind::TextArea { rows } => {
            let on_change = context.on_change.clone();
            html! {
                <textarea
                    id={id.clone()}
                    name={field.name}
                    rows={rows.to_string()}
                    placeholder={placeholder}
                    value={context.value.clone()}
                    disabled={context.disabled}
                    oninput={Callback::from(move |e: InputEvent| {
                        on_change.emit(e.target_unchecked_into::<HtmlTextAreaElement>().value())
                    })}
                />
            }
        }
        FieldKind::Select { options, empty_label } => {
            let on_change = context.on_change.clone();
            html! {
                <select
                    id={id.clone()}
                    name={field.name}
                    required={field.required}
                    disabled={context.disabled}
                    onchange={Callback::from(move |e: Event| {
                        on_change.emit(e.target_unchecked_into::<HtmlSelectElement>().value())
                    })}
                >
                    if let Some(label) = empty_label {
                        <option value="" selected={context.value.is_empty()}>{label}</option>
                    }
                    {for options.iter().map(|option| html! {
                        <option value={option.value.clone()} selected={option.value == context.value}>
                            {&option.label}
                        </option>
                    })}
                </select>
            }
        }
    };

    html! {
        <div class={classes!("form-group", context.error.is_some().then_some("has-error"))}>
            <label for={id}>
                {field.label}
                if field.required {
                    <span class="required">{" *"}</span>
                }
            </label>
            {control}
            if let Some(error) = &context.error {
                <div class="field-error">{error}</div>
            }
        </div>
    }
}
