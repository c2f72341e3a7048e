use shared::auth::LoginRequest;
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoginPageProps {
    pub loading: bool,
    #[prop_or_default]
    pub error: Option<String>,
    pub on_login: Callback<LoginRequest>,
    pub on_clear_error: Callback<()>,
}

#[function_component(LoginPage)]
pub fn login_page(props: &LoginPageProps) -> Html {
    let username = use_state(String::new);
    let password = use_state(String::new);

    let on_username_input = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            username.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            password.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_submit = {
        let username = username.clone();
        let password = password.clone();
        let on_login = props.on_login.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let credentials = LoginRequest {
                username: username.trim().to_string(),
                password: (*password).clone(),
            };
            if credentials.username.is_empty() || credentials.password.is_empty() {
                return;
            }
            on_login.emit(credentials);
        })
    };

    let on_dismiss = {
        let on_clear_error = props.on_clear_error.clone();
        Callback::from(move |_: MouseEvent| on_clear_error.emit(()))
    };

    let can_submit = !props.loading && !username.trim().is_empty() && !password.is_empty();

    html! {
        <div class="login-page">
            <form class="login-card" onsubmit={on_submit}>
                <h1>{"Back Office"}</h1>
                <p class="login-subtitle">{"Sign in to manage your agenda"}</p>

                if let Some(error) = &props.error {
                    <div class="form-message error" role="alert">
                        <span>{error}</span>
                        <button type="button" class="form-message-dismiss" aria-label="Dismiss" onclick={on_dismiss}>
                            {"×"}
                        </button>
                    </div>
                }

                <div class="form-group">
                    <label for="login-username">{"Username"}</label>
                    <input
                        id="login-username"
                        type="text"
                        autocomplete="username"
                        value={(*username).clone()}
                        disabled={props.loading}
                        oninput={on_username_input}
                    />
                </div>

                <div class="form-group">
                    <label for="login-password">{"Password"}</label>
                    <input
                        id="login-password"
                        type="password"
                        autocomplete="current-password"
                        value={(*password).clone()}
                        disabled={props.loading}
                        oninput={on_password_input}
                    />
                </div>

                <button type="submit" class="btn btn-primary" disabled={!can_submit}>
                    {if props.loading { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
