use std::rc::Rc;

use yew::prelude::*;

mod components;
mod hooks;
mod pages;
mod services;

use hooks::use_auth::use_auth;
use pages::agenda::AgendaPage;
use pages::login::LoginPage;
use services::api::ApiClient;
use services::config::AppConfig;

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| AppConfig::from_env());
    let api_client = use_memo((), {
        let config = config.clone();
        move |_| ApiClient::new(&config)
    });
    let auth = use_auth(&api_client);

    html! {
        <ContextProvider<Rc<AppConfig>> context={config}>
            if auth.state.is_authenticated {
                <AgendaPage
                    api_client={(*api_client).clone()}
                    user={auth.state.user.clone()}
                    auth_error={auth.state.error.clone()}
                    on_logout={auth.actions.logout.clone()}
                />
            } else {
                <LoginPage
                    loading={auth.state.loading}
                    error={auth.state.error.clone()}
                    on_login={auth.actions.login.clone()}
                    on_clear_error={auth.actions.clear_error.clone()}
                />
            }
        </ContextProvider<Rc<AppConfig>>>
    }
}

fn main() {
    let config = AppConfig::from_env();
    if let Err(error) = services::logging::init(config.log_level) {
        gloo::console::error!(format!("Logging disabled: {:#}", error));
    }
    log::info!("🚀 Back office starting against {}", config.api_base_url);

    yew::Renderer::<App>::new().render();
}
