use std::ops::Deref;
use std::rc::Rc;

use shared::auth::{self, AuthAction, AuthState, LoginRequest};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthStore(AuthState);

impl Deref for AuthStore {
    type Target = AuthState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Reducible for AuthStore {
    type Action = AuthAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.0.apply(action);
        Rc::new(next)
    }
}

pub struct UseAuthResult {
    pub state: UseReducerHandle<AuthStore>,
    pub actions: UseAuthActions,
}

#[derive(Clone)]
pub struct UseAuthActions {
    pub login: Callback<LoginRequest>,
    pub logout: Callback<()>,
    pub clear_error: Callback<()>,
}

#[hook]
pub fn use_auth(api_client: &ApiClient) -> UseAuthResult {
    let state = {
        let session = api_client.session().clone();
        use_reducer(move || AuthStore(AuthState::from_store(&session)))
    };

    // A persisted token says nothing about who it belongs to
    {
        let api_client = api_client.clone();
        let dispatcher = state.dispatcher();
        let has_token = state.is_authenticated && state.user.is_none();
        use_effect_with(has_token, move |has_token| {
            if *has_token {
                spawn_local(async move {
                    let dispatch = |action: AuthAction| dispatcher.dispatch(action);
                    match auth::get_current_user(&api_client, dispatch).await {
                        // An expired token gets one refresh attempt; a failed
                        // refresh drops the session back to the login page
                        Err(error) if error.is_unauthorized() => {
                            let _ = auth::refresh(&api_client, api_client.session(), dispatch).await;
                        }
                        _ => {}
                    }
                });
            }
            || ()
        });
    }

    let login = {
        let api_client = api_client.clone();
        let dispatcher = state.dispatcher();
        use_callback((), move |credentials: LoginRequest, _| {
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            spawn_local(async move {
                let dispatch = |action: AuthAction| dispatcher.dispatch(action);
                let _ = auth::login(&api_client, api_client.session(), credentials, dispatch).await;
            });
        })
    };

    let logout = {
        let api_client = api_client.clone();
        let dispatcher = state.dispatcher();
        use_callback((), move |_: (), _| {
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            spawn_local(async move {
                let dispatch = |action: AuthAction| dispatcher.dispatch(action);
                auth::logout(&api_client, api_client.session(), dispatch).await;
            });
        })
    };

    let clear_error = {
        let dispatcher = state.dispatcher();
        use_callback((), move |_: (), _| dispatcher.dispatch(AuthAction::ClearError))
    };

    UseAuthResult {
        state,
        actions: UseAuthActions {
            login,
            logout,
            clear_error,
        },
    }
}
