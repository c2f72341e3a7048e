use std::ops::Deref;
use std::rc::Rc;

use shared::directory::{self, DirectoryAction, DirectoryState};
use shared::endpoints::PageRequest;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryStore(DirectoryState);

impl Deref for DirectoryStore {
    type Target = DirectoryState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Reducible for DirectoryStore {
    type Action = DirectoryAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.0.apply(action);
        Rc::new(next)
    }
}

/// Clients and properties for the dropdowns, loaded once on mount
#[hook]
pub fn use_directory(api_client: &ApiClient) -> UseReducerHandle<DirectoryStore> {
    let state = use_reducer(DirectoryStore::default);

    {
        let api_client = api_client.clone();
        let dispatcher = state.dispatcher();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let dispatch = |action: DirectoryAction| dispatcher.dispatch(action);
                // failures are already recorded in the slice
                let _ = directory::fetch_all_clients(&api_client, PageRequest::default().size, dispatch).await;
                let _ = directory::fetch_properties(&api_client, PageRequest::default(), dispatch).await;
            });
            || ()
        });
    }

    state
}
