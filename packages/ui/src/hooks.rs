//! # Data hooks
//!
//! `use_collection` is the one fetch pattern every entity list goes
//! through: fetch on mount (re-running when any signal the fetch closure
//! reads changes), expose `{items, loading, error}`, and let mutation
//! coordinators patch the cached collection in place through
//! `upsert`/`remove` instead of re-fetching.
//!
//! Error policy: errors never escape to the view as panics. A 401 has
//! already cleared the session by the time it surfaces here, so the hook
//! just flips the auth state and lets the route guard redirect; everything
//! else becomes a human-readable `error` string.

use std::future::Future;

use api::{ApiClient, ApiError};
use dioxus::prelude::*;
use store::{EntityStore, Keyed};

use crate::auth::{use_api, use_auth, AuthState};

fn surface_error(err: ApiError, mut auth: Signal<AuthState>, mut error: Signal<Option<String>>) {
    if err.is_unauthorized() {
        tracing::info!("session expired during fetch; handing off to the route guard");
        auth.write().user = None;
    } else {
        error.set(Some(err.to_string()));
    }
}

/// Mutation-side counterpart of the fetch error policy. An expired session
/// flips the auth state (route guards take it from there); the caller gets
/// a message it can toast or render inline either way.
pub fn report_error(err: ApiError, mut auth: Signal<AuthState>) -> String {
    if err.is_unauthorized() {
        tracing::info!("session expired during mutation");
        auth.write().user = None;
    }
    err.to_string()
}

/// A fetched entity collection plus its request state. Copy, so views can
/// freely capture it in event handlers.
pub struct Collection<T: 'static> {
    pub items: Signal<EntityStore<T>>,
    pub loading: Signal<bool>,
    pub error: Signal<Option<String>>,
    generation: Signal<u32>,
}

impl<T: 'static> Clone for Collection<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Collection<T> {}

// Identity comparison, so a collection can be handed down as a prop.
impl<T: 'static> PartialEq for Collection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Keyed + 'static> Collection<T> {
    /// Forces a re-fetch with the current filters.
    pub fn reload(&mut self) {
        let next = self.generation.peek().wrapping_add(1);
        self.generation.set(next);
    }

    /// Patches one confirmed entity into the cache (replace or append).
    pub fn upsert(&mut self, item: T) -> bool {
        self.items.write().upsert(item)
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        self.items.write().remove(id)
    }

    /// Removes the given ids; returns how many were actually present.
    pub fn remove_many<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        self.items.write().remove_many(ids)
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

/// Fetches an entity collection. The `fetch` closure runs on mount, again
/// whenever a signal it reads changes (filters), and on [`Collection::reload`].
pub fn use_collection<T, F, Fut>(fetch: F) -> Collection<T>
where
    T: Keyed + 'static,
    F: Fn(ApiClient) -> Fut + Clone + 'static,
    Fut: Future<Output = Result<Vec<T>, ApiError>> + 'static,
{
    let client = use_api();
    let auth = use_auth();
    let mut items = use_signal(EntityStore::<T>::new);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| None::<String>);
    let generation = use_signal(|| 0u32);

    let _ = use_resource(move || {
        let client = client.clone();
        let fetch = fetch.clone();
        async move {
            // Subscribes this resource to manual reloads.
            let _generation = generation();
            loading.set(true);
            match fetch(client).await {
                Ok(list) => {
                    items.write().replace_all(list);
                    error.set(None);
                }
                Err(err) => surface_error(err, auth, error),
            }
            loading.set(false);
        }
    });

    Collection {
        items,
        loading,
        error,
        generation,
    }
}

/// A single fetched entity plus its request state.
pub struct Remote<T: 'static> {
    pub data: Signal<Option<T>>,
    pub loading: Signal<bool>,
    pub error: Signal<Option<String>>,
    generation: Signal<u32>,
}

impl<T: 'static> Clone for Remote<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Remote<T> {}

impl<T: 'static> PartialEq for Remote<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T: 'static> Remote<T> {
    pub fn reload(&mut self) {
        let next = self.generation.peek().wrapping_add(1);
        self.generation.set(next);
    }

    /// Replaces the cached entity with a confirmed newer version.
    pub fn set(&mut self, value: T) {
        self.data.set(Some(value));
    }
}

/// Fetches a single entity, e.g. one property for its detail page.
pub fn use_remote<T, F, Fut>(fetch: F) -> Remote<T>
where
    T: 'static,
    F: Fn(ApiClient) -> Fut + Clone + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let client = use_api();
    let auth = use_auth();
    let mut data = use_signal(|| None::<T>);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| None::<String>);
    let generation = use_signal(|| 0u32);

    let _ = use_resource(move || {
        let client = client.clone();
        let fetch = fetch.clone();
        async move {
            let _generation = generation();
            loading.set(true);
            match fetch(client).await {
                Ok(value) => {
                    data.set(Some(value));
                    error.set(None);
                }
                Err(err) => surface_error(err, auth, error),
            }
            loading.set(false);
        }
    });

    Remote {
        data,
        loading,
        error,
        generation,
    }
}
