//! # Shared UI layer
//!
//! Auth context, the route guard, data-fetch hooks, media display, and the
//! widget set the views are assembled from. Everything here is platform
//! neutral; web-only details (object URLs, `localStorage`) sit behind
//! `cfg(target_arch = "wasm32")` seams.

pub mod auth;
pub mod components;
pub mod format;
pub mod guard;
pub mod hooks;
pub mod media;
pub mod staged;
pub mod time;

pub use auth::{use_api, use_auth, use_media, AuthProvider, AuthState};
pub use components::{
    use_toast, Button, ButtonVariant, ConfirmDialog, Input, Label, MediaManager, ModalOverlay,
    Select, Spinner, Textarea, ToastProvider, Toasts,
};
pub use guard::RequireAuth;
pub use hooks::{report_error, use_collection, use_remote, Collection, Remote};
pub use media::MediaImage;
pub use staged::StagedFile;
