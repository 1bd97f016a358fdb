//! Widget set shared across views.

mod button;
mod input;
mod media_manager;
mod modal;
mod spinner;
mod toast;

pub use button::{Button, ButtonVariant};
pub use input::{Input, Label, Select, Textarea};
pub use media_manager::MediaManager;
pub use modal::{ConfirmDialog, ModalOverlay};
pub use spinner::Spinner;
pub use toast::{use_toast, ToastKind, ToastProvider, Toasts};
