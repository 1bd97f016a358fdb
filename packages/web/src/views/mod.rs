pub mod admin;
mod dashboard;
mod forgot_password;
mod home;
mod login;
mod property_detail;
mod register;
mod reset_password;
mod shell;
mod updates;
mod verify_email;

pub use dashboard::Dashboard;
pub use forgot_password::ForgotPassword;
pub use home::Home;
pub use login::Login;
pub use property_detail::PropertyDetail;
pub use register::Register;
pub use reset_password::ResetPassword;
pub use updates::Updates;
pub use verify_email::VerifyEmail;
