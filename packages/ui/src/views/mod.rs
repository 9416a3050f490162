mod login;
pub use login::LoginView;

mod profile;
pub use profile::ProfileView;
