mod login;
mod profile;
mod signup;
mod todos;

pub use login::LoginPage;
pub use profile::ProfilePage;
pub use signup::SignupPage;
pub use todos::TodosPage;
