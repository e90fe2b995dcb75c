pub mod edit;
pub mod history;
pub mod home;
pub mod placeholder;
pub mod tags;
