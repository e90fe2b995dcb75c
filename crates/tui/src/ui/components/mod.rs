pub mod bottom_nav;
pub mod money;
pub mod toast;
