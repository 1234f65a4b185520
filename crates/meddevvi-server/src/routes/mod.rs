pub mod analysis;
pub mod facility;
pub mod health;
pub mod pages;
pub mod setup_form;
