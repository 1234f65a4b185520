pub mod facility;
pub mod mode;
pub mod patient;
pub mod resource;
