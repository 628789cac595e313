pub mod controller;
pub mod media;
