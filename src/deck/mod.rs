pub mod build;
pub mod controller;
pub mod slides;
