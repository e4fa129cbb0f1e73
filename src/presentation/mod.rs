// Presentation layer - Console page over HTTP
pub mod app_state;
pub mod handlers;
pub mod markup;
