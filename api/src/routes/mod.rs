pub mod catalog;
pub mod health_route;
pub mod lang_query;
pub mod sessions;
