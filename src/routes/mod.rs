pub mod auth;

pub mod catalog;

pub mod classes;

pub mod dashboard;

pub mod images;

pub mod questions;

pub mod sessions;

pub use auth::configure_auth_routes;
pub use catalog::configure_catalog_routes;
pub use classes::configure_classes_routes;
pub use dashboard::configure_dashboard_routes;
pub use images::configure_image_routes;
pub use questions::configure_question_routes;
pub use sessions::configure_session_routes;
