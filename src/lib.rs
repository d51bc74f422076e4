pub mod db;
pub mod domain;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
pub mod storage;

/// Category labels offered by the product form's select box. Free-text
/// categories are accepted as well; this list only drives the options.
pub const CATEGORY_LABELS: &[&str] = &[
    "Electronics",
    "Clothing",
    "Home",
    "Sports",
    "Books",
    "Toys",
    "Tools",
    "Other",
];
