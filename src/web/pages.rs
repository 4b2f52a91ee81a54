use askama::Template;

use crate::view::ProductCard;

/// What the dashboard body shows for the current view state.
#[derive(Debug, Clone)]
pub enum DashboardContent {
    Loading,
    Failed(String),
    Products(Vec<ProductCard>),
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub query: String,
    pub content: DashboardContent,
}

impl DashboardTemplate {
    pub fn new(query: impl Into<String>, content: DashboardContent) -> Self {
        Self {
            query: query.into(),
            content,
        }
    }
}
