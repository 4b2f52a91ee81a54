use crate::models::{Product, ResolvedCatalog};

/// Products of a catalog whose names match a query, in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    products: Vec<&'a Product>,
}

impl<'a> FilteredView<'a> {
    pub fn products(&self) -> &[&'a Product] {
        &self.products
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Product> + '_ {
        self.products.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn names(&self) -> Vec<&'a str> {
        self.products.iter().map(|p| p.name.as_str()).collect()
    }
}

/// Case-insensitive substring filter on product names. An empty query
/// keeps every product.
pub fn filter<'a>(catalog: &'a ResolvedCatalog, query: &str) -> FilteredView<'a> {
    let needle = query.to_lowercase();
    FilteredView {
        products: catalog
            .products()
            .iter()
            .filter(|p| p.name_contains(&needle))
            .collect(),
    }
}
