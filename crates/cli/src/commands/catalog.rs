use serde::Serialize;
use shelf_core::{Catalog, FilterParams, ProductFilter, ProductId};

use crate::commands::CommandResult;

/// Filter and lookup arguments, kept as raw strings so terminal input goes
/// through the same coercion rules as the HTTP query string.
#[derive(Debug, Default)]
pub struct CatalogArgs {
    pub query: Option<String>,
    pub category: Option<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    pub limit: Option<String>,
    pub id: Option<String>,
}

pub fn run(args: CatalogArgs) -> CommandResult {
    let catalog = match Catalog::builtin() {
        Ok(catalog) => catalog,
        Err(error) => {
            return CommandResult::failure(
                "catalog",
                "catalog_integrity",
                format!("builtin catalog failed validation: {error}"),
                3,
            );
        }
    };

    if let Some(id) = args.id {
        return lookup(&catalog, id);
    }

    let params = FilterParams {
        q: args.query,
        category: args.category,
        price_min: args.price_min,
        price_max: args.price_max,
        limit: args.limit,
    };
    let filter = ProductFilter::from_params(&params);
    let matches: Vec<_> = filter.apply(&catalog).into_iter().cloned().collect();

    CommandResult { exit_code: 0, output: render_json(&matches) }
}

fn lookup(catalog: &Catalog, id: String) -> CommandResult {
    let product_id = ProductId(id);

    match catalog.get(&product_id) {
        Some(product) => CommandResult { exit_code: 0, output: render_json(product) },
        None => CommandResult::failure(
            "catalog",
            "not_found",
            format!("product `{}` not found", product_id.0),
            4,
        ),
    }
}

fn render_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|error| {
        format!(
            "{{\"error\":\"serialization failed: {}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
