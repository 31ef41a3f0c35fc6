//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/purchases/{purchase_id}', use [format_endpoint].

/// The route for listing and creating purchases.
pub const PURCHASES: &str = "/api/purchases";
/// The route for getting, replacing and deleting a single purchase.
pub const PURCHASE: &str = "/api/purchases/{purchase_id}";
/// The route for spending statistics.
pub const STATISTICS: &str = "/api/statistics";
/// The route for listing the configured categories.
pub const CATEGORIES: &str = "/api/categories";

/// Replace the first parameter in `endpoint_path` with `id`.
///
/// # Examples
/// ```
/// use shopping_tracker::endpoints::format_endpoint;
///
/// assert_eq!(format_endpoint("/api/purchases/{purchase_id}", "abc"), "/api/purchases/abc");
/// ```
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.char_indices() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
