use url::Url;

/// Builds a search-engine URL carrying `query` in `q` and `result_count` in `num`
///
/// The query is form-encoded, so spaces, quotes and `@` survive the trip.
///
/// # Examples
///
/// ```
/// use recon_fanout::url::build_search_url;
///
/// let url = build_search_url("https://www.google.com/search", "\"@example.com\"", 50).unwrap();
/// assert_eq!(url, "https://www.google.com/search?q=%22%40example.com%22&num=50");
/// ```
pub fn build_search_url(base_url: &str, query: &str, result_count: u32) -> Result<String, url::ParseError> {
    let count = result_count.to_string();
    let url = Url::parse_with_params(base_url, &[("q", query), ("num", count.as_str())])?;
    Ok(url.into())
}
