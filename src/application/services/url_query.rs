use std::collections::HashMap;

use reqwest::Url;

/// Returns the query parameters of `url` as a map.
///
/// `None` when the URL carries no query at all. Repeated names keep the
/// last value; a name without `=` maps to an empty string.
#[must_use]
pub fn query_parameters(url: &Url) -> Option<HashMap<String, String>> {
    url.query()?;
    Some(
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_query() {
        let url = Url::parse("https://x/call").unwrap();
        assert!(query_parameters(&url).is_none());
    }

    #[test]
    fn test_empty_query() {
        let url = Url::parse("https://x/call?").unwrap();
        assert_eq!(query_parameters(&url), Some(HashMap::new()));
    }

    #[test]
    fn test_decodes_and_keeps_last() {
        let url = Url::parse("https://x/call?room=a%20b&token=1&token=2&mute").unwrap();
        let params = query_parameters(&url).unwrap();
        assert_eq!(params.get("room").map(String::as_str), Some("a b"));
        assert_eq!(params.get("token").map(String::as_str), Some("2"));
        assert_eq!(params.get("mute").map(String::as_str), Some(""));
    }
}
