use url::Url;

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://www.google.com/search";

/// "<positions> in <location>", the way the search form phrases it.
pub fn compose_query(positions: &str, location: &str) -> String {
    format!("{} in {}", positions.trim(), location.trim())
}

/// Targets the jobs panel view of the results page.
pub fn build_search_url(endpoint: &str, query: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(endpoint)?;
    url.set_query(Some(&format!(
        "hl=en&q={}&ibp=htl;jobs",
        urlencoding::encode(query)
    )));

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_query_from_form_fields() {
        assert_eq!(
            compose_query(" rust developer, backend engineer ", "Berlin "),
            "rust developer, backend engineer in Berlin"
        );
    }

    #[test]
    fn search_url_percent_encodes_query() {
        let url = build_search_url(DEFAULT_SEARCH_ENDPOINT, "rust developer in Berlin").unwrap();

        assert_eq!(
            url.as_str(),
            "https://www.google.com/search?hl=en&q=rust%20developer%20in%20Berlin&ibp=htl;jobs"
        );
    }

    #[test]
    fn search_url_encodes_reserved_characters() {
        let url = build_search_url(DEFAULT_SEARCH_ENDPOINT, "C++ & C# in São Paulo").unwrap();
        let query = url.query().unwrap();

        assert!(query.starts_with("hl=en&q=C%2B%2B%20%26%20C%23%20in%20S%C3%A3o%20Paulo&"));
        assert!(query.ends_with("&ibp=htl;jobs"));
    }

    #[test]
    fn search_url_rejects_bad_endpoint() {
        assert!(build_search_url("not a url", "rust").is_err());
    }
}
