/// Join a path returned by the backend onto its base URL.
///
/// Absolute `http(s)` URLs pass through untouched.
pub fn resolve_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths() {
        let base = "http://127.0.0.1:5000";
        assert_eq!(resolve_url(base, "/r/1.docx"), "http://127.0.0.1:5000/r/1.docx");
        assert_eq!(resolve_url(base, "r/1.docx"), "http://127.0.0.1:5000/r/1.docx");
        assert_eq!(
            resolve_url("http://127.0.0.1:5000/", "/static/charts/radar_chart.png"),
            "http://127.0.0.1:5000/static/charts/radar_chart.png"
        );
    }

    #[test]
    fn test_absolute_urls_pass_through() {
        assert_eq!(
            resolve_url("http://127.0.0.1:5000", "https://cdn.example.com/pie.png"),
            "https://cdn.example.com/pie.png"
        );
    }
}
