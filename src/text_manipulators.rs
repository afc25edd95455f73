use scraper::ElementRef;

pub fn extract_text(node: ElementRef) -> String {
    node.text().collect::<String>()
}

/// Cell text with non-breaking spaces normalized and whitespace trimmed.
pub fn extract_cell_text(node: ElementRef) -> String {
    extract_text(node).replace('\u{a0}', " ").trim().to_string()
}

pub fn absolute_url(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{base}{href}")
    }
}
