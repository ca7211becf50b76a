use std::fs;
use std::path::Path;

/// OSC8 hyperlink for terminal output.
pub fn osc8_link(url: &str, text: &str) -> String {
    format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", url, text)
}

/// OSC8 file:// hyperlink, resolved to an absolute path when possible.
pub fn osc8_file_link(path: &Path, text: &str) -> String {
    let abs = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    osc8_link(&format!("file://{}", abs.display()), text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_wrap_text_in_osc8_escapes() {
        let link = osc8_link("https://ballotpedia.org", "Ballotpedia");
        assert!(link.starts_with("\x1b]8;;https://ballotpedia.org"));
        assert!(link.contains("Ballotpedia"));
        assert!(link.ends_with("\x1b]8;;\x1b\\"));
    }
}
