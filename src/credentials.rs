// Credentials collected at the start of a run. They live only in process
// memory: nothing here writes them to disk, and the Debug impl redacts
// both keys so a stray `{:?}` or tracing field cannot leak them.

use std::fmt;

/// The three values needed to talk to both services.
#[derive(Clone)]
pub struct Credentials {
    pub llm_api_key: String,
    pub wordpress_api_key: String,
    pub wordpress_base_url: String,
}

impl Credentials {
    pub fn new(
        llm_api_key: impl Into<String>,
        wordpress_api_key: impl Into<String>,
        wordpress_base_url: impl Into<String>,
    ) -> Self {
        Credentials {
            llm_api_key: llm_api_key.into(),
            wordpress_api_key: wordpress_api_key.into(),
            wordpress_base_url: wordpress_base_url.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("llm_api_key", &"<redacted>")
            .field("wordpress_api_key", &"<redacted>")
            .field("wordpress_base_url", &self.wordpress_base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_keys() {
        let creds = Credentials::new("llm-secret", "wp-secret", "https://blog.example");
        let printed = format!("{:?}", creds);
        assert!(!printed.contains("llm-secret"));
        assert!(!printed.contains("wp-secret"));
        assert!(printed.contains("https://blog.example"));
    }
}
