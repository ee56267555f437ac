// Command-line surface. The three credential options are optional; the UI
// prompts for whichever ones are missing.

use clap::Parser;

use crate::gemini::DEFAULT_MODEL;
use crate::wordpress::Taxonomy;

/// Expand a sentence into a blog post with Gemini and save it as a
/// WordPress draft.
#[derive(Parser)]
#[command(name = "wp-draft", version)]
pub struct Cli {
    /// Gemini API key (prompted, hidden, when omitted)
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// WordPress API key sent as a Bearer token (prompted when omitted)
    #[arg(long)]
    pub wordpress_api_key: Option<String>,

    /// WordPress site base URL, e.g. https://blog.example.com
    #[arg(long = "wordpress-url")]
    pub wordpress_url: Option<String>,

    /// Gemini model used for generation
    #[arg(long, default_value = DEFAULT_MODEL, value_parser = parse_model)]
    pub model: String,

    /// Category ID to attach; repeat for several [default: 1]
    #[arg(long = "category", value_name = "ID")]
    pub categories: Vec<u64>,

    /// Tag ID to attach; repeat for several [default: 2 3]
    #[arg(long = "tag", value_name = "ID")]
    pub tags: Vec<u64>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Model names end up in the request path, so only path-safe names pass.
fn parse_model(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("model name must not be empty".into());
    }
    match s.chars().find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'))) {
        Some(c) => Err(format!("model name may not contain {:?}", c)),
        None => Ok(s.to_string()),
    }
}

impl Cli {
    /// Taxonomy from the flags, falling back to the defaults per list.
    pub fn taxonomy(&self) -> Taxonomy {
        let defaults = Taxonomy::default();
        Taxonomy {
            categories: if self.categories.is_empty() {
                defaults.categories
            } else {
                self.categories.clone()
            },
            tags: if self.tags.is_empty() {
                defaults.tags
            } else {
                self.tags.clone()
            },
        }
    }
}
