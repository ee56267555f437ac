// UI layer: collects credentials and post text with `dialoguer`, shows a
// spinner while each remote call runs, and prints the outcome line.

use crate::cli::Cli;
use crate::credentials::Credentials;
use crate::flow;
use crate::gemini::{ContentGenerator, GeminiGenerator, GenerationError};
use crate::report::Outcome;
use crate::wordpress::{HttpResult, PostDraft, PostPublisher, PublishError, WordPressClient};
use anyhow::{Context, Result};
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Fill in whichever credentials were not given as flags. Keys use a
/// hidden prompt with confirmation.
pub fn collect_credentials(cli: &Cli) -> Result<Credentials> {
    let llm_api_key = match &cli.llm_api_key {
        Some(key) => key.clone(),
        None => secret_prompt("Enter your Gemini API key")?,
    };
    let wordpress_api_key = match &cli.wordpress_api_key {
        Some(key) => key.clone(),
        None => secret_prompt("Enter your WordPress API key")?,
    };
    let wordpress_base_url = match &cli.wordpress_url {
        Some(url) => url.clone(),
        None => Input::<String>::new()
            .with_prompt("Enter your WordPress URL")
            .interact_text()
            .context("Reading WordPress URL")?,
    };
    Ok(Credentials::new(llm_api_key, wordpress_api_key, wordpress_base_url))
}

fn secret_prompt(prompt: &str) -> Result<String> {
    // `Password` hides input and asks twice.
    Password::new()
        .with_prompt(prompt)
        .with_confirmation("Repeat for confirmation", "Error: the two entered values do not match.")
        .interact()
        .with_context(|| format!("Reading input for \"{}\"", prompt))
}

/// Prompt for the post title and the seed sentence.
pub fn collect_post_text() -> Result<(String, String)> {
    let title: String = Input::new()
        .with_prompt("Enter your desired blog post title")
        .interact_text()
        .context("Reading post title")?;
    let sentence: String = Input::new()
        .with_prompt("Enter a sentence for the blog post")
        .interact_text()
        .context("Reading seed sentence")?;
    Ok((title, sentence))
}

fn spinner(msg: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Wraps a generator so a spinner runs while it works.
struct Spinning<'a, G>(&'a G);

impl<G: ContentGenerator> ContentGenerator for Spinning<'_, G> {
    fn generate(&self, sentence: &str) -> Result<String, GenerationError> {
        let pb = spinner("Generating content...").ok();
        let res = self.0.generate(sentence);
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }
        res
    }
}

impl<P: PostPublisher> PostPublisher for Spinning<'_, P> {
    fn publish(&self, draft: &PostDraft) -> Result<HttpResult, PublishError> {
        let pb = spinner("Creating draft post...").ok();
        let res = self.0.publish(draft);
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }
        res
    }
}

/// The whole interactive run. Returns the outcome after printing it;
/// generation and transport failures come back as errors.
pub fn run(cli: &Cli) -> Result<Outcome> {
    let creds = collect_credentials(cli)?;
    tracing::debug!(?creds, "credentials collected");

    let (title, sentence) = collect_post_text()?;

    let generator = GeminiGenerator::new(&creds.llm_api_key, &cli.model)
        .context("Failed to build Gemini client")?;
    let publisher = WordPressClient::new(&creds.wordpress_base_url, &creds.wordpress_api_key)
        .context("Failed to build WordPress client")?;

    let outcome = flow::run(
        &Spinning(&generator),
        &Spinning(&publisher),
        &title,
        &sentence,
        &cli.taxonomy(),
    )?;
    println!("{}", outcome);
    Ok(outcome)
}
