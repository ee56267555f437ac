// Library root
// -----------
// The binary (`main.rs`) parses flags and hands over to `ui::run`. Every
// piece the UI drives lives here so it can be tested without a terminal.
//
// Module responsibilities:
// - `cli`: command-line flags and taxonomy defaults.
// - `credentials`: the in-memory credential set (never persisted).
// - `gemini`: the content generator that calls the Gemini API.
// - `wordpress`: draft payload and the client that creates the post.
// - `report`: maps the post-creation response to a user message.
// - `flow`: runs generate -> publish -> report once.
// - `ui`: prompts, spinners and printing.
pub mod cli;
pub mod credentials;
pub mod flow;
pub mod gemini;
pub mod report;
pub mod ui;
pub mod wordpress;
