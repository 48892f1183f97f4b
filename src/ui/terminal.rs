use super::commands::{Command, COMMAND_BOX};
use crate::catalog::{ModelSelector, DOCS_URL, LIMITATIONS};
use crate::client::GroqClient;
use crate::models::Result;
use crate::renderer::{model_table, MarkdownRenderer, CHECKLIST, FOOTER, NO_SOLUTION, SOLUTION_BANNER};
use crate::session::Session;
use crate::submit::{submit, Outcome};
use crate::validation::{clip_description, ValidationError, MAX_DESCRIPTION_CHARS};
use colored::*;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use rustyline::{config::Configurer, error::ReadlineError, DefaultEditor};
use std::io::{self, Write};
use std::time::Duration;
use terminal_size::{terminal_size, Width};
use tracing::info;

const WELCOME_MESSAGE: &str = "# SAP Error Solution Assistant 🤖\n\n\
Enter your SAP error details and Groq API key to get AI-powered solutions.\n\n\
Paste an error message or code at the prompt, for example \
`DBIF_RSQL_INVALID_RSQL` or `Update termination error`.";

const KEY_HELP: &str = "Get your API key from https://console.groq.com/";

/// Interactive replacement for the web form: one prompt line per submission.
/// Line history is kept in memory for the running session only.
pub struct TerminalForm {
    client: GroqClient,
    renderer: MarkdownRenderer,
    editor: DefaultEditor,
    theme: ColorfulTheme,
    width: usize,
}

impl TerminalForm {
    pub fn new(client: GroqClient) -> Result<Self> {
        let width = match terminal_size() {
            Some((Width(w), _)) => (w as usize).saturating_sub(2).max(20),
            None => 80,
        };

        let mut editor = DefaultEditor::new()?;
        editor.set_max_history_size(100)?;

        Ok(Self {
            client,
            renderer: MarkdownRenderer::new(width),
            editor,
            theme: ColorfulTheme::default(),
            width,
        })
    }

    pub async fn run(&mut self, session: &mut Session) -> Result<()> {
        self.show_welcome_message()?;
        if !session.has_credential() {
            self.prompt_credential(session)?;
        }
        self.show_current_model(session);

        loop {
            let prompt = format!("{}", "> ".blue().bold());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let command = line
                        .parse::<Command>()
                        .unwrap_or_else(|_| Command::Submit(line.clone()));
                    match command {
                        Command::Exit => break,
                        Command::Clear => {
                            clearscreen::clear()?;
                            self.show_command_box();
                        }
                        Command::Help => self.show_command_box(),
                        Command::Key => self.prompt_credential(session)?,
                        Command::Models => self.show_models(session),
                        Command::Model(choice) => self.choose_model(session, choice)?,
                        Command::Submit(input) => {
                            if !input.trim().is_empty() {
                                self.editor.add_history_entry(input.trim())?;
                            }
                            self.handle_submission(session, &input).await?;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("Use ':exit' to quit");
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    println!("Error: {}", err);
                    break;
                }
            }
        }

        println!("{}", FOOTER.dimmed());
        Ok(())
    }

    /// Validates the inputs, asks the model and prints the outcome.
    pub async fn handle_submission(&self, session: &Session, raw: &str) -> Result<()> {
        let description = clip_description(raw);
        if description.len() < raw.len() {
            self.print_warning(&format!(
                "Error message truncated to {} characters",
                MAX_DESCRIPTION_CHARS
            ));
        }

        let spinner = self.spinner(&format!("Analyzing error with {}...", session.model));
        let mut errors: Vec<String> = Vec::new();
        let outcome = submit(&self.client, session, description, &mut errors).await;
        spinner.finish_and_clear();

        for error in &errors {
            self.print_error(error);
        }

        match outcome {
            Outcome::Rejected(err) => self.report_invalid(err),
            Outcome::Solved(solution) => self.show_solution(&solution)?,
            Outcome::NoSolution => {
                println!("{}", self.renderer.render(NO_SOLUTION).yellow());
                println!();
            }
        }

        Ok(())
    }

    fn report_invalid(&self, err: ValidationError) {
        if err.is_warning() {
            self.print_warning(&err.to_string());
        } else {
            self.print_error(&err.to_string());
        }
    }

    fn prompt_credential(&self, session: &mut Session) -> Result<()> {
        println!("{}", KEY_HELP.dimmed());
        let key = Password::with_theme(&self.theme)
            .with_prompt("Enter your Groq API Key")
            .allow_empty_password(true)
            .interact()?;
        session.set_credential(key);
        info!("api key updated for this session");
        Ok(())
    }

    fn choose_model(&self, session: &mut Session, choice: Option<String>) -> Result<()> {
        let model = match choice {
            Some(choice) => match choice.parse::<ModelSelector>() {
                Ok(model) => model,
                Err(err) => {
                    self.print_error(&err.to_string());
                    return Ok(());
                }
            },
            None => {
                let names: Vec<&str> = ModelSelector::ALL.iter().map(|m| m.display_name()).collect();
                let index = Select::with_theme(&self.theme)
                    .with_prompt("Choose AI Model (Llama 3 70B recommended for technical queries)")
                    .items(&names)
                    .default(session.model.index())
                    .interact()?;
                ModelSelector::ALL[index]
            }
        };
        session.model = model;
        info!(model = model.model_id(), "model selected");
        self.show_current_model(session);
        Ok(())
    }

    fn show_welcome_message(&self) -> Result<()> {
        clearscreen::clear()?;
        print!("{}", self.renderer.render(WELCOME_MESSAGE).cyan());
        println!("\n");
        self.show_command_box();
        io::stdout().flush()?;
        Ok(())
    }

    fn show_command_box(&self) {
        println!("{}", COMMAND_BOX.green());
        println!();
    }

    fn show_current_model(&self, session: &Session) {
        println!(
            "{} {}",
            "Model:".dimmed(),
            session.model.display_name().bold()
        );
        println!();
    }

    fn show_models(&self, session: &Session) {
        println!("{}", self.renderer.render("**Supported Models:**"));
        print!("{}", model_table(session.model, self.width));
        println!();
        println!("{}", self.renderer.render(LIMITATIONS));
        println!("  {}", format!("Model Documentation: {}", DOCS_URL).dimmed());
        println!();
    }

    fn show_solution(&self, solution: &str) -> Result<()> {
        println!();
        println!("{}", self.renderer.render(SOLUTION_BANNER).green());
        println!("{}", self.renderer.horizontal_rule().dimmed());
        println!("{}", self.renderer.render(solution).cyan());
        println!("{}", self.renderer.horizontal_rule().dimmed());
        println!("{}", self.renderer.render(CHECKLIST).blue());
        println!();
        io::stdout().flush()?;
        Ok(())
    }

    fn spinner(&self, message: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.yellow} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    fn print_error(&self, message: &str) {
        for line in message.lines() {
            println!("{}", line.red());
        }
        println!();
    }

    fn print_warning(&self, message: &str) {
        for line in message.lines() {
            println!("{}", line.yellow());
        }
        println!();
    }
}
