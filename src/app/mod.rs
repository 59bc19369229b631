//! One-shot and interactive drivers for the imgfetch binary.

mod commands;
mod render;

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use imgfetch_core::{
    ApiConfig, FileSaver, ImageDownloader, SearchClient, SearchSession, SessionError,
};

use crate::cli::Args;
use commands::{Command, parse_command};

/// Wires the session, API client, downloader, and save target together.
struct App {
    session: SearchSession,
    client: SearchClient,
    downloader: ImageDownloader,
    saver: FileSaver,
    quiet: bool,
}

/// Runs the tool according to the parsed arguments.
///
/// With a query: fetch up to `--pages` pages, render them, run the optional
/// `--download`, then either exit or stay interactive. Without a query:
/// interactive session from a blank slate.
///
/// # Errors
///
/// Returns an error for configuration/build failures, a rejected query, or
/// when a one-shot run ends in a fetch error (so the exit code reflects it).
pub async fn run(args: Args, config: ApiConfig) -> Result<()> {
    let mut app = App::new(&args, &config)?;

    let Some(query) = args.query.as_deref() else {
        return app.interactive_loop().await;
    };

    app.submit_search(query).await?;
    for _ in 1..args.pages {
        if !app.session.has_more() || app.session.state().error().is_some() {
            break;
        }
        app.fetch_more().await?;
    }

    if let Some(index) = args.download {
        app.download_index(index).await;
    }

    if args.interactive {
        return app.interactive_loop().await;
    }

    if let Some(message) = app.session.state().error() {
        bail!("{message}");
    }
    Ok(())
}

impl App {
    fn new(args: &Args, config: &ApiConfig) -> Result<Self> {
        let client = SearchClient::new(config)?;
        let downloader = ImageDownloader::new(config)?;
        Ok(Self {
            session: SearchSession::new(),
            client,
            downloader,
            saver: FileSaver::new(&args.output_dir),
            quiet: args.quiet,
        })
    }

    /// Spinner shown while a fetch is in flight; None in quiet mode.
    fn spinner(&self, message: &'static str) -> Option<ProgressBar> {
        if self.quiet {
            return None;
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(100));
        Some(spinner)
    }

    /// Submits a new search and renders the outcome.
    async fn submit_search(&mut self, query: &str) -> Result<()> {
        let spinner = self.spinner("Loading images...");
        let result = self.session.search(&self.client, query).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        result?;
        self.render_outcome(0);
        Ok(())
    }

    /// Fetches the next page and renders the newly arrived rows.
    async fn fetch_more(&mut self) -> Result<(), SessionError> {
        let already_rendered = self.session.results().len();
        let spinner = self.spinner("Loading images...");
        let result = self.session.load_more(&self.client).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        result?;
        self.render_outcome(already_rendered);
        Ok(())
    }

    /// Prints the fetch outcome: the error line, or rows from
    /// `already_rendered` onward plus the status summary.
    fn render_outcome(&self, already_rendered: usize) {
        if let Some(message) = self.session.state().error() {
            println!("{message}");
            return;
        }
        let rows = render::render_rows_from(&self.session, already_rendered);
        if !rows.is_empty() {
            println!("{rows}");
        }
        println!("{}", render::render_summary(&self.session));
    }

    /// Downloads the numbered result (1-based into the rendered list).
    async fn download_index(&mut self, index: usize) {
        let Some(hit) = self.session.results().get(index.wrapping_sub(1)) else {
            println!(
                "no result numbered {index}; {} listed",
                self.session.results().len()
            );
            return;
        };
        let url = hit.urls.full.clone();
        debug!(index, url = %url, "downloading selected image");

        let spinner = self.spinner("Downloading image...");
        let result = self.downloader.fetch_and_save(&url, &self.saver).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        match result {
            Ok(path) => println!("Saved to {}", path.display()),
            Err(error) => {
                warn!(error = %error, "image download failed");
                self.session.report_error(error.user_message());
                println!("{}", error.user_message());
            }
        }
    }

    /// Reads commands from stdin until quit or EOF.
    async fn interactive_loop(&mut self) -> Result<()> {
        if !self.quiet {
            println!("Type a query to search images; `h` for help, `q` to quit.");
        }

        let stdin = io::stdin();
        loop {
            print!("> ");
            io::stdout().flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                // EOF
                return Ok(());
            }

            match parse_command(&line) {
                Ok(Command::Quit) => return Ok(()),
                Ok(Command::Help) => println!("{}", render::INTERACTIVE_HELP),
                Ok(Command::Search(query)) => {
                    if let Err(error) = self.submit_search(&query).await {
                        println!("{error}");
                    }
                }
                Ok(Command::LoadMore) => {
                    if let Err(error) = self.fetch_more().await {
                        println!("{error}");
                    }
                }
                Ok(Command::Download(index)) => self.download_index(index).await,
                Err(error) => println!("{error}"),
            }
        }
    }
}
