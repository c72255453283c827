use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use console::Style;
use futures::FutureExt;
use indicatif::{ProgressBar, ProgressStyle};
use warning_comments_lib::{
    config::{Config, ConfigFile},
    finder::{self, FileReport},
    matcher::Location,
    Message,
};

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum LocationArg {
    /// The term must come first in the comment, after any decoration
    Start,
    /// The term may appear anywhere in the comment
    Anywhere,
}

impl From<LocationArg> for Location {
    fn from(arg: LocationArg) -> Self {
        match arg {
            LocationArg::Start => Location::Start,
            LocationArg::Anywhere => Location::Anywhere,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, clap::ValueEnum)]
enum Format {
    /// One `path:line:column: message` line per warning
    #[default]
    Text,
    /// A JSON array of per-file reports
    Json,
}

#[derive(clap::Parser, Debug)]
#[command(
    version,
    about,
    author,
    help_template(
        "\
{before-help}{name} {version} by {author-with-newline}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}"
    )
)]
struct Cli {
    #[clap(default_value = ".")]
    /// Files or directories to scan.
    paths: Vec<String>,

    #[clap(short, long)]
    /// A JSON config file with any of the keys "terms", "location",
    /// "decoration" and "skip_self_directives".
    config: Option<PathBuf>,

    #[clap(short, long = "term")]
    /// A warning term to look for, may be supplied multiple times.
    /// Replaces the configured terms.
    terms: Vec<String>,

    #[clap(short, long, value_enum)]
    /// Where in a comment a term must appear.
    location: Option<LocationArg>,

    #[clap(short, long)]
    /// A character that may pad a comment before the term, may be supplied
    /// multiple times.
    decoration: Vec<String>,

    #[clap(long)]
    /// Also treat each language's comment border characters, like the `*`
    /// of a C block comment, as decoration.
    language_borders: bool,

    #[clap(short, long)]
    /// Glob of files or directories to ignore,
    /// may be supplied multiple times.
    exclude: Vec<String>,

    #[clap(short, long, value_enum, default_value_t)]
    /// How to print the warnings.
    format: Format,
}

impl Cli {
    /// Layer the command line over the config file (or the defaults).
    fn config(&self) -> Result<Config, warning_comments_lib::Error> {
        let base = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        let mut file = ConfigFile {
            terms: base.terms,
            location: base.location,
            decoration: base.decoration.iter().map(|c| c.to_string()).collect(),
            skip_self_directives: base.skip_self_directives,
        };
        if !self.terms.is_empty() {
            file.terms = self.terms.clone();
        }
        if let Some(location) = self.location {
            file.location = location.into();
        }
        for entry in self.decoration.iter() {
            if !file.decoration.contains(entry) {
                file.decoration.push(entry.clone());
            }
        }
        file.validate()
    }
}

struct Printer {
    red: Style,
    yellow: Style,
    blue: Style,
    green: Style,
    dim: Style,
    unsupported: usize,
    scan_progress: ProgressBar,
}

impl Default for Printer {
    fn default() -> Self {
        let spinner_style = ProgressStyle::with_template("{spinner} {prefix} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ");
        let scan_progress = ProgressBar::new_spinner();
        scan_progress.set_style(spinner_style);

        Self {
            red: Style::new().red(),
            yellow: Style::new().yellow(),
            blue: Style::new().blue(),
            green: Style::new().green(),
            dim: Style::new().dim(),
            unsupported: 0,
            scan_progress,
        }
    }
}

impl Printer {
    fn print(&mut self, msg: Message) {
        use Message::*;

        match msg {
            Error(err) => {
                // Per file errors arrive mid-scan.
                self.scan_progress.suspend(|| {
                    let e = self.red.apply_to(err.to_string());
                    eprintln!("{e}");
                    if let warning_comments_lib::Error::Command { stdout, stderr, .. } = &err {
                        eprintln!("  stdout: {stdout}");
                        eprintln!("  stderr: {stderr}");
                    }
                });
                if matches!(err, warning_comments_lib::Error::ReadFile { .. }) {
                    self.inc_scanned();
                }
            }

            FindingFiles => {
                self.scan_progress.set_message("Finding files...");
            }
            FoundFiles { count } => {
                self.scan_progress.set_length(count as u64);
                self.scan_progress.set_prefix(format!("[0/{count}]"));
                self.scan_progress
                    .set_message(format!("Scanning {count} files"));
                self.scan_progress
                    .enable_steady_tick(std::time::Duration::from_millis(1000 / 12));
            }

            UnsupportedFile { path } => {
                log::debug!("no comment syntax for {}", path.display());
                self.unsupported += 1;
                self.inc_scanned();
            }
            ScannedFile {
                path,
                comments,
                diagnostics,
            } => {
                log::trace!(
                    "{}: {comments} comments, {diagnostics} warnings",
                    path.display()
                );
                self.inc_scanned();
                self.scan_progress
                    .set_message(format!("{}", self.dim.apply_to(path.display())));
            }

            FoundWarnings { files, total } => {
                self.scan_progress.finish_and_clear();
                if self.unsupported > 0 {
                    eprintln!(
                        "{}",
                        self.dim.apply_to(format!(
                            "  skipped {} file{} in unsupported languages",
                            self.unsupported,
                            if self.unsupported == 1 { "" } else { "s" }
                        ))
                    );
                }
                let summary = format!(
                    "Found {total} warning comment{} in {files} file{}",
                    if total == 1 { "" } else { "s" },
                    if files == 1 { "" } else { "s" }
                );
                if total == 0 {
                    eprintln!("{}", self.green.apply_to(summary));
                } else {
                    eprintln!("{}", self.yellow.apply_to(summary));
                }
            }

            Goodbye => {
                eprintln!("🏁 {}", self.green.apply_to("All done!"));
            }
        }
    }

    fn inc_scanned(&self) {
        self.scan_progress.inc(1);
        self.scan_progress.set_prefix(format!(
            "[{}/{}]",
            self.scan_progress.position(),
            self.scan_progress.length().unwrap_or_default()
        ));
    }

    fn print_reports(&self, reports: &[FileReport]) {
        for report in reports.iter() {
            for diagnostic in report.diagnostics.iter() {
                let location = format!("{}:{}", report.path.display(), diagnostic.location);
                println!(
                    "{}: {}",
                    self.blue.apply_to(location),
                    diagnostic.message()
                );
            }
        }
    }

    async fn message_loop<T>(&mut self, handle: &tokio::task::JoinHandle<T>) {
        let recv = Message::receiver();
        loop {
            let mut timeout =
                std::pin::pin!(tokio::time::sleep(std::time::Duration::from_secs(1)).fuse());
            let mut get_msg = std::pin::pin!(recv.recv().fuse());
            futures::select! {
                msg = get_msg => if let Ok(msg) = msg {
                    self.print(msg);
                },
                _ = timeout => {}
            }
            if handle.is_finished() {
                break;
            }
        }
        while let Ok(msg) = recv.try_recv() {
            self.print(msg);
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::builder().init();

    let cli = Cli::parse();
    let mut printer = Printer::default();
    let config = match cli.config() {
        Ok(config) => config,
        Err(err) => {
            printer.print(Message::Error(err));
            return ExitCode::from(2);
        }
    };
    log::debug!("scanning with {config:?}");

    let Cli {
        paths,
        exclude,
        language_borders,
        format,
        ..
    } = cli;
    let handle = tokio::task::spawn(async move {
        let result = finder::scan_paths(&paths, &exclude, &config, language_borders).await;
        match result {
            Ok(reports) => {
                Message::Goodbye.send();
                Some(reports)
            }
            Err(err) => {
                Message::Error(err).send();
                None
            }
        }
    });

    // While the scan is running, print its progress to the terminal
    printer.message_loop(&handle).await;

    let reports = match handle.await {
        Ok(Some(reports)) => reports,
        Ok(None) => return ExitCode::from(2),
        Err(err) => {
            eprintln!("{}", printer.red.apply_to(format!("scan failed: {err}")));
            return ExitCode::from(2);
        }
    };

    match format {
        Format::Text => printer.print_reports(&reports),
        Format::Json => match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("{}", printer.red.apply_to(err.to_string()));
                return ExitCode::from(2);
            }
        },
    }

    if reports.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
