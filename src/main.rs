// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mkignore-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mkignore and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! mkignore CLI entrypoint.
//!
//! Starts the interactive TUI against the template catalog and writes the
//! chosen templates to `.gitignore` in the current working directory, or to
//! the path given on the command line.

use std::error::Error;
use std::path::PathBuf;

use mkignore::catalog::{CatalogClient, DEFAULT_API_URL};
use mkignore::store::OutputFile;
use mkignore::tui::{self, App};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<output-path>] [--api-url <url>]\n  {program} [--output <path>] [--api-url <url>]\n\nWrites the selected .gitignore templates to <output-path> (default: ./.gitignore).\n\n--api-url selects the template catalog endpoint\n(default {DEFAULT_API_URL})."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    output: Option<String>,
    api_url: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--output" => {
                if options.output.is_some() {
                    return Err(());
                }
                let path = args.next().ok_or(())?;
                options.output = Some(path);
            }
            "--api-url" => {
                if options.api_url.is_some() {
                    return Err(());
                }
                let url = args.next().ok_or(())?;
                options.api_url = Some(url);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.output.is_some() {
                    return Err(());
                }
                options.output = Some(arg);
            }
        }
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "mkignore".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let output_path = match options.output {
            Some(path) => PathBuf::from(path),
            None => std::env::current_dir()?.join(".gitignore"),
        };
        let api_url = options.api_url.unwrap_or_else(|| DEFAULT_API_URL.to_owned());

        let client = CatalogClient::new(api_url.clone());
        let (request_tx, request_rx) = tokio::sync::mpsc::unbounded_channel();
        let (event_tx, event_rx) = std::sync::mpsc::channel();

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            let worker = tokio::spawn(tui::serve_catalog_requests(client, request_rx, event_tx));

            let app = App::new(OutputFile::new(output_path), api_url, request_tx, event_rx);
            let tui_join =
                tokio::task::spawn_blocking(move || tui::run(app).map_err(|err| err.to_string()))
                    .await;

            worker.abort();
            let _ = worker.await;

            let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
            tui_result.map_err(|err| {
                Box::new(std::io::Error::new(std::io::ErrorKind::Other, err)) as Box<dyn Error>
            })?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("mkignore: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_positional_output_path() {
        let options = parse_options(["some/.gitignore".to_owned()].into_iter())
            .expect("parse options");
        assert_eq!(options.output.as_deref(), Some("some/.gitignore"));
        assert!(options.api_url.is_none());
    }

    #[test]
    fn parses_output_flag() {
        let options =
            parse_options(["--output".to_owned(), "some/.gitignore".to_owned()].into_iter())
                .expect("parse options");
        assert_eq!(options.output.as_deref(), Some("some/.gitignore"));
    }

    #[test]
    fn parses_api_url() {
        let options =
            parse_options(["--api-url".to_owned(), "https://example.test/api/".to_owned()].into_iter())
                .expect("parse options");
        assert_eq!(options.api_url.as_deref(), Some("https://example.test/api/"));
        assert!(options.output.is_none());
    }

    #[test]
    fn parses_output_and_api_url_in_any_order() {
        let options = parse_options(
            ["--api-url".to_owned(), "https://example.test/".to_owned(), "out".to_owned()]
                .into_iter(),
        )
        .expect("parse options");
        assert_eq!(options.output.as_deref(), Some("out"));
        assert_eq!(options.api_url.as_deref(), Some("https://example.test/"));

        let options = parse_options(
            ["out".to_owned(), "--api-url".to_owned(), "https://example.test/".to_owned()]
                .into_iter(),
        )
        .expect("parse options");
        assert_eq!(options.output.as_deref(), Some("out"));
        assert_eq!(options.api_url.as_deref(), Some("https://example.test/"));
    }

    #[test]
    fn rejects_unknown_args() {
        parse_options(["--nope".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_output() {
        parse_options(["one".to_owned(), "two".to_owned()].into_iter()).unwrap_err();

        parse_options(
            ["--output".to_owned(), "one".to_owned(), "--output".to_owned(), "two".to_owned()]
                .into_iter(),
        )
        .unwrap_err();

        parse_options(["--output".to_owned(), "one".to_owned(), "two".to_owned()].into_iter())
            .unwrap_err();
    }

    #[test]
    fn rejects_duplicate_api_url() {
        parse_options(
            [
                "--api-url".to_owned(),
                "https://one.test/".to_owned(),
                "--api-url".to_owned(),
                "https://two.test/".to_owned(),
            ]
            .into_iter(),
        )
        .unwrap_err();
    }

    #[test]
    fn rejects_missing_flag_values() {
        parse_options(["--output".to_owned()].into_iter()).unwrap_err();
        parse_options(["--api-url".to_owned()].into_iter()).unwrap_err();
    }
}
