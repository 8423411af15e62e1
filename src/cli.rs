use anyhow::{Context as _, Result};
use bikeshare::analyser::{
    AnalysisReport, City, FilterCriteria, FilteredView, PAGE_SIZE, Paginator, run_analysis,
};
use bikeshare::config::{DATA_DIR_ENV, SETTINGS_FILE, Settings};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;

const RULE: usize = 40;

#[derive(Parser)]
#[command(name = "bikeshare", about = "Explore US bikeshare trip data")]
pub struct Cli {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, env = DATA_DIR_ENV, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to a JSON settings file
    #[arg(long, default_value = SETTINGS_FILE, global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute statistics for a single selection and exit
    Stats {
        /// Chicago, New York City or Washington
        #[arg(short, long)]
        city: String,

        /// January to June, or "all"
        #[arg(short, long, default_value = "all")]
        month: String,

        /// Monday to Sunday, or "all"
        #[arg(short, long, default_value = "all")]
        day: String,

        /// Number of raw data pages (5 rows each) to print after the statistics
        #[arg(long, default_value_t = 0)]
        raw_pages: usize,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run_command(settings: &Settings, command: Commands, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Stats {
            city,
            month,
            day,
            raw_pages,
            json,
        } => {
            let city: City = city.parse()?;
            let criteria = FilterCriteria::parse(&month, &day)?;
            let report = run_analysis(settings, city, criteria)
                .with_context(|| format!("Analysis of {city} failed"))?;

            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                print_report(out, &report, settings.show_timings)?;
            }

            let mut pages = Paginator::new(&report.view);
            for _ in 0..raw_pages {
                if pages.is_exhausted() {
                    break;
                }
                writeln!(out, "{}", pages.next_page())?;
            }
            Ok(())
        }
    }
}

/// Prompts for selections, prints statistics and offers a restart until the
/// user declines or input ends.
pub fn run_interactive(
    settings: &Settings,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    loop {
        let Some((city, criteria)) = get_filters(input, out)? else {
            return Ok(());
        };

        match run_analysis(settings, city, criteria) {
            Ok(report) => {
                print_report(out, &report, settings.show_timings)?;
                if settings.offer_raw_data {
                    raw_data(input, out, &report.view)?;
                }
            }
            Err(e) => {
                log::error!("Analysis of {city} failed: {e}");
                writeln!(out, "\nAn error occurred: {e}")?;
            }
        }

        let restart = ask(
            input,
            out,
            "\nDo you wish to restart the program? Please type 'yes' or 'no' to respond.",
        )?;
        if !restart.is_some_and(|answer| answer.eq_ignore_ascii_case("yes")) {
            return Ok(());
        }
    }
}

fn get_filters(
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Option<(City, FilterCriteria)>> {
    writeln!(out, "{}", "*".repeat(60))?;
    writeln!(out, "Hello! Let's explore some US bikeshare data!")?;
    writeln!(out, "{}", "*".repeat(60))?;

    let Some(city) = prompt_until(
        input,
        out,
        "\nFirst, please select a city: Chicago, New York City, or Washington?",
        "Invalid city selection. Please choose either Chicago, New York City, or Washington.",
        |answer| answer.parse::<City>(),
    )?
    else {
        return Ok(None);
    };

    let Some(month) = prompt_until(
        input,
        out,
        &format!(
            "\nWhich month would you like to analyze for {city}? You can select from January, \
             February, March, April, May, June, or type 'all' if you don't want to specify a month."
        ),
        "Invalid month selection. Please choose a valid month or 'all' for no month filter.",
        FilterCriteria::parse_month,
    )?
    else {
        return Ok(None);
    };

    let Some(day) = prompt_until(
        input,
        out,
        "\nNow, let's pick a day. You can select from Monday, Tuesday, Wednesday, Thursday, \
         Friday, Saturday, Sunday, or type 'all' if you don't want to specify a day.",
        "Invalid day selection. Please choose a valid day or 'all' for no day filter.",
        FilterCriteria::parse_day,
    )?
    else {
        return Ok(None);
    };

    writeln!(out, "{}", "-".repeat(RULE))?;
    Ok(Some((city, FilterCriteria::new(month, day))))
}

fn print_report(out: &mut impl Write, report: &AnalysisReport, show_timings: bool) -> Result<()> {
    writeln!(
        out,
        "\n{} of {} trips in {} match your selection ({}).",
        report.matching_trips, report.total_trips, report.city, report.criteria
    )?;

    for group in report.reports() {
        writeln!(out, "\n{}\n", group.title())?;
        writeln!(out, "{group}")?;
        if show_timings {
            writeln!(
                out,
                "\nThis took {:.6} seconds.",
                group.elapsed().as_secs_f64()
            )?;
        }
        writeln!(out, "{}", "-".repeat(RULE))?;
    }

    if show_timings {
        writeln!(
            out,
            "\nAll statistics took {:.6} seconds.",
            report.total_elapsed().as_secs_f64()
        )?;
    }
    Ok(())
}

fn raw_data(input: &mut impl BufRead, out: &mut impl Write, view: &FilteredView) -> Result<()> {
    writeln!(out, "\nDisplaying Raw Data...")?;
    let mut pages = Paginator::new(view);

    loop {
        let answer = ask(
            input,
            out,
            &format!(
                "Do you want to view {PAGE_SIZE} lines of unprocessed data? \
                 Please respond with either 'yes' or 'no'."
            ),
        )?;
        if !answer.is_some_and(|a| a.eq_ignore_ascii_case("yes")) {
            break;
        }
        if pages.is_exhausted() {
            writeln!(out, "There is no more raw data to display.")?;
            break;
        }
        writeln!(out, "{}", pages.next_page())?;
    }

    writeln!(out, "{}", "-".repeat(60))?;
    Ok(())
}

/// Asks until `parse` accepts the answer. `None` means input ended.
fn prompt_until<T>(
    input: &mut impl BufRead,
    out: &mut impl Write,
    question: &str,
    invalid: &str,
    parse: impl Fn(&str) -> bikeshare::error::Result<T>,
) -> Result<Option<T>> {
    loop {
        let Some(answer) = ask(input, out, question)? else {
            return Ok(None);
        };
        match parse(&answer) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => {
                log::debug!("Rejected answer {answer:?}: {e}");
                writeln!(out, "{invalid}")?;
            }
        }
    }
}

/// Prints `question`, reads one trimmed line. `None` at end of input.
fn ask(input: &mut impl BufRead, out: &mut impl Write, question: &str) -> Result<Option<String>> {
    write!(out, "{question}\n>>> ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn fixture_settings() -> Settings {
        Settings {
            show_timings: false,
            ..Settings::default()
        }
        .with_data_dir(Some(
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata"),
        ))
    }

    fn run_script(script: &str) -> Result<String> {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        run_interactive(&fixture_settings(), &mut input, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_interactive_single_run() -> Result<()> {
        let output = run_script("Chicago\n  JANUARY \nall\nno\nno\n")?;
        assert!(output.contains("the month of January, the most common month is January."));
        assert!(output.contains("Calculating User Statistics..."));
        assert!(!output.contains("This took"));
        Ok(())
    }

    #[test]
    fn test_interactive_prints_timings_when_enabled() -> Result<()> {
        let settings = Settings::default().with_data_dir(Some(
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata"),
        ));
        let mut input = Cursor::new(b"chicago\nall\nall\nno\nno\n".to_vec());
        let mut out = Vec::new();
        run_interactive(&settings, &mut input, &mut out)?;

        let output = String::from_utf8(out)?;
        assert_eq!(output.matches("This took").count(), 4);
        assert!(output.contains("All statistics took"));
        Ok(())
    }

    #[test]
    fn test_interactive_reports_missing_data_and_offers_restart() -> Result<()> {
        let settings = Settings::default().with_data_dir(Some(PathBuf::from("no/such/dir")));
        let script = "chicago\nall\nall\nyes\nwashington\nall\nall\nno\n";
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        run_interactive(&settings, &mut input, &mut out)?;

        let output = String::from_utf8(out)?;
        let error = output
            .find("An error occurred: Data for Chicago is unavailable")
            .ok_or_else(|| anyhow::anyhow!("missing error line in {output}"))?;
        let restart = output
            .find("Do you wish to restart the program?")
            .ok_or_else(|| anyhow::anyhow!("missing restart prompt in {output}"))?;
        assert!(error < restart);
        assert!(!output.contains("Calculating"));
        assert!(output.contains("Data for Washington is unavailable"));
        Ok(())
    }

    #[test]
    fn test_interactive_reprompts_on_invalid_answers() -> Result<()> {
        let output = run_script("boston\nwashington\njuly\nall\nfunday\nall\nno\nno\n")?;
        assert!(output.contains("Invalid city selection."));
        assert!(output.contains("Invalid month selection."));
        assert!(output.contains("Invalid day selection."));
        assert!(output.contains("not available for Washington."));
        Ok(())
    }

    #[test]
    fn test_interactive_raw_pages_until_no() -> Result<()> {
        let output = run_script("chicago\nall\nall\nyes\nyes\nno\nno\n")?;
        assert!(output.contains("Displaying Raw Data..."));
        assert_eq!(output.matches("unprocessed data?").count(), 3);
        Ok(())
    }

    #[test]
    fn test_interactive_restart() -> Result<()> {
        let output = run_script("chicago\nall\nall\nno\nyes\nnew york city\nall\nall\nno\nno\n")?;
        assert!(output.contains("in Chicago"));
        assert!(output.contains("in New York City"));
        Ok(())
    }

    #[test]
    fn test_interactive_stops_at_end_of_input() -> Result<()> {
        let output = run_script("chicago\n")?;
        assert!(output.contains("Which month would you like to analyze for Chicago?"));
        Ok(())
    }

    #[test]
    fn test_stats_command_json() -> Result<()> {
        let mut out = Vec::new();
        run_command(
            &fixture_settings(),
            Commands::Stats {
                city: "washington".to_owned(),
                month: "all".to_owned(),
                day: "all".to_owned(),
                raw_pages: 1,
                json: true,
            },
            &mut out,
        )?;
        let output = String::from_utf8(out)?;
        assert!(output.contains("\"demographics\""));
        assert!(output.contains("not_available"));
        Ok(())
    }

    #[test]
    fn test_stats_command_rejects_unknown_city() {
        let mut out = Vec::new();
        let result = run_command(
            &fixture_settings(),
            Commands::Stats {
                city: "boston".to_owned(),
                month: "all".to_owned(),
                day: "all".to_owned(),
                raw_pages: 0,
                json: false,
            },
            &mut out,
        );
        assert!(result.is_err());
    }
}
