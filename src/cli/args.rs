//! CLI argument parsing.
//!
//! Hand-rolled and iterator-driven so every parse path is testable
//! without touching the process environment.

use std::path::PathBuf;

use chrono::NaiveDate;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Render a diagram to SVG
    Render {
        /// Configuration file; the Titan preset when absent.
        config_path: Option<PathBuf>,
        /// Output SVG path.
        output: PathBuf,
        /// Move the moon to this date before rendering.
        moon_date: Option<NaiveDate>,
        /// Print the scene as JSON instead of writing SVG.
        json: bool,
    },
    /// Validate a diagram configuration file
    Validate {
        /// Path to the configuration file.
        config_path: PathBuf,
    },
    /// Verify geometric invariants of a configured orbit
    Verify {
        /// Configuration file; the Titan preset when absent.
        config_path: Option<PathBuf>,
        /// Ls samples per relation.
        samples: usize,
    },
    /// Write the Titan preset configuration as YAML
    Init {
        /// Destination path; stdout when absent.
        output: Option<PathBuf>,
    },
    /// Dump the Titan season calendar
    Info,
    /// Solar longitude at a date
    LsAt {
        /// Date to convert.
        date: NaiveDate,
    },
    /// Date at a solar longitude
    DateAt {
        /// Solar longitude in degrees.
        ls: f64,
        /// Whole orbits past the calendar epoch.
        orbit: i32,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// This method is testable as it accepts any iterator of strings,
    /// not just `std::env::args()`.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// Internal parsing from a vector of strings.
    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "render" => Self::parse_render_command(args),
            "validate" => Self::parse_validate_command(args),
            "verify" => Self::parse_verify_command(args),
            "init" => Self::parse_init_command(args),
            "info" => Command::Info,
            "ls" => Self::parse_ls_command(args),
            "date" => Self::parse_date_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    /// Parse the 'render' command arguments.
    fn parse_render_command(args: &[String]) -> Command {
        let mut config_path = None;
        let mut output = PathBuf::from("seasons.svg");
        let mut moon_date = None;
        let mut json = false;

        let mut i = 2;
        while i < args.len() {
            match args[i].as_str() {
                "-o" | "--output" => {
                    if i + 1 < args.len() {
                        output = PathBuf::from(&args[i + 1]);
                        i += 2;
                    } else {
                        eprintln!("Warning: {} requires a value", args[i]);
                        i += 1;
                    }
                }
                "--date" => {
                    if i + 1 < args.len() {
                        match args[i + 1].parse() {
                            Ok(date) => moon_date = Some(date),
                            Err(_) => eprintln!("Ignoring invalid date: {}", args[i + 1]),
                        }
                        i += 2;
                    } else {
                        eprintln!("Warning: --date requires a value (YYYY-MM-DD)");
                        i += 1;
                    }
                }
                "--json" => {
                    json = true;
                    i += 1;
                }
                other => {
                    if config_path.is_none() && !other.starts_with('-') {
                        config_path = Some(PathBuf::from(other));
                    } else {
                        eprintln!("Ignoring unknown argument: {other}");
                    }
                    i += 1;
                }
            }
        }

        Command::Render {
            config_path,
            output,
            moon_date,
            json,
        }
    }

    /// Parse the 'validate' command arguments.
    fn parse_validate_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'validate' command requires a configuration file path");
            return Command::Help;
        }

        Command::Validate {
            config_path: PathBuf::from(&args[2]),
        }
    }

    /// Parse the 'verify' command arguments.
    fn parse_verify_command(args: &[String]) -> Command {
        let mut config_path = None;
        let mut samples = 360;

        let mut i = 2;
        while i < args.len() {
            match args[i].as_str() {
                "--samples" => {
                    if i + 1 < args.len() {
                        if let Ok(n) = args[i + 1].parse() {
                            samples = n;
                        }
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                other => {
                    if config_path.is_none() && !other.starts_with('-') {
                        config_path = Some(PathBuf::from(other));
                    } else {
                        eprintln!("Ignoring unknown argument: {other}");
                    }
                    i += 1;
                }
            }
        }

        Command::Verify {
            config_path,
            samples,
        }
    }

    /// Parse the 'init' command arguments.
    fn parse_init_command(args: &[String]) -> Command {
        let mut output = None;

        let mut i = 2;
        while i < args.len() {
            match args[i].as_str() {
                "-o" | "--output" => {
                    if i + 1 < args.len() {
                        output = Some(PathBuf::from(&args[i + 1]));
                        i += 2;
                    } else {
                        eprintln!("Warning: {} requires a value", args[i]);
                        i += 1;
                    }
                }
                other => {
                    eprintln!("Ignoring unknown argument: {other}");
                    i += 1;
                }
            }
        }

        Command::Init { output }
    }

    /// Parse the 'ls' command arguments.
    fn parse_ls_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'ls' command requires a date (YYYY-MM-DD)");
            return Command::Help;
        }

        match args[2].parse() {
            Ok(date) => Command::LsAt { date },
            Err(_) => {
                eprintln!("Error: invalid date: {}", args[2]);
                Command::Help
            }
        }
    }

    /// Parse the 'date' command arguments.
    ///
    /// Accepts `<ls>` or `<ls>+<orbit>`, e.g. `90` or `90+1`.
    fn parse_date_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'date' command requires a solar longitude (e.g. 90 or 90+1)");
            return Command::Help;
        }

        let (ls_text, orbit_text) = match args[2].split_once('+') {
            Some((ls, orbit)) => (ls, Some(orbit)),
            None => (args[2].as_str(), None),
        };

        let Ok(ls) = ls_text.parse() else {
            eprintln!("Error: invalid solar longitude: {}", args[2]);
            return Command::Help;
        };

        let orbit = match orbit_text {
            Some(text) => match text.parse() {
                Ok(orbit) => orbit,
                Err(_) => {
                    eprintln!("Error: invalid orbit count: {text}");
                    return Command::Help;
                }
            },
            None => 0,
        };

        Command::DateAt { ls, orbit }
    }
}
