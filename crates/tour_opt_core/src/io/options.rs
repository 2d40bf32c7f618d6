use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use log::LevelFilter;
use tour_opt_derive::{CliOptions, CliValue, KvDisplay};

use crate::{
    Error, EvaluationMode, OptimizerConfig, Result, Solver, Termination,
    constants::{
        DEFAULT_LARGE_INPUT_THRESHOLD, DEFAULT_LARGE_PATIENCE, DEFAULT_LARGE_STRIDE,
        DEFAULT_SMALL_PATIENCE, DEFAULT_SMALL_STRIDE, DEFAULT_START_CITY,
    },
    output::tour_output_path,
};

/// Runtime options for construction, 2-opt scheduling, I/O and logging.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct SolverOptions {
    /// Optional input file of `id x y` records. Empty means stdin.
    #[cli(long = "input")]
    pub input: String,
    /// Output file for the tour. Empty derives `<input>.tour`, `-` forces stdout.
    #[cli(long = "output")]
    pub output: String,
    /// City the nearest-neighbor walk starts from.
    #[cli(long = "start-city")]
    pub start_city: usize,
    /// Inputs with more cities than this switch to the large stride and patience.
    #[cli(long = "large-input-threshold")]
    pub large_input_threshold: usize,
    #[cli(long = "large-stride")]
    pub large_stride: usize,
    #[cli(long = "large-patience")]
    pub large_patience: usize,
    #[cli(long = "small-stride")]
    pub small_stride: usize,
    #[cli(long = "small-patience")]
    pub small_patience: usize,
    /// Candidate evaluation: `delta` or `full`.
    #[cli(long = "evaluation", parse_with = "EvaluationMode::parse")]
    pub evaluation: EvaluationMode,
    /// Wall-clock budget for 2-opt in seconds, checked between rounds. 0 disables it.
    #[cli(long = "time-limit")]
    pub time_limit: f64,
    #[cli(long = "log-level", parse_with = "LogLevel::parse")]
    pub log_level: LogLevel,
    #[cli(long = "log-format", parse_with = "LogFormat::parse")]
    pub log_format: LogFormat,
    #[cli(long = "log-timestamp", flag)]
    pub log_timestamp: bool,
    /// Optional output file path for logs. Empty means stderr.
    #[cli(long = "log-output")]
    pub log_output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-level")]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-format")]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            input: String::new(),
            output: String::new(),
            start_city: DEFAULT_START_CITY,
            large_input_threshold: DEFAULT_LARGE_INPUT_THRESHOLD,
            large_stride: DEFAULT_LARGE_STRIDE,
            large_patience: DEFAULT_LARGE_PATIENCE,
            small_stride: DEFAULT_SMALL_STRIDE,
            small_patience: DEFAULT_SMALL_PATIENCE,
            evaluation: EvaluationMode::Delta,
            time_limit: 0.0,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
        }
    }
}

impl SolverOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            if !arg.starts_with("--") {
                // a single positional argument names the input file
                if options.input.is_empty() {
                    options.input = arg;
                    continue;
                }
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            }
            let raw_name = &arg[2..];

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = Self::split_arg(raw_name, &mut args);
            if !options.apply_cli_option(&name, value)? {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }

        options.validate()?;
        Ok(options)
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  tour-opt [options] <cities.txt>\n",
            "  tour-opt [options] < cities.txt\n\n",
            "Input is one 'id x y' record per line. Output is the tour length\n",
            "followed by one city index per line.\n\n",
            "Options:\n",
            "  --input <path>\n",
            "  --output <path|->\n",
            "  --start-city <usize>\n",
            "  --large-input-threshold <usize>\n",
            "  --large-stride <usize>\n",
            "  --large-patience <usize>\n",
            "  --small-stride <usize>\n",
            "  --small-patience <usize>\n",
            "  --evaluation <delta|full>\n",
            "  --time-limit <seconds>\n",
            "  --log-level <error|warn|info|debug|trace|off>\n",
            "  --log-format <compact|pretty>\n",
            "  --log-timestamp[=<bool>]\n",
            "  --no-log-timestamp\n",
            "  --log-output <path>\n",
            "  --help\n",
            "\n",
            "Examples:\n",
            "  tour-opt cities.txt                      # writes cities.txt.tour\n",
            "  tour-opt --output - --log-level info cities.txt\n",
            "  tour-opt --time-limit 30 --small-patience 3 < cities.txt\n",
        )
    }

    pub fn validate(&self) -> Result<()> {
        self.optimizer_config().validate()?;
        self.time_limit_duration()?;
        Ok(())
    }

    fn time_limit_duration(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.time_limit).map_err(|_| {
            Error::invalid_input(format!(
                "--time-limit must be a non-negative number of seconds, got {}",
                self.time_limit
            ))
        })
    }

    pub fn optimizer_config(&self) -> OptimizerConfig {
        OptimizerConfig {
            large_input_threshold: self.large_input_threshold,
            large_stride: self.large_stride,
            large_patience: self.large_patience,
            small_stride: self.small_stride,
            small_patience: self.small_patience,
            evaluation: self.evaluation,
        }
    }

    /// Deadline starts counting when this is called.
    pub fn termination(&self) -> Termination {
        match self.time_limit_duration() {
            Ok(limit) if !limit.is_zero() => Termination::unbounded().with_time_limit(limit),
            _ => Termination::unbounded(),
        }
    }

    pub fn solver(&self) -> Result<Solver> {
        Solver::new(self.start_city, self.optimizer_config())
    }

    pub fn input_path(&self) -> Option<&Path> {
        let input = self.input.trim();
        if input.is_empty() || input == "-" {
            None
        } else {
            Some(Path::new(input))
        }
    }

    /// `None` writes to stdout. Without `--output`, a file input gets `<input>.tour`.
    pub fn output_path(&self) -> Option<PathBuf> {
        let output = self.output.trim();
        match output {
            "-" => None,
            "" => self.input_path().map(tour_output_path),
            path => Some(PathBuf::from(path)),
        }
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        let log_output = self.log_output.trim();
        if log_output.is_empty() || log_output == "-" {
            None
        } else {
            Some(Path::new(log_output))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use log::LevelFilter;

    use super::{LogFormat, LogLevel, SolverOptions};
    use crate::{EvaluationMode, OptimizerConfig};

    #[test]
    fn defaults_match_optimizer_defaults() {
        let options = SolverOptions::default();
        assert_eq!(options.optimizer_config(), OptimizerConfig::default());
        assert_eq!(options.start_city, 0);
        assert_eq!(options.time_limit, 0.0);
        assert!(options.log_timestamp);
    }

    #[test]
    fn log_level_maps_to_expected_filter() {
        assert_eq!(LogLevel::Error.to_filter(), LevelFilter::Error);
        assert_eq!(LogLevel::Warn.to_filter(), LevelFilter::Warn);
        assert_eq!(LogLevel::Info.to_filter(), LevelFilter::Info);
        assert_eq!(LogLevel::Debug.to_filter(), LevelFilter::Debug);
        assert_eq!(LogLevel::Trace.to_filter(), LevelFilter::Trace);
        assert_eq!(LogLevel::Off.to_filter(), LevelFilter::Off);
    }

    #[test]
    fn display_lists_every_option_aligned() {
        let rendered = SolverOptions::default().to_string();
        let lines: Vec<&str> = rendered.lines().skip(1).collect();

        assert_eq!(lines.len(), 14);
        assert!(lines.contains(&"\tlog_level             = warn"));
        assert!(lines.contains(&"\tlarge_input_threshold = 5000"));
        assert!(lines.contains(&"\tevaluation            = delta"));
        assert!(lines.contains(&"\tsmall_patience        = 10"));
    }

    #[test]
    fn log_level_accepts_warning_alias() {
        assert_eq!(LogLevel::parse("WARNING").expect("parse"), LogLevel::Warn);
    }

    #[test]
    fn parse_from_iter_applies_known_cli_options() {
        let options = SolverOptions::parse_from_iter([
            "--input=cities.txt",
            "--output",
            "route.txt",
            "--start-city=3",
            "--large-input-threshold=100",
            "--large-stride=5",
            "--large-patience=4",
            "--small-stride=2",
            "--small-patience=6",
            "--evaluation=full",
            "--time-limit=2.5",
            "--log-level=debug",
            "--log-format=pretty",
            "--log-timestamp=false",
            "--log-output=run.log",
        ])
        .expect("parse options");

        assert_eq!(options.input, "cities.txt");
        assert_eq!(options.output, "route.txt");
        assert_eq!(options.start_city, 3);
        assert_eq!(options.large_input_threshold, 100);
        assert_eq!(options.large_stride, 5);
        assert_eq!(options.large_patience, 4);
        assert_eq!(options.small_stride, 2);
        assert_eq!(options.small_patience, 6);
        assert_eq!(options.evaluation, EvaluationMode::Full);
        assert_eq!(options.time_limit, 2.5);
        assert_eq!(options.log_level, LogLevel::Debug);
        assert_eq!(options.log_format, LogFormat::Pretty);
        assert!(!options.log_timestamp);
        assert_eq!(options.log_output, "run.log");
    }

    #[test]
    fn positional_argument_sets_input() {
        let options = SolverOptions::parse_from_iter(["--log-level", "info", "cities.txt"])
            .expect("parse options");
        assert_eq!(options.input_path(), Some(Path::new("cities.txt")));
    }

    #[test]
    fn flags_do_not_swallow_the_positional_input() {
        let options = SolverOptions::parse_from_iter(["--no-log-timestamp", "cities.txt"])
            .expect("parse options");
        assert!(!options.log_timestamp);
        assert_eq!(options.input, "cities.txt");

        let options = SolverOptions::parse_from_iter(["--log-timestamp", "cities.txt"])
            .expect("parse options");
        assert!(options.log_timestamp);
        assert_eq!(options.input, "cities.txt");
    }

    #[test]
    fn second_positional_argument_is_rejected() {
        let err = SolverOptions::parse_from_iter(["a.txt", "b.txt"])
            .expect_err("expected positional error");
        assert!(err.to_string().contains("Unexpected argument: b.txt"));
    }

    #[test]
    fn parse_from_iter_rejects_no_log_timestamp_with_value() {
        let err = SolverOptions::parse_from_iter(["--no-log-timestamp=true"])
            .expect_err("expected flag value rejection");
        assert!(err.to_string().contains("does not take a value"));
    }

    #[test]
    fn parse_from_iter_rejects_invalid_boolean() {
        let err = SolverOptions::parse_from_iter(["--log-timestamp=maybe"])
            .expect_err("invalid bool should fail");
        assert!(err.to_string().contains("Invalid boolean for --log-timestamp: maybe"));
    }

    #[test]
    fn parse_from_iter_rejects_unknown_option() {
        let err = SolverOptions::parse_from_iter(["--two-and-a-half-opt=1"])
            .expect_err("expected unknown option error");
        assert!(err.to_string().contains("Unknown option: --two-and-a-half-opt"));
    }

    #[test]
    fn parse_from_iter_requires_value_for_start_city() {
        let err = SolverOptions::parse_from_iter(["--start-city"])
            .expect_err("missing value should fail");
        assert!(err.to_string().contains("Missing value for --start-city"));
    }

    #[test]
    fn parse_from_iter_rejects_non_numeric_stride() {
        let err = SolverOptions::parse_from_iter(["--small-stride=fast"])
            .expect_err("non-numeric stride should fail");
        assert!(err.to_string().contains("Invalid value for --small-stride: fast"));
    }

    #[test]
    fn parse_from_iter_rejects_zero_stride() {
        let err = SolverOptions::parse_from_iter(["--large-stride=0"])
            .expect_err("zero stride should fail");
        assert!(err.to_string().contains("--large-stride must be >= 1"));
    }

    #[test]
    fn parse_from_iter_rejects_negative_time_limit() {
        let err = SolverOptions::parse_from_iter(["--time-limit=-1"])
            .expect_err("negative time limit should fail");
        assert!(err.to_string().contains("--time-limit must be a non-negative"));
    }

    #[test]
    fn parse_from_iter_rejects_time_limit_beyond_duration_range() {
        let err = SolverOptions::parse_from_iter(["--time-limit=1e30"])
            .expect_err("oversized time limit should fail");
        assert!(err.to_string().contains("--time-limit must be a non-negative"));

        let err = SolverOptions::parse_from_iter(["--time-limit=NaN"])
            .expect_err("NaN time limit should fail");
        assert!(err.to_string().contains("got NaN"));
    }

    #[test]
    fn huge_time_limit_builds_a_guard_without_deadline() {
        let options =
            SolverOptions::parse_from_iter(["--time-limit=1e19"]).expect("parse options");
        assert_eq!(options.termination().check(), None);

        let options = SolverOptions {
            time_limit: 1e30,
            ..SolverOptions::default()
        };
        assert_eq!(options.termination().check(), None);
    }

    #[test]
    fn parse_from_iter_help_returns_usage_error() {
        let err =
            SolverOptions::parse_from_iter(["--help"]).expect_err("help should short-circuit");
        assert!(err.to_string().contains("Usage:"));
    }

    #[test]
    fn output_path_derives_tour_file_from_input() {
        let options = SolverOptions {
            input: "data/cities.txt".to_string(),
            ..SolverOptions::default()
        };
        assert_eq!(
            options.output_path(),
            Some(PathBuf::from("data/cities.txt.tour"))
        );
        assert_eq!(options.input, "data/cities.txt");
    }

    #[test]
    fn output_path_is_stdout_for_stdin_or_dash() {
        assert!(SolverOptions::default().output_path().is_none());

        let options = SolverOptions {
            input: "cities.txt".to_string(),
            output: "-".to_string(),
            ..SolverOptions::default()
        };
        assert!(options.output_path().is_none());
    }

    #[test]
    fn explicit_output_path_wins() {
        let options = SolverOptions {
            input: "cities.txt".to_string(),
            output: "out/route.txt".to_string(),
            ..SolverOptions::default()
        };
        assert_eq!(options.output_path(), Some(PathBuf::from("out/route.txt")));
    }

    #[test]
    fn log_output_path_treats_empty_and_dash_as_stderr() {
        assert!(SolverOptions::default().log_output_path().is_none());

        let options = SolverOptions {
            log_output: "-".to_string(),
            ..SolverOptions::default()
        };
        assert!(options.log_output_path().is_none());
    }
}
