use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

// CLI argument structures, one per binary

/// Run Zeek over a capture file and sort its logs into category directories
#[derive(Parser, Debug, Clone)]
#[command(name = "zeek-sorter", author, version, about, long_about = None)]
pub struct RunnerArgs {
    /// Capture file to analyze (`-pcap FILE` is accepted too)
    #[arg(short = 'p', long = "pcap", value_name = "FILE", required_unless_present = "init_config")]
    pub pcap: Option<PathBuf>,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log root directory, overriding the configuration
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Analysis engine binary, overriding the configuration
    #[arg(short, long, value_name = "BINARY")]
    pub engine: Option<String>,

    /// More diagnostic output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write the default configuration file and exit
    #[arg(long)]
    pub init_config: bool,
}

/// Decode a capture file into a comma-separated connection log
#[derive(Parser, Debug, Clone)]
#[command(name = "zeek-decode", author, version, about, long_about = None)]
pub struct DecodeArgs {
    /// Capture file to decode
    #[arg(short, long, value_name = "FILE")]
    pub file: PathBuf,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output directory, overriding the configuration
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// More diagnostic output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl RunnerArgs {
    /// Parse the process arguments, accepting the single-dash `-pcap` spelling
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_pcap_flag(std::env::args_os()))
    }

    // Fold command-line overrides into the loaded configuration
    pub fn apply_overrides(&self, config: &mut crate::config::AppConfig) {
        if let Some(ref dir) = self.output_dir {
            config.update_output_root(dir.clone());
        }
        if let Some(ref engine) = self.engine {
            config.update_engine_binary(engine.clone());
        }
    }
}

/// Rewrite `-pcap` and `-pcap=FILE` to their double-dash form.
///
/// Clap reads `-pcap` as `-p` with the value `cap`, so the long spelling
/// with one dash has to be fixed up before parsing. Anything after `--` is
/// left alone.
pub fn normalize_pcap_flag<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut options_ended = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if options_ended {
                return arg;
            }
            match arg.to_str() {
                Some("--") => {
                    options_ended = true;
                    arg
                }
                Some("-pcap") => OsString::from("--pcap"),
                Some(s) if s.starts_with("-pcap=") => OsString::from(format!("-{}", s)),
                _ => arg,
            }
        })
        .collect()
}

impl DecodeArgs {
    pub fn apply_overrides(&self, config: &mut crate::config::AppConfig) {
        if let Some(ref dir) = self.output_dir {
            config.update_output_root(dir.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use clap::CommandFactory;

    #[test]
    fn test_arg_definitions() {
        RunnerArgs::command().debug_assert();
        DecodeArgs::command().debug_assert();
    }

    #[test]
    fn test_runner_requires_capture() {
        assert!(RunnerArgs::try_parse_from(["zeek-sorter"]).is_err());

        let args = RunnerArgs::try_parse_from(["zeek-sorter", "-p", "trace.pcap"]).unwrap();
        assert_eq!(args.pcap, Some(PathBuf::from("trace.pcap")));

        let args = RunnerArgs::try_parse_from(["zeek-sorter", "--init-config"]).unwrap();
        assert!(args.init_config);
        assert!(args.pcap.is_none());
    }

    #[test]
    fn test_single_dash_pcap_flag() {
        let args = RunnerArgs::try_parse_from(normalize_pcap_flag(["zeek-sorter", "-pcap", "trace.pcap"])).unwrap();
        assert_eq!(args.pcap, Some(PathBuf::from("trace.pcap")));

        let args = RunnerArgs::try_parse_from(normalize_pcap_flag(["zeek-sorter", "-pcap=/data/t.pcap", "-v"])).unwrap();
        assert_eq!(args.pcap, Some(PathBuf::from("/data/t.pcap")));
        assert_eq!(args.verbose, 1);

        // The short form and the double-dash form are untouched
        assert_eq!(
            normalize_pcap_flag(["zeek-sorter", "-p", "a.pcap", "--pcap", "b.pcap"]),
            vec![
                OsString::from("zeek-sorter"),
                OsString::from("-p"),
                OsString::from("a.pcap"),
                OsString::from("--pcap"),
                OsString::from("b.pcap"),
            ]
        );
        assert_eq!(
            normalize_pcap_flag(["zeek-sorter", "--", "-pcap"])[2],
            OsString::from("-pcap")
        );
    }

    #[test]
    fn test_runner_overrides() {
        let args = RunnerArgs::try_parse_from([
            "zeek-sorter",
            "--pcap",
            "trace.pcap",
            "--output-dir",
            "/tmp/out",
            "--engine",
            "/opt/zeek/bin/zeek",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);

        let mut config = AppConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.output.root, PathBuf::from("/tmp/out"));
        assert_eq!(config.engine.binary, "/opt/zeek/bin/zeek");
    }

    #[test]
    fn test_decoder_requires_file() {
        assert!(DecodeArgs::try_parse_from(["zeek-decode"]).is_err());

        let args = DecodeArgs::try_parse_from(["zeek-decode", "-f", "trace.pcap", "-o", "out"]).unwrap();
        assert_eq!(args.file, PathBuf::from("trace.pcap"));

        let mut config = AppConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.connection_log_path(), PathBuf::from("out/conn.log"));
    }
}
