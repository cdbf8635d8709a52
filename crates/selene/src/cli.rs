use clap::Parser;

/// Lua game host.
///
/// Runs `main.lua` from PATH (or the working directory, or the executable's
/// directory) in a window, or executes a single script with `--interpret`.
#[derive(Parser, Debug)]
#[command(name = "selene", disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Print the version and exit
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Print this help and exit
    #[arg(short = 'h', long)]
    pub help: bool,

    /// Run FILE without a window
    #[arg(short = 'i', long, value_name = "FILE")]
    pub interpret: Option<String>,

    /// Verbose logging
    #[arg(long)]
    pub log: bool,

    /// Skip the splash screen
    #[arg(long = "no-logo")]
    pub no_logo: bool,

    /// Game directory holding main.lua
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Forwarded to the script as `arg`
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub script_args: Vec<String>,
}

impl Cli {
    /// The script's `arg` list: `program` first, then the forwarded words.
    ///
    /// Interpret mode has no game directory, so a word parsed as PATH
    /// belongs to the script.
    pub fn script_args(&self, program: String) -> Vec<String> {
        let mut args = vec![program];
        if self.interpret.is_some() {
            args.extend(self.path.iter().cloned());
        }
        args.extend(self.script_args.iter().cloned());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_and_trailing_args() {
        let cli = Cli::try_parse_from(["selene", "--log", "--no-logo", "games/pong", "--level", "3"]).unwrap();
        assert!(cli.log && cli.no_logo);
        assert_eq!(cli.path.as_deref(), Some("games/pong"));
        assert_eq!(cli.script_args, ["--level", "3"]);
    }

    #[test]
    fn short_flags() {
        let cli = Cli::try_parse_from(["selene", "-i", "tool.lua"]).unwrap();
        assert_eq!(cli.interpret.as_deref(), Some("tool.lua"));
        assert!(Cli::try_parse_from(["selene", "-v"]).unwrap().version);
        assert!(Cli::try_parse_from(["selene", "-h"]).unwrap().help);
    }

    #[test]
    fn no_arguments_is_valid() {
        let cli = Cli::try_parse_from(["selene"]).unwrap();
        assert!(cli.path.is_none() && cli.script_args.is_empty());
    }

    #[test]
    fn interpret_mode_forwards_every_trailing_word() {
        let cli = Cli::try_parse_from(["selene", "-i", "tool.lua", "extra", "--fast"]).unwrap();
        assert_eq!(cli.script_args("selene".to_string()), ["selene", "extra", "--fast"]);
    }

    #[test]
    fn game_directory_is_not_a_script_arg() {
        let cli = Cli::try_parse_from(["selene", "games/pong", "--level", "3"]).unwrap();
        assert_eq!(cli.script_args("selene".to_string()), ["selene", "--level", "3"]);
    }
}
