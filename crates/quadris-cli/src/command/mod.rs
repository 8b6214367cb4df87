use clap::{Parser, Subcommand};

use self::play::PlayArg;

mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_play() {
        let args = CommandArgs::try_parse_from(["quadris"]).unwrap();
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_play_flags() {
        let args = CommandArgs::try_parse_from([
            "quadris",
            "play",
            "--seed",
            "000102030405060708090a0b0c0d0e0f",
            "--gravity-ms",
            "500",
            "--fps",
            "30",
        ])
        .unwrap();
        assert!(matches!(args.mode, Some(Mode::Play(_))));
    }

    #[test]
    fn test_rejects_bad_seed() {
        assert!(CommandArgs::try_parse_from(["quadris", "play", "--seed", "xyz"]).is_err());
        assert!(CommandArgs::try_parse_from(["quadris", "play", "--fps", "0"]).is_err());
    }
}
