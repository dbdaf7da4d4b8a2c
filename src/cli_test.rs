use clap::error::ErrorKind;
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn short_v_is_verbose() {
    let cli = Cli::try_parse_from(["todocheck", "-v", "--basepath", "src"]).unwrap();
    assert!(cli.verbose);
    assert_eq!(cli.basepath, PathBuf::from("src"));
    assert_eq!(cli.format, Format::Standard);
    assert!(cli.command.is_none());
}

#[test]
fn version_has_its_own_flags() {
    for flag in ["--version", "-V"] {
        let err = Cli::try_parse_from(["todocheck", flag]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }
}

#[test]
fn completions_subcommand() {
    let cli = Cli::try_parse_from(["todocheck", "completions", "zsh"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Completions { shell: Shell::Zsh })));
}
