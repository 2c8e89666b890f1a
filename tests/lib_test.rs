//! Library integration tests.

use devops_agent::DevopsAgentError;

#[test]
fn error_types_are_public() {
    let err = DevopsAgentError::UnknownEnvironment {
        name: "staging".into(),
        supported: "dev, prod".into(),
    };
    assert!(err.to_string().contains("staging"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> devops_agent::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use devops_agent::cli::{Cli, Commands};

    let cli = Cli::parse_from(["devops-agent", "config", "--json"]);

    if let Some(Commands::Config(args)) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Config command");
    }
}

#[test]
fn ui_types_are_public() {
    use devops_agent::ui::{MockUI, OutputMode, UserInterface};

    let mut ui = MockUI::with_mode(OutputMode::Quiet);
    ui.success("done");
    assert_eq!(ui.output_mode(), OutputMode::Quiet);
    assert!(ui.has_success("done"));
}

#[test]
fn commands_run_against_mock_ui() {
    use devops_agent::cli::commands::synth::SynthCommand;
    use devops_agent::cli::{Command, SynthArgs};
    use devops_agent::config::DeploymentEnv;
    use devops_agent::ui::MockUI;

    let temp = tempfile::TempDir::new().unwrap();
    let args = SynthArgs {
        dry_run: true,
        ..Default::default()
    };
    let cmd = SynthCommand::new(temp.path(), args, &DeploymentEnv::default());
    let mut ui = MockUI::new();

    let result = cmd.execute(&mut ui).unwrap();

    assert!(result.success);
    assert_eq!(ui.field("Stack"), Some("DevopsAgentStack-dev"));
}
