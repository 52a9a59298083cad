use clap::{Arg, ArgAction, Command};

fn profile_arg(help: &'static str) -> Arg {
    Arg::new("profile").help(help).required(true).index(1)
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Output in JSON format")
        .action(ArgAction::SetTrue)
}

pub fn build_cli() -> Command {
    Command::new("bwh")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage Benchling webhook deployment profiles and deployment history")
        .long_about("bwh stores named configuration profiles (default, dev, staging, ...) for the Benchling webhook integration, resolves profile inheritance, and tracks which image is deployed to each stage. Profiles live under $BWH_CONFIG_DIR or ~/.config/benchling-webhook.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("list")
                .about("List all configured profiles")
                .arg(json_arg())
        )
        .subcommand(
            Command::new("show")
                .about("Show a profile's configuration")
                .arg(profile_arg("Profile name"))
                .arg(
                    Arg::new("resolved")
                        .long("resolved")
                        .short('r')
                        .help("Merge in inherited base profiles")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("base")
                        .long("base")
                        .short('b')
                        .help("Base profile to inherit from instead of the declared _inherits (implies --resolved)")
                )
        )
        .subcommand(
            Command::new("validate")
                .about("Validate a profile configuration file without saving it")
                .arg(
                    Arg::new("file")
                        .help("Path to a profile JSON file")
                        .required(true)
                        .index(1)
                )
                .arg(
                    Arg::new("overlay")
                        .long("overlay")
                        .help("Validate as a partial profile that declares _inherits")
                        .action(ArgAction::SetTrue)
                )
                .arg(json_arg())
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a profile and its deployment history")
                .arg(profile_arg("Profile name to delete (the default profile is protected)"))
        )
        .subcommand(
            Command::new("record")
                .about("Record a deployment for a profile")
                .arg(profile_arg("Profile the deployment belongs to"))
                .arg(
                    Arg::new("stage")
                        .long("stage")
                        .short('s')
                        .help("Deployment stage (e.g. dev, prod)")
                        .required(true)
                )
                .arg(
                    Arg::new("image-tag")
                        .long("image-tag")
                        .help("Deployed image tag")
                        .required(true)
                )
                .arg(
                    Arg::new("endpoint")
                        .long("endpoint")
                        .help("Webhook endpoint URL")
                        .required(true)
                )
                .arg(
                    Arg::new("stack-name")
                        .long("stack-name")
                        .help("CloudFormation stack name")
                        .required(true)
                )
                .arg(
                    Arg::new("region")
                        .long("region")
                        .help("AWS region of the stack")
                        .required(true)
                )
                .arg(
                    Arg::new("deployed-by")
                        .long("deployed-by")
                        .help("Operator identity")
                )
                .arg(
                    Arg::new("commit")
                        .long("commit")
                        .help("Source-control commit of the deployed build")
                )
        )
        .subcommand(
            Command::new("history")
                .about("Show deployment history for a profile, newest first")
                .arg(profile_arg("Profile name"))
                .arg(json_arg())
        )
        .subcommand(
            Command::new("active")
                .about("Show the active deployment for a stage")
                .arg(profile_arg("Profile name"))
                .arg(
                    Arg::new("stage")
                        .help("Deployment stage")
                        .required(true)
                        .index(2)
                )
                .arg(json_arg())
        )
}
