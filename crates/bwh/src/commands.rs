use std::path::Path;

use clap::ArgMatches;
use tracing::{error, info};

use bwh_core::deployments::DeploymentHistory;
use bwh_core::events;
use bwh_core::profiles::{validate_overlay, validate_profile};
use bwh_core::{
    BwhError, DeploymentRecord, DeploymentTracker, ProfileStore, StoreConfig, ValidationResult,
};

/// Resolve the base directory and make sure it is usable.
fn load_store_config() -> Result<StoreConfig, Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env();
    config.validate()?;
    Ok(config)
}

/// Print a user-facing failure and log it with its error code.
fn report_failure<E: BwhError>(context: &str, e: &E) {
    eprintln!("❌ {}: {}", context, e);
    error!(
        event = "cli.command_failed",
        context = context,
        error_code = e.error_code(),
        user_error = e.is_user_error(),
        error = %e
    );
    events::log_app_error(e);
}

fn required_arg<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a String, String> {
    matches
        .get_one::<String>(name)
        .ok_or_else(|| format!("'{}' argument is required", name))
}

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        Some(("list", sub_matches)) => handle_list_command(sub_matches),
        Some(("show", sub_matches)) => handle_show_command(sub_matches),
        Some(("validate", sub_matches)) => handle_validate_command(sub_matches),
        Some(("delete", sub_matches)) => handle_delete_command(sub_matches),
        Some(("record", sub_matches)) => handle_record_command(sub_matches),
        Some(("history", sub_matches)) => handle_history_command(sub_matches),
        Some(("active", sub_matches)) => handle_active_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}

fn handle_list_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let store = ProfileStore::from_config(&load_store_config()?);

    info!(event = "cli.list_started", json_output = json_output);

    match store.list_profiles() {
        Ok(profiles) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&profiles)?);
            } else if profiles.is_empty() {
                println!(
                    "No profiles found in {}. Run the setup wizard to create one.",
                    store.base_dir().display()
                );
            } else {
                println!("Profiles:");
                for profile in &profiles {
                    println!("  {}", profile);
                }
            }

            info!(event = "cli.list_completed", count = profiles.len());
            Ok(())
        }
        Err(e) => {
            report_failure("Failed to list profiles", &e);
            Err(e.into())
        }
    }
}

fn handle_show_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let profile = required_arg(matches, "profile")?;
    let base = matches.get_one::<String>("base").map(String::as_str);
    let resolved = matches.get_flag("resolved") || base.is_some();
    let store = ProfileStore::from_config(&load_store_config()?);

    info!(
        event = "cli.show_started",
        profile = %profile,
        resolved = resolved
    );

    let result = if resolved {
        store.read_profile_with_inheritance(profile, base)
    } else {
        store.read_profile(profile)
    };

    match result {
        Ok(config) => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            info!(event = "cli.show_completed", profile = %profile);
            Ok(())
        }
        Err(e) => {
            report_failure(&format!("Failed to read profile '{}'", profile), &e);
            Err(e.into())
        }
    }
}

fn print_validation(path: &Path, result: &ValidationResult) {
    if result.is_valid {
        println!("✅ {} is valid", path.display());
    } else {
        println!(
            "❌ {} has {} problem(s):",
            path.display(),
            result.errors.len()
        );
        for problem in &result.errors {
            println!("   - {}", problem);
        }
    }
}

fn handle_validate_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let file = Path::new(required_arg(matches, "file")?);
    let overlay = matches.get_flag("overlay");
    let json_output = matches.get_flag("json");

    info!(
        event = "cli.validate_started",
        file = %file.display(),
        overlay = overlay
    );

    let content = std::fs::read_to_string(file).map_err(|e| {
        eprintln!("❌ Failed to read '{}': {}", file.display(), e);
        e
    })?;
    let document: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
        eprintln!("❌ '{}' is not valid JSON: {}", file.display(), e);
        e
    })?;

    let result = if overlay {
        validate_overlay(&document)
    } else {
        validate_profile(&document)
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_validation(file, &result);
    }

    info!(
        event = "cli.validate_completed",
        file = %file.display(),
        is_valid = result.is_valid,
        error_count = result.errors.len()
    );

    if result.is_valid {
        Ok(())
    } else {
        Err(format!("{} validation error(s)", result.errors.len()).into())
    }
}

fn handle_delete_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let profile = required_arg(matches, "profile")?;
    let store = ProfileStore::from_config(&load_store_config()?);

    info!(event = "cli.delete_started", profile = %profile);

    match store.delete_profile(profile) {
        Ok(()) => {
            println!("✅ Profile '{}' deleted.", profile);
            info!(event = "cli.delete_completed", profile = %profile);
            Ok(())
        }
        Err(e) => {
            report_failure(&format!("Failed to delete profile '{}'", profile), &e);
            Err(e.into())
        }
    }
}

fn handle_record_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let profile = required_arg(matches, "profile")?;
    let mut record = DeploymentRecord::new(
        required_arg(matches, "stage")?,
        required_arg(matches, "image-tag")?,
        required_arg(matches, "endpoint")?,
        required_arg(matches, "stack-name")?,
        required_arg(matches, "region")?,
    );
    if let Some(deployed_by) = matches.get_one::<String>("deployed-by") {
        record = record.with_deployed_by(deployed_by);
    }
    if let Some(commit) = matches.get_one::<String>("commit") {
        record = record.with_commit(commit);
    }

    let tracker = DeploymentTracker::from_config(&load_store_config()?);
    let stage = record.stage.clone();
    let image_tag = record.image_tag.clone();

    info!(
        event = "cli.record_started",
        profile = %profile,
        stage = %stage
    );

    match tracker.record_deployment(profile, record) {
        Ok(()) => {
            println!(
                "✅ Recorded deployment of '{}' to stage '{}' for profile '{}'.",
                image_tag, stage, profile
            );
            info!(event = "cli.record_completed", profile = %profile, stage = %stage);
            Ok(())
        }
        Err(e) => {
            report_failure(
                &format!("Failed to record deployment for profile '{}'", profile),
                &e,
            );
            Err(e.into())
        }
    }
}

fn format_record_line(record: &DeploymentRecord) -> String {
    let mut line = format!(
        "{:<10} {:<16} {:<26} {}",
        record.stage, record.image_tag, record.timestamp, record.endpoint
    );
    if let Some(deployed_by) = &record.deployed_by {
        line.push_str(&format!(" (by {})", deployed_by));
    }
    line
}

fn print_history(profile: &str, deployments: &DeploymentHistory) {
    if deployments.is_empty() {
        println!("No deployments recorded for profile '{}'.", profile);
        return;
    }

    println!("Active deployments:");
    for record in deployments.active.values() {
        println!("  {}", format_record_line(record));
    }
    println!();
    println!("History (newest first):");
    for record in &deployments.history {
        println!("  {}", format_record_line(record));
    }
}

fn handle_history_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let profile = required_arg(matches, "profile")?;
    let json_output = matches.get_flag("json");
    let tracker = DeploymentTracker::from_config(&load_store_config()?);

    match tracker.get_deployments(profile) {
        Ok(deployments) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&deployments)?);
            } else {
                print_history(profile, &deployments);
            }
            info!(
                event = "cli.history_completed",
                profile = %profile,
                count = deployments.history.len()
            );
            Ok(())
        }
        Err(e) => {
            report_failure(
                &format!("Failed to read deployments for profile '{}'", profile),
                &e,
            );
            Err(e.into())
        }
    }
}

fn handle_active_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let profile = required_arg(matches, "profile")?;
    let stage = required_arg(matches, "stage")?;
    let json_output = matches.get_flag("json");
    let tracker = DeploymentTracker::from_config(&load_store_config()?);

    match tracker.get_active_deployment(profile, stage) {
        Ok(active) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&active)?);
            } else if let Some(record) = &active {
                println!("{}", format_record_line(record));
            } else {
                println!(
                    "No active deployment for stage '{}' in profile '{}'.",
                    stage, profile
                );
            }
            info!(
                event = "cli.active_completed",
                profile = %profile,
                stage = %stage,
                found = active.is_some()
            );
            Ok(())
        }
        Err(e) => {
            report_failure(
                &format!("Failed to read deployments for profile '{}'", profile),
                &e,
            );
            Err(e.into())
        }
    }
}
