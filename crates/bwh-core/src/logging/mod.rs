use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log filter directives for the CLI and core crates.
fn directives(quiet: bool) -> [&'static str; 2] {
    if quiet {
        ["bwh=error", "bwh_core=error"]
    } else {
        ["bwh=info", "bwh_core=info"]
    }
}

/// Initialize logging with optional quiet mode.
///
/// When `quiet` is true, only error-level events are emitted.
/// When `quiet` is false, info-level and above events are emitted.
pub fn init_logging(quiet: bool) {
    let mut filter = EnvFilter::from_default_env();
    for directive in directives(quiet) {
        match directive.parse() {
            Ok(parsed) => filter = filter.add_directive(parsed),
            Err(e) => eprintln!("Ignoring invalid log directive '{}': {}", directive, e),
        }
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::Directive;

    #[test]
    fn test_directives_parse() {
        for quiet in [true, false] {
            for directive in directives(quiet) {
                assert!(directive.parse::<Directive>().is_ok(), "{}", directive);
            }
        }
    }

    #[test]
    fn test_quiet_directives_are_error_only() {
        assert!(directives(true).iter().all(|d| d.ends_with("=error")));
        assert!(directives(false).iter().all(|d| d.ends_with("=info")));
    }
}
