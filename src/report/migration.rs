use crate::config::MigrationConfig;
use crate::models::{Ecosystem, RepoReport};

/// Render registry migration commands, one line per repository.
///
/// Repositories without a manifest are left out. Results whose search step
/// failed are emitted commented out so a human decides whether to apply them.
pub fn render(reports: &[RepoReport], config: &MigrationConfig) -> String {
    let mut out = String::new();

    for report in reports {
        let title = match report.ecosystem {
            Ecosystem::Aztec => &config.derived_ecosystem,
            Ecosystem::Noir => &config.base_ecosystem,
            Ecosystem::None => {
                if let Some(failure) = &report.classification.api_failure {
                    out.push_str(&format!(
                        "-- review ({}): no manifest found for {}\n",
                        failure.reason, report.url
                    ));
                }
                continue;
            }
        };

        let mut command = format!("repadd \"{}\" {}", title, report.url);
        if report.ecosystem == Ecosystem::Aztec && report.classification.is_contract() {
            command.push_str(" #contract");
        }

        match &report.classification.api_failure {
            Some(failure) => {
                out.push_str(&format!("-- review ({}): {}\n", failure.reason, command));
            }
            None => {
                out.push_str(&command);
                out.push('\n');
            }
        }
    }

    out
}
