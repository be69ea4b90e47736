use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{Ecosystem, RepoReport};

/// Render a colored terminal report.
pub fn render(reports: &[RepoReport], verbose: bool, quiet: bool) -> Result<()> {
    let total = reports.len();
    let aztec_count = count(reports, Ecosystem::Aztec);
    let noir_count = count(reports, Ecosystem::Noir);
    let none_count = count(reports, Ecosystem::None);
    let review_count = reports
        .iter()
        .filter(|r| r.classification.needs_review())
        .count();

    if quiet {
        println!(
            "Total: {}  Aztec: {}  Noir: {}  None: {}  Review: {}",
            total,
            aztec_count.to_string().magenta(),
            noir_count.to_string().cyan(),
            none_count,
            review_count.to_string().yellow(),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}\n",
        "noir-census".bold(),
        env!("CARGO_PKG_VERSION")
    );

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Repositories       : {}", total));
    println!(
        " │  {:<48} │",
        format!("{}  Aztec           : {:>4}", "◆".magenta(), aztec_count)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Noir            : {:>4}", "●".cyan(), noir_count)
    );
    println!(
        " │  {:<48} │",
        format!("{}  No manifest     : {:>4}", "○".dimmed(), none_count)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Needs review    : {:>4}", "⚠".yellow(), review_count)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if review_count > 0 {
        println!(
            " {} Classified while the search API was degraded:\n",
            "[REVIEW]".yellow().bold()
        );
        render_table(reports.iter().filter(|r| r.classification.needs_review()));
        println!();
    }

    if aztec_count > 0 {
        println!(" {} Aztec repositories:\n", "[AZTEC]".magenta().bold());
        render_table(reports.iter().filter(|r| r.ecosystem == Ecosystem::Aztec));
        println!();
    }

    if verbose && noir_count + none_count > 0 {
        println!(" {} Other repositories:\n", "[NOIR]".cyan().bold());
        render_table(reports.iter().filter(|r| r.ecosystem != Ecosystem::Aztec));
        println!();
    }

    Ok(())
}

fn count(reports: &[RepoReport], ecosystem: Ecosystem) -> usize {
    reports.iter().filter(|r| r.ecosystem == ecosystem).count()
}

fn render_table<'a>(reports: impl Iterator<Item = &'a RepoReport>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Repository").add_attribute(Attribute::Bold),
            Cell::new("Ecosystem").add_attribute(Attribute::Bold),
            Cell::new("Type").add_attribute(Attribute::Bold),
            Cell::new("Manifests").add_attribute(Attribute::Bold),
            Cell::new("Indicators").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    for report in reports {
        let c = &report.classification;

        let ecosystem_color = match report.ecosystem {
            Ecosystem::Aztec => Color::Magenta,
            Ecosystem::Noir => Color::Cyan,
            Ecosystem::None => Color::DarkGrey,
        };

        let (status, status_color) = match &c.api_failure {
            Some(f) if f.all_fallback_fetches_failed => {
                (format!("⚠ {} (nothing found)", f.reason), Color::Red)
            }
            Some(f) => (format!("⚠ {}", f.reason), Color::Yellow),
            None => ("✓ ok".to_string(), Color::Green),
        };

        table.add_row(vec![
            Cell::new(&report.repository),
            Cell::new(report.ecosystem.to_string()).fg(ecosystem_color),
            Cell::new(&c.primary_declared_type),
            Cell::new(c.manifests_examined).set_alignment(CellAlignment::Right),
            Cell::new(c.aztec_indicators.join("\n")),
            Cell::new(status).fg(status_color),
        ]);
    }

    println!("{}", table);
}
