use std::io::IsTerminal;
use owo_colors::OwoColorize;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use terminal_size::{Width, terminal_size};

use crate::cost::{CategoryTotal, CostError, CostTotals};
use crate::estimate::{EstimatePhases, SimulatorEstimate};
use crate::project::{Project, ProjectClass};
use crate::report::FeasibilityReport;
use crate::scoring::{score, SampleRegistry, ScoreVector};

/// Width of the score bar drawn for each dimension
const BAR_WIDTH: usize = 20;

/// A project with its score for list display
pub struct ScoredProject<'a> {
    pub project: &'a Project,
    pub class: ProjectClass,
    pub scores: ScoreVector,
}

impl<'a> ScoredProject<'a> {
    /// Classify once and score under that class
    pub fn new(project: &'a Project, registry: &SampleRegistry) -> Self {
        let class = registry.classify(&project.name);
        Self {
            project,
            class,
            scores: score(project.id, class, Some(&project.stored_scores)),
        }
    }
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Insert thousands separators into a run of ASCII digits
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Format a currency amount in whole dollars: "$1,234,567"
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let digits = rounded.abs().trunc().to_string();
    format!("{}${}", sign, group_thousands(&digits))
}

/// Format a currency amount with cents: "$245.50"
pub fn format_currency_cents(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let abs = rounded.abs();
    let whole = abs.trunc();
    let cents = ((abs - whole) * Decimal::ONE_HUNDRED).to_u32().unwrap_or(0);
    format!("{}${}.{:02}", sign, group_thousands(&whole.to_string()), cents)
}

/// Format a per-square-foot or per-unit rate, "n/a" when withheld
pub fn format_rate(rate: Result<Decimal, CostError>) -> String {
    match rate {
        Ok(value) => format_currency_cents(value),
        Err(_) => "n/a".to_string(),
    }
}

/// Bar of `BAR_WIDTH` cells filled in proportion to a 0-5 score
fn score_bar(score: f64) -> String {
    let filled = ((score / 5.0) * BAR_WIDTH as f64).round().clamp(0.0, BAR_WIDTH as f64) as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// Format the six-dimension score card with the weighted overall
pub fn format_score_card(scores: &ScoreVector, class: ProjectClass, use_colors: bool) -> String {
    let mut lines = Vec::new();

    for contribution in scores.contributions() {
        let label = format!("{:<15}", contribution.dimension.label());
        let value = format!("{:.1}", contribution.score);
        let weight = format!("{:>3.0}%", contribution.weight * 100.0);
        let bar = score_bar(contribution.score);

        if use_colors {
            lines.push(format!("  {} {} {}  {}", label, value.bold(), bar.green(), weight.dimmed()));
        } else {
            lines.push(format!("  {} {} {}  {}", label, value, bar, weight));
        }
    }

    let overall = format!("{:.1}", scores.overall);
    let class_note = match class {
        ProjectClass::Sample => "curated sample scores",
        ProjectClass::Generated => "generated scores",
    };
    if use_colors {
        lines.push(format!("  {:<15} {}  ({})", "Overall", overall.bold().cyan(), class_note.dimmed()));
    } else {
        lines.push(format!("  {:<15} {}  ({})", "Overall", overall, class_note));
    }

    lines.join("\n")
}

/// Format the modular vs. site-built comparison cards
pub fn format_cost_comparison(costs: &CostTotals, use_colors: bool) -> String {
    let rows = [
        (
            "Total",
            format_currency(costs.modular_total),
            format_currency(costs.site_built_total),
        ),
        (
            "Per sq ft",
            format_rate(costs.modular_cost_per_sf()),
            format_rate(costs.site_built_cost_per_sf()),
        ),
        (
            "Per unit",
            format_rate(costs.modular_cost_per_unit()),
            format_rate(costs.site_built_cost_per_unit()),
        ),
    ];

    let mut lines = Vec::new();
    let header = format!("  {:<12}{:>16}{:>16}", "", "Modular", "Site-built");
    if use_colors {
        lines.push(header.bold().to_string());
    } else {
        lines.push(header);
    }
    for (label, modular, site_built) in rows {
        lines.push(format!("  {:<12}{:>16}{:>16}", label, modular, site_built));
    }
    lines.push(format!(
        "  {} sq ft, {} units, {} month site-built schedule ({})",
        group_thousands(&costs.gross_square_feet.to_string()),
        costs.total_units,
        costs.site_built_timeline_months,
        costs.source.label()
    ));

    lines.join("\n")
}

/// Format the breakdown table. The totals row comes from the aggregated
/// totals, not from re-adding the category rows.
pub fn format_breakdown_table(categories: &[CategoryTotal], costs: &CostTotals, use_colors: bool) -> String {
    if categories.is_empty() {
        return "  No cost breakdown rows.".to_string();
    }

    let amount_width = 16;
    let fixed_width = 2 + amount_width * 2;
    let category_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => (width - fixed_width).min(40),
        Some(_) => 20,
        None => categories
            .iter()
            .map(|c| c.category.chars().count())
            .max()
            .unwrap_or(0)
            .max(8),
    };

    let mut lines = Vec::new();
    let header = format!(
        "  {:<cw$}{:>aw$}{:>aw$}",
        "Category",
        "Modular",
        "Site-built",
        cw = category_width,
        aw = amount_width
    );
    if use_colors {
        lines.push(header.bold().to_string());
    } else {
        lines.push(header);
    }

    for category in categories {
        lines.push(format!(
            "  {:<cw$}{:>aw$}{:>aw$}",
            truncate_text(&category.category, category_width),
            format_currency(category.modular),
            format_currency(category.site_built),
            cw = category_width,
            aw = amount_width
        ));
    }

    let totals = format!(
        "  {:<cw$}{:>aw$}{:>aw$}",
        "Total",
        format_currency(costs.modular_total),
        format_currency(costs.site_built_total),
        cw = category_width,
        aw = amount_width
    );
    if use_colors {
        lines.push(totals.bold().to_string());
    } else {
        lines.push(totals);
    }

    lines.join("\n")
}

/// Savings banner, only when modular comes in cheaper
pub fn format_savings_banner(costs: &CostTotals, use_colors: bool) -> Option<String> {
    if !costs.has_savings() {
        return None;
    }
    let banner = format!(
        "Modular saves {} ({:.1}%) versus site-built",
        format_currency(costs.savings),
        costs.cost_savings_percent
    );
    if use_colors {
        Some(banner.green().bold().to_string())
    } else {
        Some(banner)
    }
}

/// Format the simulator's phase split
pub fn format_phases(phases: &EstimatePhases) -> String {
    phases
        .rows()
        .iter()
        .map(|(label, amount)| format!("  {:<18}{:>16}", label, format_currency(*amount)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a raw simulator estimate for one project
pub fn format_estimate(project: &Project, estimate: &SimulatorEstimate, use_colors: bool) -> String {
    let title = format!("{} (#{})", project.name, project.id);
    let mut out = if use_colors {
        title.bold().to_string()
    } else {
        title
    };
    out.push_str(&format!(
        "\n  Modular: {}  Site-built: {}",
        format_currency(estimate.modular_total),
        format_currency(estimate.site_built_total)
    ));
    if let Some(ref phases) = estimate.phases {
        out.push('\n');
        out.push_str(&format_phases(phases));
    }
    out
}

/// Format a full report: score card, cost cards, breakdown table and banner
pub fn format_report(report: &FeasibilityReport, use_colors: bool) -> String {
    let mut sections = Vec::new();

    let title = format!("{} (#{})", report.project_name, report.project_id);
    sections.push(if use_colors { title.bold().to_string() } else { title });
    sections.push(format_score_card(&report.scores, report.class, use_colors));
    sections.push(format_cost_section(report, use_colors));

    sections.join("\n\n")
}

/// Cost half of a report; every surface reads the same totals
pub fn format_cost_section(report: &FeasibilityReport, use_colors: bool) -> String {
    let mut sections = vec![format_cost_comparison(&report.costs, use_colors)];

    if !report.categories.is_empty() {
        sections.push(format_breakdown_table(&report.categories, &report.costs, use_colors));
    }
    if let Some(ref phases) = report.phases {
        sections.push(format_phases(phases));
    }
    if let Some(banner) = format_savings_banner(&report.costs, use_colors) {
        sections.push(banner);
    }

    sections.join("\n\n")
}

/// Format projects as a table with columns: Index, Overall, Class, Name, Id
pub fn format_project_list(projects: &[ScoredProject], use_colors: bool) -> String {
    if projects.is_empty() {
        return "No projects found.".to_string();
    }

    let term_width = get_terminal_width();
    let class_width = 9;
    let separator = "  ";

    projects
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            let index_str = format!("{:>2}.", idx + 1);
            let overall = format!("{:>4.1}", scored.scores.overall);
            let class = format!("{:<width$}", scored.class.label(), width = class_width);
            let id_str = format!("#{}", scored.project.id);

            let fixed_width = 3 + 1 + 4 + class_width + separator.len() * 3 + id_str.len();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_text(&scored.project.name, width - fixed_width)
                }
                Some(_) => truncate_text(&scored.project.name, 20),
                None => scored.project.name.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    overall.bold(),
                    separator,
                    class.dimmed(),
                    separator,
                    name,
                    separator,
                    id_str.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str, overall, separator, class, separator, name, separator, id_str
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Tabs and line breaks would split a TSV record
fn tsv_field(text: &str) -> String {
    text.replace(['\t', '\n', '\r'], " ")
}

/// Format reports as tab-separated values for scripting
/// Columns: id, name, class, overall, modular total, site-built total, savings %
pub fn format_tsv(reports: &[FeasibilityReport]) -> String {
    reports
        .iter()
        .map(|r| {
            format!(
                "{}\t{}\t{}\t{:.1}\t{:.2}\t{:.2}\t{:.1}",
                r.project_id,
                tsv_field(&r.project_name),
                r.class.label(),
                r.scores.overall,
                r.costs.modular_total,
                r.costs.site_built_total,
                r.costs.cost_savings_percent
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
