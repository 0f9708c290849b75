pub mod formatter;

pub use formatter::{
    format_breakdown_table, format_cost_comparison, format_cost_section, format_currency,
    format_estimate, format_project_list, format_rate, format_report, format_savings_banner,
    format_score_card, format_tsv, should_use_colors, ScoredProject,
};
