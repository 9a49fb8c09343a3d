pub mod formatter;

pub use formatter::{
    format_general_json, format_general_result, format_history_json, format_history_table,
    format_info, format_qrisk_json, format_qrisk_result, format_score, format_what_if,
    should_use_colors,
};
