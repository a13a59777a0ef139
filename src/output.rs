//! CLI output formatting.
//!
//! Each listing has a `format_*` function (returns `Vec<String>`, no I/O) for
//! testability and a `print_*` wrapper that writes to stdout.
//!
//! # Output Format
//!
//! ## Config
//!
//! ```text
//! JunJie
//!     Description: 这是我的个人博客，记录一些学习笔记和心得体会。
//!     Favicon: /avatar.jpg
//!     Logo: /avatar.jpg
//!
//! Menu
//! 001 学习笔记 → /posts
//! 002 标签分类 → /tags
//! 003 GitHub → https://github.com (new tab)
//!
//! Footer
//!     谢谢你来 🦄
//!
//! Analytics
//!     G-XXXXXXXXXX
//! ```
//!
//! ## Comments
//!
//! ```text
//! Comments
//! 001 Jun (2024-01-05T10:00:00Z)
//!     Nice post
//!
//! Rejected
//! #2: empty field: authorName
//!
//! Accepted 1 of 2 records
//! ```

use crate::comment::BatchReport;
use crate::config::SiteConfig;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format the site config listing.
pub fn format_config(config: &SiteConfig) -> Vec<String> {
    let mut lines = vec![config.title.clone()];
    if !config.description.is_empty() {
        lines.push(format!("{}Description: {}", indent(1), config.description));
    }
    lines.push(format!("{}Favicon: {}", indent(1), config.favicon_path));
    lines.push(format!("{}Logo: {}", indent(1), config.logo_path));

    lines.push(String::new());
    lines.push("Menu".to_string());
    for (i, entry) in config.menu.iter().enumerate() {
        let suffix = if entry.opens_new_tab() {
            " (new tab)"
        } else {
            ""
        };
        lines.push(format!(
            "{} {} → {}{}",
            format_index(i + 1),
            entry.title,
            entry.link,
            suffix
        ));
    }

    lines.push(String::new());
    lines.push("Footer".to_string());
    lines.push(format!("{}{}", indent(1), config.footer_text));

    lines.push(String::new());
    lines.push("Analytics".to_string());
    lines.push(format!("{}{}", indent(1), config.analytics_id));
    lines
}

/// Print the site config listing to stdout.
pub fn print_config(config: &SiteConfig) {
    for line in format_config(config) {
        println!("{}", line);
    }
}

/// Format a comment batch: accepted comments, then rejects, then a summary.
///
/// Multi-line bodies are indented line by line under their header.
pub fn format_batch_report(report: &BatchReport) -> Vec<String> {
    let mut lines = Vec::new();

    if !report.comments.is_empty() {
        lines.push("Comments".to_string());
        for (i, comment) in report.comments.iter().enumerate() {
            lines.push(format!(
                "{} {} ({})",
                format_index(i + 1),
                comment.author_name(),
                comment.timestamp()
            ));
            for body_line in comment.body_text().lines() {
                lines.push(format!("{}{}", indent(1), body_line));
            }
        }
    }

    if !report.rejected.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Rejected".to_string());
        for rejection in &report.rejected {
            lines.push(format!("#{}: {}", rejection.index + 1, rejection.error));
        }
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Accepted {} of {} records",
        report.comments.len(),
        report.total()
    ));
    lines
}

/// Print a comment batch report to stdout.
pub fn print_batch_report(report: &BatchReport) {
    for line in format_batch_report(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::normalize_batch;
    use crate::config::{LinkTarget, MenuEntry};
    use serde_json::json;

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn config_lists_menu_in_order() {
        let lines = format_config(&SiteConfig::default());
        assert_eq!(lines[0], "JunJie");
        let menu_start = lines.iter().position(|l| l == "Menu").unwrap();
        assert_eq!(lines[menu_start + 1], "001 学习笔记 → /posts");
        assert_eq!(lines[menu_start + 2], "002 标签分类 → /tags");
        assert_eq!(lines[menu_start + 3], "003 存档记录 → /date");
    }

    #[test]
    fn config_marks_new_tab_links() {
        let mut config = SiteConfig::default();
        let github = MenuEntry::new("GitHub", "https://github.com", LinkTarget::Blank);
        config.menu.push(github);
        let lines = format_config(&config);
        assert!(lines.contains(&"004 GitHub → https://github.com (new tab)".to_string()));
    }

    #[test]
    fn config_omits_empty_description() {
        let mut config = SiteConfig::default();
        config.description.clear();
        let lines = format_config(&config);
        assert!(!lines.iter().any(|l| l.contains("Description:")));
    }

    #[test]
    fn config_shows_footer_and_analytics() {
        let lines = format_config(&SiteConfig::default());
        assert!(lines.contains(&"    谢谢你来 🦄".to_string()));
        assert!(lines.contains(&"    G-XXXXXXXXXX".to_string()));
    }

    #[test]
    fn batch_report_lists_comments_and_rejects() {
        let report = normalize_batch(&[
            json!({"author": "Jun", "text": "Nice post", "timestamp": "2024-01-05T10:00:00Z"}),
            json!({"author": "  ", "text": "hi", "timestamp": "2024-01-01T00:00:00Z"}),
        ]);
        let lines = format_batch_report(&report);
        assert_eq!(
            lines,
            vec![
                "Comments",
                "001 Jun (2024-01-05T10:00:00Z)",
                "    Nice post",
                "",
                "Rejected",
                "#2: empty field: authorName",
                "",
                "Accepted 1 of 2 records",
            ]
        );
    }

    #[test]
    fn batch_report_indents_multiline_bodies() {
        let report = normalize_batch(&[json!({
            "name": "Mei",
            "comment": "line one\nline two",
            "timestamp": "2024-02-01T00:00:00Z"
        })]);
        let lines = format_batch_report(&report);
        assert_eq!(lines[2], "    line one");
        assert_eq!(lines[3], "    line two");
    }

    #[test]
    fn empty_batch_report_is_summary_only() {
        let lines = format_batch_report(&BatchReport::default());
        assert_eq!(lines, vec!["Accepted 0 of 0 records"]);
    }
}
