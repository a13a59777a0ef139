//! The process-wide site config as seen from outside the crate.

use site_content::config::{self, ConfigError, LinkTarget, MenuEntry, SiteConfig};

#[test]
fn load_config_twice_returns_same_config() {
    let first = config::load_config().unwrap();
    let second = config::load_config().unwrap();
    assert_eq!(first, second);
    let titles: Vec<&str> = first.menu.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["学习笔记", "标签分类", "存档记录"]);
}

#[test]
fn top_target_fails_validation() {
    let mut candidate = SiteConfig::default();
    candidate.menu.push(MenuEntry {
        title: "Top".to_string(),
        link: "/".to_string(),
        target: "_top".to_string(),
    });
    match candidate.validated() {
        Err(ConfigError::Validation { field, .. }) => assert_eq!(field, "menu[3].target"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn built_in_menu_opens_in_same_tab() {
    let site = config::load_config().unwrap();
    for entry in &site.menu {
        assert_eq!(entry.link_target(), Ok(LinkTarget::SelfTab));
    }
}
