use crate::config::{ClientConfig, SiteConfig};
use crate::site::Site;
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use scenefetch_lftp::DirectoryEntry;
use scenefetch_parser::MediaParser;

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2015, 4, 27, 12, 0, 0).unwrap()
}

pub fn make_entry(name: &str, age: Duration) -> DirectoryEntry {
    let created: DateTime<FixedOffset> = (now() - age).into();
    DirectoryEntry::new(name, created)
}

pub fn make_symlink(name: &str) -> DirectoryEntry {
    DirectoryEntry {
        is_symlink: true,
        ..make_entry(name, Duration::zero())
    }
}

pub fn make_site_config() -> SiteConfig {
    SiteConfig {
        name: "foo".to_string(),
        dir: "/misc".to_string(),
        max_age: Some("24h".to_string()),
        patterns: vec![r"dir\d".to_string()],
        filters: vec!["^incomplete-".to_string()],
        skip_symlinks: true,
        parser: MediaParser::Default,
        local_dir: "/tmp/".to_string(),
        ..Default::default()
    }
}

pub fn make_test_site() -> Site {
    Site::compile(&make_site_config(), &ClientConfig::default()).unwrap()
}
