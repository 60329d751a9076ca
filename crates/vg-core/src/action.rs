//! User-initiated actions on a session's inventory (context menu, list UI).

use serde::{Deserialize, Serialize};

use crate::model::ResourceRecord;

/// Page context menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuItem {
    #[serde(rename = "vg-download-all")]
    DownloadAll,
    #[serde(rename = "vg-copy-first")]
    CopyFirst,
    #[serde(other)]
    Unknown,
}

/// What the host should do in response to a menu click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    Download { url: String, filename: String },
    CopyUrl { url: String },
    /// More than one candidate: open the list UI instead of guessing.
    ShowList,
}

/// Maps a menu click to an action over `items` (already in list order).
///
/// "Download" takes the oldest record. "Copy" copies the only record, or
/// asks for the list when there are several. Nothing happens on an empty
/// session or an unknown menu item.
pub fn plan_menu_action(menu: MenuItem, items: &[ResourceRecord]) -> Option<Action> {
    let first = items.first()?;
    match menu {
        MenuItem::DownloadAll => Some(Action::Download {
            url: first.url.clone(),
            filename: first.filename.clone(),
        }),
        MenuItem::CopyFirst if items.len() > 1 => Some(Action::ShowList),
        MenuItem::CopyFirst => Some(Action::CopyUrl {
            url: first.url.clone(),
        }),
        MenuItem::Unknown => None,
    }
}

/// Formats a byte count the way the list UI shows it, e.g. `1.5 KB`, `12 MB`.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut n = bytes as f64;
    let mut i = 0;
    while n >= 1024.0 && i < UNITS.len() - 1 {
        n /= 1024.0;
        i += 1;
    }
    if n < 10.0 && i > 0 {
        format!("{:.1} {}", n, UNITS[i])
    } else {
        format!("{:.0} {}", n, UNITS[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Source;

    fn rec(url: &str, first_seen: i64) -> ResourceRecord {
        ResourceRecord {
            url: url.to_string(),
            filename: url.rsplit('/').next().unwrap().to_string(),
            content_type: None,
            size_bytes: None,
            source: Source::Network,
            first_seen,
        }
    }

    #[test]
    fn empty_session_has_no_action() {
        assert_eq!(plan_menu_action(MenuItem::DownloadAll, &[]), None);
        assert_eq!(plan_menu_action(MenuItem::CopyFirst, &[]), None);
    }

    #[test]
    fn download_takes_oldest() {
        let items = [rec("https://x.com/a.mp4", 1), rec("https://x.com/b.mp4", 2)];
        assert_eq!(
            plan_menu_action(MenuItem::DownloadAll, &items),
            Some(Action::Download {
                url: "https://x.com/a.mp4".into(),
                filename: "a.mp4".into()
            })
        );
    }

    #[test]
    fn copy_single_or_show_list() {
        let one = [rec("https://x.com/a.mp4", 1)];
        assert_eq!(
            plan_menu_action(MenuItem::CopyFirst, &one),
            Some(Action::CopyUrl {
                url: "https://x.com/a.mp4".into()
            })
        );
        let two = [rec("https://x.com/a.mp4", 1), rec("https://x.com/b.mp4", 2)];
        assert_eq!(plan_menu_action(MenuItem::CopyFirst, &two), Some(Action::ShowList));
    }

    #[test]
    fn unknown_menu_item() {
        let one = [rec("https://x.com/a.mp4", 1)];
        assert_eq!(plan_menu_action(MenuItem::Unknown, &one), None);
        let parsed: MenuItem = serde_json::from_str(r#""vg-something-else""#).unwrap();
        assert_eq!(parsed, MenuItem::Unknown);
    }

    #[test]
    fn human_size_units() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(1024), "1.0 KB");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(10 * 1024), "10 KB");
        assert_eq!(human_size(5 * 1024 * 1024 * 1024), "5.0 GB");
        assert_eq!(human_size(3000 * 1024u64.pow(4)), "3000 TB");
    }

    #[test]
    fn action_json_shape() {
        let v = serde_json::to_value(Action::CopyUrl {
            url: "https://x.com/a".into(),
        })
        .unwrap();
        assert_eq!(v["type"], "copyUrl");
        assert_eq!(v["url"], "https://x.com/a");
    }
}
