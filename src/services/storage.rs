use crate::errors::Result;
use crate::models::snapshot::MarketSnapshot;
use chrono::NaiveDate;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// 按日期保存 JSON 快照和 Markdown 报告，同一天重复运行会覆盖
pub struct SnapshotStore {
    data_dir: PathBuf,
    reports_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(data_dir: &Path, reports_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            reports_dir: reports_dir.to_path_buf(),
        }
    }

    pub fn snapshot_path(&self, date: NaiveDate) -> PathBuf {
        self.data_dir.join(format!("{}.json", date.format("%Y-%m-%d")))
    }

    pub fn report_path(&self, date: NaiveDate) -> PathBuf {
        self.reports_dir.join(format!("{}.md", date.format("%Y-%m-%d")))
    }

    /// 保存原始数据到 JSON，失败的新闻条目也一并保存
    pub fn save_snapshot(&self, snapshot: &MarketSnapshot) -> Result<PathBuf> {
        fs::create_dir_all(&self.data_dir)?;

        let path = self.snapshot_path(snapshot.date);
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&path, json)?;

        info!("数据已保存到 {}", path.display());
        Ok(path)
    }

    pub fn save_report(&self, date: NaiveDate, report: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.reports_dir)?;

        let path = self.report_path(date);
        fs::write(&path, report)?;

        info!("报告已生成: {}", path.display());
        Ok(path)
    }

    pub fn load_snapshot(&self, date: NaiveDate) -> Result<MarketSnapshot> {
        let content = fs::read_to_string(self.snapshot_path(date))?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::news::{NewsBundle, NewsItem};
    use crate::models::quote::QuoteRecord;
    use crate::models::snapshot::QuoteMap;
    use chrono::DateTime;
    use tempfile::TempDir;

    fn snapshot(close: &str) -> MarketSnapshot {
        let mut cn = QuoteMap::new();
        cn.insert(
            "上证指数".to_string(),
            QuoteRecord {
                display_name: "上证指数".to_string(),
                symbol: "sh000001".to_string(),
                date: Some("2026-02-13".to_string()),
                close: close.to_string(),
                open: "3290.12".to_string(),
                high: "3320.55".to_string(),
                low: "3285.41".to_string(),
                volume: None,
                change_percent: Some("+1.00%".to_string()),
            },
        );
        MarketSnapshot {
            date: NaiveDate::from_ymd_opt(2026, 2, 14).unwrap(),
            captured_at: DateTime::parse_from_rfc3339("2026-02-14T08:30:00+08:00").unwrap(),
            us_quotes: QuoteMap::new(),
            cn_quotes: cn,
            news: NewsBundle {
                us: vec![NewsItem::failure("HTTP 500")],
                ..Default::default()
            },
        }
    }

    fn store(dir: &TempDir) -> SnapshotStore {
        SnapshotStore::new(&dir.path().join("data"), &dir.path().join("reports"))
    }

    #[test]
    fn test_snapshot_keeps_non_ascii_and_failures() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let path = store.save_snapshot(&snapshot("3312.80")).unwrap();

        assert!(path.ends_with("data/2026-02-14.json"));
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"上证指数\""));
        assert!(raw.contains("获取失败：HTTP 500"));
        assert!(raw.contains("\"timestamp\": \"2026-02-14T08:30:00+08:00\""));
        assert!(raw.contains("\"us_stocks\": {}"));

        let loaded = store.load_snapshot(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()).unwrap();
        assert_eq!(loaded, snapshot("3312.80"));
    }

    #[test]
    fn test_same_date_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save_snapshot(&snapshot("3300.00")).unwrap();
        store.save_snapshot(&snapshot("3312.80")).unwrap();

        let loaded = store.load_snapshot(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()).unwrap();
        assert_eq!(loaded.cn_close("上证指数"), Some("3312.80"));
        assert_eq!(fs::read_dir(dir.path().join("data")).unwrap().count(), 1);
    }

    #[test]
    fn test_save_report() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let date = NaiveDate::from_ymd_opt(2026, 2, 14).unwrap();
        let path = store.save_report(date, "# 📈 每日股票行情 | 2026-02-14\n").unwrap();

        assert!(path.ends_with("reports/2026-02-14.md"));
        assert_eq!(fs::read_to_string(path).unwrap(), "# 📈 每日股票行情 | 2026-02-14\n");
    }
}
