use crate::config::INDEX_MARKER;
use crate::errors::Result;
use crate::models::quote::SymbolSpec;
use crate::models::snapshot::QuoteMap;
use chrono::NaiveDate;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// 首次运行时的 README 模板
pub const INDEX_TEMPLATE: &str = "# 📈 每日股票行情跟踪

自动收集美股和 A 股每日行情数据，生成 Markdown 报告。

## 数据源

- **美股**: Stooq (https://stooq.com)
- **A 股**: 新浪财经 (http://hq.sinajs.cn)

## 目录结构

```
stock-daily/
├── data/          # 原始 JSON 数据
├── reports/       # Markdown 报告
├── src/           # 数据收集程序
└── README.md      # 本文件
```

## 定时任务

每天 08:30 (Asia/Shanghai) 自动运行，更新数据并推送到 GitHub。

## 最新行情

";

/// 以 `## ` 标题开头的一节，`lines` 含标题行本身，保留原始换行
#[derive(Debug, Clone, PartialEq)]
struct Section {
    lines: Vec<String>,
}

impl Section {
    fn heading(&self) -> &str {
        self.lines.first().map(|l| l.trim_end()).unwrap_or("")
    }
}

/// 按二级标题切分的 Markdown 文档，可无损还原
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDocument {
    preamble: Vec<String>,
    sections: Vec<Section>,
}

fn is_section_heading(line: &str) -> bool {
    line.starts_with("## ")
}

fn is_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

impl IndexDocument {
    pub fn parse(content: &str) -> Self {
        let mut preamble = Vec::new();
        let mut sections: Vec<Section> = Vec::new();
        let mut in_fence = false;

        for line in content.split_inclusive('\n') {
            if is_fence(line) {
                in_fence = !in_fence;
            }

            if !in_fence && is_section_heading(line) {
                sections.push(Section {
                    lines: vec![line.to_string()],
                });
            } else if let Some(section) = sections.last_mut() {
                section.lines.push(line.to_string());
            } else {
                preamble.push(line.to_string());
            }
        }

        Self { preamble, sections }
    }

    pub fn headings(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.heading()).collect()
    }

    /// 在锚点标题行之后插入一段内容；没有锚点时在文末新建该节
    pub fn insert_after_marker(&mut self, marker: &str, entry: &str) {
        let marker = marker.trim_end();
        let entry = entry.to_string();

        if let Some(section) = self.sections.iter_mut().find(|s| s.heading() == marker) {
            if let Some(heading) = section.lines.first_mut() {
                if !heading.ends_with('\n') {
                    heading.push('\n');
                }
            }
            section.lines.insert(1, entry);
            return;
        }

        if !self.is_empty() {
            if let Some(last) = self.last_line_mut() {
                if !last.ends_with('\n') {
                    last.push('\n');
                }
            }
            self.push_line("\n");
        }
        self.sections.push(Section {
            lines: vec![format!("{}\n", marker), entry],
        });
    }

    fn is_empty(&self) -> bool {
        self.preamble.is_empty() && self.sections.is_empty()
    }

    fn last_line_mut(&mut self) -> Option<&mut String> {
        match self.sections.last_mut() {
            Some(section) => section.lines.last_mut(),
            None => self.preamble.last_mut(),
        }
    }

    fn push_line(&mut self, line: &str) {
        match self.sections.last_mut() {
            Some(section) => section.lines.push(line.to_string()),
            None => self.preamble.push(line.to_string()),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.preamble {
            out.push_str(line);
        }
        for section in &self.sections {
            for line in &section.lines {
                out.push_str(line);
            }
        }
        out
    }
}

/// 生成一天的摘要条目，缺失的指数直接省略
pub fn format_entry(
    date: NaiveDate,
    us_indices: &[SymbolSpec],
    cn_indices: &[SymbolSpec],
    us_quotes: &QuoteMap,
    cn_quotes: &QuoteMap,
) -> String {
    let line = |specs: &[SymbolSpec], quotes: &QuoteMap| -> String {
        specs
            .iter()
            .filter_map(|spec| {
                quotes
                    .get(&spec.display_name)
                    .map(|q| format!("{} {}", spec.short_name, q.close))
            })
            .collect::<Vec<_>>()
            .join(" | ")
    };

    format!(
        "### {}\n\n**美股**: {}\n\n**A 股**: {}\n\n---\n",
        date.format("%Y-%m-%d"),
        line(us_indices, us_quotes),
        line(cn_indices, cn_quotes)
    )
}

/// 维护项目根目录下的 README 行情索引
pub struct IndexUpdater {
    path: PathBuf,
    us_indices: Vec<SymbolSpec>,
    cn_indices: Vec<SymbolSpec>,
}

impl IndexUpdater {
    pub fn new(path: &Path, us_indices: &[SymbolSpec], cn_indices: &[SymbolSpec]) -> Self {
        Self {
            path: path.to_path_buf(),
            us_indices: us_indices.to_vec(),
            cn_indices: cn_indices.to_vec(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<IndexDocument> {
        if self.path.exists() {
            Ok(IndexDocument::parse(&fs::read_to_string(&self.path)?))
        } else {
            info!("{} 不存在，使用默认模板创建", self.path.display());
            Ok(IndexDocument::parse(INDEX_TEMPLATE))
        }
    }

    pub fn update(
        &self,
        date: NaiveDate,
        us_quotes: &QuoteMap,
        cn_quotes: &QuoteMap,
    ) -> Result<()> {
        let mut document = self.load()?;
        let entry = format_entry(date, &self.us_indices, &self.cn_indices, us_quotes, cn_quotes);
        document.insert_after_marker(INDEX_MARKER, &entry);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, document.render())?;

        info!("README 已更新: {}", self.path.display());
        Ok(())
    }
}
