/// 无法计算或缺失时的占位符
pub const PLACEHOLDER: &str = "-";

/// 摘要最大字符数
pub const SNIPPET_MAX_CHARS: usize = 200;
pub const ELLIPSIS: &str = "...";

fn parse_number(value: &str) -> Option<f64> {
    let cleaned: String = value.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 计算涨跌幅，形如 "+1.23%" / "-0.45%"
///
/// 昨收为 0 或任一数值无法解析时返回占位符。
pub fn change_percent(current: &str, prev: &str) -> String {
    let (curr, prev) = match (parse_number(current), parse_number(prev)) {
        (Some(c), Some(p)) => (c, p),
        _ => return PLACEHOLDER.to_string(),
    };
    if prev == 0.0 {
        return PLACEHOLDER.to_string();
    }

    let change = (curr - prev) / prev * 100.0;
    if !change.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{:+.2}%", change)
}

/// 超过 200 个字符的摘要截断并追加省略号
pub fn truncate_snippet(text: &str) -> String {
    if text.chars().count() <= SNIPPET_MAX_CHARS {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(SNIPPET_MAX_CHARS).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// 美股个股价格加 "$" 前缀
pub fn dollar(value: &str) -> String {
    if value.is_empty() || value == PLACEHOLDER {
        PLACEHOLDER.to_string()
    } else {
        format!("${}", value)
    }
}

/// 空字段显示为占位符
pub fn or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() {
        PLACEHOLDER
    } else {
        value
    }
}
