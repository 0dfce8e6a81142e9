// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认）、中文、俄文,仅影响展示文本
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"en" / "zh-CN" / "ru"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 可用语言列表
pub fn available_locales() -> Vec<String> {
    let mut locales: Vec<String> = rust_i18n::available_locales!()
        .into_iter()
        .map(|l| l.to_string())
        .collect();
    locales.sort();
    locales
}

/// 翻译消息（无参数）
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use record_moderation::i18n::t_with_args;
/// let msg = t_with_args("moderation.cancelled", &[("record", "comment#1")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModerationStatus;
    use std::sync::Mutex;

    // rust-i18n 的 locale 为全局状态，且测试默认并行执行；这里串行化。
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_available_locales() {
        let locales = available_locales();
        assert!(locales.contains(&"en".to_string()));
        assert!(locales.contains(&"zh-CN".to_string()));
        assert!(locales.contains(&"ru".to_string()));
    }

    #[test]
    fn test_status_labels_follow_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();

        set_locale("zh-CN");
        assert_eq!(ModerationStatus::Approved.localized_label(), "已通过");

        set_locale("ru");
        assert_eq!(ModerationStatus::Rejected.localized_label(), "Отклонено");

        set_locale("en");
        assert_eq!(ModerationStatus::Postponed.localized_label(), "Postponed");
    }

    #[test]
    fn test_canonical_label_independent_of_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();

        set_locale("zh-CN");
        assert_eq!(ModerationStatus::Pending.label(), "Pending");
        set_locale("en");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();

        set_locale("en");
        let msg = t_with_args("moderation.cancelled", &[("record", "comment#7")]);
        assert_eq!(msg, "Moderation of comment#7 was cancelled");

        set_locale("zh-CN");
        let msg = t_with_args("moderation.cancelled", &[("record", "comment#7")]);
        assert!(msg.contains("comment#7"));
        assert!(msg.contains("取消"));

        set_locale("en");
    }
}
