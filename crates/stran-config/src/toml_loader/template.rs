//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# S-Tran Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[translator]
# OpenAI API key used for in-page translation. Translation stays off until set.
api_key = ""
# Target language: ko, en, ja, zh, es, fr, de
target_language = "ko"
# model = "gpt-4o-mini"
# endpoint = "https://api.openai.com/v1/chat/completions"
# timeout_secs = 30        # 1-300

[window]
# x = 100
# y = 100
# width = 800              # 200-10000
# height = 600             # 200-10000
# cascade_offset = 20      # 0-200, shift for windows opened from another window

[browser]
# home_url = "about:blank"
# new_window_target = "tab"   # tab, background_tab, window

[logging]
# level = "info"           # trace, debug, info, warn, error
"##
    .to_string()
}
