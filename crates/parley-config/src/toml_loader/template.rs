//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Parley Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# API keys are read from the environment (or a .env file), never from here.

[session]
# context_window = 10       # 1-200 stored messages per prompt
# max_tool_rounds = 5       # 1-20
# persona = """
# You are a Senior Software Engineer and Senior Technical Mentor.
# """

[models]
# active = "gpt-4o"         # gpt-4o, gemini-flash

[models.openai]
# model = "gpt-4o-mini"
# base_url = "https://api.openai.com/v1"
# credential_env = "OPENAI_API_KEY"
# max_tokens = 4096
# temperature = 0.7         # 0.0-2.0
# tools = true

[models.gemini]
# model = "gemini-flash-latest"
# base_url = "https://generativelanguage.googleapis.com/v1beta/models"
# credential_env = "GOOGLE_API_KEY"
# max_tokens = 4096
# temperature = 0.7
# tools = true

[storage]
# path = ""                 # empty = <data dir>/parley/chat_history.db

[timeouts]
# backend_secs = 30         # 1-300
# tool_secs = 15            # 1-300

[tools.weather]
# enabled = true
# base_url = "https://wttr.in"

[tools.quote]
# enabled = true
# base_url = "https://query1.finance.yahoo.com"

[logging]
# level = "info"            # trace, debug, info, warn, error
"##
    .to_string()
}
