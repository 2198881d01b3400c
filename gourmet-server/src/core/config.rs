/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (启动时先加载 `.env`)：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 日志目录，存在时按天滚动写文件 |
/// | LOG_JSON | false | JSON 格式日志 |
/// | MENU_PATH | (未设置) | 菜单 JSON 路径，未设置时使用内置菜单 |
/// | OPENAI_API_KEY | (未设置) | 未设置时助手只走本地解析 |
/// | OPENAI_BASE_URL | https://api.openai.com/v1 | 兼容 OpenAI 的接口地址 |
/// | OPENAI_MODEL | gpt-4 | 模型 |
/// | COMPLETION_TEMPERATURE | 0.7 | 采样温度 |
/// | COMPLETION_MAX_TOKENS | 1000 | 回复上限 |
/// | REQUEST_TIMEOUT_MS | 30000 | 外部请求超时(毫秒) |
/// | MAX_TRANSCRIPT_MESSAGES | 20 | 发送给模型的历史消息条数 |
/// | SESSION_IDLE_TIMEOUT_SECS | 3600 | 空闲会话回收时间 |
/// | TAX_RATE_PERCENT | 8 | 结账税率 (%) |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 OPENAI_API_KEY=sk-... cargo run -p gourmet-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub log_json: bool,
    /// 菜单数据文件 (覆盖内置菜单)
    pub menu_path: Option<String>,

    // === 助手 ===
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub completion_temperature: f32,
    pub completion_max_tokens: u32,
    /// 外部请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 每轮发送给模型的最近消息条数
    pub max_transcript_messages: usize,

    // === 会话 / 结账 ===
    pub session_idle_timeout_secs: u64,
    pub tax_rate_percent: f64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: non_empty_var("LOG_DIR"),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            menu_path: non_empty_var("MENU_PATH"),

            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".into()),
            openai_model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4".into()),
            completion_temperature: std::env::var("COMPLETION_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.7),
            completion_max_tokens: std::env::var("COMPLETION_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            max_transcript_messages: std::env::var("MAX_TRANSCRIPT_MESSAGES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),

            session_idle_timeout_secs: std::env::var("SESSION_IDLE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            tax_rate_percent: std::env::var("TAX_RATE_PERCENT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8.0),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(http_port: u16, openai_api_key: Option<String>) -> Self {
        let mut config = Self::from_env();
        config.http_port = http_port;
        config.openai_api_key = openai_api_key;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
