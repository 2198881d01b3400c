//! Gourmet Delights 自助点餐服务
//!
//! # 架构概述
//!
//! 顾客在菜单页面直接加减菜品，或者用自然语言和点单助手对话。
//! 明确的修改请求 ("add 2 bruschetta") 在本地解析并直接修改购物车；
//! 其余内容交给文本生成服务，回复中的 `ACTION:` 指令被解析、校验后执行，
//! 并从展示文本中删除。
//!
//! # 模块结构
//!
//! ```text
//! gourmet-server/src/
//! ├── core/          # 配置、状态、错误、后台任务
//! ├── api/           # HTTP 路由和处理器
//! ├── catalog/       # 只读菜单
//! ├── cart/          # 购物车
//! ├── resolver.rs    # 菜名匹配
//! ├── intent/        # 本地修改意图解析
//! ├── applicator/    # 执行修改命令
//! ├── directive.rs   # 助手回复中的 ACTION 指令
//! ├── preferences.rs # 人数/饮食/预算/过敏信息
//! ├── advisor/       # 订单分析和过敏原汇总
//! ├── assistant/     # 对话流程和文本生成接口
//! ├── session/       # 内存会话存储
//! └── utils/         # 工具函数
//! ```

pub mod advisor;
pub mod api;
pub mod applicator;
pub mod assistant;
pub mod cart;
pub mod catalog;
pub mod core;
pub mod directive;
pub mod intent;
pub mod preferences;
pub mod resolver;
pub mod session;
pub mod utils;

// Re-export 公共类型
pub use assistant::{AssistantPipeline, CompletionProvider, TurnOutcome};
pub use catalog::Catalog;
pub use core::{Config, Server, ServerState};
pub use session::{Session, SessionStore};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境：加载 `.env`，按配置初始化日志
pub fn setup_environment() -> Config {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );
    config
}

pub fn print_banner() {
    println!(
        r#"
   ______                                    __
  / ____/___  __  ___________ ___  ___  ____/ /_
 / / __/ __ \/ / / / ___/ __ `__ \/ _ \/ __/ __/
/ /_/ / /_/ / /_/ / /  / / / / / /  __/ /_/ /_
\____/\____/\__,_/_/  /_/ /_/ /_/\___/\__/\__/
    "#
    );
}
